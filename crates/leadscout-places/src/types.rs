//! Wire types for the places web service.
//!
//! Both endpoints wrap their payload in an envelope carrying a `status`
//! string; the client maps `"OK"` to the payload, `"ZERO_RESULTS"` to an
//! empty set, and everything else to an error.

use leadscout_core::Place;
use serde::Deserialize;

/// Envelope of the text-search endpoint.
#[derive(Debug, Deserialize)]
pub struct TextSearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<PlaceSummary>,
    pub error_message: Option<String>,
}

/// One text-search hit. Only the identifier is needed; everything else
/// comes from the per-place details request.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceSummary {
    pub place_id: String,
    pub name: Option<String>,
}

/// Envelope of the details endpoint.
#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub status: String,
    pub result: Option<PlaceResult>,
    pub error_message: Option<String>,
}

/// The details payload, restricted to the requested field allow-list.
#[derive(Debug, Deserialize)]
pub struct PlaceResult {
    pub place_id: String,
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub formatted_phone_number: Option<String>,
    pub international_phone_number: Option<String>,
    pub website: Option<String>,
    pub business_status: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub photos: Vec<PlacePhoto>,
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
pub struct PlacePhoto {
    pub photo_reference: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl PlaceResult {
    /// Convert the wire shape into the internal [`Place`] shape.
    #[must_use]
    pub fn into_place(self) -> Place {
        let location = self.geometry.and_then(|g| g.location);
        Place {
            place_id: self.place_id,
            name: self.name.unwrap_or_default(),
            rating: self.rating,
            review_count: self.user_ratings_total,
            national_phone: self.formatted_phone_number,
            international_phone: self.international_phone_number,
            website: self.website,
            business_status: self.business_status,
            categories: self.types,
            address: self.formatted_address,
            photo_references: self
                .photos
                .into_iter()
                .filter_map(|p| p.photo_reference)
                .filter(|r| !r.is_empty())
                .collect(),
            latitude: location.as_ref().map(|l| l.lat),
            longitude: location.map(|l| l.lng),
        }
    }
}
