//! HTTP client for the places web service.
//!
//! Wraps `reqwest` with provider-specific error handling, API key
//! management, and typed envelope deserialization. Both endpoints report
//! outcome through a `status` field; [`PlacesClient`] maps `"OK"` to the
//! payload, `"ZERO_RESULTS"` to an empty set, and anything else to
//! [`PlacesError::ApiStatus`].

use std::time::Duration;

use reqwest::{Client, Url};

use leadscout_core::{AppConfig, Place};

use crate::error::PlacesError;
use crate::types::{DetailsResponse, PlaceSummary, TextSearchResponse};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

/// Field allow-list for details requests: exactly what the qualification
/// engine and the pipeline need, nothing more.
const DETAIL_FIELDS: &str = "place_id,name,rating,user_ratings_total,\
formatted_phone_number,international_phone_number,website,business_status,\
types,formatted_address,photos,geometry";

/// Width requested when resolving a photo reference into an image URL.
const PHOTO_MAX_WIDTH: u32 = 400;

/// Geographic bias applied to every text search: center plus radius.
#[derive(Debug, Clone, Copy)]
pub struct SearchBias {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_m: u32,
}

impl SearchBias {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            latitude: config.search_bias_latitude,
            longitude: config.search_bias_longitude,
            radius_m: config.search_bias_radius_m,
        }
    }
}

/// Client for the places web service.
///
/// Use [`PlacesClient::from_config`] in production or
/// [`PlacesClient::with_base_url`] to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
    bias: SearchBias,
}

impl PlacesClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Unconfigured`] when no API key is set — the
    /// caller surfaces this as a setup problem rather than a search
    /// failure. Returns [`PlacesError::Http`] if the HTTP client cannot be
    /// constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, PlacesError> {
        let api_key = config
            .places_api_key
            .as_deref()
            .ok_or(PlacesError::Unconfigured)?;
        Self::new(
            api_key,
            config.places_request_timeout_secs,
            SearchBias::from_config(config),
        )
    }

    /// Creates a new client pointed at the production places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, bias: SearchBias) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, bias, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        bias: SearchBias,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("leadscout/0.1 (lead-acquisition)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // joining endpoint paths appends rather than replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidUrl {
            context: format!("base URL '{base_url}'"),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            bias,
        })
    }

    /// Text search biased toward the configured center and radius.
    ///
    /// A `ZERO_RESULTS` provider status is an empty result set, not an
    /// error.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiStatus`] for any other non-`OK` status.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn text_search(&self, query: &str) -> Result<Vec<PlaceSummary>, PlacesError> {
        let location = format!("{},{}", self.bias.latitude, self.bias.longitude);
        let radius = self.bias.radius_m.to_string();
        let url = self.build_url(
            "textsearch/json",
            &[("query", query), ("location", &location), ("radius", &radius)],
        )?;

        let body = self
            .request_json(&url, &format!("textsearch(query={query})"))
            .await?;
        let envelope: TextSearchResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("textsearch(query={query})"),
                source: e,
            })?;

        match envelope.status.as_str() {
            "OK" => Ok(envelope.results),
            "ZERO_RESULTS" => Ok(Vec::new()),
            _ => Err(status_error(envelope.status, envelope.error_message)),
        }
    }

    /// Fetch details for one place, requesting only the qualification
    /// field allow-list.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiStatus`] if the provider reports a non-`OK`
    ///   status for this place.
    /// - [`PlacesError::MissingResult`] if the status is `OK` but no
    ///   payload is present.
    /// - [`PlacesError::Http`] / [`PlacesError::Deserialize`] on transport
    ///   or shape failures.
    pub async fn place_details(&self, place_id: &str) -> Result<Place, PlacesError> {
        let url = self.build_url(
            "details/json",
            &[("place_id", place_id), ("fields", DETAIL_FIELDS)],
        )?;

        let body = self
            .request_json(&url, &format!("details(place_id={place_id})"))
            .await?;
        let envelope: DetailsResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("details(place_id={place_id})"),
                source: e,
            })?;

        if envelope.status != "OK" {
            return Err(status_error(envelope.status, envelope.error_message));
        }

        envelope
            .result
            .map(crate::types::PlaceResult::into_place)
            .ok_or_else(|| PlacesError::MissingResult {
                place_id: place_id.to_owned(),
            })
    }

    /// Resolve a photo reference into a displayable image URL.
    ///
    /// Returns `None` for an empty reference or when the URL cannot be
    /// built — photo resolution degrades to "no image" instead of failing
    /// the caller.
    #[must_use]
    pub fn photo_url(&self, photo_reference: &str) -> Option<String> {
        if photo_reference.trim().is_empty() {
            return None;
        }
        let max_width = PHOTO_MAX_WIDTH.to_string();
        self.build_url(
            "photo",
            &[("maxwidth", &max_width), ("photo_reference", photo_reference)],
        )
        .ok()
        .map(String::from)
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters. The API key is always appended last.
    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| PlacesError::InvalidUrl {
                context: endpoint.to_owned(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] on network failure or a non-2xx
    /// status. Returns [`PlacesError::Deserialize`] if the body is not
    /// valid JSON.
    async fn request_json(&self, url: &Url, context: &str) -> Result<serde_json::Value, PlacesError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// Fold the provider's status and optional error message into one
/// user-presentable string.
fn status_error(status: String, error_message: Option<String>) -> PlacesError {
    match error_message {
        Some(message) if !message.is_empty() => {
            PlacesError::ApiStatus(format!("{status}: {message}"))
        }
        _ => PlacesError::ApiStatus(status),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
