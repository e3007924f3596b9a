//! The internal place shape shared across the workspace.
//!
//! Provider crates normalize their wire formats into [`Place`]; the
//! qualification engine and the pipeline coordinator only ever see this
//! shape, never raw provider JSON.

use serde::{Deserialize, Serialize};

/// Provider business status literal for a place that is currently operating.
pub const BUSINESS_STATUS_OPERATIONAL: &str = "OPERATIONAL";

/// A business record fetched from the place-search provider.
///
/// All enrichment fields are optional — providers routinely omit rating,
/// phone numbers, or photos for sparse listings. Consumers must not assume
/// any field beyond `place_id` and `name` is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// External place identifier; the natural key for pipeline dedup.
    pub place_id: String,
    pub name: String,
    /// Star rating on the provider's 0–5 scale.
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub national_phone: Option<String>,
    pub international_phone: Option<String>,
    pub website: Option<String>,
    /// Provider literal, e.g. `"OPERATIONAL"` or `"CLOSED_PERMANENTLY"`.
    pub business_status: Option<String>,
    /// Category tags, most specific first.
    pub categories: Vec<String>,
    pub address: Option<String>,
    pub photo_references: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Place {
    /// Whether the provider reports this business as currently operating.
    #[must_use]
    pub fn is_operational(&self) -> bool {
        self.business_status.as_deref() == Some(BUSINESS_STATUS_OPERATIONAL)
    }
}
