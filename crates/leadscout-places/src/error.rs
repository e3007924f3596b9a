use thiserror::Error;

/// Errors returned by the place-search provider client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// No API key configured. Surfaced as a setup problem, distinct from a
    /// transient provider failure.
    #[error("no places API key configured; set GOOGLE_PLACES_API_KEY to enable search")]
    Unconfigured,

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned a non-success, non-zero-results status.
    #[error("places API error: {0}")]
    ApiStatus(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A details response reported success but carried no place payload.
    #[error("places API returned no result for place {place_id}")]
    MissingResult { place_id: String },

    /// A request URL could not be constructed.
    #[error("invalid places URL for {context}: {reason}")]
    InvalidUrl { context: String, reason: String },
}
