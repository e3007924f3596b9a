//! Application configuration shape.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

/// Fully-resolved application configuration.
///
/// Built from environment variables by [`crate::config::load_app_config`].
/// `places_api_key` is deliberately optional: pipeline-only commands work
/// without it, and search surfaces its absence as a configuration error
/// instead of failing at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub log_level: String,
    pub places_api_key: Option<String>,

    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,

    /// Per-call deadline for provider requests. A hung provider call fails
    /// the search after this many seconds instead of stalling forever.
    pub places_request_timeout_secs: u64,

    /// Geographic bias for text search: center and radius in meters.
    pub search_bias_latitude: f64,
    pub search_bias_longitude: f64,
    pub search_bias_radius_m: u32,
}
