use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod lead;
pub mod place;
pub mod qualify;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use lead::{LeadScore, LeadStatus, QualifiedLead};
pub use place::Place;
pub use qualify::{qualify, score, whatsapp_number, MIN_REVIEW_COUNT};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid lead status: {0}")]
    InvalidStatus(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
