//! Error types for wayfinder

use thiserror::Error;

/// Result type alias using WayfinderError
pub type Result<T> = std::result::Result<T, WayfinderError>;

/// Error type alias for convenience
pub type Error = WayfinderError;

/// Exit codes for CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const SERVICE_ERROR: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
}

/// Main error type for wayfinder
#[derive(Debug, Error)]
pub enum WayfinderError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl WayfinderError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput(_) => exit_codes::INVALID_INPUT,
            Self::Embedding(_) | Self::Generation(_) | Self::StoreUnavailable(_) => {
                exit_codes::SERVICE_ERROR
            }
            _ => exit_codes::GENERAL_ERROR,
        }
    }
}
