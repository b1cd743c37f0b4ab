//! Error types for pointmap crates.

use thiserror::Error;

/// Result type alias using PointMapError.
pub type PointMapResult<T> = Result<T, PointMapError>;

/// Primary error type for loading data and applying viewer controls.
#[derive(Debug, Error)]
pub enum PointMapError {
    // === Control Errors ===
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // === Load Errors ===
    #[error("Data request failed with HTTP status {status}")]
    FetchFailed { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Data source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    // === Infrastructure Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PointMapError {
    /// True for the errors that abort a dataset load.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            PointMapError::FetchFailed { .. }
                | PointMapError::Network(_)
                | PointMapError::SourceUnavailable(_)
                | PointMapError::MalformedPayload(_)
        )
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            PointMapError::InvalidParameter { .. } => 400,
            PointMapError::FetchFailed { .. }
            | PointMapError::Network(_)
            | PointMapError::SourceUnavailable(_)
            | PointMapError::MalformedPayload(_) => 502,
            _ => 500,
        }
    }
}

impl From<serde_json::Error> for PointMapError {
    fn from(err: serde_json::Error) -> Self {
        PointMapError::MalformedPayload(format!("JSON error: {}", err))
    }
}
