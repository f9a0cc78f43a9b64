//! Error types for the deal map services.

use thiserror::Error;

/// Result type alias using DealMapError.
pub type DealMapResult<T> = Result<T, DealMapError>;

/// Primary error type for deal map operations.
#[derive(Debug, Error)]
pub enum DealMapError {
    // === CRM Errors ===
    #[error("CRM request failed: {0}")]
    CrmRequest(String),

    #[error("CRM returned status {status}: {message}")]
    CrmStatus { status: u16, message: String },

    #[error("Failed to decode CRM response: {0}")]
    CrmDecode(String),

    // === Data Errors ===
    #[error("Invalid boundary data: {0}")]
    BoundaryDecode(String),

    // === Configuration Errors ===
    #[error("Invalid configuration for '{field}': {message}")]
    InvalidConfig { field: String, message: String },

    #[error("Missing configuration value: {0}")]
    MissingConfig(String),

    // === Infrastructure Errors ===
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DealMapError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            DealMapError::CrmRequest(_) | DealMapError::CrmStatus { .. } => 502,
            DealMapError::CrmDecode(_) => 502,
            DealMapError::MissingConfig(_) => 503,
            _ => 500,
        }
    }
}

impl From<std::io::Error> for DealMapError {
    fn from(err: std::io::Error) -> Self {
        DealMapError::Io(err.to_string())
    }
}
