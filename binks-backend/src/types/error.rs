//! Error types for the Binks backend

use binks_core::BinksError;
use hyper::StatusCode;

/// Main error type for backend operations
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BackendError {
    /// Convert error to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BinksError> for BackendError {
    fn from(err: BinksError) -> Self {
        match err {
            BinksError::Validation(msg) => Self::BadRequest(msg),
            BinksError::NotConnected
            | BinksError::ProviderUnavailable { .. }
            | BinksError::ProviderRejected(_) => Self::BadRequest(err.to_string()),
            BinksError::Persistence(_) | BinksError::Service(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        Self::BadRequest(format!("JSON error: {}", err))
    }
}

impl From<serde_urlencoded::de::Error> for BackendError {
    fn from(err: serde_urlencoded::de::Error) -> Self {
        Self::BadRequest(format!("Query error: {}", err))
    }
}

/// Result type alias for backend operations
pub type Result<T> = std::result::Result<T, BackendError>;
