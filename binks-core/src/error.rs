//! Error types for the Binks domain.

/// Main error type for Binks domain operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BinksError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{provider} wallet not found, install it from {install_url}")]
    ProviderUnavailable {
        provider: String,
        install_url: String,
    },

    #[error("Wallet connection rejected: {0}")]
    ProviderRejected(String),

    #[error("Session persistence error: {0}")]
    Persistence(String),

    #[error("No wallet connected")]
    NotConnected,

    #[error("Service error: {0}")]
    Service(String),
}

impl BinksError {
    /// Shorthand for a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether the caller supplied bad input (as opposed to an environment failure)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<serde_json::Error> for BinksError {
    fn from(err: serde_json::Error) -> Self {
        Self::Persistence(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for BinksError {
    fn from(err: std::io::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Result type alias for Binks domain operations
pub type Result<T> = std::result::Result<T, BinksError>;
