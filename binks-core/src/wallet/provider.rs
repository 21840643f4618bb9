//! Wallet provider capability.
//!
//! A provider is the injected browser extension. Its internals are opaque:
//! the store only asks whether it is present and for the account address.

use async_trait::async_trait;

use super::session::ProviderKind;

/// Failures reported by a provider
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    /// The user declined the authorization prompt
    #[error("User rejected the request: {0}")]
    Rejected(String),

    /// The provider answered without any account
    #[error("Provider returned no accounts")]
    NoAccounts,

    /// Any other provider failure
    #[error("Provider error: {0}")]
    Failed(String),
}

/// Account details returned by a successful connection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProviderAccount {
    pub address: String,
    pub chain_id: Option<String>,
    /// Formatted native balance, if the provider reports one
    pub balance: Option<String>,
}

impl ProviderAccount {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }
}

/// Host-controlled wallet capability
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Which extension this is
    fn kind(&self) -> ProviderKind;

    /// Whether the extension is installed in the host
    fn is_available(&self) -> bool;

    /// Ask the user to authorize an account
    async fn request_account(&self) -> Result<ProviderAccount, ProviderError>;

    /// Tell the extension to drop its connection.
    ///
    /// Providers without a disconnect call keep the default no-op.
    async fn disconnect(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
