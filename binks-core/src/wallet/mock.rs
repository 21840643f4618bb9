//! Mock wallet provider for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use super::provider::{ProviderAccount, ProviderError, WalletProvider};
use super::session::ProviderKind;

/// Scripted provider.
///
/// Configurable availability and answer for unit tests and local demos.
pub struct MockProvider {
    kind: ProviderKind,
    available: AtomicBool,
    response: Result<ProviderAccount, ProviderError>,
    request_count: AtomicU32,
    disconnect_count: AtomicU32,
}

impl MockProvider {
    /// Create an installed provider that grants `address`
    pub fn new(kind: ProviderKind, address: impl Into<String>) -> Self {
        Self {
            kind,
            available: AtomicBool::new(true),
            response: Ok(ProviderAccount::new(address)),
            request_count: AtomicU32::new(0),
            disconnect_count: AtomicU32::new(0),
        }
    }

    /// Provider whose extension is not installed
    pub fn missing(kind: ProviderKind) -> Self {
        Self::new(kind, "").with_available(false)
    }

    /// Provider whose user declines the prompt
    pub fn rejecting(kind: ProviderKind) -> Self {
        Self::new(kind, "").with_error(ProviderError::Rejected(
            "User denied account authorization".into(),
        ))
    }

    pub fn with_available(self, available: bool) -> Self {
        self.available.store(available, Ordering::SeqCst);
        self
    }

    pub fn with_account(mut self, account: ProviderAccount) -> Self {
        self.response = Ok(account);
        self
    }

    pub fn with_error(mut self, error: ProviderError) -> Self {
        self.response = Err(error);
        self
    }

    /// Number of account requests received
    pub fn request_count(&self) -> u32 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Number of disconnect calls received
    pub fn disconnect_count(&self) -> u32 {
        self.disconnect_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WalletProvider for MockProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn request_account(&self) -> Result<ProviderAccount, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }

    async fn disconnect(&self) -> Result<(), ProviderError> {
        self.disconnect_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
