//! Wallet session store: connect, disconnect and read the current session.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::provider::{ProviderError, WalletProvider};
use super::repository::SessionRepository;
use super::session::WalletSession;
use crate::error::{BinksError, Result};

/// Single owner of the persisted wallet session.
///
/// At most one session exists; connecting again overwrites it.
#[derive(Clone)]
pub struct WalletSessionStore {
    repository: Arc<dyn SessionRepository>,
}

impl WalletSessionStore {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// Connect through `provider` and persist the resulting session.
    ///
    /// On any failure nothing is written and an earlier session stays as it was.
    pub async fn connect(&self, provider: &dyn WalletProvider) -> Result<WalletSession> {
        let kind = provider.kind();

        if !provider.is_available() {
            warn!(provider = %kind, "Wallet extension not found");
            return Err(BinksError::ProviderUnavailable {
                provider: kind.display_name().to_string(),
                install_url: kind.install_url().to_string(),
            });
        }

        let account = provider.request_account().await.map_err(|e| {
            warn!(provider = %kind, error = %e, "Wallet connection failed");
            BinksError::ProviderRejected(e.to_string())
        })?;

        if account.address.trim().is_empty() {
            warn!(provider = %kind, "Wallet returned an empty address");
            return Err(BinksError::ProviderRejected(ProviderError::NoAccounts.to_string()));
        }

        let mut session = WalletSession::new(account.address, kind);
        session.chain_id = account.chain_id;
        session.balance = account.balance;

        let raw = serde_json::to_string(&session)?;
        self.repository.store(&raw)?;

        info!(provider = %kind, address = %session.short_address(), "Wallet connected");
        Ok(session)
    }

    /// Forget the current session. Calling it with no session is a no-op.
    pub fn disconnect(&self) -> Result<()> {
        self.repository.clear()?;
        debug!("Wallet session cleared");
        Ok(())
    }

    /// Forget the session and ask `provider` to drop its connection too.
    ///
    /// The provider call is best effort; local state is cleared regardless.
    pub async fn disconnect_provider(&self, provider: &dyn WalletProvider) -> Result<()> {
        let connected_here = self
            .session()
            .map(|s| s.provider == provider.kind())
            .unwrap_or(false);

        self.disconnect()?;

        if connected_here && provider.is_available() {
            if let Err(e) = provider.disconnect().await {
                warn!(provider = %provider.kind(), error = %e, "Provider disconnect failed");
            }
        }

        info!("Wallet disconnected");
        Ok(())
    }

    /// The current session; unreadable or corrupt state counts as logged out
    pub fn session(&self) -> Option<WalletSession> {
        let raw = match self.repository.load() {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Failed to read wallet session, treating as disconnected");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(error = %e, "Stored wallet session is corrupt, treating as disconnected");
                None
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.session().is_some()
    }
}
