//! Wallet connection and the persisted session.

pub mod mock;
pub mod provider;
pub mod repository;
pub mod session;
pub mod store;

pub use mock::MockProvider;
pub use provider::{ProviderAccount, ProviderError, WalletProvider};
pub use repository::{
    FileSessionRepository, MemorySessionRepository, SessionRepository, SESSION_KEY,
};
pub use session::{format_address, ProviderKind, WalletSession};
pub use store::WalletSessionStore;
