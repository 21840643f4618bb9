//! Binks recycling program domain
//!
//! Rules behind the Binks smart-bin loyalty program, where users earn BINK
//! tokens for sorted waste.
//!
//! # Key Components
//!
//! - [`RewardCalculator`]: `BaseRate × MaterialMultiplier × Weight × EnvironmentalFactor`
//! - [`filter_and_sort`]: search, filter and order the initiative catalog
//! - [`InitiativeCatalog`]: append-only initiative list gated on a connected wallet
//! - [`WalletSessionStore`]: connect/disconnect a wallet and persist the session
//! - [`SmartBin`]: scan-then-confirm disposal flow over external services
//!
//! # Example
//!
//! ```ignore
//! use binks_core::{compute_reward, MaterialType};
//!
//! let tokens = compute_reward(MaterialType::Metal, 2.3, &[])?;
//! assert_eq!(tokens, 34.5);
//! ```

pub mod catalog;
pub mod disposal;
pub mod error;
pub mod fixtures;
pub mod initiative;
pub mod material;
pub mod reward;
pub mod services;
pub mod wallet;

// Re-export main types
pub use catalog::{filter_and_sort, Filter, InitiativeCatalog, InitiativeQuery, SortKey};
pub use disposal::{summarize, DisposalRecord, DisposalSummary, MaterialTotals};
pub use error::{BinksError, Result};
pub use initiative::{Initiative, InitiativeCategory, InitiativeStatus, NewInitiative};
pub use material::{multiplier_table, MaterialType, MultiplierEntry};
pub use reward::{
    active_factors, compute_reward, round_tokens, EnvironmentalFactor, RewardCalculator,
    RewardQuote, BASE_RATE,
};
pub use services::{
    DisposalLedger, DisposalReceipt, DisposalRequest, SimulatedLedger, SimulatedWasteIdentifier,
    SmartBin, WasteIdentification, WasteIdentifier,
};
pub use wallet::{
    format_address, FileSessionRepository, MemorySessionRepository, ProviderKind, SessionRepository,
    WalletProvider, WalletSession, WalletSessionStore,
};
