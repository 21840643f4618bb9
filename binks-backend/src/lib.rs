//! Binks backend - HTTP API for the smart-bin recycling program
//!
//! Serves the reward tables, campaign calendar, initiative catalog and
//! disposal history from `binks-core`, with an optional MongoDB connection.

pub mod config;
pub mod db;
pub mod routes;
pub mod server;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use types::{BackendError, Result};
