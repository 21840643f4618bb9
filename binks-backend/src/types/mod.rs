//! Shared types for the Binks backend

pub mod error;

pub use error::{BackendError, Result};
