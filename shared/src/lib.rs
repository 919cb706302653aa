//! Shared types for the promotion engine workspace
//!
//! Common types used across crates: promotion definitions, usage-ledger
//! records, order-side DTOs, error types, and utility helpers.

pub mod error;
pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
