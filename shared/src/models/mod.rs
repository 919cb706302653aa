//! Data models
//!
//! Shared between the evaluation engine and its host application.
//! All IDs are `i64` (snowflake), all timestamps are `i64` Unix millis.
//! Monetary fields on rule definitions are `f64` at the serde boundary;
//! accumulated counters use `rust_decimal::Decimal` (exact reversal).

pub mod ledger;
pub mod promotion;

// Re-exports
pub use ledger::*;
pub use promotion::*;
