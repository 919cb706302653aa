//! Promotion evaluation engine
//!
//! In-process library invoked by the order-submission workflow: given an
//! order's line items and the client's context, decide which promotions
//! apply, how much reward to grant, and whether configured limits (usage,
//! budget, date range, zone/category, piece count) permit the application.
//!
//! # Module structure
//!
//! ```text
//! promo-engine/src/
//! ├── engine/        # Matching, tier resolution, reward calculation,
//! │                  # stacking, and the evaluation façade
//! ├── ledger/        # Usage counters behind atomic try_apply / reverse
//! ├── catalog.rs     # Tenant-scoped promotion retrieval
//! ├── validation.rs  # Definition-time structural invariants
//! └── money.rs       # Decimal rounding helpers
//! ```
//!
//! Matching, tier resolution and reward calculation are pure; the usage
//! ledger is the only shared mutable state, and its check-and-commit is a
//! single indivisible operation.

pub mod catalog;
pub mod engine;
pub mod ledger;
pub mod money;
pub mod validation;

// Re-export 公共类型
pub use catalog::{MemoryPromotionCatalog, PromotionCatalog};
pub use engine::PromotionEngine;
pub use ledger::{MemoryUsageLedger, UsageLedger};
pub use validation::{validate_promotion, validate_promotion_create, ValidationError};
