//! Usage Ledger
//!
//! Shared counters contended by every concurrent order that matches a
//! promotion. Checking a limit and committing the delta as two separate
//! steps is a race that can overshoot budget/usage/piece caps, so the
//! contract is a single indivisible `try_apply`, never `check()` followed
//! by `commit()`.

pub mod memory;

pub use memory::MemoryUsageLedger;

use shared::error::AppResult;
use shared::models::{ApplyOutcome, Promotion, UsageDelta, UsageLedgerEntry};

/// Durable, atomically-updated usage counters per promotion (and per
/// promotion+client)
///
/// Implementations must make `try_apply` a single atomic check-and-commit
/// (serialized increment or optimistic version check with retry). A commit
/// that cannot complete returns `Err` with `ErrorCode::LedgerCommitFailed`
/// and must leave no partial mutation; the caller retries the whole order.
pub trait UsageLedger: Send + Sync {
    /// Check all limits for one application and, if they pass, commit the
    /// delta — indivisibly.
    ///
    /// Returns `Denied(reason)` (counters untouched) when a limit check
    /// fails; the reasons follow the fixed check order: date window,
    /// per-client usage, total usage, budget, reward pieces.
    fn try_apply(
        &self,
        promotion: &Promotion,
        client_id: i64,
        delta: &UsageDelta,
        now: i64,
    ) -> AppResult<ApplyOutcome>;

    /// Issue a compensating negative delta for a previously committed
    /// application (order cancellation).
    ///
    /// Must subtract exactly what `try_apply` added. Permitted even after
    /// the promotion has reached `Finished` status — ledger arithmetic is
    /// independent of lifecycle state.
    fn reverse(&self, promotion_id: i64, client_id: i64, delta: &UsageDelta) -> AppResult<()>;

    /// Snapshot of the global counters for a promotion (zeroed if unused)
    fn entry(&self, promotion_id: i64) -> UsageLedgerEntry;

    /// Snapshot of the per-client counters for a promotion (zeroed if unused)
    fn client_entry(&self, promotion_id: i64, client_id: i64) -> UsageLedgerEntry;
}
