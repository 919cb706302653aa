//! Usage Ledger Records
//!
//! Durable counters tracking cumulative usage/budget/pieces consumed by a
//! promotion, plus the delta/outcome types the evaluation engine exchanges
//! with the ledger store. Counters use `Decimal` so that a reversal restores
//! the pre-apply values exactly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Delta proposed by one promotion application
///
/// One delta always carries an implicit `+1` usage on commit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UsageDelta {
    /// Monetary savings granted (already rounded to 2 decimals)
    pub amount: Decimal,
    /// Reward pieces granted
    pub pieces: i32,
}

impl UsageDelta {
    pub fn new(amount: Decimal, pieces: i32) -> Self {
        Self { amount, pieces }
    }
}

/// Per-promotion usage counters (also used for the per-client variant)
///
/// Mutated only by a committed application; never decremented except by an
/// explicit reversal, which subtracts exactly what was added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UsageLedgerEntry {
    pub total_used: i64,
    pub total_savings: Decimal,
    pub budget_used: Decimal,
    pub reward_pieces_used: i64,
    pub last_used_at: Option<i64>,
}

impl UsageLedgerEntry {
    /// Record a committed application
    pub fn apply(&mut self, delta: &UsageDelta, now: i64) {
        self.total_used += 1;
        self.total_savings += delta.amount;
        self.budget_used += delta.amount;
        self.reward_pieces_used += delta.pieces as i64;
        self.last_used_at = Some(now);
    }

    /// Reverse a previously committed application (order cancellation).
    ///
    /// Symmetric to [`apply`](Self::apply): callers must pass the exact delta
    /// that was committed. `last_used_at` is left untouched (it records the
    /// last forward application, not the reversal).
    pub fn reverse(&mut self, delta: &UsageDelta) {
        self.total_used -= 1;
        self.total_savings -= delta.amount;
        self.budget_used -= delta.amount;
        self.reward_pieces_used -= delta.pieces as i64;
    }
}

/// Reason a promotion application was denied
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DenyReason {
    /// Outside the promotion's `[start_date, end_date]` window
    OutsideDateWindow,
    /// `max_usage_per_client` reached for this client
    ClientUsageLimitReached,
    /// `max_total_usage` reached across all clients
    TotalUsageLimitReached,
    /// `max_budget` would be exceeded
    BudgetExhausted,
    /// `max_reward_pieces` would be exceeded
    RewardPiecesExhausted,
    /// A non-stackable promotion with a greater reward won the order
    NotStackable,
}

impl DenyReason {
    /// User-facing message, suitable for the rejected-promotions display
    pub fn user_message(&self) -> &'static str {
        match self {
            DenyReason::OutsideDateWindow => "promotion is outside its validity period",
            DenyReason::ClientUsageLimitReached => "per-client usage limit reached",
            DenyReason::TotalUsageLimitReached => "total usage limit reached",
            DenyReason::BudgetExhausted => "budget exhausted",
            DenyReason::RewardPiecesExhausted => "reward piece limit reached",
            DenyReason::NotStackable => "non-stackable, lower reward",
        }
    }
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

/// Outcome of an atomic check-and-commit on the ledger
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplyOutcome {
    /// Delta committed; counters updated
    Applied,
    /// A limit check failed; no counter was touched
    Denied(DenyReason),
}

impl ApplyOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ApplyOutcome::Applied)
    }
}
