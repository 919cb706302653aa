//! Applied Promotion - tracks which promotions were applied to an order

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::ledger::{DenyReason, UsageDelta};
use crate::models::promotion::{ClientRange, RewardMethod};

/// Computed reward for one target product
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Reward {
    pub method: RewardMethod,
    /// Monetary savings (waived or discounted), rounded to 2 decimals
    pub amount: Decimal,
    /// Units the reward covers
    pub pieces: i32,
}

/// Reward broken out per target product (for receipt/detail display)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RewardLine {
    pub product_id: i64,
    #[serde(flatten)]
    pub reward: Reward,
}

/// Applied promotion record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedPromotion {
    /// Snowflake id of this application instance; reversal references it
    pub application_id: i64,

    // === Promotion identity snapshot ===
    pub promotion_id: i64,
    pub name: String,

    // === Calculation info ===
    /// Resolved quantity tier, if the promotion is tiered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<ClientRange>,
    /// Per-product reward breakdown
    pub reward_lines: Vec<RewardLine>,
    /// Total savings granted by this application
    pub amount: Decimal,
    /// Total reward pieces granted
    pub pieces: i32,
}

impl AppliedPromotion {
    /// The delta that was (or would be) committed to the usage ledger
    pub fn delta(&self) -> UsageDelta {
        UsageDelta::new(self.amount, self.pieces)
    }
}

/// Promotion dropped from the order, with a user-facing reason
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RejectedPromotion {
    pub promotion_id: i64,
    pub name: String,
    pub reason: DenyReason,
}

/// Result of evaluating all promotions against one order
///
/// An order can always be submitted: promotions that fail limits are omitted
/// from the total with their reasons listed, never blocking checkout.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PromotionEvaluationResult {
    pub applied: Vec<AppliedPromotion>,
    pub rejected: Vec<RejectedPromotion>,
    pub total_savings: Decimal,
}

impl PromotionEvaluationResult {
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty() && self.rejected.is_empty()
    }
}
