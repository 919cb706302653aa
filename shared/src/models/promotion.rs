//! Promotion Model

use serde::{Deserialize, Serialize};

use super::ledger::UsageLedgerEntry;

/// Promotion type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromotionType {
    Percentage,
    SpecialClub,
    BuyXGetY,
}

/// Reward method enum
///
/// Closed set: the reward calculator matches exhaustively, so adding a
/// method is a compile-time-checked change everywhere it is consumed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RewardMethod {
    Free,
    PercentageDiscount,
    FixedDiscount,
}

/// Promotion lifecycle status
///
/// Created `Draft` → `Active` (admin) → `Paused`/`Active` toggled any time →
/// `Finished` when the end date passes or total usage / budget is exhausted
/// (system-set, not reversible by toggle).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromotionStatus {
    #[default]
    Draft,
    Active,
    Paused,
    Finished,
}

/// Product the client must buy (at or above a minimum quantity) to qualify
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApplicationProduct {
    pub product_id: i64,
    /// Minimum ordered quantity (>= 1)
    pub minimum_quantity: i32,
    pub description: Option<String>,
}

/// Product whose price is reduced or waived when the promotion applies
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RewardProduct {
    pub product_id: i64,
    /// Cap on rewarded units (None = all qualifying units)
    pub max_quantity: Option<i32>,
    /// Discount value (percentage: 30=30%, fixed: 5.00=€5; 0 for Free)
    pub discount_value: f64,
    pub discount_method: RewardMethod,
}

/// Quantity bracket mapping purchased volume to a reward strength
///
/// "If the client buys between `min_quantity` and `max_quantity` of the
/// primary application product, grant this reward tier."
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientRange {
    pub min_quantity: i32,
    /// None = open-ended bracket (must be the last range)
    pub max_quantity: Option<i32>,
    pub reward_value: f64,
    pub reward_method: RewardMethod,
}

impl ClientRange {
    /// Whether a quantity falls inside this bracket
    pub fn contains(&self, quantity: i32) -> bool {
        quantity >= self.min_quantity
            && self.max_quantity.map(|max| quantity <= max).unwrap_or(true)
    }
}

/// Limits constraining how often / how much a promotion may grant
///
/// All axes are optional; absence means unbounded on that axis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PromotionLimits {
    pub max_usage_per_client: Option<i64>,
    pub max_total_usage: Option<i64>,
    pub max_budget: Option<f64>,
    pub max_reward_pieces: Option<i64>,
    pub allowed_zones: Option<Vec<String>>,
    pub allowed_categories: Option<Vec<String>>,
    /// Valid from datetime (Unix millis, inclusive)
    pub start_date: Option<i64>,
    /// Valid until datetime (Unix millis, inclusive)
    pub end_date: Option<i64>,
}

impl PromotionLimits {
    /// Whether a timestamp falls inside the `[start_date, end_date]` window
    pub fn contains_date(&self, now: i64) -> bool {
        if let Some(start) = self.start_date
            && now < start
        {
            return false;
        }
        if let Some(end) = self.end_date
            && now > end
        {
            return false;
        }
        true
    }
}

/// Promotion entity (tenant-scoped rule definition)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promotion {
    pub id: i64,
    pub tenant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub promotion_type: PromotionType,
    /// What the client must buy to qualify (non-empty, AND semantics)
    pub application_products: Vec<ApplicationProduct>,
    /// What gets discounted/waived when the promotion applies
    pub reward_products: Vec<RewardProduct>,
    /// Quantity tiers (may be empty; ordered by min_quantity ascending)
    pub client_ranges: Vec<ClientRange>,
    pub limits: PromotionLimits,
    pub is_stackable: bool,
    pub requires_approval: bool,
    pub is_visible: bool,
    pub status: PromotionStatus,
    pub created_by: Option<i64>,
    pub created_at: i64,
}

impl Promotion {
    /// The primary application product (first in declaration order).
    ///
    /// Tier resolution uses its matched quantity.
    pub fn primary_application_product(&self) -> Option<&ApplicationProduct> {
        self.application_products.first()
    }

    /// Derive the effective lifecycle status given current usage.
    ///
    /// `Finished` is system-set: once the end date passes or total usage /
    /// budget is exhausted, toggling back to Active is not possible. The
    /// engine owns no persistence, so the state is derived on demand; the
    /// catalog owner flips the stored status using the same derivation.
    pub fn lifecycle_state(&self, usage: &UsageLedgerEntry, now: i64) -> PromotionStatus {
        if self.status == PromotionStatus::Finished {
            return PromotionStatus::Finished;
        }
        if let Some(end) = self.limits.end_date
            && now > end
        {
            return PromotionStatus::Finished;
        }
        if let Some(max) = self.limits.max_total_usage
            && usage.total_used >= max
        {
            return PromotionStatus::Finished;
        }
        if let Some(budget) = self.limits.max_budget
            && let Some(budget) = rust_decimal::Decimal::from_f64_retain(budget)
            && usage.budget_used >= budget
        {
            return PromotionStatus::Finished;
        }
        self.status
    }
}

/// Create promotion payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionCreate {
    pub tenant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub promotion_type: PromotionType,
    pub application_products: Vec<ApplicationProduct>,
    pub reward_products: Vec<RewardProduct>,
    pub client_ranges: Option<Vec<ClientRange>>,
    pub limits: Option<PromotionLimits>,
    pub is_stackable: Option<bool>,
    pub requires_approval: Option<bool>,
    pub is_visible: Option<bool>,
    pub created_by: Option<i64>,
}

/// Update promotion payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub promotion_type: Option<PromotionType>,
    pub application_products: Option<Vec<ApplicationProduct>>,
    pub reward_products: Option<Vec<RewardProduct>>,
    pub client_ranges: Option<Vec<ClientRange>>,
    pub limits: Option<PromotionLimits>,
    pub is_stackable: Option<bool>,
    pub requires_approval: Option<bool>,
    pub is_visible: Option<bool>,
    pub status: Option<PromotionStatus>,
}
