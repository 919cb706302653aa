use super::*;
use crate::ledger::{MemoryUsageLedger, UsageLedger};
use shared::models::{
    ApplicationProduct, ApplyOutcome, ClientRange, DenyReason, Promotion, PromotionLimits,
    PromotionStatus, PromotionType, RewardMethod, RewardProduct, UsageDelta,
};
use shared::order::{ClientContext, OrderInput, OrderLine};


fn create_engine() -> (PromotionEngine, Arc<MemoryUsageLedger>) {
    let ledger = Arc::new(MemoryUsageLedger::new());
    (PromotionEngine::new(ledger.clone()), ledger)
}

/// Base promotion: buy product 10, no rewards attached yet
fn base_promotion(id: i64) -> Promotion {
    Promotion {
        id,
        tenant_id: 1,
        name: format!("promo_{}", id),
        description: None,
        promotion_type: PromotionType::Percentage,
        application_products: vec![ApplicationProduct {
            product_id: 10,
            minimum_quantity: 1,
            description: None,
        }],
        reward_products: vec![],
        client_ranges: vec![],
        limits: PromotionLimits::default(),
        is_stackable: true,
        requires_approval: false,
        is_visible: true,
        status: PromotionStatus::Active,
        created_by: None,
        created_at: 0,
    }
}

/// Promotion granting a percentage discount on its own application product
fn percentage_promotion(id: i64, product_id: i64, value: f64) -> Promotion {
    let mut promo = base_promotion(id);
    promo.application_products[0].product_id = product_id;
    promo.reward_products = vec![RewardProduct {
        product_id,
        max_quantity: None,
        discount_value: value,
        discount_method: RewardMethod::PercentageDiscount,
    }];
    promo
}

/// Promotion granting a fixed per-unit discount on its application product
fn fixed_promotion(id: i64, product_id: i64, value: f64) -> Promotion {
    let mut promo = percentage_promotion(id, product_id, 0.0);
    promo.reward_products[0].discount_value = value;
    promo.reward_products[0].discount_method = RewardMethod::FixedDiscount;
    promo
}

fn make_order(lines: Vec<(i64, i32, f64)>) -> OrderInput {
    OrderInput {
        order_id: 1,
        lines: lines
            .into_iter()
            .map(|(product_id, quantity, unit_price)| OrderLine {
                product_id,
                quantity,
                unit_price,
            })
            .collect(),
        ordered_at: 1_700_000_000_000,
    }
}

fn make_ctx(client_id: i64) -> ClientContext {
    ClientContext {
        client_id,
        zone: None,
        product_categories: Default::default(),
    }
}

fn dec(value: f64) -> Decimal {
    crate::money::to_decimal(value)
}

// ========================================================================
// Test double: ledger whose commits start failing after a threshold
// ========================================================================

struct FlakyLedger {
    inner: MemoryUsageLedger,
    commits_before_failure: std::sync::atomic::AtomicUsize,
}

impl FlakyLedger {
    fn failing_after(commits: usize) -> Self {
        Self {
            inner: MemoryUsageLedger::new(),
            commits_before_failure: std::sync::atomic::AtomicUsize::new(commits),
        }
    }
}

impl UsageLedger for FlakyLedger {
    fn try_apply(
        &self,
        promotion: &Promotion,
        client_id: i64,
        delta: &shared::models::UsageDelta,
        now: i64,
    ) -> shared::error::AppResult<ApplyOutcome> {
        use std::sync::atomic::Ordering;
        if self
            .commits_before_failure
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_err()
        {
            return Err(shared::error::AppError::ledger_commit_failed(
                "store unavailable",
            ));
        }
        self.inner.try_apply(promotion, client_id, delta, now)
    }

    fn reverse(
        &self,
        promotion_id: i64,
        client_id: i64,
        delta: &shared::models::UsageDelta,
    ) -> shared::error::AppResult<()> {
        self.inner.reverse(promotion_id, client_id, delta)
    }

    fn entry(&self, promotion_id: i64) -> shared::models::UsageLedgerEntry {
        self.inner.entry(promotion_id)
    }

    fn client_entry(&self, promotion_id: i64, client_id: i64) -> shared::models::UsageLedgerEntry {
        self.inner.client_entry(promotion_id, client_id)
    }
}
