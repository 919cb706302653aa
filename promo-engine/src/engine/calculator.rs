//! Reward Calculator
//!
//! Computes the monetary/quantity reward for a matched promotion and tier.
//! All arithmetic in `Decimal`; each computed total is rounded once (2
//! decimals, half-up), never per unit. Rewards always compute on the
//! original (undiscounted) price, which keeps stacking order-independent.

use rust_decimal::Decimal;

use shared::models::{ClientRange, Promotion, RewardMethod};
use shared::order::{OrderInput, Reward, RewardLine};

use crate::money::{round_money, to_decimal};

/// Compute the reward for one target product line.
///
/// `quantity` is the qualifying (ordered) quantity of the target product;
/// `max_quantity` caps the rewarded units.
pub fn compute_reward(
    method: RewardMethod,
    value: Decimal,
    unit_price: Decimal,
    quantity: i32,
    max_quantity: Option<i32>,
) -> Reward {
    let units = max_quantity
        .map(|max| quantity.min(max))
        .unwrap_or(quantity)
        .max(0);
    let units_dec = Decimal::from(units);

    let amount = match method {
        // Those units are free; their full price is waived, the rest stays
        // charged.
        RewardMethod::Free => unit_price * units_dec,
        RewardMethod::PercentageDiscount => {
            unit_price * units_dec * value / Decimal::ONE_HUNDRED
        }
        // Per-unit discount never exceeds the unit price, so the resulting
        // price is clamped at zero.
        RewardMethod::FixedDiscount => value.min(unit_price) * units_dec,
    };

    Reward {
        method,
        amount: round_money(amount.max(Decimal::ZERO)),
        pieces: units,
    }
}

/// Compute all reward lines for a matched promotion.
///
/// Targets are the reward products present on the order; a resolved tier's
/// method/value override each reward product's own (the tier carries the
/// strength, the reward product the target and piece cap). When no reward
/// products are defined, a resolved tier rewards the application products'
/// own lines.
pub fn promotion_reward_lines(
    promotion: &Promotion,
    order: &OrderInput,
    tier: Option<&ClientRange>,
) -> Vec<RewardLine> {
    let mut lines = Vec::new();

    if !promotion.reward_products.is_empty() {
        for product in &promotion.reward_products {
            let Some(line) = order.line_for(product.product_id) else {
                continue;
            };
            let (method, value) = match tier {
                Some(t) => (t.reward_method, to_decimal(t.reward_value)),
                None => (product.discount_method, to_decimal(product.discount_value)),
            };
            let reward = compute_reward(
                method,
                value,
                to_decimal(line.unit_price),
                order.quantity_of(product.product_id),
                product.max_quantity,
            );
            lines.push(RewardLine {
                product_id: product.product_id,
                reward,
            });
        }
        return lines;
    }

    // No reward products: a tier is required for any reward at all
    let Some(tier) = tier else {
        return lines;
    };
    for product in &promotion.application_products {
        let Some(line) = order.line_for(product.product_id) else {
            continue;
        };
        let reward = compute_reward(
            tier.reward_method,
            to_decimal(tier.reward_value),
            to_decimal(line.unit_price),
            order.quantity_of(product.product_id),
            None,
        );
        lines.push(RewardLine {
            product_id: product.product_id,
            reward,
        });
    }
    lines
}
