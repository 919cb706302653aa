//! Promotion Matcher
//!
//! Candidate filtering (status, date window, zone, category) and
//! application-product bundle matching. Pure functions, no side effects.

use std::collections::HashMap;

use shared::models::{Promotion, PromotionStatus};
use shared::order::{ClientContext, OrderInput};

/// Quantities matched per application product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// application product_id → ordered quantity
    pub quantities: HashMap<i64, i32>,
    /// Ordered quantity of the primary (first-declared) application product;
    /// tier resolution uses this
    pub primary_quantity: i32,
}

/// Check whether a promotion is a candidate for this order at all.
///
/// Non-candidates (wrong status, outside the date window, excluded zone or
/// category) are filtered out before matching — they are not failed matches
/// and produce no rejection reason.
pub fn is_candidate(
    promotion: &Promotion,
    order: &OrderInput,
    ctx: &ClientContext,
    now: i64,
) -> bool {
    if promotion.status != PromotionStatus::Active {
        return false;
    }
    if !promotion.limits.contains_date(now) {
        return false;
    }
    if !matches_zone(promotion, ctx) {
        return false;
    }
    matches_categories(promotion, order, ctx)
}

/// Zone filter: absent list = all zones allowed
fn matches_zone(promotion: &Promotion, ctx: &ClientContext) -> bool {
    match &promotion.limits.allowed_zones {
        None => true,
        Some(zones) => match &ctx.zone {
            Some(zone) => zones.iter().any(|z| z == zone),
            None => false,
        },
    }
}

/// Category filter: absent list = all categories allowed; otherwise at least
/// one ordered product must fall in an allowed category
fn matches_categories(promotion: &Promotion, order: &OrderInput, ctx: &ClientContext) -> bool {
    match &promotion.limits.allowed_categories {
        None => true,
        Some(categories) => order.lines.iter().any(|line| {
            ctx.category_of(line.product_id)
                .map(|c| categories.iter().any(|allowed| allowed == c))
                .unwrap_or(false)
        }),
    }
}

/// Match an order against a promotion's application products.
///
/// Every application product must reach its minimum ordered quantity
/// (logical AND — a multi-product bundle requirement, not an OR). Returns
/// `None` when any product falls short.
pub fn match_promotion(order: &OrderInput, promotion: &Promotion) -> Option<MatchResult> {
    let mut quantities = HashMap::with_capacity(promotion.application_products.len());
    for product in &promotion.application_products {
        let quantity = order.quantity_of(product.product_id);
        if quantity < product.minimum_quantity {
            return None;
        }
        quantities.insert(product.product_id, quantity);
    }

    let primary_quantity = promotion
        .primary_application_product()
        .map(|p| order.quantity_of(p.product_id))
        .unwrap_or(0);

    Some(MatchResult {
        quantities,
        primary_quantity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{ApplicationProduct, PromotionLimits, PromotionType};
    use shared::order::OrderLine;

    fn make_promotion(
        application_products: Vec<(i64, i32)>,
        limits: PromotionLimits,
    ) -> Promotion {
        Promotion {
            id: 1,
            tenant_id: 1,
            name: "bundle".to_string(),
            description: None,
            promotion_type: PromotionType::BuyXGetY,
            application_products: application_products
                .into_iter()
                .map(|(product_id, minimum_quantity)| ApplicationProduct {
                    product_id,
                    minimum_quantity,
                    description: None,
                })
                .collect(),
            reward_products: vec![],
            client_ranges: vec![],
            limits,
            is_stackable: true,
            requires_approval: false,
            is_visible: true,
            status: PromotionStatus::Active,
            created_by: None,
            created_at: 0,
        }
    }

    fn make_order(lines: Vec<(i64, i32)>) -> OrderInput {
        OrderInput {
            order_id: 1,
            lines: lines
                .into_iter()
                .map(|(product_id, quantity)| OrderLine {
                    product_id,
                    quantity,
                    unit_price: 10.0,
                })
                .collect(),
            ordered_at: 0,
        }
    }

    #[test]
    fn test_all_application_products_required() {
        let promo = make_promotion(vec![(10, 2), (11, 1)], PromotionLimits::default());

        // Both thresholds met
        let result = match_promotion(&make_order(vec![(10, 2), (11, 3)]), &promo).unwrap();
        assert_eq!(result.quantities[&10], 2);
        assert_eq!(result.quantities[&11], 3);
        assert_eq!(result.primary_quantity, 2);

        // Second product missing entirely: AND semantics, no match
        assert!(match_promotion(&make_order(vec![(10, 5)]), &promo).is_none());

        // Second product below its minimum
        assert!(match_promotion(&make_order(vec![(10, 2), (11, 0)]), &promo).is_none());
    }

    #[test]
    fn test_quantity_summed_across_lines() {
        let promo = make_promotion(vec![(10, 5)], PromotionLimits::default());
        let order = make_order(vec![(10, 2), (10, 3)]);
        let result = match_promotion(&order, &promo).unwrap();
        assert_eq!(result.primary_quantity, 5);
    }

    #[test]
    fn test_inactive_status_not_candidate() {
        let mut promo = make_promotion(vec![(10, 1)], PromotionLimits::default());
        let order = make_order(vec![(10, 1)]);
        let ctx = ClientContext::default();

        assert!(is_candidate(&promo, &order, &ctx, 0));
        for status in [
            PromotionStatus::Draft,
            PromotionStatus::Paused,
            PromotionStatus::Finished,
        ] {
            promo.status = status;
            assert!(!is_candidate(&promo, &order, &ctx, 0));
        }
    }

    #[test]
    fn test_date_window_filters_candidates() {
        let promo = make_promotion(
            vec![(10, 1)],
            PromotionLimits {
                start_date: Some(1000),
                end_date: Some(2000),
                ..Default::default()
            },
        );
        let order = make_order(vec![(10, 1)]);
        let ctx = ClientContext::default();

        assert!(!is_candidate(&promo, &order, &ctx, 999));
        assert!(is_candidate(&promo, &order, &ctx, 1000));
        assert!(is_candidate(&promo, &order, &ctx, 2000));
        assert!(!is_candidate(&promo, &order, &ctx, 2001));
    }

    #[test]
    fn test_zone_filter() {
        let promo = make_promotion(
            vec![(10, 1)],
            PromotionLimits {
                allowed_zones: Some(vec!["north".to_string()]),
                ..Default::default()
            },
        );
        let order = make_order(vec![(10, 1)]);

        let mut ctx = ClientContext::default();
        assert!(!is_candidate(&promo, &order, &ctx, 0)); // no zone

        ctx.zone = Some("south".to_string());
        assert!(!is_candidate(&promo, &order, &ctx, 0));

        ctx.zone = Some("north".to_string());
        assert!(is_candidate(&promo, &order, &ctx, 0));
    }

    #[test]
    fn test_category_filter() {
        let promo = make_promotion(
            vec![(10, 1)],
            PromotionLimits {
                allowed_categories: Some(vec!["beverages".to_string()]),
                ..Default::default()
            },
        );
        let order = make_order(vec![(10, 1), (11, 1)]);

        let mut ctx = ClientContext::default();
        // No category metadata at all: excluded
        assert!(!is_candidate(&promo, &order, &ctx, 0));

        ctx.product_categories.insert(11, "snacks".to_string());
        assert!(!is_candidate(&promo, &order, &ctx, 0));

        ctx.product_categories.insert(10, "beverages".to_string());
        assert!(is_candidate(&promo, &order, &ctx, 0));
    }
}
