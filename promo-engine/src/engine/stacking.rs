//! Stacking Resolver
//!
//! Decides which subset of matched promotions may be applied together on one
//! order. Rewards are computed on original prices, so the surviving set can
//! be applied in any order without changing amounts.

use rust_decimal::Decimal;

use shared::models::{DenyReason, Promotion};
use shared::order::RejectedPromotion;

/// A promotion that matched and has its reward computed, awaiting stacking
/// resolution and the ledger's limit check
#[derive(Debug, Clone)]
pub struct StackCandidate<'a> {
    pub promotion: &'a Promotion,
    pub amount: Decimal,
}

/// Resolve stacking across all matched promotions.
///
/// If every candidate is stackable, all survive. If any candidate is
/// non-stackable, only one promotion may be applied to the order: the one
/// with the greatest computed reward (tie-break: lowest id, for
/// determinism); the rest are rejected with a `NotStackable` reason.
pub fn resolve_stack<'a>(
    candidates: Vec<StackCandidate<'a>>,
) -> (Vec<StackCandidate<'a>>, Vec<RejectedPromotion>) {
    if candidates.iter().all(|c| c.promotion.is_stackable) {
        return (candidates, Vec::new());
    }

    let Some(winner_id) = candidates
        .iter()
        .max_by(|a, b| {
            a.amount
                .cmp(&b.amount)
                .then_with(|| b.promotion.id.cmp(&a.promotion.id))
        })
        .map(|c| c.promotion.id)
    else {
        return (Vec::new(), Vec::new());
    };

    let mut selected = Vec::with_capacity(1);
    let mut rejected = Vec::new();
    for candidate in candidates {
        if candidate.promotion.id == winner_id {
            selected.push(candidate);
        } else {
            rejected.push(RejectedPromotion {
                promotion_id: candidate.promotion.id,
                name: candidate.promotion.name.clone(),
                reason: DenyReason::NotStackable,
            });
        }
    }
    (selected, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{
        ApplicationProduct, PromotionLimits, PromotionStatus, PromotionType,
    };

    fn make_promotion(id: i64, is_stackable: bool) -> Promotion {
        Promotion {
            id,
            tenant_id: 1,
            name: format!("promo_{}", id),
            description: None,
            promotion_type: PromotionType::Percentage,
            application_products: vec![ApplicationProduct {
                product_id: 1,
                minimum_quantity: 1,
                description: None,
            }],
            reward_products: vec![],
            client_ranges: vec![],
            limits: PromotionLimits::default(),
            is_stackable,
            requires_approval: false,
            is_visible: true,
            status: PromotionStatus::Active,
            created_by: None,
            created_at: 0,
        }
    }

    fn candidate(promotion: &Promotion, amount_cents: i64) -> StackCandidate<'_> {
        StackCandidate {
            promotion,
            amount: Decimal::new(amount_cents, 2),
        }
    }

    #[test]
    fn test_all_stackable_survive() {
        let p1 = make_promotion(1, true);
        let p2 = make_promotion(2, true);
        let (selected, rejected) =
            resolve_stack(vec![candidate(&p1, 500), candidate(&p2, 800)]);
        assert_eq!(selected.len(), 2);
        assert!(rejected.is_empty());
    }

    #[test]
    fn test_non_stackable_greatest_reward_wins() {
        // P1 ($50) and P2 ($80) both match; P2 wins, P1 rejected
        let p1 = make_promotion(1, false);
        let p2 = make_promotion(2, false);
        let (selected, rejected) =
            resolve_stack(vec![candidate(&p1, 5000), candidate(&p2, 8000)]);

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].promotion.id, 2);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].promotion_id, 1);
        assert_eq!(rejected[0].reason, DenyReason::NotStackable);
    }

    #[test]
    fn test_single_non_stackable_beats_stackables() {
        // One non-stackable in the mix forces a single winner even if the
        // stackables would jointly grant more
        let p1 = make_promotion(1, true);
        let p2 = make_promotion(2, false);
        let p3 = make_promotion(3, true);
        let (selected, rejected) = resolve_stack(vec![
            candidate(&p1, 400),
            candidate(&p2, 600),
            candidate(&p3, 500),
        ]);

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].promotion.id, 2);
        assert_eq!(rejected.len(), 2);
    }

    #[test]
    fn test_tie_breaks_on_lowest_id() {
        let p5 = make_promotion(5, false);
        let p3 = make_promotion(3, false);
        let (selected, _) = resolve_stack(vec![candidate(&p5, 1000), candidate(&p3, 1000)]);
        assert_eq!(selected[0].promotion.id, 3);
    }

    #[test]
    fn test_empty_candidates() {
        let (selected, rejected) = resolve_stack(Vec::new());
        assert!(selected.is_empty());
        assert!(rejected.is_empty());
    }
}
