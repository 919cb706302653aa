//! Limit Enforcer
//!
//! The limit checks as an explicit ordered pipeline: the first failing check
//! determines the reported reason, so user-facing messages stay
//! deterministic. `check_limits` is pure given ledger snapshots; the
//! authoritative invocation happens inside `UsageLedger::try_apply`, under
//! the per-promotion serialization.

use shared::models::{DenyReason, PromotionLimits, UsageDelta, UsageLedgerEntry};

use crate::money::to_decimal;

/// One limit axis, in check order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitCheck {
    DateWindow,
    PerClientUsage,
    TotalUsage,
    Budget,
    RewardPieces,
}

/// The fixed check order: date window, per-client usage, total usage,
/// budget, reward pieces
pub const LIMIT_CHECKS: [LimitCheck; 5] = [
    LimitCheck::DateWindow,
    LimitCheck::PerClientUsage,
    LimitCheck::TotalUsage,
    LimitCheck::Budget,
    LimitCheck::RewardPieces,
];

impl LimitCheck {
    /// Evaluate one axis against the current counters and the proposed delta
    pub fn evaluate(
        &self,
        limits: &PromotionLimits,
        global: &UsageLedgerEntry,
        client: &UsageLedgerEntry,
        delta: &UsageDelta,
        now: i64,
    ) -> Result<(), DenyReason> {
        match self {
            LimitCheck::DateWindow => {
                if !limits.contains_date(now) {
                    return Err(DenyReason::OutsideDateWindow);
                }
            }
            LimitCheck::PerClientUsage => {
                if let Some(max) = limits.max_usage_per_client
                    && client.total_used + 1 > max
                {
                    return Err(DenyReason::ClientUsageLimitReached);
                }
            }
            LimitCheck::TotalUsage => {
                if let Some(max) = limits.max_total_usage
                    && global.total_used + 1 > max
                {
                    return Err(DenyReason::TotalUsageLimitReached);
                }
            }
            LimitCheck::Budget => {
                if let Some(max) = limits.max_budget
                    && global.budget_used + delta.amount > to_decimal(max)
                {
                    return Err(DenyReason::BudgetExhausted);
                }
            }
            LimitCheck::RewardPieces => {
                if let Some(max) = limits.max_reward_pieces
                    && global.reward_pieces_used + delta.pieces as i64 > max
                {
                    return Err(DenyReason::RewardPiecesExhausted);
                }
            }
        }
        Ok(())
    }
}

/// Run the full pipeline; the first failing check wins
pub fn check_limits(
    limits: &PromotionLimits,
    global: &UsageLedgerEntry,
    client: &UsageLedgerEntry,
    delta: &UsageDelta,
    now: i64,
) -> Result<(), DenyReason> {
    for check in LIMIT_CHECKS {
        check.evaluate(limits, global, client, delta, now)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn delta(amount_cents: i64, pieces: i32) -> UsageDelta {
        UsageDelta::new(Decimal::new(amount_cents, 2), pieces)
    }

    fn used(total_used: i64, budget_cents: i64, pieces: i64) -> UsageLedgerEntry {
        UsageLedgerEntry {
            total_used,
            total_savings: Decimal::new(budget_cents, 2),
            budget_used: Decimal::new(budget_cents, 2),
            reward_pieces_used: pieces,
            last_used_at: None,
        }
    }

    #[test]
    fn test_all_absent_limits_pass() {
        let result = check_limits(
            &PromotionLimits::default(),
            &used(1_000_000, 99_999_900, 50_000),
            &used(500, 0, 0),
            &delta(100_000, 100),
            0,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_date_window_denied() {
        let limits = PromotionLimits {
            end_date: Some(1000),
            ..Default::default()
        };
        assert_eq!(
            check_limits(&limits, &used(0, 0, 0), &used(0, 0, 0), &delta(0, 0), 1001),
            Err(DenyReason::OutsideDateWindow)
        );
    }

    #[test]
    fn test_per_client_usage_boundary() {
        let limits = PromotionLimits {
            max_usage_per_client: Some(3),
            ..Default::default()
        };
        assert!(check_limits(&limits, &used(0, 0, 0), &used(2, 0, 0), &delta(0, 0), 0).is_ok());
        assert_eq!(
            check_limits(&limits, &used(0, 0, 0), &used(3, 0, 0), &delta(0, 0), 0),
            Err(DenyReason::ClientUsageLimitReached)
        );
    }

    #[test]
    fn test_total_usage_boundary() {
        let limits = PromotionLimits {
            max_total_usage: Some(100),
            ..Default::default()
        };
        assert!(check_limits(&limits, &used(99, 0, 0), &used(0, 0, 0), &delta(0, 0), 0).is_ok());
        assert_eq!(
            check_limits(&limits, &used(100, 0, 0), &used(0, 0, 0), &delta(0, 0), 0),
            Err(DenyReason::TotalUsageLimitReached)
        );
    }

    #[test]
    fn test_budget_counts_proposed_delta() {
        let limits = PromotionLimits {
            max_budget: Some(100.0),
            ..Default::default()
        };
        // 95.00 used + 5.00 proposed = exactly 100.00: allowed
        assert!(
            check_limits(&limits, &used(0, 9500, 0), &used(0, 0, 0), &delta(500, 0), 0).is_ok()
        );
        // 95.01 used + 5.00 proposed: denied
        assert_eq!(
            check_limits(&limits, &used(0, 9501, 0), &used(0, 0, 0), &delta(500, 0), 0),
            Err(DenyReason::BudgetExhausted)
        );
    }

    #[test]
    fn test_reward_pieces_counts_proposed_delta() {
        let limits = PromotionLimits {
            max_reward_pieces: Some(10),
            ..Default::default()
        };
        assert!(check_limits(&limits, &used(0, 0, 8), &used(0, 0, 0), &delta(0, 2), 0).is_ok());
        assert_eq!(
            check_limits(&limits, &used(0, 0, 9), &used(0, 0, 0), &delta(0, 2), 0),
            Err(DenyReason::RewardPiecesExhausted)
        );
    }

    #[test]
    fn test_first_failing_reason_wins() {
        // Everything is violated at once; the pipeline order decides
        let limits = PromotionLimits {
            max_usage_per_client: Some(1),
            max_total_usage: Some(1),
            max_budget: Some(1.0),
            max_reward_pieces: Some(1),
            end_date: Some(10),
            ..Default::default()
        };
        let global = used(5, 1000, 5);
        let client = used(5, 0, 0);
        let d = delta(1000, 5);

        assert_eq!(
            check_limits(&limits, &global, &client, &d, 11),
            Err(DenyReason::OutsideDateWindow)
        );
        // Back inside the window: per-client fires before total
        assert_eq!(
            check_limits(&limits, &global, &client, &d, 5),
            Err(DenyReason::ClientUsageLimitReached)
        );
        // Fresh client: total usage fires before budget
        assert_eq!(
            check_limits(&limits, &global, &used(0, 0, 0), &d, 5),
            Err(DenyReason::TotalUsageLimitReached)
        );
        // Usage headroom: budget fires before pieces
        let roomy = used(0, 1000, 5);
        assert_eq!(
            check_limits(&limits, &roomy, &used(0, 0, 0), &d, 5),
            Err(DenyReason::BudgetExhausted)
        );
    }
}
