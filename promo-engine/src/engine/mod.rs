//! Promotion Evaluation Engine
//!
//! Orchestrates the full pipeline: candidate filter → bundle matcher → tier
//! resolver → reward calculator → stacking resolver → atomic ledger commit.
//! A single promotion's application moves Candidate → Matched → TierResolved
//! → LimitChecked → Applied | Rejected; Applied commits the ledger delta,
//! Rejected carries a user-facing reason, and there is no retry transition —
//! the caller re-submits the whole order as a new attempt.

pub mod calculator;
pub mod limits;
pub mod matcher;
pub mod stacking;
pub mod tier;

#[cfg(test)]
mod tests;

use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal::Decimal;

use shared::error::AppResult;
use shared::models::{ApplyOutcome, ClientRange, Promotion, UsageDelta};
use shared::order::{
    AppliedPromotion, ClientContext, OrderInput, PromotionEvaluationResult, RejectedPromotion,
    RewardLine,
};
use shared::util::snowflake_id;

use crate::catalog::PromotionCatalog;
use crate::ledger::UsageLedger;
use self::stacking::StackCandidate;

/// A promotion that survived matching and tier resolution, with its reward
/// computed and awaiting stacking resolution and the ledger's limit check
struct Evaluated<'a> {
    promotion: &'a Promotion,
    tier: Option<ClientRange>,
    reward_lines: Vec<RewardLine>,
    amount: Decimal,
    pieces: i32,
}

/// Promotion evaluation engine
///
/// Evaluation itself is pure; the ledger is the only shared state, so one
/// engine can serve any number of concurrent order evaluations.
#[derive(Clone)]
pub struct PromotionEngine {
    ledger: Arc<dyn UsageLedger>,
}

impl std::fmt::Debug for PromotionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromotionEngine")
            .field("ledger", &"<UsageLedger>")
            .finish()
    }
}

impl PromotionEngine {
    pub fn new(ledger: Arc<dyn UsageLedger>) -> Self {
        Self { ledger }
    }

    /// Evaluate all promotions against one order and commit the surviving
    /// applications to the usage ledger.
    ///
    /// Date windows are evaluated against `order.ordered_at`. Promotions
    /// denied by a limit are collected in `rejected` with a user-facing
    /// reason; the order itself always goes through. A ledger commit failure
    /// aborts the evaluation: applications already committed for this order
    /// are compensated, the error is returned, and the caller retries the
    /// whole order.
    pub fn evaluate_order(
        &self,
        order: &OrderInput,
        ctx: &ClientContext,
        promotions: &[Promotion],
    ) -> AppResult<PromotionEvaluationResult> {
        let (selected, mut rejected) = self.select_promotions(order, ctx, promotions);

        let mut applied: Vec<AppliedPromotion> = Vec::with_capacity(selected.len());
        for eval in selected {
            let delta = UsageDelta::new(eval.amount, eval.pieces);
            let outcome =
                self.ledger
                    .try_apply(eval.promotion, ctx.client_id, &delta, order.ordered_at);
            match outcome {
                Ok(ApplyOutcome::Applied) => {
                    applied.push(AppliedPromotion {
                        application_id: snowflake_id(),
                        promotion_id: eval.promotion.id,
                        name: eval.promotion.name.clone(),
                        tier: eval.tier,
                        reward_lines: eval.reward_lines,
                        amount: eval.amount,
                        pieces: eval.pieces,
                    });
                }
                Ok(ApplyOutcome::Denied(reason)) => {
                    tracing::debug!(
                        promotion_id = eval.promotion.id,
                        %reason,
                        "Promotion denied by limit check"
                    );
                    rejected.push(RejectedPromotion {
                        promotion_id: eval.promotion.id,
                        name: eval.promotion.name.clone(),
                        reason,
                    });
                }
                Err(err) => {
                    tracing::error!(
                        promotion_id = eval.promotion.id,
                        order_id = order.order_id,
                        error = %err,
                        "Ledger commit failed, compensating applied promotions"
                    );
                    self.compensate(&applied, ctx.client_id);
                    return Err(err);
                }
            }
        }

        let total_savings = applied.iter().map(|a| a.amount).sum();
        Ok(PromotionEvaluationResult {
            applied,
            rejected,
            total_savings,
        })
    }

    /// Evaluate without committing anything (display / what-if).
    ///
    /// Limit checks run against ledger snapshots; given an unchanged ledger,
    /// repeated calls return the same result. Applications carry
    /// `application_id` 0 because nothing was committed.
    pub fn preview_order(
        &self,
        order: &OrderInput,
        ctx: &ClientContext,
        promotions: &[Promotion],
    ) -> PromotionEvaluationResult {
        let (selected, mut rejected) = self.select_promotions(order, ctx, promotions);

        let mut applied = Vec::with_capacity(selected.len());
        for eval in selected {
            let delta = UsageDelta::new(eval.amount, eval.pieces);
            let global = self.ledger.entry(eval.promotion.id);
            let client = self.ledger.client_entry(eval.promotion.id, ctx.client_id);
            match limits::check_limits(
                &eval.promotion.limits,
                &global,
                &client,
                &delta,
                order.ordered_at,
            ) {
                Ok(()) => applied.push(AppliedPromotion {
                    application_id: 0,
                    promotion_id: eval.promotion.id,
                    name: eval.promotion.name.clone(),
                    tier: eval.tier,
                    reward_lines: eval.reward_lines,
                    amount: eval.amount,
                    pieces: eval.pieces,
                }),
                Err(reason) => rejected.push(RejectedPromotion {
                    promotion_id: eval.promotion.id,
                    name: eval.promotion.name.clone(),
                    reason,
                }),
            }
        }

        let total_savings = applied.iter().map(|a| a.amount).sum();
        PromotionEvaluationResult {
            applied,
            rejected,
            total_savings,
        }
    }

    /// Pull the tenant's active promotions from the catalog, then evaluate
    pub fn evaluate_for_tenant(
        &self,
        catalog: &dyn PromotionCatalog,
        tenant_id: i64,
        order: &OrderInput,
        ctx: &ClientContext,
    ) -> AppResult<PromotionEvaluationResult> {
        let promotions = catalog.active_promotions(tenant_id)?;
        self.evaluate_order(order, ctx, &promotions)
    }

    /// Reverse a committed application (order cancellation).
    ///
    /// Issues the compensating negative delta through the same atomic path;
    /// permitted even after the promotion has reached `Finished`.
    pub fn reverse_application(
        &self,
        applied: &AppliedPromotion,
        client_id: i64,
    ) -> AppResult<()> {
        self.ledger
            .reverse(applied.promotion_id, client_id, &applied.delta())
    }

    /// The pure pipeline: candidates → match → tier → reward → stacking.
    ///
    /// Promotions that do not match, resolve to no tier, or produce no
    /// reward are dropped silently (non-candidacy is not an error); only
    /// stacking losers come back as rejections.
    fn select_promotions<'a>(
        &self,
        order: &OrderInput,
        ctx: &ClientContext,
        promotions: &'a [Promotion],
    ) -> (Vec<Evaluated<'a>>, Vec<RejectedPromotion>) {
        let mut evaluated = Vec::new();
        for promotion in promotions {
            if !matcher::is_candidate(promotion, order, ctx, order.ordered_at) {
                continue;
            }
            let Some(matched) = matcher::match_promotion(order, promotion) else {
                continue;
            };
            let tier = match tier::resolve_tier(promotion, matched.primary_quantity) {
                tier::TierResolution::NoRanges => None,
                tier::TierResolution::Matched(range) => Some(range.clone()),
                tier::TierResolution::Unmatched => {
                    tracing::debug!(
                        promotion_id = promotion.id,
                        quantity = matched.primary_quantity,
                        "Matched quantity falls into no tier, skipping"
                    );
                    continue;
                }
            };

            let reward_lines =
                calculator::promotion_reward_lines(promotion, order, tier.as_ref());
            if reward_lines.is_empty() {
                tracing::debug!(promotion_id = promotion.id, "No reward lines, skipping");
                continue;
            }
            let amount: Decimal = reward_lines.iter().map(|l| l.reward.amount).sum();
            let pieces: i32 = reward_lines.iter().map(|l| l.reward.pieces).sum();

            evaluated.push(Evaluated {
                promotion,
                tier,
                reward_lines,
                amount,
                pieces,
            });
        }

        tracing::debug!(
            order_id = order.order_id,
            candidates = evaluated.len(),
            "Promotion candidates evaluated"
        );

        let stack_inputs = evaluated
            .iter()
            .map(|e| StackCandidate {
                promotion: e.promotion,
                amount: e.amount,
            })
            .collect();
        let (selected, rejected) = stacking::resolve_stack(stack_inputs);
        let selected_ids: HashSet<i64> = selected.iter().map(|c| c.promotion.id).collect();
        let selected_evaluated = evaluated
            .into_iter()
            .filter(|e| selected_ids.contains(&e.promotion.id))
            .collect();

        (selected_evaluated, rejected)
    }

    /// Best-effort reversal of applications committed earlier in a failed
    /// evaluation, so a retried order never double-counts
    fn compensate(&self, applied: &[AppliedPromotion], client_id: i64) {
        for application in applied {
            if let Err(err) =
                self.ledger
                    .reverse(application.promotion_id, client_id, &application.delta())
            {
                tracing::error!(
                    promotion_id = application.promotion_id,
                    application_id = application.application_id,
                    error = %err,
                    "Compensating reversal failed, ledger left inconsistent"
                );
            }
        }
    }
}
