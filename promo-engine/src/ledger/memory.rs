//! In-memory usage ledger
//!
//! One `Mutex` per promotion record serializes every check-and-commit for
//! that promotion, covering the global and per-client counters together.
//! Independent promotions never contend with each other (DashMap sharding).

use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::HashMap;

use shared::error::{AppError, AppResult};
use shared::models::{ApplyOutcome, Promotion, UsageDelta, UsageLedgerEntry};

use crate::engine::limits::check_limits;

/// Counters for one promotion: global plus per-client
#[derive(Debug, Default)]
struct PromotionUsage {
    global: UsageLedgerEntry,
    per_client: HashMap<i64, UsageLedgerEntry>,
}

/// In-memory [`UsageLedger`](super::UsageLedger) implementation
///
/// The reference store for tests and single-process embedding; a host with
/// durable storage implements the same trait over its database, keeping the
/// identical atomicity contract.
#[derive(Debug, Default)]
pub struct MemoryUsageLedger {
    records: DashMap<i64, Mutex<PromotionUsage>>,
}

impl MemoryUsageLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl super::UsageLedger for MemoryUsageLedger {
    fn try_apply(
        &self,
        promotion: &Promotion,
        client_id: i64,
        delta: &UsageDelta,
        now: i64,
    ) -> AppResult<ApplyOutcome> {
        let record = self.records.entry(promotion.id).or_default();
        let mut usage = record.lock();

        let client = usage.per_client.get(&client_id).cloned().unwrap_or_default();
        if let Err(reason) = check_limits(&promotion.limits, &usage.global, &client, delta, now) {
            return Ok(ApplyOutcome::Denied(reason));
        }

        usage.global.apply(delta, now);
        usage
            .per_client
            .entry(client_id)
            .or_default()
            .apply(delta, now);

        Ok(ApplyOutcome::Applied)
    }

    fn reverse(&self, promotion_id: i64, client_id: i64, delta: &UsageDelta) -> AppResult<()> {
        let record = self
            .records
            .get(&promotion_id)
            .ok_or_else(|| AppError::not_found("usage record"))?;
        let mut usage = record.lock();

        let Some(client) = usage.per_client.get_mut(&client_id) else {
            return Err(AppError::not_found("client usage record"));
        };
        client.reverse(delta);
        usage.global.reverse(delta);
        Ok(())
    }

    fn entry(&self, promotion_id: i64) -> UsageLedgerEntry {
        self.records
            .get(&promotion_id)
            .map(|record| record.lock().global.clone())
            .unwrap_or_default()
    }

    fn client_entry(&self, promotion_id: i64, client_id: i64) -> UsageLedgerEntry {
        self.records
            .get(&promotion_id)
            .and_then(|record| record.lock().per_client.get(&client_id).cloned())
            .unwrap_or_default()
    }
}
