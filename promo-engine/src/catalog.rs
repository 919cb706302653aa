//! Promotion Catalog
//!
//! Tenant-scoped access to promotion definitions. The host application backs
//! this with its own store; [`MemoryPromotionCatalog`] serves tests and
//! single-process embedding.

use parking_lot::RwLock;
use std::collections::HashMap;

use shared::error::AppResult;
use shared::models::{Promotion, PromotionStatus};

/// Supplies active promotion definitions for a tenant
pub trait PromotionCatalog: Send + Sync {
    /// All promotions of a tenant currently in `Active` status.
    ///
    /// Candidate filtering (date window, zone, category) happens in the
    /// engine; the catalog only scopes by tenant and lifecycle status.
    fn active_promotions(&self, tenant_id: i64) -> AppResult<Vec<Promotion>>;
}

/// In-memory catalog keyed by tenant
#[derive(Debug, Default)]
pub struct MemoryPromotionCatalog {
    promotions: RwLock<HashMap<i64, Vec<Promotion>>>,
}

impl MemoryPromotionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a promotion under its tenant
    pub fn upsert(&self, promotion: Promotion) {
        let mut map = self.promotions.write();
        let list = map.entry(promotion.tenant_id).or_default();
        match list.iter_mut().find(|p| p.id == promotion.id) {
            Some(existing) => *existing = promotion,
            None => list.push(promotion),
        }
    }
}

impl PromotionCatalog for MemoryPromotionCatalog {
    fn active_promotions(&self, tenant_id: i64) -> AppResult<Vec<Promotion>> {
        let map = self.promotions.read();
        Ok(map
            .get(&tenant_id)
            .map(|list| {
                list.iter()
                    .filter(|p| p.status == PromotionStatus::Active)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
