//! Client Range Resolver
//!
//! Selects the quantity tier a client's matched volume falls into. Validated
//! definitions make the ranges a contiguous, non-overlapping partition, so at
//! most one range can match; the resolver still scans in order and takes the
//! first hit, which keeps behavior deterministic on legacy unvalidated data.

use shared::models::{ClientRange, Promotion};

/// Outcome of tier resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TierResolution<'a> {
    /// The promotion defines no tiers; flat reward products apply
    NoRanges,
    /// The matched quantity falls into this tier
    Matched(&'a ClientRange),
    /// Tiers are defined but the quantity falls into none of them
    /// (below the lowest, or above a bounded last range)
    Unmatched,
}

impl<'a> TierResolution<'a> {
    pub fn tier(&self) -> Option<&'a ClientRange> {
        match self {
            TierResolution::Matched(range) => Some(range),
            _ => None,
        }
    }
}

/// Resolve the tier for the primary application product's matched quantity
pub fn resolve_tier(promotion: &Promotion, primary_quantity: i32) -> TierResolution<'_> {
    if promotion.client_ranges.is_empty() {
        return TierResolution::NoRanges;
    }
    promotion
        .client_ranges
        .iter()
        .find(|range| range.contains(primary_quantity))
        .map(TierResolution::Matched)
        .unwrap_or(TierResolution::Unmatched)
}
