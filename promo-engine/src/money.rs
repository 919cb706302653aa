//! Money calculation utilities using rust_decimal for precision
//!
//! All reward arithmetic is done in `Decimal`; order inputs arrive as `f64`
//! and are converted at the boundary. Rounding happens once on each computed
//! total (never per unit) to avoid cumulative rounding drift.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
///
/// Order prices are produced by the order store and should always be finite.
/// If NaN/Infinity somehow reaches here, logs an error and returns ZERO to
/// avoid silent data corruption in reward calculations.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for display, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// Round a monetary total to 2 decimal places, half-up
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
