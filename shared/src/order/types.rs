//! Order input types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One order line item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub product_id: i64,
    pub quantity: i32,
    /// Original per-unit price, before any discount
    pub unit_price: f64,
}

/// Order as handed to the engine by the order-submission workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderInput {
    pub order_id: i64,
    pub lines: Vec<OrderLine>,
    /// Order timestamp (Unix millis); candidate date windows are evaluated
    /// against this, not against wall-clock time at evaluation
    pub ordered_at: i64,
}

impl OrderInput {
    /// Total ordered quantity of a product across all lines
    pub fn quantity_of(&self, product_id: i64) -> i32 {
        self.lines
            .iter()
            .filter(|l| l.product_id == product_id)
            .map(|l| l.quantity)
            .sum()
    }

    /// First line carrying a product.
    ///
    /// When a product appears on several lines, rewards price against the
    /// first line's unit price (lines of one product share a price in
    /// practice; the split only encodes notes/options).
    pub fn line_for(&self, product_id: i64) -> Option<&OrderLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }
}

/// Client-side context for candidate filtering
///
/// Assembled by the caller from its client and product stores; stands in for
/// the external `getClientZone` / `getProductCategory` lookups so evaluation
/// itself never blocks on I/O.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientContext {
    pub client_id: i64,
    /// Sales zone the client belongs to (route/region), if any
    pub zone: Option<String>,
    /// product_id → category, for the products on the order
    pub product_categories: HashMap<i64, String>,
}

impl ClientContext {
    pub fn category_of(&self, product_id: i64) -> Option<&str> {
        self.product_categories.get(&product_id).map(String::as_str)
    }
}
