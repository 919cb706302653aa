//! Promotion definition validation
//!
//! Structural invariants checked at authoring time, before a Draft/Active
//! promotion is persisted. Evaluation assumes validated definitions, so a
//! violation reported here never reaches the engine.

use serde::{Deserialize, Serialize};

use shared::models::{
    ApplicationProduct, ClientRange, Promotion, PromotionCreate, PromotionLimits, PromotionType,
    RewardMethod, RewardProduct,
};

// ── Text length limits ──────────────────────────────────────────────

/// Promotion names (list/table display)
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// One structural invariant violation, addressed to a form field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationError {
    /// Field path, e.g. `client_ranges[1].min_quantity`
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate a full promotion definition. Empty result = valid.
pub fn validate_promotion(promotion: &Promotion) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    validate_name(&promotion.name, promotion.description.as_deref(), &mut errors);
    validate_application_products(&promotion.application_products, &mut errors);
    validate_reward_products(&promotion.reward_products, &mut errors);
    validate_client_ranges(&promotion.client_ranges, &mut errors);
    validate_limits(&promotion.limits, &mut errors);
    validate_type_consistency(
        promotion.promotion_type,
        &promotion.reward_products,
        &promotion.client_ranges,
        &mut errors,
    );
    errors
}

/// Validate an authoring payload before it becomes a promotion
pub fn validate_promotion_create(payload: &PromotionCreate) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    validate_name(&payload.name, payload.description.as_deref(), &mut errors);
    validate_application_products(&payload.application_products, &mut errors);
    validate_reward_products(&payload.reward_products, &mut errors);
    if let Some(ranges) = &payload.client_ranges {
        validate_client_ranges(ranges, &mut errors);
    }
    if let Some(limits) = &payload.limits {
        validate_limits(limits, &mut errors);
    }
    validate_type_consistency(
        payload.promotion_type,
        &payload.reward_products,
        payload.client_ranges.as_deref().unwrap_or_default(),
        &mut errors,
    );
    errors
}

// ── Component checks ────────────────────────────────────────────────

fn validate_name(name: &str, description: Option<&str>, errors: &mut Vec<ValidationError>) {
    if name.trim().is_empty() {
        errors.push(ValidationError::new("name", "name must not be empty"));
    }
    if name.len() > MAX_NAME_LEN {
        errors.push(ValidationError::new(
            "name",
            format!("name is too long ({} chars, max {MAX_NAME_LEN})", name.len()),
        ));
    }
    if let Some(desc) = description
        && desc.len() > MAX_DESCRIPTION_LEN
    {
        errors.push(ValidationError::new(
            "description",
            format!(
                "description is too long ({} chars, max {MAX_DESCRIPTION_LEN})",
                desc.len()
            ),
        ));
    }
}

fn validate_application_products(
    products: &[ApplicationProduct],
    errors: &mut Vec<ValidationError>,
) {
    if products.is_empty() {
        errors.push(ValidationError::new(
            "application_products",
            "at least one application product is required",
        ));
    }
    for (i, product) in products.iter().enumerate() {
        if product.minimum_quantity < 1 {
            errors.push(ValidationError::new(
                format!("application_products[{i}].minimum_quantity"),
                "minimum quantity must be at least 1",
            ));
        }
    }
}

fn validate_reward_value(
    method: RewardMethod,
    value: f64,
    field: &str,
    errors: &mut Vec<ValidationError>,
) {
    match method {
        RewardMethod::Free => {
            if value != 0.0 {
                errors.push(ValidationError::new(
                    field,
                    "value must be 0 when the method is FREE",
                ));
            }
        }
        RewardMethod::PercentageDiscount => {
            if !(value > 0.0 && value <= 100.0) {
                errors.push(ValidationError::new(
                    field,
                    "percentage must be greater than 0 and at most 100",
                ));
            }
        }
        RewardMethod::FixedDiscount => {
            if value <= 0.0 {
                errors.push(ValidationError::new(field, "value must be greater than 0"));
            }
        }
    }
}

fn validate_reward_products(products: &[RewardProduct], errors: &mut Vec<ValidationError>) {
    for (i, product) in products.iter().enumerate() {
        validate_reward_value(
            product.discount_method,
            product.discount_value,
            &format!("reward_products[{i}].discount_value"),
            errors,
        );
        if let Some(max) = product.max_quantity
            && max < 1
        {
            errors.push(ValidationError::new(
                format!("reward_products[{i}].max_quantity"),
                "max quantity must be at least 1 when set",
            ));
        }
    }
}

/// Ranges must partition a contiguous, non-overlapping domain ordered by
/// `min_quantity` ascending, with at most one open-ended range, which must
/// be last.
fn validate_client_ranges(ranges: &[ClientRange], errors: &mut Vec<ValidationError>) {
    for (i, range) in ranges.iter().enumerate() {
        if range.min_quantity < 1 {
            errors.push(ValidationError::new(
                format!("client_ranges[{i}].min_quantity"),
                "minimum quantity must be at least 1",
            ));
        }
        if let Some(max) = range.max_quantity
            && max < range.min_quantity
        {
            errors.push(ValidationError::new(
                format!("client_ranges[{i}].max_quantity"),
                "maximum quantity must not be below the minimum",
            ));
        }
        validate_reward_value(
            range.reward_method,
            range.reward_value,
            &format!("client_ranges[{i}].reward_value"),
            errors,
        );
        if range.max_quantity.is_none() && i + 1 != ranges.len() {
            errors.push(ValidationError::new(
                format!("client_ranges[{i}].max_quantity"),
                "only the last range may be open-ended",
            ));
        }
    }
    for (i, pair) in ranges.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        match prev.max_quantity {
            Some(max) if next.min_quantity != max + 1 => {
                errors.push(ValidationError::new(
                    format!("client_ranges[{}].min_quantity", i + 1),
                    format!(
                        "ranges must be contiguous: expected minimum {}, got {}",
                        max + 1,
                        next.min_quantity
                    ),
                ));
            }
            _ => {}
        }
    }
}

/// Shape constraints implied by the promotion type
fn validate_type_consistency(
    promotion_type: PromotionType,
    reward_products: &[RewardProduct],
    client_ranges: &[ClientRange],
    errors: &mut Vec<ValidationError>,
) {
    match promotion_type {
        // Club promotions grade the reward by purchased volume
        PromotionType::SpecialClub => {
            if client_ranges.is_empty() {
                errors.push(ValidationError::new(
                    "client_ranges",
                    "a SPECIAL_CLUB promotion requires at least one client range",
                ));
            }
        }
        // Buy-X-get-Y gives product away; something must be free
        PromotionType::BuyXGetY => {
            if !reward_products
                .iter()
                .any(|p| p.discount_method == RewardMethod::Free)
            {
                errors.push(ValidationError::new(
                    "reward_products",
                    "a BUY_X_GET_Y promotion requires a reward product with the FREE method",
                ));
            }
        }
        PromotionType::Percentage => {}
    }
}

fn validate_limits(limits: &PromotionLimits, errors: &mut Vec<ValidationError>) {
    if let Some(max) = limits.max_usage_per_client
        && max < 1
    {
        errors.push(ValidationError::new(
            "limits.max_usage_per_client",
            "per-client usage limit must be at least 1 when set",
        ));
    }
    if let Some(max) = limits.max_total_usage
        && max < 1
    {
        errors.push(ValidationError::new(
            "limits.max_total_usage",
            "total usage limit must be at least 1 when set",
        ));
    }
    if let Some(budget) = limits.max_budget
        && budget <= 0.0
    {
        errors.push(ValidationError::new(
            "limits.max_budget",
            "budget must be greater than 0 when set",
        ));
    }
    if let Some(max) = limits.max_reward_pieces
        && max < 1
    {
        errors.push(ValidationError::new(
            "limits.max_reward_pieces",
            "reward piece limit must be at least 1 when set",
        ));
    }
    if let (Some(start), Some(end)) = (limits.start_date, limits.end_date)
        && start > end
    {
        errors.push(ValidationError::new(
            "limits.end_date",
            "end date must not be before the start date",
        ));
    }
}
