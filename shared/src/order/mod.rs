//! Order-side types for promotion evaluation
//!
//! Inputs the order-submission workflow hands to the engine (line items plus
//! client context assembled from the client/product stores) and the
//! evaluation result it gets back.

pub mod applied_promotion;
pub mod types;

// Re-exports
pub use applied_promotion::{
    AppliedPromotion, PromotionEvaluationResult, RejectedPromotion, Reward, RewardLine,
};
pub use types::*;
