//! Unified error codes for the promotion engine workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 3xxx: Tenant errors
//! - 45xx: Promotion errors
//! - 46xx: Usage ledger errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 3xxx: Tenant ====================
    /// Tenant not found
    TenantNotFound = 3002,

    // ==================== 45xx: Promotion ====================
    /// Promotion not found
    PromotionNotFound = 4501,
    /// Promotion definition violates a structural invariant
    PromotionDefinitionInvalid = 4502,
    /// Promotion is not in a state that allows this operation
    PromotionNotActive = 4503,

    // ==================== 46xx: Usage ledger ====================
    /// Usage record not found for a reversal
    UsageRecordNotFound = 4601,
    /// Atomic check-and-commit could not complete; retry the whole order
    LedgerCommitFailed = 4602,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "OK",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::ValueOutOfRange => "Value out of range",
            ErrorCode::TenantNotFound => "Tenant not found",
            ErrorCode::PromotionNotFound => "Promotion not found",
            ErrorCode::PromotionDefinitionInvalid => "Promotion definition is invalid",
            ErrorCode::PromotionNotActive => "Promotion is not active",
            ErrorCode::UsageRecordNotFound => "Usage record not found",
            ErrorCode::LedgerCommitFailed => "Ledger commit failed, retry the order",
            ErrorCode::InternalError => "Internal error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code as u16
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            4 => ErrorCode::AlreadyExists,
            5 => ErrorCode::InvalidRequest,
            8 => ErrorCode::ValueOutOfRange,
            3002 => ErrorCode::TenantNotFound,
            4501 => ErrorCode::PromotionNotFound,
            4502 => ErrorCode::PromotionDefinitionInvalid,
            4503 => ErrorCode::PromotionNotActive,
            4601 => ErrorCode::UsageRecordNotFound,
            4602 => ErrorCode::LedgerCommitFailed,
            9001 => ErrorCode::InternalError,
            other => return Err(format!("unknown error code: {}", other)),
        };
        Ok(code)
    }
}
