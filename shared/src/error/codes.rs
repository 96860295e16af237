//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission / account-state errors
//! - 3xxx: Table errors
//! - 4xxx: Order errors
//! - 5xxx: Payment / subscription errors
//! - 6xxx: Menu errors
//! - 7xxx: Restaurant errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 for efficient serialization and cross-language
/// compatibility (Rust, TypeScript).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
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
    /// Resource is gone (session over, link expired)
    Gone = 6,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Verification code expired
    VerificationCodeExpired = 1005,
    /// Verification code invalid
    VerificationCodeInvalid = 1006,
    /// Too many verification attempts
    TooManyAttempts = 1007,
    /// Email not verified yet
    EmailNotVerified = 1008,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// No active subscription for restaurant
    SubscriptionRequired = 2002,
    /// Registration is not complete
    RegistrationIncomplete = 2003,

    // ==================== 3xxx: Table ====================
    /// Table not found
    TableNotFound = 3001,
    /// Table already has an active order
    TableOccupied = 3002,
    /// Table is marked unavailable
    TableUnavailable = 3003,
    /// Table is reserved for another customer
    TableReserved = 3004,
    /// Table number already exists
    TableNumberExists = 3005,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order is not active
    OrderNotActive = 4002,
    /// Order has already been completed
    OrderAlreadyCompleted = 4003,
    /// Order has already been cancelled
    OrderAlreadyCancelled = 4004,
    /// Status transition not allowed
    InvalidStatusTransition = 4005,
    /// Order request not found
    OrderRequestNotFound = 4006,
    /// Order request is not in PLACED status
    OrderRequestNotPlaced = 4007,
    /// Cart contains no items
    OrderEmpty = 4008,

    // ==================== 5xxx: Payment / Subscription ====================
    /// Payment processing failed
    PaymentFailed = 5001,
    /// Payment not found
    PaymentNotFound = 5002,
    /// Gateway-reported payment does not match the expected payment
    PaymentMismatch = 5003,
    /// Payment has already been verified
    PaymentAlreadyVerified = 5004,
    /// Plan not found
    PlanNotFound = 5005,

    // ==================== 6xxx: Menu ====================
    /// Category not found
    CategoryNotFound = 6001,
    /// Category name already exists
    CategoryNameExists = 6002,
    /// Category still has menu items
    CategoryHasItems = 6003,
    /// Menu item not found
    MenuItemNotFound = 6004,
    /// Menu item is sold out
    MenuItemSoldOut = 6005,
    /// Menu item option not found
    MenuItemOptionNotFound = 6006,

    // ==================== 7xxx: Restaurant ====================
    /// Restaurant not found
    RestaurantNotFound = 7001,
    /// Email already registered
    EmailAlreadyRegistered = 7002,
    /// Restaurant is outside business hours
    OutsideBusinessHours = 7003,
    /// Restaurant is closed for a holiday
    HolidayClosed = 7004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Upstream gateway error
    GatewayError = 9003,
    /// Service temporarily unavailable
    ServiceUnavailable = 9004,
    /// Email delivery failed
    EmailSendFailed = 9005,
    /// Object storage error
    StorageError = 9006,
}

impl ErrorCode {
    /// Numeric value of this code
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::Gone => "Resource is no longer available",

            Self::NotAuthenticated => "Authentication required",
            Self::InvalidCredentials => "Invalid email or password",
            Self::TokenExpired => "Token expired",
            Self::TokenInvalid => "Invalid token",
            Self::VerificationCodeExpired => "Verification code expired",
            Self::VerificationCodeInvalid => "Verification code invalid",
            Self::TooManyAttempts => "Too many attempts, request a new code",
            Self::EmailNotVerified => "Email not verified",

            Self::PermissionDenied => "Permission denied",
            Self::SubscriptionRequired => "An active subscription is required",
            Self::RegistrationIncomplete => "Registration is not complete",

            Self::TableNotFound => "Table not found",
            Self::TableOccupied => "Table already has an active order",
            Self::TableUnavailable => "Table is unavailable",
            Self::TableReserved => "Table is reserved",
            Self::TableNumberExists => "Table number already exists",

            Self::OrderNotFound => "Order not found",
            Self::OrderNotActive => "Order is not active",
            Self::OrderAlreadyCompleted => "Order has already been completed",
            Self::OrderAlreadyCancelled => "Order has already been cancelled",
            Self::InvalidStatusTransition => "Status transition not allowed",
            Self::OrderRequestNotFound => "Order request not found",
            Self::OrderRequestNotPlaced => "Order request has already been handled",
            Self::OrderEmpty => "Cart contains no items",

            Self::PaymentFailed => "Payment processing failed",
            Self::PaymentNotFound => "Payment not found",
            Self::PaymentMismatch => "Payment does not match the expected amount",
            Self::PaymentAlreadyVerified => "Payment has already been verified",
            Self::PlanNotFound => "Plan not found",

            Self::CategoryNotFound => "Category not found",
            Self::CategoryNameExists => "Category name already exists",
            Self::CategoryHasItems => "Category still has menu items",
            Self::MenuItemNotFound => "Menu item not found",
            Self::MenuItemSoldOut => "Menu item is sold out",
            Self::MenuItemOptionNotFound => "Menu item option not found",

            Self::RestaurantNotFound => "Restaurant not found",
            Self::EmailAlreadyRegistered => "Email already registered",
            Self::OutsideBusinessHours => "The restaurant is closed right now",
            Self::HolidayClosed => "The restaurant is closed today",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::GatewayError => "Upstream gateway error",
            Self::ServiceUnavailable => "Service temporarily unavailable",
            Self::EmailSendFailed => "Failed to send email",
            Self::StorageError => "Object storage error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code.code()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::Gone,

            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,
            1005 => Self::VerificationCodeExpired,
            1006 => Self::VerificationCodeInvalid,
            1007 => Self::TooManyAttempts,
            1008 => Self::EmailNotVerified,

            2001 => Self::PermissionDenied,
            2002 => Self::SubscriptionRequired,
            2003 => Self::RegistrationIncomplete,

            3001 => Self::TableNotFound,
            3002 => Self::TableOccupied,
            3003 => Self::TableUnavailable,
            3004 => Self::TableReserved,
            3005 => Self::TableNumberExists,

            4001 => Self::OrderNotFound,
            4002 => Self::OrderNotActive,
            4003 => Self::OrderAlreadyCompleted,
            4004 => Self::OrderAlreadyCancelled,
            4005 => Self::InvalidStatusTransition,
            4006 => Self::OrderRequestNotFound,
            4007 => Self::OrderRequestNotPlaced,
            4008 => Self::OrderEmpty,

            5001 => Self::PaymentFailed,
            5002 => Self::PaymentNotFound,
            5003 => Self::PaymentMismatch,
            5004 => Self::PaymentAlreadyVerified,
            5005 => Self::PlanNotFound,

            6001 => Self::CategoryNotFound,
            6002 => Self::CategoryNameExists,
            6003 => Self::CategoryHasItems,
            6004 => Self::MenuItemNotFound,
            6005 => Self::MenuItemSoldOut,
            6006 => Self::MenuItemOptionNotFound,

            7001 => Self::RestaurantNotFound,
            7002 => Self::EmailAlreadyRegistered,
            7003 => Self::OutsideBusinessHours,
            7004 => Self::HolidayClosed,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::GatewayError,
            9004 => Self::ServiceUnavailable,
            9005 => Self::EmailSendFailed,
            9006 => Self::StorageError,

            other => return Err(format!("Unknown error code: {other}")),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for code in [
            ErrorCode::ValidationFailed,
            ErrorCode::TableOccupied,
            ErrorCode::OrderNotFound,
            ErrorCode::PaymentMismatch,
            ErrorCode::InternalError,
        ] {
            let raw: u16 = code.into();
            assert_eq!(ErrorCode::try_from(raw).unwrap(), code);
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert!(ErrorCode::try_from(60000).is_err());
    }

    #[test]
    fn test_serde_as_u16() {
        let json = serde_json::to_string(&ErrorCode::TableOccupied).unwrap();
        assert_eq!(json, "3002");
        let back: ErrorCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ErrorCode::TableOccupied);
    }
}
