//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  UI                          Rust                                       │
//! │  ──                          ────                                       │
//! │                                                                         │
//! │  addToCart('p1')                                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Engine rejection? ── CoreError::InsufficientStock ──┐           │  │
//! │  │         │                                            ▼           │  │
//! │  │         │                                        ApiError ──────►│  │
//! │  │         ▼                                                        │  │
//! │  │  Success ───────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  switch (e.code) {                                                      │
//! │    case 'INSUFFICIENT_STOCK': notify('Out of stock'); break;            │
//! │    case 'COUPON_INELIGIBLE':  notify('Minimum 10,000'); break;          │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage failures never reach this type from cart commands: persistence
//! is best-effort and only logged. They do surface from `Storefront::open`.

use serde::Serialize;
use storefront_core::CoreError;

use crate::state::ConfigError;
use crate::storage::StoreError;

/// API error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "STOCK_LIMIT_EXCEEDED",
///   "message": "Quantity 11 of p1 exceeds stock 10"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for logs and fallback display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or coupon not found
    NotFound,

    /// Admin input validation failed
    ValidationError,

    /// Add-to-cart with nothing left in stock
    InsufficientStock,

    /// Requested quantity above stock
    StockLimitExceeded,

    /// Percentage coupon below the minimum total
    CouponIneligible,

    /// Checkout with an empty cart
    EmptyCart,

    /// Storage could not be opened or read
    StorageError,

    /// Configuration could not be loaded
    ConfigError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts engine rejections to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            CoreError::StockLimitExceeded { .. } => ErrorCode::StockLimitExceeded,
            CoreError::CouponIneligible { .. } => ErrorCode::CouponIneligible,
            CoreError::EmptyCartCheckout => ErrorCode::EmptyCart,
            CoreError::ProductNotFound(id) => return ApiError::not_found("Product", id),
            CoreError::CouponNotFound(code) => return ApiError::not_found("Coupon", code),
            CoreError::Validation(e) => return ApiError::validation(e.to_string()),
        };
        ApiError::new(code, err.to_string())
    }
}

/// Converts storage errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Storage failed: {}", err);
        ApiError::new(ErrorCode::StorageError, err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{Money, ValidationError};

    #[test]
    fn test_core_error_codes() {
        let err: ApiError = CoreError::CouponIneligible {
            code: "PERCENT10".to_string(),
            total: Money::from_units(9_000),
            minimum: Money::from_units(10_000),
        }
        .into();
        assert_eq!(err.code, ErrorCode::CouponIneligible);

        let err: ApiError = CoreError::ProductNotFound("p9".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: p9");

        let err: ApiError = CoreError::from(ValidationError::Required {
            field: "code".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "code is required");
    }

    #[test]
    fn test_serialized_shape() {
        let err: ApiError = CoreError::EmptyCartCheckout.into();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "EMPTY_CART");
        assert_eq!(json["message"], "Cart is empty, nothing to order");
    }
}
