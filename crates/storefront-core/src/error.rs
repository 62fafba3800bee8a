//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Rejected cart/coupon/catalog transitions       │
//! │  └── ValidationError  - Admin input that breaks a catalog rule         │
//! │                                                                         │
//! │  apps/storefront errors (separate crate)                               │
//! │  ├── StoreError       - Storage read/write failures                    │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → UI                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Every rejection is an expected, recoverable outcome, never a panic
//! 2. A rejected transition leaves the cart and coupon exactly as they were
//! 3. Variants carry the numbers the UI needs to phrase its own message

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Rejections of cart, coupon and catalog transitions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Nothing left to add.
    ///
    /// ## User Workflow
    /// ```text
    /// Click "Add to cart" (stock 5, already 5 in cart)
    ///      │
    ///      ▼
    /// remaining = 5 - 5 = 0
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: "p1", stock: 5, in_cart: 5 }
    ///      │
    ///      ▼
    /// UI shows: "Out of stock"
    /// ```
    #[error("Insufficient stock for {product_id}: stock {stock}, already in cart {in_cart}")]
    InsufficientStock {
        product_id: String,
        stock: i64,
        in_cart: i64,
    },

    /// The resulting line quantity would exceed catalog stock.
    #[error("Quantity {requested} of {product_id} exceeds stock {stock}")]
    StockLimitExceeded {
        product_id: String,
        requested: i64,
        stock: i64,
    },

    /// Percentage coupon applied below the minimum discounted total.
    #[error("Coupon {code} requires a total of at least {minimum}, current total is {total}")]
    CouponIneligible {
        code: String,
        total: Money,
        minimum: Money,
    },

    /// Checkout attempted with no lines.
    #[error("Cart is empty, nothing to order")]
    EmptyCartCheckout,

    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Coupon code is not in the catalog.
    #[error("Coupon not found: {0}")]
    CouponNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Admin editor input that breaks a catalog rule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Integer value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Real-valued rate or percent is outside its interval.
    #[error("{field} must be in {range}, got {value}")]
    RateOutOfRange {
        field: String,
        range: String,
        value: f64,
    },

    /// Duplicate value (e.g., duplicate coupon code).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product_id: "p1".to_string(),
            stock: 5,
            in_cart: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for p1: stock 5, already in cart 5"
        );

        let err = CoreError::CouponIneligible {
            code: "PERCENT10".to_string(),
            total: Money::from_units(9_000),
            minimum: Money::from_units(10_000),
        };
        assert_eq!(
            err.to_string(),
            "Coupon PERCENT10 requires a total of at least 10,000, current total is 9,000"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "code".to_string(),
        };
        assert_eq!(err.to_string(), "code is required");

        let err = ValidationError::Duplicate {
            field: "code".to_string(),
            value: "AMOUNT5000".to_string(),
        };
        assert_eq!(err.to_string(), "code 'AMOUNT5000' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
