//! # Validation Module
//!
//! Catalog rules enforced when the admin editor creates or edits products,
//! discount tiers and coupons.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Admin form (UI)                                              │
//! │  ├── Field formats, lengths, charset                                   │
//! │  └── Immediate feedback and message wording                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Ranges the pricing engine relies on                               │
//! │  │   (price >= 0, stock >= 0, tier rate in [0,1), percent <= 100)      │
//! │  └── Uniqueness of product ids and coupon codes                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog                                                      │
//! │  └── Only validated records get stored                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{Coupon, DiscountTier, DiscountType, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Product Validators
// =============================================================================

/// Validates a price in whole units. Zero is allowed (free items).
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_price;
///
/// assert!(validate_price(10_000).is_ok());
/// assert!(validate_price(0).is_ok());
/// assert!(validate_price(-1).is_err());
/// ```
pub fn validate_price(units: i64) -> ValidationResult<()> {
    if units < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Validates a stock level. Zero is allowed (sold out).
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Validates a discount tier.
///
/// ## Rules
/// - `min_quantity` >= 1
/// - `rate` in [0, 1)
pub fn validate_discount_tier(tier: &DiscountTier) -> ValidationResult<()> {
    if tier.min_quantity < 1 {
        return Err(ValidationError::OutOfRange {
            field: "minQuantity".to_string(),
            min: 1,
            max: i64::MAX,
        });
    }

    if !(0.0..1.0).contains(&tier.rate) {
        return Err(ValidationError::RateOutOfRange {
            field: "rate".to_string(),
            range: "[0, 1)".to_string(),
            value: tier.rate,
        });
    }

    Ok(())
}

/// Validates a whole product record.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    required("id", &product.id)?;
    required("name", &product.name)?;
    validate_price(product.price.units())?;
    validate_stock(product.stock)?;
    product
        .discount_tiers
        .iter()
        .try_for_each(validate_discount_tier)
}

// =============================================================================
// Coupon Validators
// =============================================================================

/// Validates a coupon record.
///
/// ## Rules
/// - `code` must not be empty
/// - `discount_value` >= 0
/// - percentage coupons: `discount_value` <= 100
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_coupon;
/// use storefront_core::{Coupon, DiscountType};
///
/// assert!(validate_coupon(&Coupon::new("10%", "PERCENT10", DiscountType::Percentage, 10.0)).is_ok());
/// assert!(validate_coupon(&Coupon::new("bad", "PERCENT150", DiscountType::Percentage, 150.0)).is_err());
/// ```
pub fn validate_coupon(coupon: &Coupon) -> ValidationResult<()> {
    required("code", &coupon.code)?;

    let (range, in_range) = match coupon.discount_type {
        DiscountType::Amount => ("[0, ∞)", coupon.discount_value >= 0.0),
        DiscountType::Percentage => (
            "[0, 100]",
            (0.0..=100.0).contains(&coupon.discount_value),
        ),
    };

    // NaN fails both checks
    if !in_range {
        return Err(ValidationError::RateOutOfRange {
            field: "discountValue".to_string(),
            range: range.to_string(),
            value: coupon.discount_value,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Rejects a value already present among `existing`.
pub fn validate_unique<'a>(
    field: &str,
    value: &str,
    mut existing: impl Iterator<Item = &'a str>,
) -> ValidationResult<()> {
    if existing.any(|e| e == value) {
        return Err(ValidationError::Duplicate {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
