//! # Coupon Module
//!
//! Coupon eligibility and the adjustment a selected coupon makes to the
//! discounted cart total.
//!
//! ## Apply Coupon Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Customer picks a coupon                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pre-coupon total = totals without any coupon                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  check_eligibility() ← percentage needs >= 10,000                      │
//! │       │                                                                 │
//! │       ├── Err → selection unchanged, UI explains why                   │
//! │       │                                                                 │
//! │       └── Ok  → coupon selected; apply_coupon_discount() runs on       │
//! │                 every totals computation from now on                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Coupon, DiscountType};
use crate::PERCENTAGE_COUPON_MINIMUM;

/// Decides whether `coupon` may be selected against a cart whose discounted
/// total, before any coupon, is `pre_coupon_total`.
///
/// ## Example
/// ```rust
/// use storefront_core::{coupon, Coupon, DiscountType, Money};
///
/// let percent = Coupon::new("10%", "PERCENT10", DiscountType::Percentage, 10.0);
/// assert!(coupon::check_eligibility(&percent, Money::from_units(9_000)).is_err());
/// assert!(coupon::check_eligibility(&percent, Money::from_units(10_000)).is_ok());
///
/// let amount = Coupon::new("5,000 off", "AMOUNT5000", DiscountType::Amount, 5000.0);
/// assert!(coupon::check_eligibility(&amount, Money::from_units(1)).is_ok());
/// ```
pub fn check_eligibility(coupon: &Coupon, pre_coupon_total: Money) -> CoreResult<()> {
    if coupon.is_percentage() && pre_coupon_total < PERCENTAGE_COUPON_MINIMUM {
        return Err(CoreError::CouponIneligible {
            code: coupon.code.clone(),
            total: pre_coupon_total,
            minimum: PERCENTAGE_COUPON_MINIMUM,
        });
    }
    Ok(())
}

/// Applies `coupon` to an already tier/bulk-discounted total.
///
/// - `amount`: `max(0, total − value)`
/// - `percentage`: `round(total × (1 − value / 100))`
pub fn apply_coupon_discount(total: Money, coupon: &Coupon) -> Money {
    match coupon.discount_type {
        DiscountType::Amount => total.deduct(coupon.discount_value),
        DiscountType::Percentage => total.scale(1.0 - coupon.discount_value / 100.0),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
