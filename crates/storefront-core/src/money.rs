//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Whole Currency Units
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  STOREFRONT MONEY                                                       │
//! │                                                                         │
//! │  Prices are whole currency units (10,000 = ten thousand, no minor      │
//! │  unit). Every stored amount is an integer.                              │
//! │                                                                         │
//! │  Discount rates are real numbers (0.1, 0.05, ...). Where a rate meets  │
//! │  an amount we multiply in f64 and round EXACTLY ONCE, half-up, the     │
//! │  same way the storefront UI does, so both sides agree to the unit.     │
//! │                                                                         │
//! │    round(10,000 × 12 × (1 − 0.15)) = 102,000                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_units(10_000);
//! let line = price.multiply_quantity(3);          // 30,000
//! let discounted = line.apply_rate(0.1);          // 27,000
//! assert_eq!(discounted.units(), 27_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Rounding
// =============================================================================

/// Rounds to the nearest integer, ties toward positive infinity.
///
/// `f64::round` sends ties away from zero, which differs for negative
/// halves (-2.5 → -3). The storefront UI rounds -2.5 to -2, so we take the
/// floor and compare the exact fractional part instead.
///
/// ## Example
/// ```rust
/// use storefront_core::money::round_half_up;
///
/// assert_eq!(round_half_up(2.5), 3);
/// assert_eq!(round_half_up(-2.5), -2);
/// assert_eq!(round_half_up(0.49999999999999994), 0);
/// ```
pub fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    // x - floor(x) is exact for every finite double
    if value - floor >= 0.5 {
        (floor + 1.0) as i64
    } else {
        floor as i64
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: discount amounts are differences of totals
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serializes as a bare number**: `{"price": 10000}` in persisted records
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartItem line total ──► CartTotals.total_before_discount
///                          │
///                          └─► tier/bulk rate ──► CartTotals.total_after_discount
///                                                        │
///                                                        └─► coupon adjustment
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_units(20_000);
    /// assert_eq!(price.units(), 20_000);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_units(20_000);
    /// assert_eq!(unit_price.multiply_quantity(3).units(), 60_000);
    /// ```
    /// Saturates at the `i64` bounds instead of overflowing.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Scales the amount by a real factor, rounding half-up once.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let total = Money::from_units(55_555);
    /// assert_eq!(total.scale(0.9).units(), 50_000); // 49,999.5 → 50,000
    /// ```
    pub fn scale(&self, factor: f64) -> Money {
        Money(round_half_up(self.0 as f64 * factor))
    }

    /// Applies a discount rate (0.1 = 10% off) and returns the discounted
    /// amount.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let subtotal = Money::from_units(100_000);
    /// assert_eq!(subtotal.apply_rate(0.1).units(), 90_000);
    /// ```
    pub fn apply_rate(&self, rate: f64) -> Money {
        self.scale(1.0 - rate)
    }

    /// Deducts a flat (possibly fractional) amount, never going below zero.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_units(50_000).deduct(5_000.0).units(), 45_000);
    /// assert_eq!(Money::from_units(3_000).deduct(5_000.0).units(), 0);
    /// ```
    pub fn deduct(&self, amount: f64) -> Money {
        let remaining = (self.0 as f64 - amount).max(0.0);
        Money(round_half_up(remaining))
    }

    /// Clamps negative values to zero.
    #[inline]
    pub fn non_negative(self) -> Money {
        Money(self.0.max(0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount with thousands separators ("102,000").
///
/// ## Note
/// This is for logs and debugging. Currency symbols and localisation are the
/// UI's business.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}", sign, grouped)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
