//! # Pricing Module
//!
//! Per-line discount resolution and line totals.
//!
//! ## Line Pricing Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Line Total Calculation                               │
//! │                                                                         │
//! │  CartItem { price 10,000, qty 12, tiers [10: 0.1, 20: 0.2] }           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  tier_rate()          best tier with min_quantity <= 12    → 0.10      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  has_bulk_purchase()  any line in the cart with qty >= 10  → +0.05     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  effective_rate()     min(0.10 + 0.05, 0.5)                → 0.15      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  item_total()         round(10,000 × 12 × (1 − 0.15))      → 102,000   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The bulk bonus is cart-wide: one line reaching the threshold discounts
//! every line, including lines of a single unit.

use crate::money::Money;
use crate::types::CartItem;
use crate::{BULK_PURCHASE_BONUS, BULK_PURCHASE_THRESHOLD, MAX_DISCOUNT_RATE};

/// Best tier rate unlocked by the line's quantity, 0 when none qualifies.
///
/// ## Example
/// ```rust
/// use storefront_core::{pricing, CartItem, DiscountTier, Money, Product};
///
/// let product = Product::new("p1", "Keyboard", Money::from_units(10_000), 20)
///     .with_tier(DiscountTier::new(10, 0.1))
///     .with_tier(DiscountTier::new(20, 0.2));
///
/// assert_eq!(pricing::tier_rate(&CartItem::new(product.clone(), 9)), 0.0);
/// assert_eq!(pricing::tier_rate(&CartItem::new(product.clone(), 10)), 0.1);
/// assert_eq!(pricing::tier_rate(&CartItem::new(product, 20)), 0.2);
/// ```
pub fn tier_rate(item: &CartItem) -> f64 {
    item.product
        .discount_tiers
        .iter()
        .filter(|tier| tier.applies_to(item.quantity))
        .map(|tier| tier.rate)
        .fold(0.0, f64::max)
}

/// Checks whether any line of the cart is a bulk purchase.
pub fn has_bulk_purchase(cart: &[CartItem]) -> bool {
    cart.iter()
        .any(|item| item.quantity >= BULK_PURCHASE_THRESHOLD)
}

/// Combined tier + bulk rate actually charged on a line, capped at
/// [`MAX_DISCOUNT_RATE`].
///
/// Also what the cart shows as the line's "n% off" badge.
pub fn effective_rate(item: &CartItem, cart: &[CartItem]) -> f64 {
    let bulk_bonus = if has_bulk_purchase(cart) {
        BULK_PURCHASE_BONUS
    } else {
        0.0
    };
    (tier_rate(item) + bulk_bonus).min(MAX_DISCOUNT_RATE)
}

/// Payable total of one line.
///
/// `price × quantity` is formed first, then scaled by `1 − rate` and
/// rounded once. Rounding per unit would drift by up to `quantity / 2`.
pub fn item_total(item: &CartItem, cart: &[CartItem]) -> Money {
    item.subtotal().apply_rate(effective_rate(item, cart))
}

/// Amount knocked off a line by tier and bulk discounts.
pub fn line_discount(item: &CartItem, cart: &[CartItem]) -> Money {
    item.subtotal() - item_total(item, cart)
}

// =============================================================================
// Unit Tests
// =============================================================================
