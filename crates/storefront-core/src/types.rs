//! # Domain Types
//!
//! Core records shared by the engine, the admin editor and storage.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │      Product        │   │    CartItem     │   │     Coupon      │   │
//! │  │  ─────────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  id                 │◄──│  product        │   │  code (unique)  │   │
//! │  │  price (Money)      │   │  quantity > 0   │   │  discount_type  │   │
//! │  │  stock              │   └─────────────────┘   │  discount_value │   │
//! │  │  discount_tiers ────┼─► DiscountTier          └─────────────────┘   │
//! │  └─────────────────────┘   { min_quantity, rate }                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Shape
//! All records serialize camelCase so the storefront UI and the persisted
//! JSON read the same: `{"id":"p1","price":10000,"stock":20,"discountTiers":[...]}`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Discount Tier
// =============================================================================

/// A quantity-tier discount: `rate` off once a line holds at least
/// `min_quantity` units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountTier {
    /// Smallest line quantity that unlocks this tier (>= 1).
    pub min_quantity: i64,

    /// Discount rate in [0, 1). 0.1 = 10% off.
    pub rate: f64,
}

impl DiscountTier {
    pub const fn new(min_quantity: i64, rate: f64) -> Self {
        DiscountTier { min_quantity, rate }
    }

    /// Checks whether a line of `quantity` units unlocks this tier.
    #[inline]
    pub fn applies_to(&self, quantity: i64) -> bool {
        quantity >= self.min_quantity
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, stable for the product's lifetime.
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Unit price in whole currency units.
    pub price: Money,

    /// Units available, independent of any cart.
    pub stock: i64,

    /// Quantity tiers. No uniqueness is enforced on `min_quantity`.
    #[serde(default)]
    pub discount_tiers: Vec<DiscountTier>,

    /// Optional description for the product card.
    #[serde(default)]
    pub description: Option<String>,

    /// Highlighted in the product list ("BEST").
    #[serde(default)]
    pub is_recommended: bool,
}

impl Product {
    /// Creates a product with no tiers and no UI extras.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money, stock: i64) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            price,
            stock,
            discount_tiers: Vec::new(),
            description: None,
            is_recommended: false,
        }
    }

    /// Builder-style tier addition.
    pub fn with_tier(mut self, tier: DiscountTier) -> Self {
        self.discount_tiers.push(tier);
        self
    }

    /// Highest tier rate configured on the product, for "up to n% off"
    /// labels in the product list.
    pub fn max_tier_rate(&self) -> f64 {
        self.discount_tiers
            .iter()
            .map(|tier| tier.rate)
            .fold(0.0, f64::max)
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// One line of a cart.
///
/// ## Snapshot Semantics
/// `product` is the catalog record as it was when the line was created.
/// Pricing reads the snapshot; stock checks read the live catalog product
/// handed in by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product: Product,

    /// Always > 0. A line that would drop to zero is removed instead.
    pub quantity: i64,
}

impl CartItem {
    pub fn new(product: Product, quantity: i64) -> Self {
        CartItem { product, quantity }
    }

    #[inline]
    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    /// Undiscounted line amount (price × quantity).
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// How a coupon's `discount_value` is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Flat deduction in currency units.
    Amount,
    /// Proportional deduction; value is a percent in [0, 100].
    Percentage,
}

impl std::fmt::Display for DiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscountType::Amount => write!(f, "amount"),
            DiscountType::Percentage => write!(f, "percentage"),
        }
    }
}

/// A coupon from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Display label.
    #[serde(default)]
    pub name: String,

    /// Unique code the customer selects.
    pub code: String,

    pub discount_type: DiscountType,

    pub discount_value: f64,
}

impl Coupon {
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        discount_type: DiscountType,
        discount_value: f64,
    ) -> Self {
        Coupon {
            name: name.into(),
            code: code.into(),
            discount_type,
            discount_value,
        }
    }

    #[inline]
    pub fn is_percentage(&self) -> bool {
        self.discount_type == DiscountType::Percentage
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_wire_shape() {
        let product = Product::new("p1", "Keyboard", Money::from_units(10_000), 20)
            .with_tier(DiscountTier::new(10, 0.1));

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["price"], 10_000);
        assert_eq!(json["discountTiers"][0]["minQuantity"], 10);
        assert_eq!(json["discountTiers"][0]["rate"], 0.1);
        assert_eq!(json["isRecommended"], false);
    }

    #[test]
    fn test_product_missing_optional_fields() {
        let product: Product =
            serde_json::from_str(r#"{"id":"p9","price":500,"stock":3}"#).unwrap();
        assert_eq!(product.name, "");
        assert!(product.discount_tiers.is_empty());
        assert_eq!(product.description, None);
        assert_eq!(product.max_tier_rate(), 0.0);
    }

    #[test]
    fn test_max_tier_rate() {
        let product = Product::new("p1", "Keyboard", Money::from_units(10_000), 20)
            .with_tier(DiscountTier::new(20, 0.2))
            .with_tier(DiscountTier::new(10, 0.1));
        assert_eq!(product.max_tier_rate(), 0.2);
    }

    #[test]
    fn test_discount_type_serde() {
        let coupon = Coupon::new("10%", "PERCENT10", DiscountType::Percentage, 10.0);
        let json = serde_json::to_value(&coupon).unwrap();
        assert_eq!(json["discountType"], "percentage");
        assert_eq!(json["discountValue"], 10.0);
        assert!(coupon.is_percentage());
    }

    #[test]
    fn test_cart_item_subtotal() {
        let item = CartItem::new(Product::new("p2", "Mouse", Money::from_units(20_000), 5), 3);
        assert_eq!(item.subtotal().units(), 60_000);
        assert_eq!(item.product_id(), "p2");
    }
}
