//! # Cart Module
//!
//! Cart contents, stock-checked mutations and cart totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action              Method                 Rejection                │
//! │  ─────────              ──────                 ─────────                │
//! │                                                                         │
//! │  Click product ───────► add_item() ──────────► InsufficientStock        │
//! │                                                StockLimitExceeded       │
//! │                                                                         │
//! │  Change quantity ─────► update_quantity() ───► StockLimitExceeded       │
//! │                         (<= 0 removes)         ProductNotFound          │
//! │                                                                         │
//! │  Click remove ────────► remove_item() ───────► (never fails)            │
//! │                                                                         │
//! │  View cart ───────────► totals() ────────────► (read only)              │
//! │                                                                         │
//! │  Every method checks first and mutates last: a rejected call leaves    │
//! │  the cart exactly as it was.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persisted Shape
//! A cart serializes as the bare ordered list of lines:
//! `[{"product": {...}, "quantity": 2}, ...]`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coupon::apply_coupon_discount;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::pricing;
use crate::types::{CartItem, Coupon, Product};
use crate::validation::validate_unique;

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - At most one line per product id (adding the same product increments)
/// - Every line has quantity > 0
/// - Every accepted mutation keeps `quantity <= stock`
///
/// Stored carts are checked against the first two on load; see the
/// `TryFrom<Vec<CartItem>>` impl.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Looks up the line for a product.
    pub fn item(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id() == product_id)
    }

    /// Units of `product_id` currently held, 0 when absent.
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.item(product_id).map_or(0, |i| i.quantity)
    }

    /// Stock still available for `product` after what the cart already
    /// holds. Zero or negative means "sold out" to this customer.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::{Cart, Money, Product};
    ///
    /// let product = Product::new("p1", "Keyboard", Money::from_units(10_000), 2);
    /// let mut cart = Cart::new();
    /// assert_eq!(cart.remaining_stock(&product), 2);
    ///
    /// cart.add_item(&product).unwrap();
    /// assert_eq!(cart.remaining_stock(&product), 1);
    /// ```
    pub fn remaining_stock(&self, product: &Product) -> i64 {
        product.stock - self.quantity_of(&product.id)
    }

    /// Adds one unit of `product`.
    ///
    /// `product` is the live catalog record; its stock is what the check
    /// runs against. A new line snapshots it.
    ///
    /// ## Behavior
    /// - remaining stock <= 0: `InsufficientStock`
    /// - existing line: quantity + 1, unless that exceeds stock
    ///   (`StockLimitExceeded`)
    /// - no line yet: appended with quantity 1
    pub fn add_item(&mut self, product: &Product) -> CoreResult<()> {
        let in_cart = self.quantity_of(&product.id);
        if product.stock - in_cart <= 0 {
            return Err(CoreError::InsufficientStock {
                product_id: product.id.clone(),
                stock: product.stock,
                in_cart,
            });
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            let new_qty = item.quantity + 1;
            if new_qty > product.stock {
                return Err(CoreError::StockLimitExceeded {
                    product_id: product.id.clone(),
                    requested: new_qty,
                    stock: product.stock,
                });
            }
            item.quantity = new_qty;
            return Ok(());
        }

        self.items.push(CartItem::new(product.clone(), 1));
        Ok(())
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - quantity <= 0: same as [`Cart::remove_item`]
    /// - product missing from `catalog`: `ProductNotFound`
    /// - quantity above the catalog stock: `StockLimitExceeded`, no clamping
    /// - product not in the cart: accepted, nothing changes
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        quantity: i64,
        catalog: &[Product],
    ) -> CoreResult<()> {
        if quantity <= 0 {
            self.remove_item(product_id);
            return Ok(());
        }

        let product = catalog
            .iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        if quantity > product.stock {
            return Err(CoreError::StockLimitExceeded {
                product_id: product_id.to_string(),
                requested: quantity,
                stock: product.stock,
            });
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = quantity;
        }
        Ok(())
    }

    /// Removes the line for `product_id`; absent lines are a no-op.
    pub fn remove_item(&mut self, product_id: &str) {
        self.items.retain(|i| i.product_id() != product_id);
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Drains the lines out of the cart, leaving it empty.
    pub fn take_items(&mut self) -> Vec<CartItem> {
        std::mem::take(&mut self.items)
    }

    /// Returns the number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total number of units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Payable total of one line in the context of this cart.
    pub fn item_total(&self, item: &CartItem) -> Money {
        pricing::item_total(item, &self.items)
    }

    /// Cart totals with an optional selected coupon.
    pub fn totals(&self, coupon: Option<&Coupon>) -> CartTotals {
        compute_cart_totals(self, coupon)
    }
}

/// Rebuilds a cart from stored lines, rejecting duplicate product ids and
/// non-positive quantities.
impl TryFrom<Vec<CartItem>> for Cart {
    type Error = ValidationError;

    fn try_from(items: Vec<CartItem>) -> Result<Self, Self::Error> {
        for (index, item) in items.iter().enumerate() {
            if item.quantity <= 0 {
                return Err(ValidationError::OutOfRange {
                    field: "quantity".to_string(),
                    min: 1,
                    max: i64::MAX,
                });
            }
            validate_unique(
                "product id",
                item.product_id(),
                items[..index].iter().map(CartItem::product_id),
            )?;
        }
        Ok(Cart { items })
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Σ price × quantity, no discounts at all.
    pub total_before_discount: Money,

    /// Σ line totals, then the coupon if one is selected. Never negative.
    pub total_after_discount: Money,
}

impl CartTotals {
    /// Everything saved by tiers, the bulk bonus and the coupon together.
    pub fn discount(&self) -> Money {
        self.total_before_discount - self.total_after_discount
    }
}

/// Computes cart totals from scratch.
///
/// ## Steps
/// 1. `total_before_discount` = Σ price × quantity
/// 2. `total_after_discount` = Σ [`pricing::item_total`] (each line already rounded)
/// 3. a selected coupon adjusts `total_after_discount` only
/// 4. `total_after_discount` is floored at 0
///
/// ## Example
/// ```rust
/// use storefront_core::{compute_cart_totals, Cart, Coupon, DiscountType, Money, Product};
///
/// let product = Product::new("p1", "Desk", Money::from_units(50_000), 5);
/// let mut cart = Cart::new();
/// cart.add_item(&product).unwrap();
///
/// let coupon = Coupon::new("5,000 off", "AMOUNT5000", DiscountType::Amount, 5000.0);
/// let totals = compute_cart_totals(&cart, Some(&coupon));
/// assert_eq!(totals.total_before_discount.units(), 50_000);
/// assert_eq!(totals.total_after_discount.units(), 45_000);
/// ```
pub fn compute_cart_totals(cart: &Cart, coupon: Option<&Coupon>) -> CartTotals {
    let total_before_discount: Money = cart.items.iter().map(CartItem::subtotal).sum();

    let mut total_after_discount: Money = cart
        .items
        .iter()
        .map(|item| pricing::item_total(item, &cart.items))
        .sum();

    if let Some(coupon) = coupon {
        total_after_discount = apply_coupon_discount(total_after_discount, coupon);
    }

    CartTotals {
        total_before_discount,
        total_after_discount: total_after_discount.non_negative(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DiscountTier, DiscountType};

    fn test_product(id: &str, price: i64, stock: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::from_units(price), stock)
    }

    fn tiered_product() -> Product {
        test_product("p1", 10_000, 20)
            .with_tier(DiscountTier::new(10, 0.1))
            .with_tier(DiscountTier::new(20, 0.2))
    }

    fn cart_with(product: &Product, quantity: i64) -> Cart {
        let mut cart = Cart::new();
        for _ in 0..quantity {
            cart.add_item(product).unwrap();
        }
        cart
    }

    #[test]
    fn test_add_item_creates_then_increments() {
        let product = test_product("p1", 999, 5);
        let mut cart = Cart::new();

        cart.add_item(&product).unwrap();
        cart.add_item(&product).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.quantity_of("p1"), 2);
        assert_eq!(cart.remaining_stock(&product), 3);
    }

    #[test]
    fn test_add_item_insufficient_stock() {
        let product = test_product("p1", 999, 2);
        let mut cart = cart_with(&product, 2);
        let before = cart.clone();

        let err = cart.add_item(&product).unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientStock {
                product_id: "p1".to_string(),
                stock: 2,
                in_cart: 2,
            }
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_add_item_out_of_stock_product() {
        let product = test_product("p1", 999, 0);
        let mut cart = Cart::new();

        assert!(matches!(
            cart.add_item(&product),
            Err(CoreError::InsufficientStock { .. })
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_item_uses_live_stock() {
        let product = test_product("p1", 999, 3);
        let mut cart = cart_with(&product, 3);

        // Admin restocks; the snapshot in the cart still says 3
        let restocked = Product {
            stock: 4,
            ..product.clone()
        };
        cart.add_item(&restocked).unwrap();
        assert_eq!(cart.quantity_of("p1"), 4);
        assert_eq!(cart.item("p1").unwrap().product.stock, 3);
    }

    #[test]
    fn test_remaining_stock_can_go_negative() {
        let product = test_product("p1", 999, 5);
        let cart = cart_with(&product, 5);

        // Admin lowered stock below what the cart holds
        let shrunk = Product {
            stock: 3,
            ..product
        };
        assert_eq!(cart.remaining_stock(&shrunk), -2);
    }

    #[test]
    fn test_update_quantity() {
        let product = test_product("p1", 999, 10);
        let catalog = vec![product.clone()];
        let mut cart = cart_with(&product, 1);

        cart.update_quantity("p1", 7, &catalog).unwrap();
        assert_eq!(cart.quantity_of("p1"), 7);
    }

    #[test]
    fn test_update_quantity_over_stock_rejected() {
        let product = test_product("p1", 999, 10);
        let catalog = vec![product.clone()];
        let mut cart = cart_with(&product, 3);
        let before = cart.clone();

        let err = cart.update_quantity("p1", 11, &catalog).unwrap_err();
        assert_eq!(
            err,
            CoreError::StockLimitExceeded {
                product_id: "p1".to_string(),
                requested: 11,
                stock: 10,
            }
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_update_quantity_zero_matches_remove() {
        let a = test_product("p1", 999, 10);
        let b = test_product("p2", 500, 10);
        let catalog = vec![a.clone(), b.clone()];

        let mut updated = cart_with(&a, 2);
        updated.add_item(&b).unwrap();
        let mut removed = updated.clone();

        updated.update_quantity("p1", 0, &catalog).unwrap();
        removed.remove_item("p1");
        assert_eq!(updated, removed);

        updated.update_quantity("p2", -3, &catalog).unwrap();
        assert!(updated.is_empty());
    }

    #[test]
    fn test_update_quantity_unknown_product() {
        let product = test_product("p1", 999, 10);
        let mut cart = cart_with(&product, 1);

        let err = cart.update_quantity("ghost", 2, &[product]).unwrap_err();
        assert_eq!(err, CoreError::ProductNotFound("ghost".to_string()));
        assert_eq!(cart.quantity_of("p1"), 1);
    }

    #[test]
    fn test_update_quantity_line_absent_is_noop() {
        let a = test_product("p1", 999, 10);
        let b = test_product("p2", 500, 10);
        let mut cart = cart_with(&a, 1);
        let before = cart.clone();

        cart.update_quantity("p2", 4, &[a, b]).unwrap();
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let product = test_product("p1", 999, 10);
        let mut cart = cart_with(&product, 1);
        cart.remove_item("nope");
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_totals_single_bulk_line() {
        let product = tiered_product();
        let cart = cart_with(&product, 10);

        let totals = cart.totals(None);
        assert_eq!(totals.total_before_discount.units(), 100_000);
        // Tier 0.1 plus the bulk bonus its own quantity unlocks
        assert_eq!(totals.total_after_discount.units(), 85_000);
        assert_eq!(totals.discount().units(), 15_000);
    }

    #[test]
    fn test_totals_sum_rounded_lines() {
        let mut cart = Cart::new();
        let a = test_product("p1", 333, 20);
        let b = test_product("p2", 10, 20);
        for _ in 0..3 {
            cart.add_item(&a).unwrap();
        }
        for _ in 0..10 {
            cart.add_item(&b).unwrap();
        }

        // 949 (949.05) + 95
        let totals = cart.totals(None);
        assert_eq!(totals.total_before_discount.units(), 1_099);
        assert_eq!(totals.total_after_discount.units(), 1_044);
    }

    #[test]
    fn test_totals_with_coupons() {
        let product = test_product("p1", 50_000, 5);
        let cart = cart_with(&product, 1);

        let flat = Coupon::new("5,000 off", "AMOUNT5000", DiscountType::Amount, 5_000.0);
        let totals = cart.totals(Some(&flat));
        assert_eq!(totals.total_before_discount.units(), 50_000);
        assert_eq!(totals.total_after_discount.units(), 45_000);

        let huge = Coupon::new("all off", "HUGE", DiscountType::Amount, 1_000_000.0);
        assert_eq!(cart.totals(Some(&huge)).total_after_discount, Money::zero());

        let percent = Coupon::new("10%", "PERCENT10", DiscountType::Percentage, 10.0);
        assert_eq!(cart.totals(Some(&percent)).total_after_discount.units(), 45_000);
    }

    #[test]
    fn test_totals_after_never_exceed_before() {
        let mut cart = cart_with(&tiered_product(), 12);
        cart.add_item(&test_product("p2", 777, 3)).unwrap();

        let totals = cart.totals(None);
        assert!(totals.total_after_discount <= totals.total_before_discount);
    }

    #[test]
    fn test_empty_cart_totals() {
        let totals = Cart::new().totals(None);
        assert_eq!(totals.total_before_discount, Money::zero());
        assert_eq!(totals.total_after_discount, Money::zero());
    }

    #[test]
    fn test_persisted_shape_is_line_list() {
        let product = test_product("p1", 10_000, 20);
        let cart = cart_with(&product, 2);

        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["quantity"], 2);
        assert_eq!(json[0]["product"]["id"], "p1");

        let restored: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_stored_lines_must_keep_cart_rules() {
        let product = test_product("p1", 10_000, 20);

        let duplicate = vec![CartItem::new(product.clone(), 1), CartItem::new(product.clone(), 3)];
        assert!(matches!(
            Cart::try_from(duplicate),
            Err(ValidationError::Duplicate { .. })
        ));

        for quantity in [0, -2] {
            let json = serde_json::to_value(vec![CartItem::new(product.clone(), quantity)]).unwrap();
            assert!(serde_json::from_value::<Cart>(json).is_err());
        }

        let lines = vec![CartItem::new(product, 3), CartItem::new(test_product("p2", 500, 5), 1)];
        let cart = Cart::try_from(lines).unwrap();
        assert_eq!(cart.total_quantity(), 4);
    }
}
