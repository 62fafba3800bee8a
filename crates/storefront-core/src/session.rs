//! # Cart Session
//!
//! The cart state machine: one cart plus at most one selected coupon.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CartSession Transitions                              │
//! │                                                                         │
//! │        add_item / update_quantity / remove_item                         │
//! │              ┌───────────┐                                              │
//! │              ▼           │                                              │
//! │  ┌──────────────────────────┐   apply_coupon (eligible)                 │
//! │  │ (cart, selected: None)   │ ─────────────────────────────┐            │
//! │  └──────────────────────────┘                              ▼            │
//! │        ▲          ▲                     ┌──────────────────────────┐    │
//! │        │          └──── clear_coupon ── │ (cart, selected: Some)   │    │
//! │        │                                └──────────────────────────┘    │
//! │        │                                              │                 │
//! │        └────────── checkout (non-empty cart) ◄────────┘                 │
//! │                    → Order, cart = [], selected = None                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no global state: the caller owns the session value and threads
//! it through every call. Totals are recomputed from the current cart and
//! coupon on every read.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{compute_cart_totals, Cart, CartTotals};
use crate::coupon::check_eligibility;
use crate::error::{CoreError, CoreResult};
use crate::types::{CartItem, Coupon, Product};

// =============================================================================
// Order
// =============================================================================

/// What checkout hands back: the lines and totals that were ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Caller-supplied order identifier.
    pub order_id: String,

    pub items: Vec<CartItem>,

    pub totals: CartTotals,

    /// Code of the coupon that was applied, if any.
    pub coupon_code: Option<String>,
}

// =============================================================================
// Cart Session
// =============================================================================

/// One customer's cart and selected coupon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSession {
    cart: Cart,
    selected_coupon: Option<Coupon>,
}

impl CartSession {
    /// Creates a session with an empty cart and no coupon.
    pub fn new() -> Self {
        CartSession::default()
    }

    /// Resumes a session from a restored cart.
    pub fn with_cart(cart: Cart) -> Self {
        CartSession {
            cart,
            selected_coupon: None,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn selected_coupon(&self) -> Option<&Coupon> {
        self.selected_coupon.as_ref()
    }

    /// Totals with the selected coupon applied.
    pub fn totals(&self) -> CartTotals {
        compute_cart_totals(&self.cart, self.selected_coupon.as_ref())
    }

    /// Totals ignoring the selected coupon; what eligibility is judged on.
    pub fn totals_without_coupon(&self) -> CartTotals {
        compute_cart_totals(&self.cart, None)
    }

    /// See [`Cart::add_item`].
    pub fn add_item(&mut self, product: &Product) -> CoreResult<()> {
        self.cart.add_item(product)
    }

    /// See [`Cart::update_quantity`].
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        quantity: i64,
        catalog: &[Product],
    ) -> CoreResult<()> {
        self.cart.update_quantity(product_id, quantity, catalog)
    }

    /// See [`Cart::remove_item`].
    pub fn remove_item(&mut self, product_id: &str) {
        self.cart.remove_item(product_id);
    }

    /// Selects `coupon` if the current pre-coupon total allows it.
    ///
    /// On `CouponIneligible` the previously selected coupon (if any) stays
    /// selected.
    pub fn apply_coupon(&mut self, coupon: Coupon) -> CoreResult<()> {
        let pre_coupon_total = self.totals_without_coupon().total_after_discount;
        check_eligibility(&coupon, pre_coupon_total)?;
        self.selected_coupon = Some(coupon);
        Ok(())
    }

    /// Unselects the coupon, whatever it was.
    pub fn clear_coupon(&mut self) {
        self.selected_coupon = None;
    }

    /// Places the order under `order_id`, then empties the cart and drops
    /// the coupon together.
    pub fn checkout(&mut self, order_id: impl Into<String>) -> CoreResult<Order> {
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCartCheckout);
        }

        let totals = self.totals();
        let coupon_code = self.selected_coupon.take().map(|c| c.code);
        let items = self.cart.take_items();

        Ok(Order {
            order_id: order_id.into(),
            items,
            totals,
            coupon_code,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
