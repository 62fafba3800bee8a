//! # Cart Commands
//!
//! Commands behind the shop page's cart panel.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│  Coupon  │────►│  Order   │       │
//! │  │  Cart    │     │          │     │ Selected │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │               │              │
//! │                   add_to_cart       apply_coupon     checkout           │
//! │                   update_item       (coupon.rs)      (order.rs)         │
//! │                   remove_item                            │              │
//! │                                                          ▼              │
//! │                                                    (back to empty)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::{pricing, CartItem, CartSession, CartTotals, Coupon, Money};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CatalogState, SessionState};

/// One cart line with its discounted total.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineDto {
    pub item: CartItem,

    /// Line total after tier and bulk discounts.
    pub total: Money,

    /// Rate actually applied to the line (0.15 = 15% off).
    pub discount_rate: f64,

    /// Amount the rate took off the line.
    pub discount: Money,
}

/// Cart response including lines, totals and the selected coupon.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineDto>,
    pub totals: CartTotals,
    pub selected_coupon: Option<Coupon>,
    pub total_quantity: i64,
}

impl From<&CartSession> for CartResponse {
    fn from(session: &CartSession) -> Self {
        let lines = session.cart().items();
        let items = lines
            .iter()
            .map(|item| CartLineDto {
                item: item.clone(),
                total: pricing::item_total(item, lines),
                discount_rate: pricing::effective_rate(item, lines),
                discount: pricing::line_discount(item, lines),
            })
            .collect();

        CartResponse {
            items,
            totals: session.totals(),
            selected_coupon: session.selected_coupon().cloned(),
            total_quantity: session.cart().total_quantity(),
        }
    }
}

/// Gets the current cart contents.
///
/// ## Returns
/// Current cart with lines and calculated totals
pub fn get_cart(session: &SessionState) -> CartResponse {
    debug!("get_cart command");
    session.with_session(|s| CartResponse::from(s))
}

/// Adds one unit of a product to the cart.
///
/// ## Behavior
/// - Product already in cart: quantity increases by one
/// - Product not in cart: new line with quantity 1
/// - Nothing left in stock: `INSUFFICIENT_STOCK`
///
/// The line keeps a snapshot of the product as it was when first added.
pub fn add_to_cart(
    catalog: &CatalogState,
    session: &SessionState,
    product_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");

    let product = catalog.with_catalog(|c| c.require_product(product_id).cloned())?;

    let response = session.with_session_mut(|s| {
        s.add_item(&product)?;
        Ok(CartResponse::from(&*s))
    })?;

    Ok(response)
}

/// Sets the quantity of a cart line.
///
/// ## Behavior
/// - Quantity 0 or below: removes the line
/// - Quantity above the product's live stock: `STOCK_LIMIT_EXCEEDED`, cart unchanged
pub fn update_cart_item(
    catalog: &CatalogState,
    session: &SessionState,
    product_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    let response = catalog.with_catalog(|c| {
        session.with_session_mut(|s| {
            s.update_quantity(product_id, quantity, c.products())?;
            Ok(CartResponse::from(&*s))
        })
    })?;

    Ok(response)
}

/// Removes a line from the cart. Removing an absent line is a no-op.
pub fn remove_from_cart(session: &SessionState, product_id: &str) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");

    let response = session.with_session_mut(|s| {
        s.remove_item(product_id);
        Ok(CartResponse::from(&*s))
    })?;

    Ok(response)
}
