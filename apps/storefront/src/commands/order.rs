//! # Order Commands

use chrono::{DateTime, Utc};
use serde::Serialize;
use storefront_core::Order;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{SessionState, StorefrontConfig};

/// What the confirmation screen shows after checkout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order: Order,
    pub store_name: String,
    pub placed_at: DateTime<Utc>,
    /// Final amount formatted for display ("97,000원").
    pub amount_due: String,
}

/// Places the order for the current cart.
///
/// The cart and the selected coupon are cleared together. Order ids are
/// `ORD-<unix millis>` taken from the confirmation time.
///
/// ## Errors
/// - `EMPTY_CART`: nothing to order
pub fn checkout(session: &SessionState, config: &StorefrontConfig) -> Result<OrderConfirmation, ApiError> {
    debug!("checkout command");

    let placed_at = Utc::now();
    let order_id = format!("ORD-{}", placed_at.timestamp_millis());

    let order = session.with_session_mut(|s| s.checkout(order_id))?;

    info!(
        order_id = %order.order_id,
        total = %order.totals.total_after_discount,
        items = order.items.len(),
        coupon = ?order.coupon_code,
        "Order placed"
    );

    Ok(OrderConfirmation {
        amount_due: config.format_money(order.totals.total_after_discount),
        store_name: config.store_name.clone(),
        order,
        placed_at,
    })
}
