//! # Coupon Commands
//!
//! Coupon selection for the cart and coupon editing for the admin page.
//!
//! Only one coupon can be selected at a time. Eligibility is judged once,
//! when the coupon is applied, against the cart's pre-coupon total.

use storefront_core::Coupon;
use tracing::{debug, info};

use crate::commands::cart::CartResponse;
use crate::error::ApiError;
use crate::state::{CatalogState, SessionState};

/// Lists all coupons.
pub fn list_coupons(catalog: &CatalogState) -> Vec<Coupon> {
    debug!("list_coupons command");
    catalog.with_catalog(|c| c.coupons().to_vec())
}

/// Selects a coupon by code.
///
/// ## Errors
/// - `NOT_FOUND`: no coupon with this code
/// - `COUPON_INELIGIBLE`: percentage coupon on a total below the minimum;
///   the previous selection stays
pub fn apply_coupon(
    catalog: &CatalogState,
    session: &SessionState,
    code: &str,
) -> Result<CartResponse, ApiError> {
    debug!(code = %code, "apply_coupon command");

    let coupon = catalog.with_catalog(|c| c.require_coupon(code).cloned())?;

    let response = session.with_session_mut(|s| {
        s.apply_coupon(coupon)?;
        Ok(CartResponse::from(&*s))
    })?;

    Ok(response)
}

/// Unselects the coupon.
pub fn clear_coupon(session: &SessionState) -> Result<CartResponse, ApiError> {
    debug!("clear_coupon command");

    let response = session.with_session_mut(|s| {
        s.clear_coupon();
        Ok(CartResponse::from(&*s))
    })?;

    Ok(response)
}

/// Creates a coupon. Codes must be unique.
pub fn add_coupon(catalog: &CatalogState, coupon: Coupon) -> Result<Coupon, ApiError> {
    debug!(code = %coupon.code, kind = %coupon.discount_type, "add_coupon command");

    catalog.with_catalog_mut(|c| c.add_coupon(coupon.clone()))?;

    info!(code = %coupon.code, value = coupon.discount_value, "Coupon added");
    Ok(coupon)
}

/// Deletes a coupon. If it is the selected one, the selection is cleared.
pub fn delete_coupon(
    catalog: &CatalogState,
    session: &SessionState,
    code: &str,
) -> Result<Coupon, ApiError> {
    debug!(code = %code, "delete_coupon command");

    let removed = catalog.with_catalog_mut(|c| c.remove_coupon(code))?;
    session.with_session_mut(|s| {
        if s.selected_coupon().is_some_and(|c| c.code == removed.code) {
            s.clear_coupon();
        }
        Ok(())
    })?;

    info!(code = %removed.code, "Coupon deleted");
    Ok(removed)
}
