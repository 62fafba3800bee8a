//! # Commands Module
//!
//! Every operation the storefront UI can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── cart.rs     ◄─── Cart panel: get, add, update quantity, remove
//! ├── coupon.rs   ◄─── Coupon selection and coupon admin
//! ├── product.rs  ◄─── Product list and product admin
//! └── order.rs    ◄─── Checkout
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the session
//! fn get_cart(session: &SessionState)
//!
//! // Needs live stock from the catalog as well
//! fn update_cart_item(catalog: &CatalogState, session: &SessionState, ...)
//!
//! // Admin edits only touch the catalog
//! fn add_coupon(catalog: &CatalogState, coupon: Coupon)
//! ```
//!
//! Commands return camelCase-serializable responses or an [`ApiError`].
//!
//! [`ApiError`]: crate::error::ApiError

pub mod cart;
pub mod coupon;
pub mod order;
pub mod product;

pub use cart::{add_to_cart, get_cart, remove_from_cart, update_cart_item, CartLineDto, CartResponse};
pub use coupon::{add_coupon, apply_coupon, clear_coupon, delete_coupon, list_coupons};
pub use order::{checkout, OrderConfirmation};
pub use product::{
    add_discount_tier, add_product, delete_product, list_products, remove_discount_tier,
    update_product, NewProduct, ProductDto,
};
