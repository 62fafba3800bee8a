//! # storefront-core: Cart Pricing and Coupon Engine
//!
//! This crate is the **heart** of the storefront. Stock checks, tier
//! discounts, the bulk-purchase bonus, coupon adjustment and the cart state
//! machine all live here as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI / Admin Editor                 │   │
//! │  │    Product List ──► Cart ──► Coupon Picker ──► Checkout        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/storefront                              │   │
//! │  │    session state, catalog state, storage, config               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │ pricing  │ │   cart   │ │  coupon  │ │ session/catalog  │  │   │
//! │  │   │ tiers    │ │ totals   │ │ minimum  │ │ state machine    │  │   │
//! │  │   │ bulk     │ │ stock    │ │ adjust   │ │ admin editing    │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO CLOCK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (Product, DiscountTier, Coupon, CartItem)
//! - [`money`] - Whole-unit money with JavaScript-compatible rounding
//! - [`pricing`] - Tier resolution, bulk detection, line totals
//! - [`cart`] - Cart contents, stock checks and cart totals
//! - [`coupon`] - Coupon eligibility and total adjustment
//! - [`session`] - Cart + selected coupon state machine, checkout
//! - [`catalog`] - Products and coupons maintained by the admin editor
//! - [`validation`] - Admin input rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{CartSession, Coupon, DiscountTier, DiscountType, Money, Product};
//!
//! let product = Product::new("p1", "Keyboard", Money::from_units(10_000), 20)
//!     .with_tier(DiscountTier::new(10, 0.1));
//!
//! let mut session = CartSession::new();
//! for _ in 0..10 {
//!     session.add_item(&product).unwrap();
//! }
//!
//! // 10 × 10,000 with a 10% tier and the bulk bonus (5%) = 85,000
//! assert_eq!(session.totals().total_after_discount.units(), 85_000);
//!
//! session
//!     .apply_coupon(Coupon::new("5,000 off", "AMOUNT5000", DiscountType::Amount, 5000.0))
//!     .unwrap();
//! assert_eq!(session.totals().total_after_discount.units(), 80_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod coupon;
pub mod error;
pub mod money;
pub mod pricing;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{compute_cart_totals, Cart, CartTotals};
pub use catalog::{Catalog, ProductUpdate};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use session::{CartSession, Order};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Line quantity at which the bulk-purchase bonus switches on for the
/// whole cart.
pub const BULK_PURCHASE_THRESHOLD: i64 = 10;

/// Extra discount rate added to every line once any line is a bulk purchase.
pub const BULK_PURCHASE_BONUS: f64 = 0.05;

/// Upper bound on the combined tier + bulk discount rate of a line.
pub const MAX_DISCOUNT_RATE: f64 = 0.5;

/// Minimum pre-coupon discounted total before a percentage coupon may be
/// applied.
///
/// ## Business Reason
/// Percentage coupons on tiny carts cost more in handling than they earn.
/// Flat-amount coupons are self-limiting and have no minimum.
pub const PERCENTAGE_COUPON_MINIMUM: Money = Money::from_units(10_000);
