//! # Demo Catalog
//!
//! Products and coupons loaded on first start so the shop is not empty.
//!
//! | Id | Price  | Stock | Tier        |
//! |----|--------|-------|-------------|
//! | p1 | 10,000 | 20    | 10+ → 10%   |
//! | p2 | 20,000 | 20    | 10+ → 15%   |
//! | p3 | 30,000 | 20    | 10+ → 20%   |
//!
//! Coupons: `AMOUNT5000` (5,000 off) and `PERCENT10` (10% off, totals of
//! 10,000 or more).

use storefront_core::{Catalog, Coupon, DiscountTier, DiscountType, Money, Product};

/// Builds the demo catalog.
pub fn demo_catalog() -> Catalog {
    let products = [
        ("p1", "상품1", 10_000, 0.1),
        ("p2", "상품2", 20_000, 0.15),
        ("p3", "상품3", 30_000, 0.2),
    ]
    .into_iter()
    .map(|(id, name, price, rate)| {
        Product::new(id, name, Money::from_units(price), 20).with_tier(DiscountTier::new(10, rate))
    })
    .collect();

    let coupons = vec![
        Coupon::new("5000원 할인", "AMOUNT5000", DiscountType::Amount, 5_000.0),
        Coupon::new("10% 할인", "PERCENT10", DiscountType::Percentage, 10.0),
    ];

    Catalog::from_parts(products, coupons)
}
