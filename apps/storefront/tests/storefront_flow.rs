//! End-to-end flows through the command layer against the demo catalog.

use storefront_app::commands::{self, NewProduct};
use storefront_app::error::ErrorCode;
use storefront_app::state::StorageSettings;
use storefront_app::{StorageBackend, Storefront, StorefrontConfig};
use storefront_core::{Coupon, DiscountTier, DiscountType, Money, ProductUpdate};

fn open_shop() -> Storefront {
    Storefront::open(StorefrontConfig::in_memory()).unwrap()
}

#[test]
fn test_shopping_flow_to_checkout() {
    let shop = open_shop();

    // Nothing in the cart yet, so the percentage coupon is refused
    let err = commands::apply_coupon(&shop.catalog, &shop.session, "PERCENT10").unwrap_err();
    assert_eq!(err.code, ErrorCode::CouponIneligible);
    assert!(commands::get_cart(&shop.session).selected_coupon.is_none());

    for _ in 0..10 {
        commands::add_to_cart(&shop.catalog, &shop.session, "p1").unwrap();
    }
    let cart = commands::get_cart(&shop.session);
    assert_eq!(cart.total_quantity, 10);
    // 10% tier + 5% bulk bonus
    assert!((cart.items[0].discount_rate - 0.15).abs() < 1e-9);
    assert_eq!(cart.totals.total_before_discount, Money::from_units(100_000));
    assert_eq!(cart.totals.total_after_discount, Money::from_units(85_000));

    let cart = commands::apply_coupon(&shop.catalog, &shop.session, "AMOUNT5000").unwrap();
    assert_eq!(cart.totals.total_after_discount, Money::from_units(80_000));

    let err = commands::update_cart_item(&shop.catalog, &shop.session, "p1", 21).unwrap_err();
    assert_eq!(err.code, ErrorCode::StockLimitExceeded);
    assert_eq!(commands::get_cart(&shop.session).total_quantity, 10);

    // p2 has no tier at quantity 1 but still gets the bulk bonus
    let cart = commands::add_to_cart(&shop.catalog, &shop.session, "p2").unwrap();
    assert_eq!(cart.items[1].total, Money::from_units(19_000));
    assert_eq!(cart.totals.total_before_discount, Money::from_units(120_000));
    assert_eq!(cart.totals.total_after_discount, Money::from_units(99_000));

    let confirmation = commands::checkout(&shop.session, &shop.config).unwrap();
    assert!(confirmation.order.order_id.starts_with("ORD-"));
    assert_eq!(confirmation.order.items.len(), 2);
    assert_eq!(confirmation.order.coupon_code.as_deref(), Some("AMOUNT5000"));
    assert_eq!(confirmation.amount_due, "99,000원");

    let cart = commands::get_cart(&shop.session);
    assert!(cart.items.is_empty());
    assert!(cart.selected_coupon.is_none());

    let err = commands::checkout(&shop.session, &shop.config).unwrap_err();
    assert_eq!(err.code, ErrorCode::EmptyCart);
}

#[test]
fn test_add_to_cart_stops_at_stock() {
    let shop = open_shop();
    commands::update_product(
        &shop.catalog,
        "p3",
        ProductUpdate {
            stock: Some(1),
            ..Default::default()
        },
    )
    .unwrap();

    commands::add_to_cart(&shop.catalog, &shop.session, "p3").unwrap();
    let err = commands::add_to_cart(&shop.catalog, &shop.session, "p3").unwrap_err();
    assert_eq!(err.code, ErrorCode::InsufficientStock);

    let err = commands::add_to_cart(&shop.catalog, &shop.session, "p404").unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[test]
fn test_admin_edits_reach_the_cart() {
    let shop = open_shop();

    commands::add_to_cart(&shop.catalog, &shop.session, "p3").unwrap();
    commands::apply_coupon(&shop.catalog, &shop.session, "AMOUNT5000").unwrap();

    // Deleting the selected coupon drops the selection
    commands::delete_coupon(&shop.catalog, &shop.session, "AMOUNT5000").unwrap();
    assert!(commands::get_cart(&shop.session).selected_coupon.is_none());
    assert_eq!(commands::list_coupons(&shop.catalog).len(), 1);

    let p3 = commands::list_products(&shop.catalog, &shop.session)
        .into_iter()
        .find(|p| p.product.id == "p3")
        .unwrap();
    assert_eq!(p3.remaining_stock, 19);
    assert_eq!(p3.max_discount_rate, 0.2);

    // Lowering stock below the held quantity shows as negative remaining
    commands::update_product(
        &shop.catalog,
        "p3",
        ProductUpdate {
            stock: Some(0),
            ..Default::default()
        },
    )
    .unwrap();
    let p3 = commands::list_products(&shop.catalog, &shop.session)
        .into_iter()
        .find(|p| p.product.id == "p3")
        .unwrap();
    assert_eq!(p3.remaining_stock, -1);

    let err = commands::update_cart_item(&shop.catalog, &shop.session, "p3", 2).unwrap_err();
    assert_eq!(err.code, ErrorCode::StockLimitExceeded);

    commands::delete_product(&shop.catalog, &shop.session, "p3").unwrap();
    assert!(commands::get_cart(&shop.session).items.is_empty());
    assert_eq!(commands::list_products(&shop.catalog, &shop.session).len(), 2);
}

#[test]
fn test_product_and_coupon_admin() {
    let shop = open_shop();

    let lamp = commands::add_product(
        &shop.catalog,
        NewProduct {
            name: "Lamp".to_string(),
            price: Money::from_units(5_000),
            stock: 3,
            discount_tiers: vec![DiscountTier::new(2, 0.1)],
            description: Some("Desk lamp".to_string()),
            is_recommended: true,
        },
    )
    .unwrap();
    assert!(!lamp.id.is_empty());

    commands::add_to_cart(&shop.catalog, &shop.session, &lamp.id).unwrap();
    let cart = commands::update_cart_item(&shop.catalog, &shop.session, &lamp.id, 2).unwrap();
    assert_eq!(cart.totals.total_after_discount, Money::from_units(9_000));

    let err = commands::add_product(
        &shop.catalog,
        NewProduct {
            name: String::new(),
            price: Money::from_units(1),
            stock: 1,
            discount_tiers: Vec::new(),
            description: None,
            is_recommended: false,
        },
    )
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    let err = commands::add_discount_tier(&shop.catalog, "p1", DiscountTier::new(0, 0.1)).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    let p1 = commands::add_discount_tier(&shop.catalog, "p1", DiscountTier::new(20, 0.25)).unwrap();
    assert_eq!(p1.discount_tiers.len(), 2);
    let p1 = commands::remove_discount_tier(&shop.catalog, "p1", 0).unwrap();
    assert_eq!(p1.discount_tiers, vec![DiscountTier::new(20, 0.25)]);

    let err = commands::add_coupon(
        &shop.catalog,
        Coupon::new("again", "PERCENT10", DiscountType::Percentage, 5.0),
    )
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    let err = commands::add_coupon(
        &shop.catalog,
        Coupon::new("too much", "PERCENT150", DiscountType::Percentage, 150.0),
    )
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    commands::add_coupon(
        &shop.catalog,
        Coupon::new("1,000 off", "AMOUNT1000", DiscountType::Amount, 1_000.0),
    )
    .unwrap();
    assert_eq!(commands::list_coupons(&shop.catalog).len(), 3);

    let err = commands::delete_coupon(&shop.catalog, &shop.session, "NOPE").unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[test]
fn test_file_storage_survives_reopen() {
    let data_dir = std::env::temp_dir().join(format!("storefront-flow-{}", uuid::Uuid::new_v4()));
    let config = StorefrontConfig {
        storage: StorageSettings {
            backend: StorageBackend::File,
            data_dir: Some(data_dir.clone()),
        },
        ..StorefrontConfig::default()
    };

    {
        let shop = Storefront::open(config.clone()).unwrap();
        commands::add_to_cart(&shop.catalog, &shop.session, "p2").unwrap();
        commands::add_to_cart(&shop.catalog, &shop.session, "p2").unwrap();
        commands::delete_product(&shop.catalog, &shop.session, "p1").unwrap();
    }
    assert!(data_dir.join("cart.json").exists());
    assert!(data_dir.join("products.json").exists());

    let shop = Storefront::open(config.clone()).unwrap();
    let cart = commands::get_cart(&shop.session);
    assert_eq!(cart.total_quantity, 2);
    assert_eq!(cart.items[0].item.product.id, "p2");
    // Stored catalog is used instead of reseeding
    assert_eq!(commands::list_products(&shop.catalog, &shop.session).len(), 2);

    commands::remove_from_cart(&shop.session, "p2").unwrap();
    assert!(!data_dir.join("cart.json").exists());

    std::fs::remove_dir_all(data_dir).unwrap();
}
