//! # Product Commands
//!
//! Product listing for the shop page and product editing for the admin page.

use serde::{Deserialize, Serialize};
use storefront_core::{DiscountTier, Money, Product, ProductUpdate};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::{CatalogState, SessionState};

/// Product as shown on the shop page.
///
/// ## Why DTO?
/// The product card needs what is left after the customer's own cart, which
/// is not a property of the product record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(flatten)]
    pub product: Product,

    /// `stock` minus what is already in the cart. Can be negative after the
    /// admin lowers stock below a held quantity.
    pub remaining_stock: i64,

    /// Largest tier rate, for the "up to n% off" badge.
    pub max_discount_rate: f64,
}

/// New product from the admin form. The id is assigned on creation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: Money,
    pub stock: i64,
    #[serde(default)]
    pub discount_tiers: Vec<DiscountTier>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_recommended: bool,
}

impl NewProduct {
    fn into_product(self, id: String) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            stock: self.stock,
            discount_tiers: self.discount_tiers,
            description: self.description,
            is_recommended: self.is_recommended,
        }
    }
}

/// Lists all products with the stock left for this customer.
pub fn list_products(catalog: &CatalogState, session: &SessionState) -> Vec<ProductDto> {
    debug!("list_products command");

    catalog.with_catalog(|c| {
        session.with_session(|s| {
            c.products()
                .iter()
                .map(|p| ProductDto {
                    remaining_stock: s.cart().remaining_stock(p),
                    max_discount_rate: p.max_tier_rate(),
                    product: p.clone(),
                })
                .collect()
        })
    })
}

/// Creates a product under a fresh UUID.
pub fn add_product(catalog: &CatalogState, new_product: NewProduct) -> Result<Product, ApiError> {
    let id = Uuid::new_v4().to_string();
    debug!(product_id = %id, name = %new_product.name, "add_product command");

    let product = new_product.into_product(id);
    catalog.with_catalog_mut(|c| c.add_product(product.clone()))?;

    info!(product_id = %product.id, price = %product.price, "Product added");
    Ok(product)
}

/// Applies a partial edit to a product.
///
/// Lines already in the cart keep the snapshot taken when they were added;
/// only the stock check on later quantity updates sees the new values.
pub fn update_product(
    catalog: &CatalogState,
    product_id: &str,
    update: ProductUpdate,
) -> Result<Product, ApiError> {
    debug!(product_id = %product_id, "update_product command");

    let product = catalog.with_catalog_mut(|c| c.update_product(product_id, update).cloned())?;

    info!(product_id = %product.id, stock = product.stock, "Product updated");
    Ok(product)
}

/// Deletes a product and drops its line from the cart.
pub fn delete_product(
    catalog: &CatalogState,
    session: &SessionState,
    product_id: &str,
) -> Result<Product, ApiError> {
    debug!(product_id = %product_id, "delete_product command");

    let removed = catalog.with_catalog_mut(|c| c.remove_product(product_id))?;
    session.with_session_mut(|s| {
        s.remove_item(product_id);
        Ok(())
    })?;

    info!(product_id = %removed.id, "Product deleted");
    Ok(removed)
}

/// Appends a quantity tier to a product.
pub fn add_discount_tier(
    catalog: &CatalogState,
    product_id: &str,
    tier: DiscountTier,
) -> Result<Product, ApiError> {
    debug!(product_id = %product_id, min_quantity = tier.min_quantity, rate = tier.rate, "add_discount_tier command");

    let product = catalog.with_catalog_mut(|c| {
        c.add_discount_tier(product_id, tier)?;
        c.require_product(product_id).cloned()
    })?;

    Ok(product)
}

/// Removes the tier at `index` from a product.
pub fn remove_discount_tier(
    catalog: &CatalogState,
    product_id: &str,
    index: usize,
) -> Result<Product, ApiError> {
    debug!(product_id = %product_id, index = index, "remove_discount_tier command");

    let product = catalog.with_catalog_mut(|c| {
        c.remove_discount_tier(product_id, index)?;
        c.require_product(product_id).cloned()
    })?;

    Ok(product)
}
