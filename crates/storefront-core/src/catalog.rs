//! # Catalog
//!
//! Products and coupons as maintained by the admin editor.
//!
//! Cart operations read the catalog (live stock for quantity updates, coupon
//! lookup by code); only the admin side writes to it. Every write is
//! validated first, so a rejected edit leaves the catalog untouched.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Coupon, DiscountTier, Product};
use crate::validation::{
    validate_coupon, validate_discount_tier, validate_price, validate_product, validate_stock,
    validate_unique,
};

/// Partial product edit from the admin form. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Money>,
    pub stock: Option<i64>,
    pub description: Option<String>,
    pub is_recommended: Option<bool>,
}

/// The storefront's products and coupons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
    coupons: Vec<Coupon>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Builds a catalog from stored records without re-validating them.
    pub fn from_parts(products: Vec<Product>, coupons: Vec<Coupon>) -> Self {
        Catalog { products, coupons }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn coupon(&self, code: &str) -> Option<&Coupon> {
        self.coupons.iter().find(|c| c.code == code)
    }

    /// Like [`Catalog::product`] but reports a missing id as an error.
    pub fn require_product(&self, id: &str) -> CoreResult<&Product> {
        self.product(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    /// Like [`Catalog::coupon`] but reports a missing code as an error.
    pub fn require_coupon(&self, code: &str) -> CoreResult<&Coupon> {
        self.coupon(code)
            .ok_or_else(|| CoreError::CouponNotFound(code.to_string()))
    }

    fn product_mut(&mut self, id: &str) -> CoreResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// Adds a new product. Ids must be unique.
    pub fn add_product(&mut self, product: Product) -> CoreResult<()> {
        validate_product(&product)?;
        validate_unique("id", &product.id, self.products.iter().map(|p| p.id.as_str()))?;
        self.products.push(product);
        Ok(())
    }

    /// Applies a partial edit and returns the updated product.
    pub fn update_product(&mut self, id: &str, update: ProductUpdate) -> CoreResult<&Product> {
        if let Some(price) = update.price {
            validate_price(price.units())?;
        }
        if let Some(stock) = update.stock {
            validate_stock(stock)?;
        }
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(ValidationError::Required {
                    field: "name".to_string(),
                }
                .into());
            }
        }

        let product = self.product_mut(id)?;
        if let Some(name) = update.name {
            product.name = name;
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        if let Some(stock) = update.stock {
            product.stock = stock;
        }
        if let Some(description) = update.description {
            product.description = Some(description);
        }
        if let Some(is_recommended) = update.is_recommended {
            product.is_recommended = is_recommended;
        }
        Ok(product)
    }

    /// Removes a product and returns it.
    pub fn remove_product(&mut self, id: &str) -> CoreResult<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;
        Ok(self.products.remove(index))
    }

    /// Appends a discount tier to a product.
    pub fn add_discount_tier(&mut self, product_id: &str, tier: DiscountTier) -> CoreResult<()> {
        validate_discount_tier(&tier)?;
        self.product_mut(product_id)?.discount_tiers.push(tier);
        Ok(())
    }

    /// Removes the tier at `index` (list position as shown in the editor).
    pub fn remove_discount_tier(&mut self, product_id: &str, index: usize) -> CoreResult<DiscountTier> {
        let product = self.product_mut(product_id)?;
        if index >= product.discount_tiers.len() {
            return Err(ValidationError::OutOfRange {
                field: "tier index".to_string(),
                min: 0,
                max: product.discount_tiers.len().saturating_sub(1) as i64,
            }
            .into());
        }
        Ok(product.discount_tiers.remove(index))
    }

    // -------------------------------------------------------------------------
    // Coupons
    // -------------------------------------------------------------------------

    /// Adds a coupon. Codes must be unique.
    pub fn add_coupon(&mut self, coupon: Coupon) -> CoreResult<()> {
        validate_coupon(&coupon)?;
        validate_unique("code", &coupon.code, self.coupons.iter().map(|c| c.code.as_str()))?;
        self.coupons.push(coupon);
        Ok(())
    }

    /// Removes a coupon by code and returns it.
    pub fn remove_coupon(&mut self, code: &str) -> CoreResult<Coupon> {
        let index = self
            .coupons
            .iter()
            .position(|c| c.code == code)
            .ok_or_else(|| CoreError::CouponNotFound(code.to_string()))?;
        Ok(self.coupons.remove(index))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DiscountType;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .add_product(
                Product::new("p1", "Product 1", Money::from_units(10_000), 20)
                    .with_tier(DiscountTier::new(10, 0.1)),
            )
            .unwrap();
        catalog
            .add_coupon(Coupon::new("5,000 off", "AMOUNT5000", DiscountType::Amount, 5_000.0))
            .unwrap();
        catalog
    }

    #[test]
    fn test_add_product_rejects_duplicate_id() {
        let mut catalog = catalog();
        let err = catalog
            .add_product(Product::new("p1", "Other", Money::from_units(1), 1))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
        assert_eq!(catalog.products().len(), 1);
    }

    #[test]
    fn test_update_product_partial() {
        let mut catalog = catalog();
        let updated = catalog
            .update_product(
                "p1",
                ProductUpdate {
                    stock: Some(3),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.stock, 3);
        assert_eq!(updated.price.units(), 10_000);
        assert_eq!(updated.name, "Product 1");
    }

    #[test]
    fn test_update_product_invalid_leaves_record() {
        let mut catalog = catalog();
        let result = catalog.update_product(
            "p1",
            ProductUpdate {
                name: Some("Renamed".to_string()),
                stock: Some(-5),
                ..Default::default()
            },
        );
        assert!(result.is_err());
        assert_eq!(catalog.product("p1").unwrap().name, "Product 1");
        assert_eq!(catalog.product("p1").unwrap().stock, 20);
    }

    #[test]
    fn test_update_unknown_product() {
        let mut catalog = catalog();
        assert_eq!(
            catalog.update_product("nope", ProductUpdate::default()).unwrap_err(),
            CoreError::ProductNotFound("nope".to_string())
        );
    }

    #[test]
    fn test_discount_tiers() {
        let mut catalog = catalog();
        catalog
            .add_discount_tier("p1", DiscountTier::new(20, 0.2))
            .unwrap();
        assert_eq!(catalog.product("p1").unwrap().discount_tiers.len(), 2);

        assert!(catalog.add_discount_tier("p1", DiscountTier::new(0, 0.2)).is_err());

        let removed = catalog.remove_discount_tier("p1", 0).unwrap();
        assert_eq!(removed, DiscountTier::new(10, 0.1));
        assert!(catalog.remove_discount_tier("p1", 5).is_err());
        assert_eq!(
            catalog.product("p1").unwrap().discount_tiers,
            vec![DiscountTier::new(20, 0.2)]
        );
    }

    #[test]
    fn test_coupons() {
        let mut catalog = catalog();
        assert!(catalog
            .add_coupon(Coupon::new("dup", "AMOUNT5000", DiscountType::Amount, 1.0))
            .is_err());

        catalog
            .add_coupon(Coupon::new("10%", "PERCENT10", DiscountType::Percentage, 10.0))
            .unwrap();
        assert!(catalog.coupon("PERCENT10").is_some());

        let removed = catalog.remove_coupon("AMOUNT5000").unwrap();
        assert_eq!(removed.code, "AMOUNT5000");
        assert_eq!(
            catalog.require_coupon("AMOUNT5000").unwrap_err(),
            CoreError::CouponNotFound("AMOUNT5000".to_string())
        );
    }

    #[test]
    fn test_remove_product() {
        let mut catalog = catalog();
        assert_eq!(catalog.remove_product("p1").unwrap().id, "p1");
        assert!(catalog.require_product("p1").is_err());
        assert!(catalog.remove_product("p1").is_err());
    }
}
