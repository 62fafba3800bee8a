//! # Catalog State
//!
//! Products and coupons shared by the shop page and the admin editor.
//!
//! ## Thread Safety
//! `Arc<RwLock<Catalog>>`: the shop reads the catalog on every cart command
//! while edits are rare, so readers should not block each other.

use std::sync::{Arc, PoisonError, RwLock};

use storefront_core::{Catalog, CoreResult, Coupon, Product};
use tracing::{debug, warn};

use crate::storage::{load_json, save_json, KeyValueStore, StoreResult, COUPONS_KEY, PRODUCTS_KEY};

/// Shared catalog.
#[derive(Clone)]
pub struct CatalogState {
    catalog: Arc<RwLock<Catalog>>,
    store: Arc<dyn KeyValueStore>,
}

impl CatalogState {
    /// Loads the stored catalog.
    ///
    /// When no products are stored and `seed` is given, the seed catalog is
    /// used and written back so the next start finds it.
    pub fn restore(store: Arc<dyn KeyValueStore>, seed: Option<Catalog>) -> StoreResult<Self> {
        let products: Option<Vec<Product>> = load_json(store.as_ref(), PRODUCTS_KEY)?;
        let coupons: Option<Vec<Coupon>> = load_json(store.as_ref(), COUPONS_KEY)?;

        let state = match (products, seed) {
            (Some(products), _) => {
                debug!(products = products.len(), "Restored stored catalog");
                CatalogState::new(
                    Catalog::from_parts(products, coupons.unwrap_or_default()),
                    store,
                )
            }
            (None, Some(seed)) => {
                debug!(products = seed.products().len(), "Seeding catalog");
                let state = CatalogState::new(seed, store);
                state.with_catalog(|c| state.save(c))?;
                state
            }
            (None, None) => CatalogState::new(
                Catalog::from_parts(Vec::new(), coupons.unwrap_or_default()),
                store,
            ),
        };

        Ok(state)
    }

    fn new(catalog: Catalog, store: Arc<dyn KeyValueStore>) -> Self {
        CatalogState {
            catalog: Arc::new(RwLock::new(catalog)),
            store,
        }
    }

    /// Executes a function with read access to the catalog.
    pub fn with_catalog<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Catalog) -> R,
    {
        let catalog = self.catalog.read().unwrap_or_else(PoisonError::into_inner);
        f(&catalog)
    }

    /// Executes an edit and persists products and coupons if it succeeded.
    pub fn with_catalog_mut<F, R>(&self, f: F) -> CoreResult<R>
    where
        F: FnOnce(&mut Catalog) -> CoreResult<R>,
    {
        let mut catalog = self.catalog.write().unwrap_or_else(PoisonError::into_inner);
        let result = f(&mut catalog)?;
        if let Err(e) = self.save(&catalog) {
            warn!("Failed to persist catalog: {}", e);
        }
        Ok(result)
    }

    fn save(&self, catalog: &Catalog) -> StoreResult<()> {
        save_json(self.store.as_ref(), PRODUCTS_KEY, &catalog.products())?;
        save_json(self.store.as_ref(), COUPONS_KEY, &catalog.coupons())
    }
}

impl std::fmt::Debug for CatalogState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogState")
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}
