//! # Storefront Application Layer
//!
//! Wires the pricing engine to configuration, storage and shared state.
//!
//! ## Module Organization
//! ```text
//! storefront_app/
//! ├── lib.rs          ◄─── You are here (startup)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── StorefrontConfig (file + environment)
//! │   ├── session.rs  ◄─── Cart session state
//! │   └── catalog.rs  ◄─── Catalog state
//! ├── commands/       ◄─── Operations the UI invokes
//! ├── storage.rs      ◄─── Key-value persistence
//! ├── seed.rs         ◄─── Demo catalog
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use storefront_app::{commands, Storefront, StorefrontConfig};
//!
//! storefront_app::init_tracing();
//! let shop = Storefront::open(StorefrontConfig::load_or_default(None))?;
//!
//! commands::add_to_cart(&shop.catalog, &shop.session, "p1")?;
//! let cart = commands::get_cart(&shop.session);
//! println!("{}", shop.config.format_money(cart.totals.total_after_discount));
//! # Ok::<(), storefront_app::error::ApiError>(())
//! ```

pub mod commands;
pub mod error;
pub mod seed;
pub mod state;
pub mod storage;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ApiError;
use storage::{FileStore, KeyValueStore, MemoryStore};

pub use state::{CatalogState, SessionState, StorageBackend, StorefrontConfig};

/// A running storefront: configuration plus the shared states commands use.
#[derive(Debug, Clone)]
pub struct Storefront {
    pub config: StorefrontConfig,
    pub catalog: CatalogState,
    pub session: SessionState,
}

impl Storefront {
    /// Opens storage and restores the catalog and the cart.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │                       Storefront Startup                                │
    /// │                                                                         │
    /// │  1. Validate Config ──────────────────────────────────────────────────► │
    /// │                                                                         │
    /// │  2. Open Storage ─────────────────────────────────────────────────────► │
    /// │     • memory: empty HashMap                                             │
    /// │     • file:   <data_dir>/{cart,products,coupons}.json                   │
    /// │                                                                         │
    /// │  3. Restore Catalog ──────────────────────────────────────────────────► │
    /// │     • stored products, or the demo catalog if enabled                   │
    /// │                                                                         │
    /// │  4. Restore Session ──────────────────────────────────────────────────► │
    /// │     • stored cart lines, no coupon selected                             │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    pub fn open(config: StorefrontConfig) -> Result<Self, ApiError> {
        config.validate()?;

        let store = open_store(&config)?;
        let demo = config.seed_demo_catalog.then(seed::demo_catalog);

        let catalog = CatalogState::restore(store.clone(), demo)?;
        let session = SessionState::restore(store)?;

        info!(
            store_name = %config.store_name,
            backend = ?config.storage.backend,
            products = catalog.with_catalog(|c| c.products().len()),
            cart_lines = session.with_session(|s| s.cart().item_count()),
            "Storefront opened"
        );

        Ok(Storefront {
            config,
            catalog,
            session,
        })
    }
}

fn open_store(config: &StorefrontConfig) -> Result<Arc<dyn KeyValueStore>, ApiError> {
    let store: Arc<dyn KeyValueStore> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::File => {
            let data_dir = config
                .data_dir()
                .ok_or_else(|| ApiError::new(error::ErrorCode::ConfigError, "No data directory available"))?;
            info!(?data_dir, "Using file storage");
            Arc::new(FileStore::open(data_dir)?)
        }
    };
    Ok(store)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_app=trace` - Show trace for this crate only
/// - Default: INFO, DEBUG for the `storefront*` crates
///
/// Calling it again after a subscriber is installed does nothing.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
