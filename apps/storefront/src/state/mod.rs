//! # State Module
//!
//! Shared application state for the storefront.
//!
//! Each concern gets its own state type so a command names exactly what it
//! touches: cart commands take the session (and the catalog for live stock),
//! admin commands take the catalog.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ SessionState │  │ CatalogState │  │ StorefrontConfig │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Arc<Mutex<  │  │  Arc<RwLock< │  │  store_name      │              │
//! │  │  CartSession │  │    Catalog   │  │  storage backend │              │
//! │  │  >>          │  │  >>          │  │  seed flag       │              │
//! │  └──────┬───────┘  └──────┬───────┘  └──────────────────┘              │
//! │         │                 │                                             │
//! │         └──────┬──────────┘                                             │
//! │                ▼                                                        │
//! │     Arc<dyn KeyValueStore>  ("cart", "products", "coupons")             │
//! │                                                                         │
//! │  LOCK ORDER: catalog before session when a command needs both.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod config;
mod session;

pub use catalog::CatalogState;
pub use config::{ConfigError, ConfigResult, StorageBackend, StorageSettings, StorefrontConfig};
pub use session::SessionState;
