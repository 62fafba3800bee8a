//! # Session State
//!
//! Holds the customer's `CartSession` and writes the cart back to storage
//! after every accepted change.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    with_session_mut(f)                                  │
//! │                                                                         │
//! │  lock ──► f(&mut session) ──┬── Err ──► unlock, nothing persisted       │
//! │                             │                                           │
//! │                             └── Ok ───► save cart                       │
//! │                                          ├── empty cart: remove "cart"  │
//! │                                          └── otherwise:  set "cart"     │
//! │                                         (failure is logged only)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! `Arc<Mutex<_>>`: nearly every session operation writes, so a read/write
//! split buys nothing. Concurrent callers are serialized; last writer wins.

use std::sync::{Arc, Mutex, PoisonError};

use storefront_core::{Cart, CartSession, CoreResult};
use tracing::{debug, warn};

use crate::storage::{load_json, save_json, KeyValueStore, StoreResult, CART_KEY};

/// Shared cart session.
#[derive(Clone)]
pub struct SessionState {
    session: Arc<Mutex<CartSession>>,
    store: Arc<dyn KeyValueStore>,
}

impl SessionState {
    /// Starts a session, resuming the stored cart if there is one.
    ///
    /// A stored cart that cannot be decoded, or that repeats a product or
    /// holds a non-positive quantity, is discarded with a warning rather
    /// than blocking startup. The selected coupon is never persisted.
    pub fn restore(store: Arc<dyn KeyValueStore>) -> StoreResult<Self> {
        let cart = match load_json::<Cart>(store.as_ref(), CART_KEY) {
            Ok(Some(cart)) => {
                debug!(lines = cart.item_count(), "Restored stored cart");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e @ crate::storage::StoreError::Malformed { .. }) => {
                warn!("Discarding stored cart: {}", e);
                store.remove(CART_KEY)?;
                Cart::new()
            }
            Err(e) => return Err(e),
        };

        Ok(SessionState {
            session: Arc::new(Mutex::new(CartSession::with_cart(cart))),
            store,
        })
    }

    /// Executes a function with read access to the session.
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartSession) -> R,
    {
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&session)
    }

    /// Executes a mutation and persists the cart if it succeeded.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// session_state.with_session_mut(|s| s.add_item(&product))?;
    /// ```
    pub fn with_session_mut<F, R>(&self, f: F) -> CoreResult<R>
    where
        F: FnOnce(&mut CartSession) -> CoreResult<R>,
    {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        let result = f(&mut session)?;
        self.persist(session.cart());
        Ok(result)
    }

    fn persist(&self, cart: &Cart) {
        let outcome = if cart.is_empty() {
            self.store.remove(CART_KEY)
        } else {
            save_json(self.store.as_ref(), CART_KEY, cart)
        };

        if let Err(e) = outcome {
            warn!("Failed to persist cart: {}", e);
        }
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
