//! # Cart Store
//!
//! The session cart shared by every command handler.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Commands run on a multi-threaded runtime
//! 2. add/update/remove read the line list and then write it
//! 3. Only one command may do that at a time
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Command                  Lock      Cart call                           │
//! │  ───────                  ────      ─────────                           │
//! │  add_to_cart() ─────────► write ──► try_add_item(p, n)                  │
//! │  update_cart_item() ────► write ──► try_update_quantity(id, n)          │
//! │  remove_from_cart() ────► write ──► remove_item(id)                     │
//! │  clear_cart() ──────────► write ──► clear()                             │
//! │  get_cart() ────────────► read ───► items(), totals()                   │
//! │                                                                         │
//! │  The lock is held for the whole closure, so each call is atomic.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bazaar_core::Cart;

/// Shared handle to the session cart.
///
/// Constructed once at startup and passed to whoever needs it; clones share
/// the same cart.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    cart: Arc<Mutex<Cart>>,
}

impl CartStore {
    /// Creates a store holding a new empty cart.
    pub fn new() -> Self {
        CartStore {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ```rust
    /// use bazaar_app_lib::state::CartStore;
    ///
    /// let store = CartStore::new();
    /// assert_eq!(store.with_cart(|cart| cart.item_count()), 0);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.lock();
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ```rust
    /// use bazaar_app_lib::state::CartStore;
    /// use bazaar_core::Product;
    ///
    /// let store = CartStore::new();
    /// store.with_cart_mut(|cart| cart.add_item(&Product::new("A", "Apples", 10), 2));
    /// assert_eq!(store.with_cart(|cart| cart.subtotal().cents()), 20);
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.lock();
        f(&mut cart)
    }

    // Cart methods never leave a half-applied update, so a poisoned lock
    // still guards a valid cart.
    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
