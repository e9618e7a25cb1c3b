//! # Cart State
//!
//! Holds the session's one cart and funnels every change through
//! [`CartCommand`].
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` like the other mutable state:
//! commands may be called from any task, and only one may change the cart
//! at a time. The transitions themselves are synchronous and never block.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Front End Action         Command                 CartCommand           │
//! │  ────────────────         ───────                 ───────────           │
//! │                                                                         │
//! │  Tap "Add to cart" ──────► add_to_cart() ───────► AddItem              │
//! │                                                                         │
//! │  Tap − / + ──────────────► update_cart_item() ──► UpdateQuantity       │
//! │                                                                         │
//! │  Tap trash ──────────────► remove_from_cart() ──► RemoveItem           │
//! │                                                                         │
//! │  Order placed / "Clear" ─► clear_cart() ────────► ClearCart            │
//! │                                                                         │
//! │  View cart ──────────────► get_cart() ──────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use pickup_core::cart::CartEvent;
use pickup_core::{Cart, CartCommand, Money};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Cart totals summary for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct lines.
    pub line_count: usize,
    /// Sum of quantities (the tab badge).
    pub item_count: i64,
    pub subtotal: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            item_count: cart.item_count(),
            subtotal: cart.total(),
        }
    }
}

/// Session-owned cart state.
///
/// Cloning shares the same cart.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState::default()
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// use pickup_app_lib::state::{CartState, CartTotals};
    ///
    /// let cart_state = CartState::new();
    /// let totals = cart_state.with_cart(|c| CartTotals::from(c));
    /// assert_eq!(totals.item_count, 0);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(|e| e.into_inner());
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// Only command code should need this; plain changes go through
    /// [`CartState::dispatch`].
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut cart)
    }

    /// Applies one command and returns what it did.
    pub fn dispatch(&self, command: CartCommand) -> CartEvent {
        self.with_cart_mut(|cart| {
            let event = cart.apply(command);
            debug!(?event, lines = cart.line_count(), "cart command applied");
            event
        })
    }
}
