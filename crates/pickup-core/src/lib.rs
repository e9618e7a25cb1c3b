//! # pickup-core: Pure Business Logic for Pickup
//!
//! This crate holds everything the pickup-ordering app decides on its own:
//! what a line costs, what the cart looks like after each user action, what
//! the customer pays at checkout, and how an order moves toward pickup.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pickup Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Mobile Front End (React Native)                 │   │
//! │  │   Browse ──► Menu ──► Customize ──► Cart ──► Checkout ──► Track │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 pickup-app (session host)                       │   │
//! │  │   add_to_cart, update_cart_item, place_order, track_order ...   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pickup-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ │   │
//! │  │   │ catalog │ │ pricing │ │  cart   │ │ checkout │ │tracking │ │   │
//! │  │   │ lookups │ │ deltas  │ │ reducer │ │ tax, tip │ │ status  │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └─────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO PERSISTENCE • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog and order types (Restaurant, MenuItem, Order, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Line price computation from base price and customizations
//! - [`cart`] - The cart state machine (`CartCommand` + `reduce`)
//! - [`checkout`] - Tax, tip and order placement
//! - [`tracking`] - Order status progression and live updates
//! - [`catalog`] - Read-only restaurant and menu lookups
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation applied before commands dispatch
//!
//! ## Example Usage
//!
//! ```rust
//! use pickup_core::money::Money;
//! use pickup_core::types::TaxRate;
//!
//! let subtotal = Money::from_cents(2450); // $24.50
//! let tax = subtotal.calculate_tax(TaxRate::from_bps(800)); // 8%
//! assert_eq!(tax.cents(), 196);
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod pricing;
pub mod tracking;
pub mod types;
pub mod validation;

pub use cart::{reduce, AddItem, Cart, CartCommand, CartItem};
pub use catalog::Catalog;
pub use checkout::{CheckoutSummary, TipChoice};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{compute_line_price, compute_unit_price, Selections};
pub use tracking::OrderTracker;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sales tax applied at checkout, in basis points (800 = 8%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 800;

/// Tip presets offered at checkout, in basis points (15%, 18%, 20%).
pub const TIP_PRESETS_BPS: [u32; 3] = [1500, 1800, 2000];

/// Maximum quantity of a single cart line.
///
/// The engine clamps only the lower bound; the command layer rejects anything
/// above this before dispatching.
pub const MAX_ITEM_QUANTITY: i64 = 99;
