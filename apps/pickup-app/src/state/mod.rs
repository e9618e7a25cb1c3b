//! # State Module
//!
//! Session state for the app, split into focused state types so each
//! command takes only what it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │ CatalogState │ │  CartState   │ │ ConfigState  │ │ OrdersState  │   │
//! │  │              │ │              │ │              │ │              │   │
//! │  │ Arc<Catalog> │ │ Arc<Mutex<   │ │ tax, tips,   │ │ Arc<Mutex<   │   │
//! │  │ (read-only)  │ │   Cart>>     │ │ slots, timer │ │  OrderBook>> │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CatalogState, ConfigState: read-only after initialization           │
//! │  • CartState: one writer at a time via Mutex                           │
//! │  • OrdersState: shared with the tracking task via Mutex                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;
mod orders;

pub use cart::{CartState, CartTotals};
pub use catalog::CatalogState;
pub use config::ConfigState;
pub use orders::{OrderBook, OrdersState};
