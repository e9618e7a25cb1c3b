//! # Commands Module
//!
//! Every operation the pickup screens call.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Home feed, search, restaurant menu
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── checkout.rs  ◄─── Order summary, pickup slots, place order
//! ├── tracking.rs  ◄─── Live tracking and its simulation task
//! ├── orders.rs    ◄─── Orders tab: history, rating, reorder
//! └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Command Flow                                     │
//! │                                                                         │
//! │  Screen action ("Add to cart")                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  fn add_to_cart(                                                        │
//! │      catalog: &CatalogState,   ◄── only the state it needs             │
//! │      cart: &CartState,                                                  │
//! │      request: AddToCartRequest,                                         │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  Screen receives: CartResponse or { code, message }                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod orders;
pub mod tracking;
