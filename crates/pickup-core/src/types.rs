//! # Domain Types
//!
//! Catalog and order types used throughout Pickup.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │   Restaurant    │   │    MenuItem     │   │   Customization     │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id             │──►│  id             │──►│  id                 │   │
//! │  │  name, cuisine  │   │  price (Money)  │   │  mode: single/multi │   │
//! │  │  image          │   │  category       │   │  required           │   │
//! │  └─────────────────┘   └─────────────────┘   │  options ──► Option │   │
//! │                                               └─────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │ RestaurantRef   │   │     Order       │   │    OrderStatus      │   │
//! │  │  id, name,      │   │  order_number   │   │  Pending → Confirmed│   │
//! │  │  image          │   │  items, totals  │   │  → Preparing → Ready│   │
//! │  └─────────────────┘   └─────────────────┘   │  → Completed        │   │
//! │                                               └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog records are read-only: the cart stores clones of them, never
//! references, so a later catalog change cannot reprice a cart line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartItem;
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 800 bps = 8%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for configuration input).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Restaurant
// =============================================================================

/// A restaurant offering pickup.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub cuisine: String,
    /// Average rating, 0.0 to 5.0.
    pub rating: f32,
    /// Display label, e.g. "15-20 min".
    pub prep_time: String,
    pub image: String,
    /// Display label, e.g. "0.5 km".
    pub distance: String,
    #[serde(default)]
    pub featured: bool,
    pub price_range: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl Restaurant {
    /// The id/name/image triple a cart binds to.
    pub fn to_ref(&self) -> RestaurantRef {
        RestaurantRef {
            id: self.id.clone(),
            name: self.name.clone(),
            image: self.image.clone(),
        }
    }
}

/// The restaurant a cart (or order) belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RestaurantRef {
    pub id: String,
    pub name: String,
    pub image: String,
}

// =============================================================================
// Menu
// =============================================================================

/// A dish on a restaurant's menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Base price before customizations.
    pub price: Money,
    pub image: String,
    pub category: String,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub spicy: bool,
    #[serde(default)]
    pub vegetarian: bool,
    pub calories: Option<u32>,
    #[serde(default)]
    pub customizations: Vec<Customization>,
}

impl MenuItem {
    /// Looks up a customization group by id.
    pub fn customization(&self, id: &str) -> Option<&Customization> {
        self.customizations.iter().find(|c| c.id == id)
    }
}

/// How many options a customization group accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Exactly one option (radio buttons).
    Single,
    /// Zero or more options (checkboxes).
    Multiple,
}

/// A named option group on a menu item ("Size", "Toppings").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customization {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub mode: SelectionMode,
    pub required: bool,
    pub options: Vec<CustomizationOption>,
}

impl Customization {
    /// Looks up an option within this group by id.
    pub fn option(&self, id: &str) -> Option<&CustomizationOption> {
        self.options.iter().find(|o| o.id == id)
    }
}

/// One selectable option with its price delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomizationOption {
    pub id: String,
    pub name: String,
    /// Added to the base price when selected. May be zero.
    pub price: Money,
}

// =============================================================================
// Order Status
// =============================================================================

/// Where an order is on its way to pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed, not yet accepted by the restaurant.
    Pending,
    Confirmed,
    Preparing,
    /// Waiting at the counter.
    Ready,
    /// Picked up.
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Active orders show under the "Active" tab; the rest under "Past".
    pub const fn is_active(&self) -> bool {
        !matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Badge text for order lists.
    pub const fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready for pickup",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// Pickup Slot
// =============================================================================

/// A pickup time the customer can choose at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PickupSlot {
    pub id: String,
    /// "ASAP", "3:30 PM", ...
    pub label: String,
    /// Estimated wait shown to the customer, e.g. "15-20 min".
    pub estimated_time: String,
    pub is_available: bool,
}

// =============================================================================
// Order
// =============================================================================

/// A placed order.
///
/// Line items are the cart lines at the moment of checkout (snapshot pattern):
/// clearing the cart afterwards leaves the order untouched.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// Short customer-facing number, e.g. "#0427".
    pub order_number: String,
    pub restaurant: RestaurantRef,
    pub items: Vec<CartItem>,
    pub subtotal: Money,
    pub tax: Money,
    pub tip: Money,
    pub total: Money,
    pub status: OrderStatus,
    pub estimated_time: String,
    pub pickup_slot: Option<String>,
    pub special_instructions: Option<String>,
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
    pub rating: Option<f32>,
}

impl Order {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Names of the ordered dishes, for order list rows.
    pub fn item_names(&self) -> Vec<String> {
        self.items.iter().map(|i| i.menu_item.name.clone()).collect()
    }
}

// =============================================================================
// Live Order Update
// =============================================================================

/// One entry in an order's live-tracking feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LiveOrderUpdate {
    pub order_id: String,
    pub status: OrderStatus,
    pub estimated_time: String,
    pub message: Option<String>,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
