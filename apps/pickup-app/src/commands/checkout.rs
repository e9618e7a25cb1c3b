//! # Checkout Commands
//!
//! Order summary, pickup slots, and placing the order.
//!
//! ## Place Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  place_order(request)                                                   │
//! │       │                                                                 │
//! │       ├── validate tip, special instructions                           │
//! │       ├── resolve pickup slot (must exist and be available)            │
//! │       │                                                                 │
//! │       ├── lock cart ──► pickup_core::checkout::place_order             │
//! │       │                   └─► EmptyCart? ──► CART_ERROR                 │
//! │       │               ──► ClearCart                                     │
//! │       │                                                                 │
//! │       └── orders.insert(OrderTracker) ──► Order (status: pending)       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use pickup_core::checkout::{self, OrderRequest};
use pickup_core::validation::{validate_special_instructions, validate_tip};
use pickup_core::{CartCommand, CheckoutSummary, Order, OrderTracker, PickupSlot, TipChoice};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::{CartState, ConfigState, OrdersState};

/// What the checkout screen submits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub tip: TipChoice,
    /// Id of one of the configured pickup slots; `None` means ASAP defaults.
    pub pickup_slot_id: Option<String>,
    pub special_instructions: Option<String>,
}

/// Gets the order summary block for the selected tip.
pub fn get_checkout_summary(
    cart: &CartState,
    config: &ConfigState,
    tip: TipChoice,
) -> Result<CheckoutSummary, ApiError> {
    debug!(?tip, "get_checkout_summary command");

    check_tip(tip)?;
    Ok(cart.with_cart(|c| CheckoutSummary::for_cart(c, config.tax_rate(), tip)))
}

/// Gets the tip buttons offered at checkout, from the configured percentages.
pub fn get_tip_presets(config: &ConfigState) -> Vec<TipChoice> {
    debug!("get_tip_presets command");
    TipChoice::presets(&config.tip_presets_bps)
}

/// Gets the pickup times offered at checkout.
pub fn get_pickup_slots(config: &ConfigState) -> Vec<PickupSlot> {
    debug!("get_pickup_slots command");
    config.pickup_slots.clone()
}

/// Places the order and clears the cart.
///
/// The new order is registered with `orders` in `pending` status; the caller
/// starts tracking it (see [`crate::commands::tracking::spawn_tracking`]).
pub fn place_order(
    cart: &CartState,
    config: &ConfigState,
    orders: &OrdersState,
    request: PlaceOrderRequest,
) -> Result<Order, ApiError> {
    debug!(?request, "place_order command");

    check_tip(request.tip)?;
    let special_instructions =
        validate_special_instructions(request.special_instructions.as_deref())?;
    let pickup_slot = match request.pickup_slot_id.as_deref() {
        None => None,
        Some(id) => {
            let slot = config
                .pickup_slot(id)
                .ok_or_else(|| ApiError::not_found("Pickup slot", id))?;
            if !slot.is_available {
                return Err(ApiError::business(format!(
                    "Pickup slot {} is no longer available",
                    slot.label
                )));
            }
            Some(slot.clone())
        }
    };

    let core_request = OrderRequest {
        tip: request.tip,
        pickup_slot,
        special_instructions,
    };

    let order = cart.with_cart_mut(|c| {
        let order = checkout::place_order(c, core_request, config.tax_rate(), Uuid::new_v4(), Utc::now())?;
        c.apply(CartCommand::ClearCart);
        Ok::<Order, ApiError>(order)
    })?;

    orders.with_book_mut(|book| {
        book.insert(OrderTracker::new(order.clone()).with_prep_minutes(config.prep_minutes))
    });

    info!(
        order_id = %order.id,
        order_number = %order.order_number,
        restaurant = %order.restaurant.name,
        total = %order.total,
        "order placed"
    );
    Ok(order)
}

fn check_tip(tip: TipChoice) -> Result<(), ApiError> {
    if let TipChoice::Custom(amount) = tip {
        validate_tip(amount)?;
    }
    Ok(())
}
