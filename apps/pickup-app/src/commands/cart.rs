//! # Cart Commands
//!
//! Commands for cart manipulation. Each one validates its input, resolves ids
//! against the catalog, and dispatches exactly one [`CartCommand`].
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │  Screen  │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                 │              │
//! │                   add_to_cart                       place_order         │
//! │                   update_cart_item                  (checkout.rs)       │
//! │                   remove_from_cart                       │              │
//! │                        │                                 ▼              │
//! │                   clear_cart ──────────────────────► (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use pickup_core::cart::CartEvent;
use pickup_core::validation::{validate_quantity, validate_quantity_update, validate_selections};
use pickup_core::{AddItem, Cart, CartCommand, CartItem, CoreError, RestaurantRef, Selections};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{CartState, CartTotals, CatalogState};

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub restaurant: Option<RestaurantRef>,
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
    /// Set when this add discarded another restaurant's cart, so the UI can
    /// say so.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replaced_previous_cart: Option<RestaurantRef>,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            restaurant: cart.restaurant().cloned(),
            items: cart.items().to_vec(),
            totals: CartTotals::from(cart),
            replaced_previous_cart: None,
        }
    }
}

/// Everything the item detail sheet sends when "Add to cart" is tapped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub restaurant_id: String,
    pub menu_item_id: String,
    /// Defaults to 1.
    pub quantity: Option<i64>,
    #[serde(default)]
    pub customizations: Selections,
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Adds a customized menu item to the cart.
///
/// ## Behavior
/// - Every add is its own line, even for an identical item
/// - Price is computed once and frozen on the line
/// - An item from another restaurant replaces the whole cart; the response
///   names the restaurant whose cart was dropped
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Item sheet: Margherita Pizza                                           │
/// │    Size (required) ........ Large  +$4.00                               │
/// │    Extra Toppings ......... Olives +$1.00                               │
/// │    Quantity ............... 2                                           │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  1. Validate quantity (1..=99)                                 │    │
/// │  │  2. Resolve restaurant and menu item in the catalog           │    │
/// │  │  3. Validate required / single-choice groups                  │    │
/// │  │  4. Dispatch AddItem                                           │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  Cart badge: 2 · Subtotal $36.98                                       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartState,
    request: AddToCartRequest,
) -> Result<CartResponse, ApiError> {
    let quantity = request.quantity.unwrap_or(1);
    debug!(
        restaurant_id = %request.restaurant_id,
        menu_item_id = %request.menu_item_id,
        quantity,
        "add_to_cart command"
    );

    validate_quantity(quantity)?;

    let catalog = catalog.catalog();
    let restaurant = catalog.restaurant(&request.restaurant_id)?;
    let menu_item = catalog.menu_item(&request.restaurant_id, &request.menu_item_id)?;
    validate_selections(menu_item, &request.customizations)?;

    let command = CartCommand::AddItem(AddItem::new(
        menu_item.clone(),
        quantity,
        request.customizations,
        restaurant.to_ref(),
        Utc::now(),
    ));

    let (event, mut response) = cart.with_cart_mut(|c| {
        let event = c.apply(command);
        (event, CartResponse::from(&*c))
    });

    if let CartEvent::ItemAdded {
        line_id,
        replaced: Some(previous),
    } = event
    {
        info!(
            line_id = %line_id,
            previous = %previous.name,
            current = %restaurant.name,
            "cart replaced by item from another restaurant"
        );
        response.replaced_previous_cart = Some(previous);
    }

    Ok(response)
}

/// Updates the quantity of a cart line.
///
/// ## Behavior
/// - Quantity 0: removes the line
/// - Quantity > 99: rejected
/// - Line total is recomputed from the frozen unit price
pub fn update_cart_item(
    cart: &CartState,
    line_id: String,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(line_id = %line_id, quantity, "update_cart_item command");

    validate_quantity_update(quantity)?;
    ensure_line_exists(cart, &line_id)?;

    cart.dispatch(CartCommand::UpdateQuantity {
        id: line_id,
        quantity,
    });
    Ok(get_cart(cart))
}

/// Removes a line from the cart.
///
/// Removing the last line leaves the cart bound to its restaurant.
pub fn remove_from_cart(cart: &CartState, line_id: String) -> Result<CartResponse, ApiError> {
    debug!(line_id = %line_id, "remove_from_cart command");

    ensure_line_exists(cart, &line_id)?;

    cart.dispatch(CartCommand::RemoveItem { id: line_id });
    Ok(get_cart(cart))
}

/// Clears all lines and the restaurant binding.
///
/// ## When Used
/// - Customer taps "Clear cart"
/// - After an order is placed
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");

    cart.dispatch(CartCommand::ClearCart);
    get_cart(cart)
}

/// The engine ignores unknown line ids; the UI is told instead.
fn ensure_line_exists(cart: &CartState, line_id: &str) -> Result<(), ApiError> {
    if cart.with_cart(|c| c.find_item(line_id).is_some()) {
        Ok(())
    } else {
        Err(CoreError::CartItemNotFound(line_id.to_string()).into())
    }
}
