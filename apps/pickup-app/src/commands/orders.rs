//! # Order History Commands
//!
//! The Orders tab: active and past orders, rating, and reorder.

use chrono::Utc;
use pickup_core::cart::CartEvent;
use pickup_core::{AddItem, CartCommand, Order};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::commands::cart::CartResponse;
use crate::error::ApiError;
use crate::state::{CartState, CatalogState, OrdersState};

/// Which tab of the Orders screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderFilter {
    Active,
    Past,
}

/// Lists orders for a tab, newest first.
pub fn list_orders(orders: &OrdersState, filter: OrderFilter) -> Vec<Order> {
    debug!(?filter, "list_orders command");
    orders.with_book(|book| match filter {
        OrderFilter::Active => book.active(),
        OrderFilter::Past => book.past(),
    })
}

/// Rates a picked-up order, 1 to 5 stars.
pub fn rate_order(orders: &OrdersState, order_id: &str, stars: f32) -> Result<Order, ApiError> {
    debug!(order_id, stars, "rate_order command");

    orders.with_book_mut(|book| -> Result<Order, ApiError> {
        let tracker = book
            .get_mut(order_id)
            .ok_or_else(|| ApiError::not_found("Order", order_id))?;
        tracker.rate(stars)?;
        Ok(tracker.order().clone())
    })
}

/// Puts a past order's lines back in the cart.
///
/// Each line is re-added with its quantity and choices at today's menu
/// price. Dishes no longer on the menu are skipped. Like any add, this
/// replaces a cart from another restaurant.
pub fn reorder(
    catalog: &CatalogState,
    cart: &CartState,
    orders: &OrdersState,
    order_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(order_id, "reorder command");

    let order = orders
        .with_book(|book| book.get(order_id).map(|t| t.order().clone()))
        .ok_or_else(|| ApiError::not_found("Order", order_id))?;

    let catalog = catalog.catalog();
    let restaurant = catalog.restaurant(&order.restaurant.id)?.to_ref();
    let now = Utc::now();

    let commands: Vec<CartCommand> = order
        .items
        .iter()
        .filter_map(|line| {
            match catalog.menu_item(&restaurant.id, &line.menu_item.id) {
                Ok(item) => Some(CartCommand::AddItem(AddItem::new(
                    item.clone(),
                    line.quantity,
                    line.customizations.clone(),
                    restaurant.clone(),
                    now,
                ))),
                Err(_) => {
                    warn!(menu_item_id = %line.menu_item.id, "dish no longer on the menu, skipped");
                    None
                }
            }
        })
        .collect();

    if commands.is_empty() {
        return Err(ApiError::business(
            "None of the items in this order are available anymore",
        ));
    }

    let mut replaced = None;
    for command in commands {
        if let CartEvent::ItemAdded {
            replaced: Some(previous),
            ..
        } = cart.dispatch(command)
        {
            replaced = Some(previous);
        }
    }

    info!(order_id, restaurant = %restaurant.name, "order re-added to cart");
    let mut response = cart.with_cart(|c| CartResponse::from(c));
    response.replaced_previous_cart = replaced;
    Ok(response)
}
