//! # Tracking Commands
//!
//! Live tracking screen data and the background simulation that moves an
//! order toward pickup.
//!
//! ## Simulation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  tokio::time::interval(config.tracking_interval)                        │
//! │                                                                         │
//! │  tick ──► pending    ──► advance() ──► confirmed                        │
//! │  tick ──► confirmed  ──► advance() ──► preparing (12 min)               │
//! │  tick ──► preparing  ──► tick()    ──► 11 min ... 1 min ──► ready       │
//! │  ready / completed / cancelled ──► task ends                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use chrono::Utc;
use pickup_core::tracking::TimelineStep;
use pickup_core::{LiveOrderUpdate, Order, OrderStatus};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::OrdersState;

/// Everything the live tracking screen shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTrackingResponse {
    pub order: Order,
    pub timeline: Vec<TimelineStep>,
    pub updates: Vec<LiveOrderUpdate>,
    pub estimated_time: String,
}

/// Gets the tracking screen for one order.
pub fn get_order_tracking(
    orders: &OrdersState,
    order_id: &str,
) -> Result<OrderTrackingResponse, ApiError> {
    debug!(order_id, "get_order_tracking command");

    orders.with_book(|book| -> Result<OrderTrackingResponse, ApiError> {
        let tracker = book
            .get(order_id)
            .ok_or_else(|| ApiError::not_found("Order", order_id))?;
        Ok(OrderTrackingResponse {
            order: tracker.order().clone(),
            timeline: tracker.timeline(),
            updates: tracker.updates().to_vec(),
            estimated_time: tracker.estimated_time(),
        })
    })
}

/// Moves an order one step along its lifecycle (restaurant-side action).
pub fn advance_order(orders: &OrdersState, order_id: &str) -> Result<LiveOrderUpdate, ApiError> {
    debug!(order_id, "advance_order command");

    orders.with_book_mut(|book| -> Result<LiveOrderUpdate, ApiError> {
        let tracker = book
            .get_mut(order_id)
            .ok_or_else(|| ApiError::not_found("Order", order_id))?;
        let update = tracker.advance(Utc::now())?.clone();
        info!(order_id, status = ?update.status, "order advanced");
        Ok(update)
    })
}

/// Starts the tracking simulation for an order.
///
/// The task ends once the order is no longer pending, confirmed or preparing,
/// and yields the status it stopped at. It yields `None` if the order
/// disappears from the book.
pub fn spawn_tracking(
    orders: OrdersState,
    order_id: String,
    period: Duration,
) -> JoinHandle<Option<OrderStatus>> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately.
        interval.tick().await;

        loop {
            interval.tick().await;

            let step = orders.with_book_mut(|book| {
                let tracker = book.get_mut(&order_id)?;
                let now = Utc::now();
                let update = match tracker.status() {
                    OrderStatus::Pending | OrderStatus::Confirmed => {
                        tracker.advance(now).ok().cloned()
                    }
                    OrderStatus::Preparing => tracker.tick(now).cloned(),
                    _ => None,
                };
                Some((tracker.status(), update, tracker.estimated_time()))
            });

            let Some((status, update, estimated_time)) = step else {
                warn!(order_id = %order_id, "order not found, tracking stopped");
                return None;
            };

            match update {
                Some(update) => info!(
                    order_id = %order_id,
                    status = ?update.status,
                    estimated_time = %update.estimated_time,
                    message = update.message.as_deref().unwrap_or_default(),
                    "order update"
                ),
                None => debug!(order_id = %order_id, estimated_time = %estimated_time, "tracking tick"),
            }

            if !matches!(
                status,
                OrderStatus::Pending | OrderStatus::Confirmed | OrderStatus::Preparing
            ) {
                return Some(status);
            }
        }
    })
}

/// Cancels an order the kitchen has not started.
pub fn cancel_order(orders: &OrdersState, order_id: &str) -> Result<Order, ApiError> {
    debug!(order_id, "cancel_order command");

    orders.with_book_mut(|book| -> Result<Order, ApiError> {
        let tracker = book
            .get_mut(order_id)
            .ok_or_else(|| ApiError::not_found("Order", order_id))?;
        tracker.cancel(Utc::now())?;
        info!(order_id, "order cancelled");
        Ok(tracker.order().clone())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::{add_to_cart, AddToCartRequest};
    use crate::commands::checkout::{place_order, PlaceOrderRequest};
    use crate::error::ErrorCode;
    use crate::seed::mock_catalog;
    use crate::state::{CartState, CatalogState, ConfigState};

    fn placed_order(prep_minutes: u32) -> (OrdersState, Order) {
        let catalog = CatalogState::new(mock_catalog());
        let cart = CartState::new();
        add_to_cart(
            &catalog,
            &cart,
            AddToCartRequest {
                restaurant_id: "3".to_string(),
                menu_item_id: "303".to_string(),
                ..AddToCartRequest::default()
            },
        )
        .unwrap();

        let config = ConfigState {
            prep_minutes,
            ..ConfigState::default()
        };
        let orders = OrdersState::new();
        let order = place_order(&cart, &config, &orders, PlaceOrderRequest::default()).unwrap();
        (orders, order)
    }

    #[tokio::test]
    async fn test_simulation_runs_until_ready() {
        let (orders, order) = placed_order(2);

        let handle = spawn_tracking(orders.clone(), order.id.clone(), Duration::from_millis(1));
        let final_status = handle.await.unwrap();

        assert_eq!(final_status, Some(OrderStatus::Ready));
        let tracking = get_order_tracking(&orders, &order.id).unwrap();
        let statuses: Vec<_> = tracking.updates.iter().map(|u| u.status).collect();
        assert_eq!(
            statuses,
            vec![OrderStatus::Confirmed, OrderStatus::Preparing, OrderStatus::Ready]
        );
        assert_eq!(tracking.estimated_time, "Ready now");
        assert!(tracking.timeline[2].active);
    }

    #[tokio::test]
    async fn test_simulation_stops_for_cancelled_order() {
        let (orders, order) = placed_order(12);
        cancel_order(&orders, &order.id).unwrap();

        let handle = spawn_tracking(orders.clone(), order.id.clone(), Duration::from_millis(1));
        assert_eq!(handle.await.unwrap(), Some(OrderStatus::Cancelled));
    }

    #[tokio::test]
    async fn test_simulation_for_unknown_order() {
        let handle = spawn_tracking(OrdersState::new(), "nope".to_string(), Duration::from_millis(1));
        assert_eq!(handle.await.unwrap(), None);
    }

    #[test]
    fn test_manual_advance_and_cancel_rules() {
        let (orders, order) = placed_order(12);

        assert_eq!(
            advance_order(&orders, &order.id).unwrap().status,
            OrderStatus::Confirmed
        );
        advance_order(&orders, &order.id).unwrap();

        let err = cancel_order(&orders, &order.id).unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);

        let err = get_order_tracking(&orders, "missing").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
