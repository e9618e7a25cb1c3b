//! # Order Tracking
//!
//! Status progression and the live-update feed for a placed order.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Pending ──► Confirmed ──► Preparing ──► Ready ──► Completed           │
//! │     │            │             │                                        │
//! │     └────────────┴──► Cancelled│                                        │
//! │                                │                                        │
//! │                         tick(): 12 min → 11 min → ... → 1 min → Ready   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The tracker is pure: the caller decides when a tick happens and passes the
//! timestamp. The app drives it from a Tokio interval.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{LiveOrderUpdate, Order, OrderStatus};

/// Countdown the kitchen starts from when preparation begins.
pub const DEFAULT_PREP_MINUTES: u32 = 12;

/// One row of the tracking timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TimelineStep {
    pub status: OrderStatus,
    pub label: String,
    pub completed: bool,
    pub active: bool,
}

const TIMELINE: [(OrderStatus, &str); 4] = [
    (OrderStatus::Confirmed, "Order Confirmed"),
    (OrderStatus::Preparing, "Preparing Your Order"),
    (OrderStatus::Ready, "Ready for Pickup"),
    (OrderStatus::Completed, "Order Complete"),
];

/// Position on the happy path; `None` for cancelled orders.
fn rank(status: OrderStatus) -> Option<u8> {
    match status {
        OrderStatus::Pending => Some(0),
        OrderStatus::Confirmed => Some(1),
        OrderStatus::Preparing => Some(2),
        OrderStatus::Ready => Some(3),
        OrderStatus::Completed => Some(4),
        OrderStatus::Cancelled => None,
    }
}

/// Owns a placed order and moves it toward pickup.
#[derive(Debug, Clone)]
pub struct OrderTracker {
    order: Order,
    prep_minutes: u32,
    minutes_remaining: u32,
    updates: Vec<LiveOrderUpdate>,
}

impl OrderTracker {
    pub fn new(order: Order) -> Self {
        OrderTracker {
            order,
            prep_minutes: DEFAULT_PREP_MINUTES,
            minutes_remaining: DEFAULT_PREP_MINUTES,
            updates: Vec::new(),
        }
    }

    /// Overrides the preparation countdown (at least one minute).
    pub fn with_prep_minutes(mut self, minutes: u32) -> Self {
        self.prep_minutes = minutes.max(1);
        self.minutes_remaining = self.prep_minutes;
        self
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn status(&self) -> OrderStatus {
        self.order.status
    }

    pub fn minutes_remaining(&self) -> u32 {
        self.minutes_remaining
    }

    /// The live-update feed, oldest first.
    pub fn updates(&self) -> &[LiveOrderUpdate] {
        &self.updates
    }

    /// ETA text for the current status.
    pub fn estimated_time(&self) -> String {
        match self.order.status {
            OrderStatus::Preparing => format!("{} min", self.minutes_remaining),
            OrderStatus::Ready => "Ready now".to_string(),
            OrderStatus::Completed => "Picked up".to_string(),
            OrderStatus::Cancelled => "Cancelled".to_string(),
            OrderStatus::Pending | OrderStatus::Confirmed => self.order.estimated_time.clone(),
        }
    }

    /// Moves to the next status on the happy path.
    pub fn advance(&mut self, now: DateTime<Utc>) -> CoreResult<&LiveOrderUpdate> {
        let (next, message) = match self.order.status {
            OrderStatus::Pending => (
                OrderStatus::Confirmed,
                "Your order has been confirmed and sent to the restaurant.",
            ),
            OrderStatus::Confirmed => {
                self.minutes_remaining = self.prep_minutes;
                (
                    OrderStatus::Preparing,
                    "The restaurant is now preparing your order.",
                )
            }
            OrderStatus::Preparing => (OrderStatus::Ready, "Your order is ready for pickup!"),
            OrderStatus::Ready => (OrderStatus::Completed, "Order picked up. Enjoy your meal!"),
            current @ (OrderStatus::Completed | OrderStatus::Cancelled) => {
                return Err(self.invalid(current, "advance"));
            }
        };
        Ok(self.transition(next, message, now))
    }

    /// One simulation period.
    ///
    /// While preparing, the countdown drops by a minute; once it would pass
    /// one minute the order becomes ready. Returns the update when the status
    /// changed.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<&LiveOrderUpdate> {
        if self.order.status != OrderStatus::Preparing {
            return None;
        }
        if self.minutes_remaining > 1 {
            self.minutes_remaining -= 1;
            self.order.estimated_time = self.estimated_time();
            return None;
        }
        Some(self.transition(OrderStatus::Ready, "Your order is ready for pickup!", now))
    }

    /// Cancels an order the kitchen has not started.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> CoreResult<&LiveOrderUpdate> {
        match self.order.status {
            OrderStatus::Pending | OrderStatus::Confirmed => {
                Ok(self.transition(OrderStatus::Cancelled, "Your order was cancelled.", now))
            }
            current => Err(self.invalid(current, "cancel")),
        }
    }

    /// Records the customer's star rating (1 to 5) on a picked-up order.
    pub fn rate(&mut self, stars: f32) -> CoreResult<()> {
        if self.order.status != OrderStatus::Completed {
            return Err(self.invalid(self.order.status, "rate"));
        }
        if !(1.0..=5.0).contains(&stars) {
            return Err(ValidationError::OutOfRange {
                field: "rating".to_string(),
                min: 1,
                max: 5,
            }
            .into());
        }
        self.order.rating = Some(stars);
        Ok(())
    }

    /// Timeline rows with completed/active flags for the current status.
    pub fn timeline(&self) -> Vec<TimelineStep> {
        let current = rank(self.order.status);
        TIMELINE
            .iter()
            .map(|(status, label)| {
                let step = rank(*status);
                TimelineStep {
                    status: *status,
                    label: label.to_string(),
                    completed: matches!((current, step), (Some(c), Some(s)) if c >= s),
                    active: *status == self.order.status,
                }
            })
            .collect()
    }

    fn transition(
        &mut self,
        next: OrderStatus,
        message: &str,
        now: DateTime<Utc>,
    ) -> &LiveOrderUpdate {
        self.order.status = next;
        self.order.estimated_time = self.estimated_time();
        self.updates.push(LiveOrderUpdate {
            order_id: self.order.id.clone(),
            status: next,
            estimated_time: self.order.estimated_time.clone(),
            message: Some(message.to_string()),
            timestamp: now,
        });
        match self.updates.last() {
            Some(update) => update,
            None => unreachable!("update was just pushed"),
        }
    }

    fn invalid(&self, current: OrderStatus, action: &str) -> CoreError {
        CoreError::InvalidOrderTransition {
            order_id: self.order.id.clone(),
            current,
            action: action.to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
