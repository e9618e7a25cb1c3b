//! # Orders State
//!
//! Placed orders and their trackers, shared between commands and the
//! tracking simulation task.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  place_order() ──► insert(tracker) ──┐                                  │
//! │                                      ▼                                  │
//! │                        Arc<Mutex<OrderBook>>                            │
//! │                         ▲                 ▲                             │
//! │  get_order(), list_orders()       tracking task: advance / tick         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use pickup_core::{Order, OrderTracker};

/// Orders of the session, newest first.
#[derive(Debug, Default)]
pub struct OrderBook {
    trackers: Vec<OrderTracker>,
}

impl OrderBook {
    pub fn insert(&mut self, tracker: OrderTracker) {
        self.trackers.insert(0, tracker);
    }

    pub fn get(&self, order_id: &str) -> Option<&OrderTracker> {
        self.trackers.iter().find(|t| t.order().id == order_id)
    }

    pub fn get_mut(&mut self, order_id: &str) -> Option<&mut OrderTracker> {
        self.trackers.iter_mut().find(|t| t.order().id == order_id)
    }

    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.trackers.iter().map(OrderTracker::order)
    }

    /// Orders still on their way to pickup ("Active" tab).
    pub fn active(&self) -> Vec<Order> {
        self.orders().filter(|o| o.is_active()).cloned().collect()
    }

    /// Completed and cancelled orders ("Past" tab).
    pub fn past(&self) -> Vec<Order> {
        self.orders().filter(|o| !o.is_active()).cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }
}

/// Shared handle to the session's [`OrderBook`].
#[derive(Debug, Clone, Default)]
pub struct OrdersState {
    book: Arc<Mutex<OrderBook>>,
}

impl OrdersState {
    pub fn new() -> Self {
        OrdersState::default()
    }

    pub fn with_book<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderBook) -> R,
    {
        let book = self.book.lock().unwrap_or_else(|e| e.into_inner());
        f(&book)
    }

    pub fn with_book_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderBook) -> R,
    {
        let mut book = self.book.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut book)
    }
}
