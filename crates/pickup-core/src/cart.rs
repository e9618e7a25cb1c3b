//! # Cart Engine
//!
//! The single active cart and the four transitions that change it.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Machine                                   │
//! │                                                                         │
//! │  Command                   Effect                                       │
//! │  ───────                   ──────                                       │
//! │                                                                         │
//! │  AddItem ────────────────► other restaurant? wipe cart first            │
//! │                            price line, mint unique id, append           │
//! │                            bind cart to the item's restaurant           │
//! │                                                                         │
//! │  UpdateQuantity(id, n) ──► n <= 0: same as RemoveItem                   │
//! │                            else quantity = min(n, 99), total = unit × n │
//! │                                                                         │
//! │  RemoveItem(id) ─────────► drop the line (restaurant binding stays)     │
//! │                                                                         │
//! │  ClearCart ──────────────► no lines, no restaurant                      │
//! │                                                                         │
//! │  Every transition is total: unknown ids are no-ops, never errors.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - All lines in a non-empty cart belong to the cart's restaurant.
//! - Line ids are unique for the life of the cart, even across clears and
//!   for identical items added in the same millisecond.
//! - `total_price == unit_price * quantity` on every line.
//! - `1 <= quantity <= MAX_ITEM_QUANTITY` on every line, whatever the command
//!   asked for.
//! - Repeated adds of the same item never merge; each add is its own line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::pricing::{compute_unit_price, Selections};
use crate::types::{MenuItem, RestaurantRef};
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Cart Item
// =============================================================================

/// One line in the cart: one add-to-cart action's worth of a menu item.
///
/// ## Price Freezing
/// `menu_item` is a snapshot taken when the line was added, and `unit_price`
/// is computed from it once. Catalog changes after that do not reprice the
/// line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Unique line id: `{menu_item_id}-{millis}-{sequence}`.
    pub id: String,

    /// Menu item as it was when added (frozen).
    pub menu_item: MenuItem,

    /// Always >= 1 while the line exists.
    pub quantity: i64,

    /// Chosen options per customization group.
    pub customizations: Selections,

    /// Base price plus option deltas for one unit (frozen).
    pub unit_price: Money,

    /// `unit_price * quantity`.
    pub total_price: Money,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

// =============================================================================
// Commands
// =============================================================================

/// Payload of the AddItem transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItem {
    pub menu_item: MenuItem,
    pub quantity: i64,
    pub customizations: Selections,
    pub restaurant: RestaurantRef,
    /// When the customer tapped "Add to cart". Feeds the line id.
    pub requested_at: DateTime<Utc>,
}

impl AddItem {
    /// Builds an AddItem payload, clamping `quantity` to `1..=MAX_ITEM_QUANTITY`.
    pub fn new(
        menu_item: MenuItem,
        quantity: i64,
        customizations: Selections,
        restaurant: RestaurantRef,
        requested_at: DateTime<Utc>,
    ) -> Self {
        AddItem {
            menu_item,
            quantity: quantity.clamp(1, MAX_ITEM_QUANTITY),
            customizations,
            restaurant,
            requested_at,
        }
    }
}

/// Every way the cart can change.
///
/// Serialized the way the mobile front end dispatches actions:
/// `{ "type": "UPDATE_QUANTITY", "payload": { "id": "...", "quantity": 2 } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartCommand {
    AddItem(AddItem),
    RemoveItem { id: String },
    UpdateQuantity { id: String, quantity: i64 },
    ClearCart,
}

/// What a transition actually did. Lets callers log and warn without diffing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A line was appended. `replaced` is the restaurant whose lines were
    /// discarded to make room, if any.
    ItemAdded {
        line_id: String,
        replaced: Option<RestaurantRef>,
    },
    ItemRemoved { line_id: String },
    QuantityChanged { line_id: String, quantity: i64 },
    Cleared,
    /// The command referenced a line that does not exist.
    Unchanged,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// Fields are private so the only way to change a cart is a [`CartCommand`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
#[serde(from = "CartData")]
pub struct Cart {
    items: Vec<CartItem>,
    restaurant: Option<RestaurantRef>,
    /// Next line sequence number. Never reset, so ids stay unique across
    /// clears and restaurant switches.
    #[ts(skip)]
    next_line_seq: u64,
}

/// Wire form of [`Cart`]. Older payloads have no `nextLineSeq`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartData {
    items: Vec<CartItem>,
    restaurant: Option<RestaurantRef>,
    #[serde(default)]
    next_line_seq: u64,
}

impl From<CartData> for Cart {
    /// Never hands out a sequence number already used by a stored line.
    fn from(data: CartData) -> Self {
        let after_items = data
            .items
            .iter()
            .filter_map(|item| line_seq(&item.id))
            .max()
            .map_or(0, |seq| seq.saturating_add(1));
        Cart {
            next_line_seq: data.next_line_seq.max(after_items),
            items: data.items,
            restaurant: data.restaurant,
        }
    }
}

/// Trailing sequence number of a `{menu_item_id}-{millis}-{seq}` line id.
fn line_seq(line_id: &str) -> Option<u64> {
    line_id.rsplit_once('-')?.1.parse().ok()
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Applies one transition in place and reports what happened.
    pub fn apply(&mut self, command: CartCommand) -> CartEvent {
        match command {
            CartCommand::AddItem(add) => self.add_item(add),
            CartCommand::RemoveItem { id } => self.remove_item(&id),
            CartCommand::UpdateQuantity { id, quantity } => self.update_quantity(&id, quantity),
            CartCommand::ClearCart => self.clear(),
        }
    }

    fn add_item(&mut self, add: AddItem) -> CartEvent {
        let AddItem {
            menu_item,
            quantity,
            customizations,
            restaurant,
            requested_at,
        } = add;

        let replaced = match &self.restaurant {
            Some(current) if current.id != restaurant.id => {
                let previous = current.clone();
                self.items.clear();
                self.restaurant = None;
                Some(previous)
            }
            _ => None,
        };

        let quantity = quantity.clamp(1, MAX_ITEM_QUANTITY);
        let unit_price = compute_unit_price(&menu_item, &customizations);

        let seq = self.next_line_seq;
        self.next_line_seq += 1;
        let line_id = format!(
            "{}-{}-{}",
            menu_item.id,
            requested_at.timestamp_millis(),
            seq
        );

        self.items.push(CartItem {
            id: line_id.clone(),
            menu_item,
            quantity,
            customizations,
            unit_price,
            total_price: unit_price * quantity,
            added_at: requested_at,
        });
        self.restaurant = Some(restaurant);

        CartEvent::ItemAdded { line_id, replaced }
    }

    fn remove_item(&mut self, line_id: &str) -> CartEvent {
        let before = self.items.len();
        self.items.retain(|i| i.id != line_id);

        if self.items.len() == before {
            CartEvent::Unchanged
        } else {
            CartEvent::ItemRemoved {
                line_id: line_id.to_string(),
            }
        }
    }

    fn update_quantity(&mut self, line_id: &str, quantity: i64) -> CartEvent {
        if quantity <= 0 {
            return self.remove_item(line_id);
        }

        match self.items.iter_mut().find(|i| i.id == line_id) {
            Some(item) => {
                let quantity = quantity.min(MAX_ITEM_QUANTITY);
                item.quantity = quantity;
                item.total_price = item.unit_price * quantity;
                CartEvent::QuantityChanged {
                    line_id: line_id.to_string(),
                    quantity,
                }
            }
            None => CartEvent::Unchanged,
        }
    }

    fn clear(&mut self) -> CartEvent {
        self.items.clear();
        self.restaurant = None;
        CartEvent::Cleared
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// The restaurant the cart is bound to.
    ///
    /// Note: removing the last line leaves this set until the cart is cleared
    /// or an item from another restaurant is added.
    pub fn restaurant(&self) -> Option<&RestaurantRef> {
        self.restaurant.as_ref()
    }

    pub fn find_item(&self, line_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == line_id)
    }

    /// Sum of line totals (the checkout subtotal).
    pub fn total(&self) -> Money {
        self.items.iter().map(|i| i.total_price).sum()
    }

    /// Sum of quantities, not the number of lines.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0, |count, i| count.saturating_add(i.quantity))
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Pure transition function: `(state, command) -> state`.
pub fn reduce(cart: Cart, command: CartCommand) -> Cart {
    let mut next = cart;
    next.apply(command);
    next
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Customization, CustomizationOption, SelectionMode};
    use chrono::TimeZone;
    use std::collections::{BTreeMap, BTreeSet};

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn restaurant(id: &str) -> RestaurantRef {
        RestaurantRef {
            id: id.to_string(),
            name: format!("Restaurant {}", id),
            image: format!("https://img.example/{}.jpg", id),
        }
    }

    fn menu_item(id: &str, price_cents: i64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            description: String::new(),
            price: Money::from_cents(price_cents),
            image: String::new(),
            category: "Mains".to_string(),
            popular: false,
            spicy: false,
            vegetarian: false,
            calories: None,
            customizations: vec![Customization {
                id: "extras".to_string(),
                name: "Extras".to_string(),
                mode: SelectionMode::Multiple,
                required: false,
                options: vec![CustomizationOption {
                    id: "cheese".to_string(),
                    name: "Cheese".to_string(),
                    price: Money::from_cents(150),
                }],
            }],
        }
    }

    fn add(item: MenuItem, quantity: i64, restaurant_id: &str) -> CartCommand {
        CartCommand::AddItem(AddItem::new(
            item,
            quantity,
            Selections::new(),
            restaurant(restaurant_id),
            instant(),
        ))
    }

    fn with_cheese() -> Selections {
        let mut selections = BTreeMap::new();
        selections.insert("extras".to_string(), BTreeSet::from(["cheese".to_string()]));
        selections
    }

    #[test]
    fn test_add_item_prices_and_binds_restaurant() {
        let mut cart = Cart::new();
        let event = cart.apply(CartCommand::AddItem(AddItem::new(
            menu_item("burger", 1000),
            2,
            with_cheese(),
            restaurant("A"),
            instant(),
        )));

        assert!(matches!(event, CartEvent::ItemAdded { replaced: None, .. }));
        assert_eq!(cart.line_count(), 1);
        let line = &cart.items()[0];
        assert_eq!(line.unit_price.cents(), 1150);
        assert_eq!(line.total_price.cents(), 2300);
        assert_eq!(cart.restaurant().unwrap().id, "A");
    }

    #[test]
    fn test_all_lines_share_one_restaurant() {
        let mut cart = Cart::new();
        for (item, rid) in [("a", "A"), ("b", "A"), ("c", "B"), ("d", "B"), ("e", "A")] {
            cart.apply(add(menu_item(item, 500), 1, rid));
            let owner = cart.restaurant().unwrap().id.clone();
            assert_eq!(owner, rid);
            assert!(!cart.is_empty());
        }
        // Only the last restaurant's lines survive.
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].menu_item.id, "e");
    }

    #[test]
    fn test_switching_restaurant_wipes_cart() {
        let mut cart = Cart::new();
        cart.apply(add(menu_item("pizza", 1200), 1, "A"));
        cart.apply(add(menu_item("salad", 800), 1, "A"));

        let event = cart.apply(add(menu_item("sushi", 1500), 1, "B"));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.restaurant().unwrap().id, "B");
        match event {
            CartEvent::ItemAdded { replaced, .. } => {
                assert_eq!(replaced.unwrap().id, "A");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_quantity_is_clamped_to_one() {
        let mut cart = Cart::new();
        cart.apply(add(menu_item("fries", 399), 0, "A"));
        cart.apply(add(menu_item("fries", 399), -4, "A"));

        assert!(cart.items().iter().all(|i| i.quantity == 1));
        assert_eq!(cart.total().cents(), 798);
    }

    #[test]
    fn test_identical_adds_get_distinct_lines() {
        let mut cart = Cart::new();
        cart.apply(add(menu_item("coke", 250), 1, "A"));
        cart.apply(add(menu_item("coke", 250), 1, "A"));

        assert_eq!(cart.line_count(), 2);
        assert_ne!(cart.items()[0].id, cart.items()[1].id);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_line_ids_stay_unique_across_clear() {
        let mut cart = Cart::new();
        cart.apply(add(menu_item("coke", 250), 1, "A"));
        let first = cart.items()[0].id.clone();

        cart.apply(CartCommand::ClearCart);
        cart.apply(add(menu_item("coke", 250), 1, "A"));

        assert_ne!(cart.items()[0].id, first);
    }

    #[test]
    fn test_update_quantity_to_zero_removes() {
        let mut cart = Cart::new();
        cart.apply(add(menu_item("pizza", 1200), 1, "A"));
        let id = cart.items()[0].id.clone();

        let event = cart.apply(CartCommand::UpdateQuantity { id, quantity: 0 });

        assert!(matches!(event, CartEvent::ItemRemoved { .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_uses_unit_price() {
        let mut cart = Cart::new();
        cart.apply(CartCommand::AddItem(AddItem::new(
            menu_item("burger", 333),
            3,
            Selections::new(),
            restaurant("A"),
            instant(),
        )));
        let id = cart.items()[0].id.clone();

        for qty in [7, 2, 9, 1, 5] {
            cart.apply(CartCommand::UpdateQuantity {
                id: id.clone(),
                quantity: qty,
            });
        }

        let line = &cart.items()[0];
        assert_eq!(line.quantity, 5);
        assert_eq!(line.total_price.cents(), 1665);
    }

    #[test]
    fn test_huge_update_quantity_is_capped() {
        let mut cart = Cart::new();
        cart.apply(add(menu_item("pizza", 1000), 1, "A"));
        let id = cart.items()[0].id.clone();

        let event = cart.apply(CartCommand::UpdateQuantity {
            id: id.clone(),
            quantity: i64::MAX / 10,
        });

        assert_eq!(
            event,
            CartEvent::QuantityChanged {
                line_id: id,
                quantity: MAX_ITEM_QUANTITY
            }
        );
        assert_eq!(cart.items()[0].total_price.cents(), 1000 * MAX_ITEM_QUANTITY);
        assert_eq!(cart.item_count(), MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_huge_add_quantity_is_capped() {
        // Built by hand, skipping the clamp in AddItem::new.
        let mut cart = Cart::new();
        cart.apply(CartCommand::AddItem(AddItem {
            menu_item: menu_item("pizza", 1000),
            quantity: i64::MAX,
            customizations: Selections::new(),
            restaurant: restaurant("A"),
            requested_at: instant(),
        }));

        assert_eq!(cart.items()[0].quantity, MAX_ITEM_QUANTITY);
        assert_eq!(cart.total().cents(), 99_000);
    }

    #[test]
    fn test_totals_saturate_near_i64_limit() {
        let mut cart = Cart::new();
        cart.apply(add(menu_item("gold", i64::MAX / 4), 50, "A"));
        cart.apply(add(menu_item("gold", i64::MAX / 4), 50, "A"));

        assert_eq!(cart.items()[0].total_price.cents(), i64::MAX);
        assert_eq!(cart.total().cents(), i64::MAX);
        assert_eq!(cart.item_count(), 100);
    }

    #[test]
    fn test_deserialized_cart_keeps_ids_unique() {
        let mut cart = Cart::new();
        cart.apply(add(menu_item("coke", 250), 1, "A"));
        cart.apply(add(menu_item("coke", 250), 1, "A"));

        // A stored cart that predates the sequence field.
        let mut json = serde_json::to_value(&cart).unwrap();
        json.as_object_mut().unwrap().remove("nextLineSeq");
        let mut restored: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(restored.items(), cart.items());

        restored.apply(add(menu_item("coke", 250), 1, "A"));
        let ids: BTreeSet<&str> = restored.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_unknown_ids_are_no_ops() {
        let mut cart = Cart::new();
        cart.apply(add(menu_item("pizza", 1200), 1, "A"));
        let before = cart.clone();

        assert_eq!(
            cart.apply(CartCommand::RemoveItem { id: "nope".into() }),
            CartEvent::Unchanged
        );
        assert_eq!(
            cart.apply(CartCommand::UpdateQuantity {
                id: "nope".into(),
                quantity: 3
            }),
            CartEvent::Unchanged
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_removing_last_line_keeps_restaurant() {
        let mut cart = Cart::new();
        cart.apply(add(menu_item("pizza", 1200), 1, "A"));
        let id = cart.items()[0].id.clone();

        cart.apply(CartCommand::RemoveItem { id });

        assert!(cart.is_empty());
        assert_eq!(cart.restaurant().unwrap().id, "A");
    }

    #[test]
    fn test_totals_are_additive() {
        let mut cart = Cart::new();
        cart.apply(add(menu_item("a", 1000), 2, "A"));
        cart.apply(add(menu_item("b", 1500), 1, "A"));

        assert_eq!(cart.items()[0].total_price.cents(), 2000);
        assert_eq!(cart.total().cents(), 3500);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.line_count(), 2);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut cart = Cart::new();
        cart.apply(add(menu_item("a", 1000), 2, "A"));

        let once = reduce(cart, CartCommand::ClearCart);
        let twice = reduce(once.clone(), CartCommand::ClearCart);

        assert_eq!(once, twice);
        assert!(once.is_empty());
        assert!(once.restaurant().is_none());
        assert!(once.total().is_zero());
    }

    #[test]
    fn test_line_is_a_snapshot() {
        let mut cart = Cart::new();
        let mut item = menu_item("pizza", 1200);
        cart.apply(add(item.clone(), 1, "A"));

        // Catalog reprices after the add.
        item.price = Money::from_cents(9900);

        assert_eq!(cart.items()[0].menu_item.price.cents(), 1200);
        assert_eq!(cart.total().cents(), 1200);
    }

    #[test]
    fn test_reduce_leaves_input_untouched() {
        let start = Cart::new();
        let next = reduce(start.clone(), add(menu_item("a", 1000), 1, "A"));

        assert!(start.is_empty());
        assert_eq!(next.line_count(), 1);
    }

    #[test]
    fn test_command_wire_shape() {
        let json = serde_json::json!({
            "type": "UPDATE_QUANTITY",
            "payload": { "id": "pizza-1-0", "quantity": 2 }
        });
        let command: CartCommand = serde_json::from_value(json).unwrap();
        assert_eq!(
            command,
            CartCommand::UpdateQuantity {
                id: "pizza-1-0".to_string(),
                quantity: 2
            }
        );

        let clear: CartCommand = serde_json::from_value(serde_json::json!({ "type": "CLEAR_CART" })).unwrap();
        assert_eq!(clear, CartCommand::ClearCart);
    }
}
