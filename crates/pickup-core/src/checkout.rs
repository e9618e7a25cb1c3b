//! # Checkout
//!
//! Tax, tip and order placement on top of the cart subtotal.
//!
//! ## Checkout Math
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Subtotal            cart.total()                      $35.00          │
//! │  Tax (8%)            subtotal × 800 bps                 $2.80          │
//! │  Tip                 15% / 18% / 20% of subtotal,       $6.30  (18%)   │
//! │                      or a custom amount                                 │
//! │  ───────────────────────────────────────────────────────────────       │
//! │  Total               subtotal + tax + tip              $44.10          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tax and tip are both computed on the pre-tax subtotal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Order, OrderStatus, PickupSlot, TaxRate};

/// Estimated pickup shown when no slot was chosen.
pub const DEFAULT_ESTIMATED_TIME: &str = "15-20 min";

// =============================================================================
// Tip
// =============================================================================

/// The tip the customer picked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TipChoice {
    #[default]
    None,
    /// Percentage of the subtotal, in basis points.
    Percent(u32),
    /// Fixed amount typed by the customer.
    Custom(Money),
}

impl TipChoice {
    /// The preset buttons for the configured percentages, in display order.
    pub fn presets(percentages_bps: &[u32]) -> Vec<TipChoice> {
        percentages_bps.iter().copied().map(TipChoice::Percent).collect()
    }

    /// Interprets the custom tip text box.
    ///
    /// Text that is not an amount counts as no tip, so a half-typed value
    /// never blocks checkout.
    pub fn from_custom_input(text: &str) -> TipChoice {
        TipChoice::Custom(Money::parse(text).unwrap_or_default())
    }

    /// Tip amount for a given subtotal.
    pub fn amount(&self, subtotal: Money) -> Money {
        match self {
            TipChoice::None => Money::zero(),
            TipChoice::Percent(bps) => subtotal.percentage_bps(*bps),
            TipChoice::Custom(amount) => *amount,
        }
    }

    /// Button label: `"15%"`, `"Custom"`, `"No tip"`.
    pub fn label(&self) -> String {
        match self {
            TipChoice::None => "No tip".to_string(),
            TipChoice::Percent(bps) if bps % 100 == 0 => format!("{}%", bps / 100),
            TipChoice::Percent(bps) => format!("{}.{:02}%", bps / 100, bps % 100),
            TipChoice::Custom(_) => "Custom".to_string(),
        }
    }
}

// =============================================================================
// Summary
// =============================================================================

/// The order summary block on the checkout screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub subtotal: Money,
    pub tax: Money,
    pub tip: Money,
    pub total: Money,
}

impl CheckoutSummary {
    pub fn compute(subtotal: Money, tax_rate: TaxRate, tip: TipChoice) -> Self {
        let tax = subtotal.calculate_tax(tax_rate);
        let tip = tip.amount(subtotal);
        CheckoutSummary {
            subtotal,
            tax,
            tip,
            total: subtotal + tax + tip,
        }
    }

    pub fn for_cart(cart: &Cart, tax_rate: TaxRate, tip: TipChoice) -> Self {
        CheckoutSummary::compute(cart.total(), tax_rate, tip)
    }
}

// =============================================================================
// Order Placement
// =============================================================================

/// Everything checkout collects besides the cart itself.
#[derive(Debug, Clone, Default)]
pub struct OrderRequest {
    pub tip: TipChoice,
    pub pickup_slot: Option<PickupSlot>,
    pub special_instructions: Option<String>,
}

/// Turns the cart into a pending order.
///
/// Fails only when the cart is empty. The cart is not modified; the caller
/// clears it once the order is stored.
pub fn place_order(
    cart: &Cart,
    request: OrderRequest,
    tax_rate: TaxRate,
    order_id: Uuid,
    now: DateTime<Utc>,
) -> CoreResult<Order> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }
    let restaurant = cart.restaurant().cloned().ok_or(CoreError::EmptyCart)?;

    let summary = CheckoutSummary::for_cart(cart, tax_rate, request.tip);
    let estimated_time = request
        .pickup_slot
        .as_ref()
        .map(|slot| slot.estimated_time.clone())
        .unwrap_or_else(|| DEFAULT_ESTIMATED_TIME.to_string());
    let special_instructions = request
        .special_instructions
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Ok(Order {
        id: order_id.to_string(),
        order_number: order_number(&order_id),
        restaurant,
        items: cart.items().to_vec(),
        subtotal: summary.subtotal,
        tax: summary.tax,
        tip: summary.tip,
        total: summary.total,
        status: OrderStatus::Pending,
        estimated_time,
        pickup_slot: request.pickup_slot.map(|slot| slot.label),
        special_instructions,
        placed_at: now,
        rating: None,
    })
}

/// Short customer-facing number derived from the order id: `#0000`-`#9999`.
pub fn order_number(order_id: &Uuid) -> String {
    format!("#{:04}", order_id.as_u128() % 10_000)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{AddItem, CartCommand};
    use crate::pricing::Selections;
    use crate::types::{MenuItem, RestaurantRef};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 14, 30, 0).unwrap()
    }

    fn dish(id: &str, cents: i64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            price: Money::from_cents(cents),
            image: String::new(),
            category: "Mains".to_string(),
            popular: false,
            spicy: false,
            vegetarian: false,
            calories: None,
            customizations: Vec::new(),
        }
    }

    fn cart_worth_35() -> Cart {
        let restaurant = RestaurantRef {
            id: "1".to_string(),
            name: "Mario's Pizzeria".to_string(),
            image: String::new(),
        };
        let mut cart = Cart::new();
        for (item, qty) in [(dish("pizza", 1000), 2), (dish("salad", 1500), 1)] {
            cart.apply(CartCommand::AddItem(AddItem::new(
                item,
                qty,
                Selections::new(),
                restaurant.clone(),
                now(),
            )));
        }
        cart
    }

    #[test]
    fn test_summary_with_percentage_tip() {
        let summary = CheckoutSummary::for_cart(
            &cart_worth_35(),
            TaxRate::from_bps(800),
            TipChoice::Percent(1800),
        );
        assert_eq!(summary.subtotal.cents(), 3500);
        assert_eq!(summary.tax.cents(), 280);
        assert_eq!(summary.tip.cents(), 630);
        assert_eq!(summary.total.cents(), 4410);
    }

    #[test]
    fn test_summary_without_tip() {
        let summary = CheckoutSummary::compute(
            Money::from_cents(2450),
            TaxRate::default(),
            TipChoice::None,
        );
        assert_eq!(summary.tax.cents(), 196);
        assert_eq!(summary.total.cents(), 2646);
    }

    #[test]
    fn test_custom_tip_input() {
        assert_eq!(
            TipChoice::from_custom_input("5"),
            TipChoice::Custom(Money::from_cents(500))
        );
        assert_eq!(
            TipChoice::from_custom_input("2.5").amount(Money::from_cents(9999)),
            Money::from_cents(250)
        );
        assert_eq!(
            TipChoice::from_custom_input("lots"),
            TipChoice::Custom(Money::zero())
        );
    }

    #[test]
    fn test_presets_and_labels() {
        let labels: Vec<String> = TipChoice::presets(&crate::TIP_PRESETS_BPS)
            .iter()
            .map(TipChoice::label)
            .collect();
        assert_eq!(labels, vec!["15%", "18%", "20%"]);
        assert_eq!(TipChoice::Percent(1250).label(), "12.50%");
        assert_eq!(TipChoice::Custom(Money::zero()).label(), "Custom");
    }

    #[test]
    fn test_place_order_snapshots_cart() {
        let cart = cart_worth_35();
        let slot = PickupSlot {
            id: "2".to_string(),
            label: "3:30 PM".to_string(),
            estimated_time: "25 min".to_string(),
            is_available: true,
        };
        let request = OrderRequest {
            tip: TipChoice::Custom(Money::from_cents(400)),
            pickup_slot: Some(slot),
            special_instructions: Some("  extra napkins ".to_string()),
        };

        let order = place_order(&cart, request, TaxRate::default(), Uuid::new_v4(), now()).unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.restaurant.name, "Mario's Pizzeria");
        assert_eq!(order.total.cents(), 3500 + 280 + 400);
        assert_eq!(order.estimated_time, "25 min");
        assert_eq!(order.pickup_slot.as_deref(), Some("3:30 PM"));
        assert_eq!(order.special_instructions.as_deref(), Some("extra napkins"));
        assert!(order.is_active());
        // Placing an order does not clear the cart by itself.
        assert_eq!(cart.line_count(), 2);
    }

    #[test]
    fn test_place_order_defaults() {
        let order = place_order(
            &cart_worth_35(),
            OrderRequest::default(),
            TaxRate::default(),
            Uuid::new_v4(),
            now(),
        )
        .unwrap();
        assert_eq!(order.estimated_time, DEFAULT_ESTIMATED_TIME);
        assert!(order.pickup_slot.is_none());
        assert!(order.tip.is_zero());
    }

    #[test]
    fn test_empty_cart_cannot_check_out() {
        let result = place_order(
            &Cart::new(),
            OrderRequest::default(),
            TaxRate::default(),
            Uuid::new_v4(),
            now(),
        );
        assert!(matches!(result, Err(CoreError::EmptyCart)));
    }

    #[test]
    fn test_order_number_format() {
        let id = Uuid::from_u128(1_234_567);
        assert_eq!(order_number(&id), "#4567");
        assert_eq!(order_number(&Uuid::from_u128(42)), "#0042");
    }
}
