//! # Pricing
//!
//! Turns a menu item plus the customer's choices into a price.
//!
//! ## Price Composition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Margherita Pizza                              base   $12.99           │
//! │    Size: Large                                 +      $3.00            │
//! │    Toppings: Extra Cheese, Olives              +      $1.50 + $1.00    │
//! │    Toppings: "truffle" (not on this item)      +      $0.00  (skipped) │
//! │                                                ─────────────           │
//! │  unit price                                           $18.49           │
//! │  × quantity 2                                  line   $36.98           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Group ids and option ids that the item does not define contribute nothing.
//! Stale or mismatched client input therefore prices as if it were absent
//! instead of failing the add.

use std::collections::{BTreeMap, BTreeSet};

use crate::money::Money;
use crate::types::MenuItem;

/// Chosen options: customization group id → selected option ids.
///
/// Ordered containers keep serialization and iteration deterministic.
pub type Selections = BTreeMap<String, BTreeSet<String>>;

/// Sum of the price deltas of every selected option the item knows about.
pub fn customization_delta(menu_item: &MenuItem, selections: &Selections) -> Money {
    selections
        .iter()
        .filter_map(|(group_id, option_ids)| {
            menu_item
                .customization(group_id)
                .map(|group| (group, option_ids))
        })
        .flat_map(|(group, option_ids)| {
            option_ids
                .iter()
                .filter_map(move |option_id| group.option(option_id))
        })
        .map(|option| option.price)
        .sum()
}

/// Price of one unit: base price plus customization deltas.
pub fn compute_unit_price(menu_item: &MenuItem, selections: &Selections) -> Money {
    menu_item.price + customization_delta(menu_item, selections)
}

/// Price of a whole line: `(base + deltas) * quantity`.
///
/// Callers clamp `quantity` to at least 1 first; the cart does this in
/// [`crate::cart::AddItem`].
///
/// ```rust
/// use std::collections::{BTreeMap, BTreeSet};
/// use pickup_core::money::Money;
/// use pickup_core::pricing::{compute_line_price, Selections};
/// # use pickup_core::types::*;
/// # let item = MenuItem {
/// #     id: "burger".into(), name: "Burger".into(), description: String::new(),
/// #     price: Money::from_cents(1000), image: String::new(), category: "Mains".into(),
/// #     popular: false, spicy: false, vegetarian: false, calories: None,
/// #     customizations: vec![Customization {
/// #         id: "extras".into(), name: "Extras".into(), mode: SelectionMode::Multiple,
/// #         required: false,
/// #         options: vec![CustomizationOption { id: "bacon".into(), name: "Bacon".into(),
/// #             price: Money::from_cents(200) }],
/// #     }],
/// # };
///
/// let mut selections: Selections = BTreeMap::new();
/// selections.insert("extras".into(), BTreeSet::from(["bacon".to_string()]));
///
/// assert_eq!(compute_line_price(&item, &selections, 3), Money::from_cents(3600));
/// ```
pub fn compute_line_price(menu_item: &MenuItem, selections: &Selections, quantity: i64) -> Money {
    compute_unit_price(menu_item, selections) * quantity
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Customization, CustomizationOption, SelectionMode};

    fn option(id: &str, cents: i64) -> CustomizationOption {
        CustomizationOption {
            id: id.to_string(),
            name: id.to_string(),
            price: Money::from_cents(cents),
        }
    }

    fn item(price_cents: i64) -> MenuItem {
        MenuItem {
            id: "pizza".to_string(),
            name: "Margherita Pizza".to_string(),
            description: String::new(),
            price: Money::from_cents(price_cents),
            image: String::new(),
            category: "Pizza".to_string(),
            popular: false,
            spicy: false,
            vegetarian: true,
            calories: Some(850),
            customizations: vec![
                Customization {
                    id: "size".to_string(),
                    name: "Size".to_string(),
                    mode: SelectionMode::Single,
                    required: true,
                    options: vec![option("small", 0), option("large", 300)],
                },
                Customization {
                    id: "toppings".to_string(),
                    name: "Toppings".to_string(),
                    mode: SelectionMode::Multiple,
                    required: false,
                    options: vec![option("cheese", 150), option("olives", 100)],
                },
            ],
        }
    }

    fn select(pairs: &[(&str, &[&str])]) -> Selections {
        pairs
            .iter()
            .map(|(group, ids)| {
                (
                    group.to_string(),
                    ids.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_line_price_with_single_option() {
        let mut menu_item = item(1000);
        menu_item.customizations[0].id = "groupX".to_string();
        menu_item.customizations[0].options[0] = option("optA", 200);

        let selections = select(&[("groupX", &["optA"])]);
        assert_eq!(
            compute_line_price(&menu_item, &selections, 3),
            Money::from_cents(3600)
        );
    }

    #[test]
    fn test_line_price_sums_across_groups() {
        let selections = select(&[("size", &["large"]), ("toppings", &["cheese", "olives"])]);
        assert_eq!(compute_unit_price(&item(1299), &selections).cents(), 1849);
        assert_eq!(compute_line_price(&item(1299), &selections, 2).cents(), 3698);
    }

    #[test]
    fn test_no_selections_is_base_price() {
        assert_eq!(
            compute_line_price(&item(1299), &Selections::new(), 1).cents(),
            1299
        );
    }

    #[test]
    fn test_unknown_group_contributes_nothing() {
        let selections = select(&[("sauce", &["large"])]);
        assert_eq!(compute_line_price(&item(1000), &selections, 1).cents(), 1000);
    }

    #[test]
    fn test_unknown_option_contributes_nothing() {
        let selections = select(&[("toppings", &["truffle", "cheese"])]);
        assert_eq!(customization_delta(&item(1000), &selections).cents(), 150);
    }

    /// An option id is only looked up inside the group it was selected under.
    #[test]
    fn test_option_in_wrong_group_is_ignored() {
        let selections = select(&[("size", &["cheese"])]);
        assert!(customization_delta(&item(1000), &selections).is_zero());
    }

    #[test]
    fn test_zero_priced_option() {
        let selections = select(&[("size", &["small"])]);
        assert_eq!(compute_unit_price(&item(899), &selections).cents(), 899);
    }
}
