//! # Validation Module
//!
//! Input checks run by the command layer before a command reaches the cart
//! or checkout.
//!
//! ## Where Validation Sits
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Screen input (quantity stepper, option pickers, tip box, search)      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Command layer ──► THIS MODULE: reject bad input with a message        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Cart engine ────► total: clamps and ignores instead of failing        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine never calls these; it stays total so replaying a command log
//! can't fail halfway through.
//!
//! ## Usage
//! ```rust
//! use pickup_core::validation::{validate_quantity, validate_search_query};
//!
//! validate_quantity(2).unwrap();
//! assert_eq!(validate_search_query("  sushi ").unwrap(), "sushi");
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::pricing::Selections;
use crate::types::{MenuItem, SelectionMode};
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest search query accepted.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;

/// Longest special-instructions note accepted.
pub const MAX_SPECIAL_INSTRUCTIONS_LEN: usize = 500;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity from the stepper.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (99)
///
/// ```rust
/// use pickup_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(100).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a quantity update. Zero is allowed: it removes the line.
pub fn validate_quantity_update(qty: i64) -> ValidationResult<()> {
    if qty == 0 {
        return Ok(());
    }
    if qty < 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_ITEM_QUANTITY,
        });
    }
    validate_quantity(qty)
}

/// Validates a price in cents. Zero is allowed (free sides, "no sauce").
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a custom tip amount. Zero is allowed, negative is not.
pub fn validate_tip(tip: Money) -> ValidationResult<()> {
    if tip.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "tip".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Selection Validators
// =============================================================================

/// Checks the customer's choices against the item's customization groups.
///
/// ## Rules
/// - Every `required` group has at least one known option selected
/// - A `single` group has at most one option selected
///
/// Unknown groups and options are not errors here; pricing ignores them.
pub fn validate_selections(menu_item: &MenuItem, selections: &Selections) -> ValidationResult<()> {
    for group in &menu_item.customizations {
        let chosen = selections
            .get(&group.id)
            .map(|ids| ids.iter().filter(|id| group.option(id).is_some()).count())
            .unwrap_or(0);

        if group.required && chosen == 0 {
            return Err(ValidationError::Required {
                field: group.name.clone(),
            });
        }

        if group.mode == SelectionMode::Single && chosen > 1 {
            return Err(ValidationError::TooManySelections {
                field: group.name.clone(),
                count: chosen,
            });
        }
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (lists every restaurant)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

/// Validates the note for the kitchen. Returns the trimmed note, or `None`
/// when it is blank.
pub fn validate_special_instructions(note: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(note) = note.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };

    if note.chars().count() > MAX_SPECIAL_INSTRUCTIONS_LEN {
        return Err(ValidationError::TooLong {
            field: "special instructions".to_string(),
            max: MAX_SPECIAL_INSTRUCTIONS_LEN,
        });
    }

    Ok(Some(note.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Customization, CustomizationOption};

    fn option(id: &str) -> CustomizationOption {
        CustomizationOption {
            id: id.to_string(),
            name: id.to_string(),
            price: Money::zero(),
        }
    }

    fn burger() -> MenuItem {
        MenuItem {
            id: "burger".to_string(),
            name: "Classic Burger".to_string(),
            description: String::new(),
            price: Money::from_cents(1099),
            image: String::new(),
            category: "Burgers".to_string(),
            popular: true,
            spicy: false,
            vegetarian: false,
            calories: None,
            customizations: vec![
                Customization {
                    id: "doneness".to_string(),
                    name: "Doneness".to_string(),
                    mode: SelectionMode::Single,
                    required: true,
                    options: vec![option("medium"), option("well")],
                },
                Customization {
                    id: "extras".to_string(),
                    name: "Extras".to_string(),
                    mode: SelectionMode::Multiple,
                    required: false,
                    options: vec![option("bacon"), option("egg")],
                },
            ],
        }
    }

    fn select(pairs: &[(&str, &[&str])]) -> Selections {
        pairs
            .iter()
            .map(|(g, ids)| (g.to_string(), ids.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(99).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(100).is_err());
    }

    #[test]
    fn test_validate_quantity_update_allows_zero() {
        assert!(validate_quantity_update(0).is_ok());
        assert!(validate_quantity_update(5).is_ok());
        assert!(validate_quantity_update(-2).is_err());
        assert!(validate_quantity_update(150).is_err());
    }

    #[test]
    fn test_validate_price_and_tip() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(-100).is_err());

        assert!(validate_tip(Money::zero()).is_ok());
        assert!(validate_tip(Money::from_cents(500)).is_ok());
        assert!(validate_tip(Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_required_group_needs_a_choice() {
        let err = validate_selections(&burger(), &Selections::new()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Required {
                field: "Doneness".to_string()
            }
        );

        // An unknown option does not satisfy the requirement.
        assert!(validate_selections(&burger(), &select(&[("doneness", &["raw"])])).is_err());
        assert!(validate_selections(&burger(), &select(&[("doneness", &["well"])])).is_ok());
    }

    #[test]
    fn test_single_group_allows_one_choice() {
        let selections = select(&[("doneness", &["medium", "well"])]);
        assert!(matches!(
            validate_selections(&burger(), &selections),
            Err(ValidationError::TooManySelections { count: 2, .. })
        ));
    }

    #[test]
    fn test_multiple_group_allows_many() {
        let selections = select(&[("doneness", &["medium"]), ("extras", &["bacon", "egg"])]);
        assert!(validate_selections(&burger(), &selections).is_ok());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  pizza  ").unwrap(), "pizza");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_special_instructions() {
        assert_eq!(validate_special_instructions(None).unwrap(), None);
        assert_eq!(validate_special_instructions(Some("   ")).unwrap(), None);
        assert_eq!(
            validate_special_instructions(Some(" no onions ")).unwrap(),
            Some("no onions".to_string())
        );
        assert!(validate_special_instructions(Some(&"x".repeat(501))).is_err());
    }
}
