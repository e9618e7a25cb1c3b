//! # Error Types
//!
//! Domain-specific error types for pickup-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pickup-core errors (this file)                                        │
//! │  ├── CoreError        - Catalog lookups, checkout, order status        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  pickup-app errors (in app)                                            │
//! │  └── ApiError         - What the front end sees (serialized)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Front end              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart transitions themselves never produce these: every transition
//! yields a valid next cart. Errors come from lookups, validation performed
//! before a command is dispatched, and checkout.

use thiserror::Error;

use crate::types::OrderStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Restaurant id is not in the catalog.
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    /// Menu item id is not on the restaurant's menu.
    #[error("Menu item {item_id} not found at restaurant {restaurant_id}")]
    MenuItemNotFound {
        restaurant_id: String,
        item_id: String,
    },

    /// Cart line id does not exist.
    #[error("Cart item not found: {0}")]
    CartItemNotFound(String),

    /// Checkout was attempted with nothing in the cart.
    ///
    /// ## User Workflow
    /// ```text
    /// Checkout screen ──► Place Order
    ///      │
    ///      ▼
    /// cart.is_empty()? ──► EmptyCart
    ///      │
    ///      ▼
    /// UI shows: "Your cart is empty"
    /// ```
    #[error("Your cart is empty")]
    EmptyCart,

    /// The order cannot move from its current status.
    #[error("Order {order_id} is {current:?}, cannot {action}")]
    InvalidOrderTransition {
        order_id: String,
        current: OrderStatus,
        action: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field or choice is missing.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. an amount that is not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// More options chosen than a single-choice group allows.
    #[error("{field} allows only one choice, got {count}")]
    TooManySelections { field: String, count: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::MenuItemNotFound {
            restaurant_id: "1".to_string(),
            item_id: "99".to_string(),
        };
        assert_eq!(err.to_string(), "Menu item 99 not found at restaurant 1");
        assert_eq!(CoreError::EmptyCart.to_string(), "Your cart is empty");
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = CoreError::InvalidOrderTransition {
            order_id: "abc".to_string(),
            current: OrderStatus::Completed,
            action: "cancel".to_string(),
        };
        assert_eq!(err.to_string(), "Order abc is Completed, cannot cancel");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "Size".to_string(),
        };
        assert_eq!(err.to_string(), "Size is required");

        let err = ValidationError::TooManySelections {
            field: "Crust".to_string(),
            count: 2,
        };
        assert_eq!(err.to_string(), "Crust allows only one choice, got 2");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
