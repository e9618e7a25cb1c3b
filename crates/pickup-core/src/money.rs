//! # Money Module
//!
//! Provides the `Money` type used for every price, delta, tax and tip.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A price delta in binary floats:                                        │
//! │    0.10 + 0.20 = 0.30000000000000004  ❌                                │
//! │                                                                         │
//! │  Rescaling a line by ratio drifts further on every update:              │
//! │    (total / old_qty) * new_qty                                          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    (1299 + 150 + 75) * 3 = 4572 cents, exactly, every time              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pickup_core::money::Money;
//!
//! let base = Money::from_cents(1299);          // $12.99
//! let extra_cheese = Money::from_cents(150);   // +$1.50
//! let line = (base + extra_cheese) * 3;
//! assert_eq!(line.cents(), 4347);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// MenuItem.price ─┬─► CartItem.unit_price ──► CartItem.total_price
///                 │
/// Option.price ───┘
///
/// Cart.total() ──► CheckoutSummary { subtotal, tax, tip, total } ──► Order
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use pickup_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a user-entered amount such as `"3.5"`, `"3.50"` or `"$3"`.
    ///
    /// Fractional digits past the cent are rounded half away from zero.
    ///
    /// ```rust
    /// use pickup_core::money::Money;
    ///
    /// assert_eq!(Money::parse("3.5").unwrap().cents(), 350);
    /// assert_eq!(Money::parse("$12").unwrap().cents(), 1200);
    /// assert_eq!(Money::parse("0.125").unwrap().cents(), 13);
    /// assert!(Money::parse("abc").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Money, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let text = input.trim();
        let (sign, text) = match text.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", text),
        };
        let text = text.strip_prefix('$').unwrap_or(text);
        if !text.bytes().any(|b| b.is_ascii_digit()) {
            return Err(invalid("expected a number"));
        }

        // Decimal wants a digit on both sides of the point: ".75", "2."
        let lead = if text.starts_with('.') { "0" } else { "" };
        let trail = if text.ends_with('.') { "0" } else { "" };
        let normalized = format!("{sign}{lead}{text}{trail}");

        let amount = Decimal::from_str(&normalized)
            .map_err(|_| invalid("expected digits with an optional decimal point"))?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Money)
            .ok_or_else(|| invalid("amount is too large"))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax on this amount, rounding half-up to the cent.
    ///
    /// ```rust
    /// use pickup_core::money::Money;
    /// use pickup_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(3500); // $35.00
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(800));
    /// assert_eq!(tax.cents(), 280); // $2.80
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        self.percentage_bps(rate.bps())
    }

    /// Returns `bps` basis points of this amount, rounded half-up.
    ///
    /// Used for percentage tips: 15% of $24.50 is $3.675, shown as $3.68.
    ///
    /// ```rust
    /// use pickup_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(2450).percentage_bps(1500).cents(), 368);
    /// ```
    pub fn percentage_bps(&self, bps: u32) -> Money {
        // i128 keeps large subtotals from overflowing before the division
        let cents = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money(cents.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================
//
// Arithmetic saturates at the i64 bounds so cart math stays total.

/// Shows money as `$12.34`. The app formats with the configured symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by a line quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
