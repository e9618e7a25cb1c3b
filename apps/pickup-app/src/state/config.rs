//! # Configuration State
//!
//! Stores session configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`PICKUP_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::time::Duration;

use pickup_core::tracking::DEFAULT_PREP_MINUTES;
use pickup_core::{Money, PickupSlot, TaxRate, DEFAULT_TAX_RATE_BPS, TIP_PRESETS_BPS};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Pickup location shown in the home header.
    pub location: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Sales tax in basis points
    /// e.g., 800 = 8%
    pub tax_rate_bps: u32,

    /// Tip buttons offered at checkout, in basis points
    pub tip_presets_bps: Vec<u32>,

    /// Pickup times offered at checkout
    pub pickup_slots: Vec<PickupSlot>,

    /// Period of the order-tracking simulation, in milliseconds
    pub tracking_interval_ms: u64,

    /// Countdown the kitchen starts from when preparing
    pub prep_minutes: u32,
}

fn slot(id: &str, label: &str, estimated_time: &str) -> PickupSlot {
    PickupSlot {
        id: id.to_string(),
        label: label.to_string(),
        estimated_time: estimated_time.to_string(),
        is_available: true,
    }
}

impl Default for ConfigState {
    /// Returns defaults suitable for development.
    ///
    /// ## Default Values
    /// - Location: "Downtown"
    /// - Currency: $ with 2 decimals
    /// - Tax: 8%
    /// - Tips: 15%, 18%, 20%
    /// - Tracking tick: every 30 seconds
    fn default() -> Self {
        ConfigState {
            location: "Downtown".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            tip_presets_bps: TIP_PRESETS_BPS.to_vec(),
            pickup_slots: vec![
                slot("1", "ASAP", "15-20 min"),
                slot("2", "3:30 PM", "25 min"),
                slot("3", "4:00 PM", "55 min"),
                slot("4", "4:30 PM", "1h 25min"),
            ],
            tracking_interval_ms: 30_000,
            prep_minutes: DEFAULT_PREP_MINUTES,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `PICKUP_LOCATION`: Override pickup location
    /// - `PICKUP_CURRENCY_SYMBOL`: Override currency symbol
    /// - `PICKUP_TAX_RATE`: Override tax rate as a percentage (e.g., "8.25")
    /// - `PICKUP_TRACKING_INTERVAL_MS`: Override tracking tick period
    pub fn from_env() -> Self {
        ConfigState::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with an injectable variable source.
    ///
    /// Values that fail to parse are ignored and the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(location) = lookup("PICKUP_LOCATION") {
            config.location = location;
        }

        if let Some(symbol) = lookup("PICKUP_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(tax_rate_str) = lookup("PICKUP_TAX_RATE") {
            match tax_rate_str.trim().parse::<f64>() {
                Ok(rate) if (0.0..=100.0).contains(&rate) => {
                    config.tax_rate_bps = TaxRate::from_percentage(rate).bps();
                }
                _ => warn!(value = %tax_rate_str, "ignoring invalid PICKUP_TAX_RATE"),
            }
        }

        if let Some(interval) = lookup("PICKUP_TRACKING_INTERVAL_MS") {
            match interval.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.tracking_interval_ms = ms,
                _ => warn!(value = %interval, "ignoring invalid PICKUP_TRACKING_INTERVAL_MS"),
            }
        }

        config
    }

    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    pub fn tracking_interval(&self) -> Duration {
        Duration::from_millis(self.tracking_interval_ms)
    }

    /// Looks up a pickup slot by id.
    pub fn pickup_slot(&self, id: &str) -> Option<&PickupSlot> {
        self.pickup_slots.iter().find(|s| s.id == id)
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use pickup_app_lib::state::ConfigState;
    /// use pickup_core::Money;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::default();
        assert_eq!(config.tax_rate().bps(), 800);
        assert_eq!(config.tip_presets_bps, vec![1500, 1800, 2000]);
        assert_eq!(config.pickup_slots.len(), 4);
        assert_eq!(config.pickup_slot("1").unwrap().label, "ASAP");
        assert_eq!(config.tracking_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = ConfigState::from_lookup(lookup(&[
            ("PICKUP_TAX_RATE", "8.25"),
            ("PICKUP_LOCATION", "Uptown"),
            ("PICKUP_CURRENCY_SYMBOL", "€"),
            ("PICKUP_TRACKING_INTERVAL_MS", "250"),
        ]));

        assert_eq!(config.tax_rate_bps, 825);
        assert_eq!(config.location, "Uptown");
        assert_eq!(config.format_currency(Money::from_cents(500)), "€5.00");
        assert_eq!(config.tracking_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_from_lookup_ignores_bad_values() {
        let config = ConfigState::from_lookup(lookup(&[
            ("PICKUP_TAX_RATE", "lots"),
            ("PICKUP_TRACKING_INTERVAL_MS", "0"),
        ]));
        assert_eq!(config.tax_rate_bps, DEFAULT_TAX_RATE_BPS);
        assert_eq!(config.tracking_interval_ms, 30_000);
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
    }
}
