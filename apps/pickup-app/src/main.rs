//! # Pickup App Entry Point
//!
//! Runs a scripted pickup session: browse, build a cart, check out, and
//! follow the order until it is ready.
//!
//! ## Environment
//! - `RUST_LOG` - log filter
//! - `PICKUP_LOCATION`, `PICKUP_CURRENCY_SYMBOL`, `PICKUP_TAX_RATE`
//! - `PICKUP_TRACKING_INTERVAL_MS` - time between tracking steps

#[tokio::main]
async fn main() {
    if let Err(e) = pickup_app_lib::run().await {
        tracing::error!(code = ?e.code, "{}", e.message);
        std::process::exit(1);
    }
}
