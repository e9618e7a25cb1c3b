//! # Pickup App Library
//!
//! Application layer of the restaurant pickup app: shared state, the commands
//! the screens call, and a scripted customer session used by the binary.
//!
//! ## Module Organization
//! ```text
//! pickup_app_lib/
//! ├── lib.rs          ◄─── You are here (setup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── catalog.rs  ◄─── Read-only restaurant catalog
//! │   ├── cart.rs     ◄─── Cart state management
//! │   ├── orders.rs   ◄─── Placed orders and their trackers
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/       ◄─── One module per screen
//! ├── seed.rs         ◄─── Mock restaurants and menus
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management (Multiple State Types)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │ CatalogState │ │  CartState   │ │ OrdersState  │ │ ConfigState  │   │
//! │  │              │ │              │ │              │ │              │   │
//! │  │ • Restaurants│ │ • Lines      │ │ • Trackers   │ │ • Tax rate   │   │
//! │  │ • Menus      │ │ • Restaurant │ │ • Updates    │ │ • Slots      │   │
//! │  │   (Arc)      │ │ (Arc<Mutex>) │ │ (Arc<Mutex>) │ │ • Intervals  │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod seed;
pub mod state;

use std::collections::BTreeSet;

use pickup_core::Selections;
use tracing::{info, Subscriber};
use tracing_subscriber::EnvFilter;

use commands::cart::{add_to_cart, update_cart_item, AddToCartRequest};
use commands::catalog::{featured_restaurants, get_restaurant, search_restaurants};
use commands::checkout::{get_checkout_summary, get_tip_presets, place_order, PlaceOrderRequest};
use commands::tracking::{get_order_tracking, spawn_tracking};
use error::ApiError;
use state::{CartState, CatalogState, ConfigState, OrdersState};

/// Runs a scripted customer session against the mock catalog.
///
/// ## Session
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load config (PICKUP_* env vars) and the mock catalog               │
/// │  2. Browse: featured strip, search "pizza"                              │
/// │  3. Add a coke from Burger Palace                                      │
/// │  4. Add a large Margherita ──► Burger Palace cart is replaced          │
/// │  5. Bump the pizza to 2, show the summary with the middle tip preset   │
/// │  6. Place the order for the 3:30 PM slot                                │
/// │  7. Track it until ready (PICKUP_TRACKING_INTERVAL_MS per step)        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), ApiError> {
    init_tracing();

    let config = ConfigState::from_env();
    let catalog = CatalogState::new(seed::mock_catalog());
    let cart = CartState::new();
    let orders = OrdersState::new();

    info!(location = %config.location, tax_rate_bps = config.tax_rate_bps, "Starting pickup session");

    let featured: Vec<String> = featured_restaurants(&catalog)
        .into_iter()
        .map(|r| r.name)
        .collect();
    info!(?featured, "Featured for pickup");

    let found = search_restaurants(&catalog, "pizza", None)?;
    let Some(pizzeria) = found.first() else {
        return Err(ApiError::internal("mock catalog has no pizzeria"));
    };
    let detail = get_restaurant(&catalog, &pizzeria.id)?;
    info!(restaurant = %detail.restaurant.name, categories = ?detail.categories, "Opened restaurant");

    add_to_cart(
        &catalog,
        &cart,
        AddToCartRequest {
            restaurant_id: "2".to_string(),
            menu_item_id: "203".to_string(),
            ..AddToCartRequest::default()
        },
    )?;

    let response = add_to_cart(
        &catalog,
        &cart,
        AddToCartRequest {
            restaurant_id: detail.restaurant.id.clone(),
            menu_item_id: "101".to_string(),
            quantity: Some(1),
            customizations: selections(&[("size", &["large"]), ("toppings", &["olives"])]),
        },
    )?;
    if let Some(previous) = &response.replaced_previous_cart {
        info!(previous = %previous.name, "Cart from another restaurant was replaced");
    }

    let line_id = response
        .items
        .first()
        .map(|line| line.id.clone())
        .ok_or_else(|| ApiError::internal("cart is empty after add"))?;
    let response = update_cart_item(&cart, line_id, 2)?;
    info!(
        items = response.totals.item_count,
        subtotal = %config.format_currency(response.totals.subtotal),
        "Cart updated"
    );

    let presets = get_tip_presets(&config);
    let tip = presets.get(1).copied().unwrap_or_default();
    let summary = get_checkout_summary(&cart, &config, tip)?;
    info!(
        subtotal = %config.format_currency(summary.subtotal),
        tax = %config.format_currency(summary.tax),
        tip = %config.format_currency(summary.tip),
        total = %config.format_currency(summary.total),
        "Checkout summary"
    );

    let order = place_order(
        &cart,
        &config,
        &orders,
        PlaceOrderRequest {
            tip,
            pickup_slot_id: Some("2".to_string()),
            special_instructions: Some("Extra napkins please".to_string()),
        },
    )?;

    let handle = spawn_tracking(orders.clone(), order.id.clone(), config.tracking_interval());
    let final_status = handle
        .await
        .map_err(|e| ApiError::internal(format!("tracking task failed: {e}")))?;
    info!(order_number = %order.order_number, ?final_status, "Tracking finished");

    let tracking = get_order_tracking(&orders, &order.id)?;
    let json = serde_json::to_string_pretty(&tracking)
        .map_err(|e| ApiError::internal(format!("failed to serialize order: {e}")))?;
    println!("{json}");

    Ok(())
}

fn selections(groups: &[(&str, &[&str])]) -> Selections {
    groups
        .iter()
        .map(|(group, ids)| {
            let ids: BTreeSet<String> = ids.iter().map(|id| id.to_string()).collect();
            (group.to_string(), ids)
        })
        .collect()
}

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "info,pickup_core=debug,pickup_app_lib=debug";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=pickup_app_lib=trace` - Show trace for the app crate only
/// - Default: INFO, DEBUG for pickup crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing::subscriber::set_global_default(log_subscriber(filter));
}

/// Formatting subscriber whose levels come from `filter` alone.
fn log_subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt().with_env_filter(filter).finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_default_filter_caps_at_debug() {
        let subscriber = log_subscriber(EnvFilter::new(DEFAULT_LOG_FILTER));
        assert_eq!(subscriber.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_filter_directives_are_honored() {
        let subscriber = log_subscriber(EnvFilter::new("warn"));
        assert_eq!(subscriber.max_level_hint(), Some(LevelFilter::WARN));
    }
}
