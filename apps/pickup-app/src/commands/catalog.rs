//! # Catalog Commands
//!
//! Browsing: home feed, search, and the restaurant menu screen.

use pickup_core::catalog::ALL_CATEGORIES;
use pickup_core::validation::validate_search_query;
use pickup_core::{MenuItem, Restaurant};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::CatalogState;

/// Restaurant screen payload: header, category tabs and the full menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDetail {
    pub restaurant: Restaurant,
    pub categories: Vec<String>,
    pub menu: Vec<MenuItem>,
}

/// Lists every restaurant ("Nearby Restaurants").
pub fn list_restaurants(catalog: &CatalogState) -> Vec<Restaurant> {
    debug!("list_restaurants command");
    catalog.catalog().restaurants().to_vec()
}

/// Lists the "Featured for Pickup" strip.
pub fn featured_restaurants(catalog: &CatalogState) -> Vec<Restaurant> {
    debug!("featured_restaurants command");
    catalog.catalog().featured().cloned().collect()
}

/// Searches restaurants by name or cuisine.
///
/// ## Arguments
/// * `query` - Free text; empty lists everything
/// * `cuisine` - Cuisine chip; `None` or `"All"` disables the filter
pub fn search_restaurants(
    catalog: &CatalogState,
    query: &str,
    cuisine: Option<&str>,
) -> Result<Vec<Restaurant>, ApiError> {
    let query = validate_search_query(query)?;
    debug!(query = %query, ?cuisine, "search_restaurants command");

    Ok(catalog
        .catalog()
        .search(&query, cuisine)
        .into_iter()
        .cloned()
        .collect())
}

/// Gets a restaurant with its category tabs and menu.
pub fn get_restaurant(
    catalog: &CatalogState,
    restaurant_id: &str,
) -> Result<RestaurantDetail, ApiError> {
    debug!(restaurant_id, "get_restaurant command");

    let catalog = catalog.catalog();
    let restaurant = catalog.restaurant(restaurant_id)?.clone();
    Ok(RestaurantDetail {
        restaurant,
        categories: catalog.categories(restaurant_id),
        menu: catalog.menu(restaurant_id).to_vec(),
    })
}

/// Gets the menu items under one category tab.
pub fn get_menu(
    catalog: &CatalogState,
    restaurant_id: &str,
    category: Option<&str>,
) -> Result<Vec<MenuItem>, ApiError> {
    let category = category.unwrap_or(ALL_CATEGORIES);
    debug!(restaurant_id, category, "get_menu command");

    let catalog = catalog.catalog();
    catalog.restaurant(restaurant_id)?;
    Ok(catalog
        .menu_in_category(restaurant_id, category)
        .cloned()
        .collect())
}

/// Gets one menu item for the customization sheet.
pub fn get_menu_item(
    catalog: &CatalogState,
    restaurant_id: &str,
    menu_item_id: &str,
) -> Result<MenuItem, ApiError> {
    debug!(restaurant_id, menu_item_id, "get_menu_item command");
    Ok(catalog
        .catalog()
        .menu_item(restaurant_id, menu_item_id)?
        .clone())
}
