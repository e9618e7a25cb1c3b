//! # Catalog
//!
//! Read-only lookup table of restaurants and their menus.
//!
//! The catalog never changes after construction and the cart never writes
//! back into it. Screens query it for browsing and the command layer resolves
//! ids against it before dispatching `AddItem`.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::types::{MenuItem, Restaurant};

/// Category filter value that matches everything.
pub const ALL_CATEGORIES: &str = "All";

/// Restaurants plus each restaurant's menu, keyed by restaurant id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    restaurants: Vec<Restaurant>,
    menus: HashMap<String, Vec<MenuItem>>,
}

impl Catalog {
    pub fn new(restaurants: Vec<Restaurant>, menus: HashMap<String, Vec<MenuItem>>) -> Self {
        Catalog { restaurants, menus }
    }

    /// All restaurants in listing order.
    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    /// Restaurants shown in the "Featured for Pickup" strip.
    pub fn featured(&self) -> impl Iterator<Item = &Restaurant> {
        self.restaurants.iter().filter(|r| r.featured)
    }

    pub fn restaurant(&self, id: &str) -> CoreResult<&Restaurant> {
        self.restaurants
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| CoreError::RestaurantNotFound(id.to_string()))
    }

    /// A restaurant's menu. Restaurants without a menu entry have an empty menu.
    pub fn menu(&self, restaurant_id: &str) -> &[MenuItem] {
        self.menus
            .get(restaurant_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn menu_item(&self, restaurant_id: &str, item_id: &str) -> CoreResult<&MenuItem> {
        self.restaurant(restaurant_id)?;
        self.menu(restaurant_id)
            .iter()
            .find(|m| m.id == item_id)
            .ok_or_else(|| CoreError::MenuItemNotFound {
                restaurant_id: restaurant_id.to_string(),
                item_id: item_id.to_string(),
            })
    }

    /// Menu tabs: `"All"` first, then each category in first-seen order.
    pub fn categories(&self, restaurant_id: &str) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for item in self.menu(restaurant_id) {
            if !categories.contains(&item.category) {
                categories.push(item.category.clone());
            }
        }
        categories
    }

    /// Menu items in one category; `"All"` returns the whole menu.
    pub fn menu_in_category<'a>(
        &'a self,
        restaurant_id: &str,
        category: &'a str,
    ) -> impl Iterator<Item = &'a MenuItem> + 'a {
        self.menu(restaurant_id)
            .iter()
            .filter(move |m| category == ALL_CATEGORIES || m.category == category)
    }

    /// Search by name or cuisine (case-insensitive substring), optionally
    /// restricted to one cuisine. An empty query matches every restaurant.
    pub fn search(&self, query: &str, cuisine: Option<&str>) -> Vec<&Restaurant> {
        let needle = query.trim().to_lowercase();
        self.restaurants
            .iter()
            .filter(|r| {
                needle.is_empty()
                    || r.name.to_lowercase().contains(&needle)
                    || r.cuisine.to_lowercase().contains(&needle)
            })
            .filter(|r| match cuisine {
                None => true,
                Some(c) if c == ALL_CATEGORIES => true,
                Some(c) => r.cuisine == c,
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
