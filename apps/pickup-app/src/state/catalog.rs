//! # Catalog State
//!
//! The restaurant and menu data for the session. Read-only after startup,
//! so no mutex needed; clones share the same catalog.

use std::sync::Arc;

use pickup_core::Catalog;

#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    catalog: Arc<Catalog>,
}

impl CatalogState {
    pub fn new(catalog: Catalog) -> Self {
        CatalogState {
            catalog: Arc::new(catalog),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
