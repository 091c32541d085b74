//! # Catalog Commands
//!
//! Product lookups for the marketplace and store screens.

use bazaar_core::{CoreError, Product};
use tracing::debug;

use crate::error::ApiError;
use crate::state::CatalogState;

/// Lists catalog products, optionally only those of one store.
pub fn list_products(catalog: &CatalogState, store_id: Option<&str>) -> Vec<Product> {
    debug!(store_id = ?store_id, "list_products command");
    catalog.list(store_id)
}

/// Gets a single product by id.
pub fn get_product(catalog: &CatalogState, product_id: &str) -> Result<Product, ApiError> {
    debug!(product_id = %product_id, "get_product command");

    catalog
        .get(product_id)
        .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()).into())
}
