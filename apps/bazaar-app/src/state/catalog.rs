//! # Catalog State
//!
//! In-memory product catalog the cart commands look products up in.
//!
//! The real marketplace feed is fetched by the UI's API client; the host only
//! needs id → product lookups, so it is seeded either from a JSON file
//! (`catalog.path` / `BAZAAR_CATALOG_PATH` / `--catalog`) or from the demo
//! products bundled with the binary.
//!
//! ## Seed File Format
//! ```json
//! [
//!   { "id": "clay-mug-01", "name": "Hand-thrown Clay Mug",
//!     "storeId": "potters-corner", "priceCents": 1800 }
//! ]
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use bazaar_core::validation::validate_product;
use bazaar_core::Product;
use tracing::{debug, info};

use crate::error::AppError;

const DEMO_CATALOG: &str = include_str!("../../data/demo_catalog.json");

/// Read-mostly product catalog.
#[derive(Debug, Default)]
pub struct CatalogState {
    products: RwLock<HashMap<String, Product>>,
}

impl CatalogState {
    /// Builds a catalog, validating every product.
    ///
    /// ## Errors
    /// - `InvalidProduct` if a product fails validation
    /// - `DuplicateProduct` if two products share an id
    pub fn from_products(products: Vec<Product>) -> Result<Self, AppError> {
        let catalog = CatalogState {
            products: RwLock::new(HashMap::with_capacity(products.len())),
        };

        for product in products {
            let id = product.id.clone();
            if catalog.insert(product)?.is_some() {
                return Err(AppError::DuplicateProduct(id));
            }
        }

        Ok(catalog)
    }

    /// Parses a JSON array of products.
    pub fn from_json(json: &str, origin: &str) -> Result<Self, AppError> {
        let products: Vec<Product> =
            serde_json::from_str(json).map_err(|source| AppError::CatalogParse {
                origin: origin.to_string(),
                source,
            })?;
        Self::from_products(products)
    }

    /// Loads the catalog from a JSON seed file.
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path).map_err(|source| AppError::CatalogRead {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_json(&json, &path.display().to_string())?;
        info!(?path, products = catalog.len(), "Catalog loaded from file");
        Ok(catalog)
    }

    /// The demo products bundled with the binary.
    pub fn demo() -> Result<Self, AppError> {
        let catalog = Self::from_json(DEMO_CATALOG, "demo catalog")?;
        debug!(products = catalog.len(), "Demo catalog loaded");
        Ok(catalog)
    }

    /// Looks up a product by id.
    pub fn get(&self, product_id: &str) -> Option<Product> {
        self.read().get(product_id).cloned()
    }

    /// Lists products sorted by id, optionally only one store's.
    pub fn list(&self, store_id: Option<&str>) -> Vec<Product> {
        let mut products: Vec<Product> = self
            .read()
            .values()
            .filter(|p| store_id.map_or(true, |s| p.store_id.as_deref() == Some(s)))
            .cloned()
            .collect();
        products.sort_by(|a, b| a.id.cmp(&b.id));
        products
    }

    /// Inserts or replaces a product. Returns the previous entry.
    pub fn insert(&self, product: Product) -> Result<Option<Product>, AppError> {
        validate_product(&product).map_err(|source| AppError::InvalidProduct {
            id: product.id.clone(),
            source,
        })?;

        let mut products = self.products.write().unwrap_or_else(PoisonError::into_inner);
        Ok(products.insert(product.id.clone(), product))
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Product>> {
        self.products.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_demo_catalog_loads() {
        let catalog = CatalogState::demo().unwrap();
        assert_eq!(catalog.len(), 7);

        let mug = catalog.get("clay-mug-01").unwrap();
        assert_eq!(mug.price_cents, 1800);
        assert_eq!(mug.store_id.as_deref(), Some("potters-corner"));

        let candle = catalog.get("candle-beeswax-02").unwrap();
        assert!(!candle.is_active);
    }

    #[test]
    fn test_list_filters_by_store() {
        let catalog = CatalogState::demo().unwrap();

        let apiary = catalog.list(Some("hillside-apiary"));
        let ids: Vec<&str> = apiary.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["candle-beeswax-02", "honey-wild-250"]);

        assert_eq!(catalog.list(None).len(), 7);
        assert!(catalog.list(Some("nobody")).is_empty());
    }

    #[test]
    fn test_rejects_duplicates_and_invalid_products() {
        let dup = vec![Product::new("a", "One", 1), Product::new("a", "Two", 2)];
        assert!(matches!(
            CatalogState::from_products(dup),
            Err(AppError::DuplicateProduct(id)) if id == "a"
        ));

        let negative = vec![Product::new("a", "One", -5)];
        assert!(matches!(
            CatalogState::from_products(negative),
            Err(AppError::InvalidProduct { .. })
        ));

        assert!(matches!(
            CatalogState::from_json("{not json", "test"),
            Err(AppError::CatalogParse { .. })
        ));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"p1","name":"Rug","priceCents":12000,"storeId":"loom"}}]"#
        )
        .unwrap();

        let catalog = CatalogState::from_json_file(file.path()).unwrap();
        assert_eq!(catalog.get("p1").map(|p| p.price_cents), Some(12000));

        let missing = CatalogState::from_json_file(Path::new("/definitely/not/here.json"));
        assert!(matches!(missing, Err(AppError::CatalogRead { .. })));
    }

    #[test]
    fn test_insert_replaces() {
        let catalog = CatalogState::default();
        assert!(catalog.is_empty());

        assert!(catalog.insert(Product::new("p", "Old", 100)).unwrap().is_none());
        let previous = catalog.insert(Product::new("p", "New", 150)).unwrap();

        assert_eq!(previous.map(|p| p.name), Some("Old".to_string()));
        assert_eq!(catalog.get("p").map(|p| p.price_cents), Some(150));
        assert!(catalog.insert(Product::new("", "Blank", 1)).is_err());
    }
}
