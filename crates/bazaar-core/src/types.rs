//! # Domain Types
//!
//! Catalog types the cart reads from.
//!
//! The catalog itself lives outside this crate (the marketplace and store
//! screens load it); the cart only ever looks at a product's `id` and
//! `price_cents` and carries the rest along for display.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product listed on the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier. Cart lines are keyed by this.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Marketplace store selling this product, if any.
    #[serde(default)]
    pub store_id: Option<String>,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Thumbnail shown in the cart list.
    #[serde(default)]
    pub image_url: Option<String>,

    /// Whether the product can still be bought (soft delete).
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Product {
    /// Creates an active product with no store or image.
    ///
    /// ```rust
    /// use bazaar_core::Product;
    ///
    /// let p = Product::new("A", "Apples", 10);
    /// assert_eq!(p.price().cents(), 10);
    /// assert!(p.is_active);
    /// ```
    pub fn new(id: impl Into<String>, name: impl Into<String>, price_cents: i64) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            store_id: None,
            price_cents,
            image_url: None,
            is_active: true,
        }
    }

    /// Sets the owning store.
    pub fn with_store(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = Some(store_id.into());
        self
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_with_defaults() {
        let json = r#"{"id":"p1","name":"Tote Bag","priceCents":1500}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, "p1");
        assert_eq!(product.price(), Money::from_cents(1500));
        assert!(product.is_active);
        assert!(product.store_id.is_none());
    }

    #[test]
    fn test_with_store() {
        let product = Product::new("p2", "Candle", 800).with_store("store-7");
        assert_eq!(product.store_id.as_deref(), Some("store-7"));
    }
}
