//! # Cart
//!
//! The shopping cart: an ordered list of line items, one per product.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action              Operation               Effect                  │
//! │  ─────────              ─────────               ──────                  │
//! │                                                                         │
//! │  "Add to cart" ────────► add_item(p, n) ──────► merge or append         │
//! │                                                                         │
//! │  Quantity stepper ─────► update_quantity(id,n) ► replace in place,      │
//! │                                                  n <= 0 removes         │
//! │                                                                         │
//! │  Swipe to delete ──────► remove_item(id) ─────► retain others           │
//! │                                                                         │
//! │  After checkout ───────► clear() ─────────────► empty                   │
//! │                                                                         │
//! │  Cart badge / footer ──► item_count(), subtotal()  (recomputed)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Every line has `quantity > 0`
//! - Lines are unique by `product.id`
//! - `subtotal()` is always Σ price × quantity
//!
//! Every operation comes in two flavours. The permissive ones never fail:
//! unknown ids are ignored and non-positive quantities remove the line. The
//! `try_*` ones report the same situations as [`CoreError`] and also enforce
//! [`MAX_CART_ITEMS`] and [`MAX_ITEM_QUANTITY`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::validation::{validate_cart_size, validate_quantity};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Line Item
// =============================================================================

/// One product's presence in the cart.
///
/// The product is a snapshot taken when the line was created; later catalog
/// changes do not reprice lines already in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product: Product,

    /// Always > 0 while the line is in a cart.
    pub quantity: i64,

    /// When this product was first added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    fn new(product: Product, quantity: i64) -> Self {
        LineItem {
            product,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Product id this line is keyed by.
    #[inline]
    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart for one app session.
#[derive(Debug, Clone)]
pub struct Cart {
    /// Session identifier, kept across `clear`.
    id: String,

    items: Vec<LineItem>,

    /// When the cart was created or last cleared.
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart with a fresh session id.
    pub fn new() -> Self {
        Cart {
            id: Uuid::new_v4().to_string(),
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    // -------------------------------------------------------------------------
    // Permissive operations
    // -------------------------------------------------------------------------

    /// Adds `quantity` of a product, merging into an existing line.
    ///
    /// ## Behavior
    /// - Product already in cart: its quantity grows by `quantity`, position kept
    /// - Product not in cart: a new line is appended at the end
    ///
    /// Non-positive quantities are not rejected. If the merged quantity ends up
    /// at or below zero the line is removed, and a new line is never created
    /// with a non-positive quantity.
    ///
    /// ```rust
    /// use bazaar_core::{Cart, Product};
    ///
    /// let mut cart = Cart::new();
    /// let a = Product::new("A", "Apples", 10);
    /// cart.add_item(&a, 2);
    /// cart.add_item(&a, 3);
    /// assert_eq!(cart.get("A").map(|i| i.quantity), Some(5));
    /// ```
    pub fn add_item(&mut self, product: &Product, quantity: i64) {
        if let Some(item) = self.find_mut(&product.id) {
            item.quantity = item.quantity.saturating_add(quantity);
            if item.quantity > 0 {
                return;
            }
            self.remove_item(&product.id);
            return;
        }

        if quantity > 0 {
            self.items.push(LineItem::new(product.clone(), quantity));
        }
    }

    /// Adds a single unit of a product.
    pub fn add_one(&mut self, product: &Product) {
        self.add_item(product, 1);
    }

    /// Removes the line for `product_id`. Unknown ids are a no-op.
    pub fn remove_item(&mut self, product_id: &str) {
        self.items.retain(|i| i.product.id != product_id);
    }

    /// Sets the quantity of an existing line in place.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: removes the line (never stores zero)
    /// - Product not in cart: no-op
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        if let Some(item) = self.find_mut(product_id) {
            item.quantity = quantity;
        }
    }

    /// Empties the cart. The session id is kept.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    // -------------------------------------------------------------------------
    // Strict operations
    // -------------------------------------------------------------------------

    /// Like [`Cart::add_item`] but rejects bad input instead of normalizing.
    ///
    /// ## Errors
    /// - `Validation` if `quantity` is not in 1..=999
    /// - `QuantityTooLarge` if the merged quantity would exceed 999
    /// - `CartTooLarge` if a new line would exceed 100 distinct products
    pub fn try_add_item(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        if let Some(item) = self.find_mut(&product.id) {
            let merged = item.quantity + quantity;
            if merged > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: merged,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            item.quantity = merged;
            return Ok(());
        }

        validate_cart_size(self.items.len())
            .map_err(|_| CoreError::CartTooLarge { max: MAX_CART_ITEMS })?;

        self.items.push(LineItem::new(product.clone(), quantity));
        Ok(())
    }

    /// Like [`Cart::update_quantity`] but reports unknown ids and bad values.
    ///
    /// A quantity of exactly zero still removes the line; negative values are
    /// rejected.
    pub fn try_update_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity == 0 {
            return self.try_remove_item(product_id);
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }
        validate_quantity(quantity)?;

        match self.find_mut(product_id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::ItemNotInCart(product_id.to_string())),
        }
    }

    /// Like [`Cart::remove_item`] but fails when the id is not in the cart.
    pub fn try_remove_item(&mut self, product_id: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.remove_item(product_id);

        if self.items.len() == initial_len {
            Err(CoreError::ItemNotInCart(product_id.to_string()))
        } else {
            Ok(())
        }
    }

    // -------------------------------------------------------------------------
    // Derived queries
    // -------------------------------------------------------------------------

    /// Total number of units across all lines, saturating at `i64::MAX`.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |total, i| total.saturating_add(i.quantity))
    }

    /// Σ unit price × quantity, saturating at the `i64` bounds.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.get(product_id).is_some()
    }

    /// Line for `product_id`, if present.
    pub fn get(&self, product_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Snapshot of the aggregates for responses.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }

    fn find_mut(&mut self, product_id: &str) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|i| i.product.id == product_id)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart aggregates as sent to the UI (badge count, footer subtotal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub item_count: i64,
    pub subtotal_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            item_count: cart.item_count(),
            subtotal_cents: cart.subtotal().cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn test_product(id: &str, price_cents: i64) -> Product {
        Product::new(id, format!("Product {}", id), price_cents)
    }

    fn ids(cart: &Cart) -> Vec<&str> {
        cart.items().iter().map(LineItem::product_id).collect()
    }

    fn assert_aggregates_consistent(cart: &Cart) {
        let qty: i64 = cart.items().iter().map(|i| i.quantity).sum();
        let cents: i64 = cart
            .items()
            .iter()
            .map(|i| i.product.price_cents * i.quantity)
            .sum();
        assert_eq!(cart.item_count(), qty);
        assert_eq!(cart.subtotal().cents(), cents);
        assert!(cart.items().iter().all(|i| i.quantity > 0));
    }

    #[test]
    fn test_walkthrough_scenario() {
        let a = test_product("A", 10);
        let b = test_product("B", 5);
        let mut cart = Cart::new();

        cart.add_item(&a, 2);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.subtotal().cents(), 20);

        cart.add_item(&a, 1);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get("A").map(|i| i.quantity), Some(3));
        assert_eq!(cart.subtotal().cents(), 30);

        cart.add_item(&b, 1);
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.subtotal().cents(), 35);

        cart.update_quantity("A", 0);
        assert!(!cart.contains("A"));
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.subtotal().cents(), 5);

        cart.remove_item("Z");
        assert_eq!(ids(&cart), vec!["B"]);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.subtotal().cents(), 5);

        cart.clear();
        assert_eq!(cart.item_count(), 0);
        assert!(cart.subtotal().is_zero());
    }

    #[test]
    fn test_add_same_product_merges() {
        let mut cart = Cart::new();
        let product = test_product("1", 999);

        cart.add_item(&product, 2);
        cart.add_item(&product, 3);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_lines_unique_by_product_id() {
        let mut cart = Cart::new();
        for id in ["x", "y", "x", "z", "y", "x"] {
            cart.add_one(&test_product(id, 100));
        }

        assert_eq!(ids(&cart), vec!["x", "y", "z"]);
        assert_eq!(cart.get("x").map(|i| i.quantity), Some(3));
        assert_aggregates_consistent(&cart);
    }

    #[test]
    fn test_merge_keeps_first_price_snapshot() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("A", 10), 1);
        cart.add_item(&test_product("A", 99), 1);

        assert_eq!(cart.subtotal().cents(), 20);
    }

    #[test]
    fn test_update_preserves_position() {
        let mut cart = Cart::new();
        cart.add_one(&test_product("a", 1));
        cart.add_one(&test_product("b", 1));
        cart.add_one(&test_product("c", 1));

        cart.update_quantity("a", 7);
        cart.add_item(&test_product("b", 1), 4);

        assert_eq!(ids(&cart), vec!["a", "b", "c"]);
        assert_eq!(cart.get("a").map(|i| i.quantity), Some(7));
        assert_eq!(cart.get("b").map(|i| i.quantity), Some(5));
    }

    #[test]
    fn test_update_quantity_floor_removes() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("A", 10), 2);
        cart.add_item(&test_product("B", 10), 2);

        cart.update_quantity("A", 0);
        cart.update_quantity("B", -1);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("A", 10), 2);

        cart.update_quantity("nope", 5);

        assert_eq!(ids(&cart), vec!["A"]);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("A", 10), 2);
        let before = cart.items().to_vec();

        cart.remove_item("missing");

        assert_eq!(cart.items(), before.as_slice());
    }

    #[test]
    fn test_add_non_positive_never_stores_bad_line() {
        let mut cart = Cart::new();
        let a = test_product("A", 10);

        cart.add_item(&a, 0);
        cart.add_item(&a, -3);
        assert!(cart.is_empty());

        cart.add_item(&a, 2);
        cart.add_item(&a, -1);
        assert_eq!(cart.get("A").map(|i| i.quantity), Some(1));

        cart.add_item(&a, -1);
        assert!(!cart.contains("A"));
        assert_aggregates_consistent(&cart);
    }

    #[test]
    fn test_clear_keeps_session_id() {
        let mut cart = Cart::new();
        let id = cart.id().to_string();
        cart.add_item(&test_product("1", 999), 2);

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.subtotal(), Money::zero());
        assert_eq!(cart.id(), id);
    }

    #[test]
    fn test_mixed_sequence_aggregates() {
        let mut cart = Cart::new();
        let products: Vec<Product> = (0..6).map(|n| test_product(&n.to_string(), 125 * n)).collect();

        for (step, product) in products.iter().cycle().take(30).enumerate() {
            match step % 5 {
                0 | 1 => cart.add_item(product, (step % 4) as i64 + 1),
                2 => cart.update_quantity(&product.id, (step % 3) as i64 - 1),
                3 => cart.remove_item(&format!("ghost-{step}")),
                _ => cart.add_one(product),
            }
            assert_aggregates_consistent(&cart);
        }
    }

    #[test]
    fn test_huge_quantities_saturate_aggregates() {
        let mut cart = Cart::new();
        let a = test_product("A", 100);

        cart.add_item(&a, i64::MAX / 2);
        cart.add_item(&a, i64::MAX / 2);
        assert_eq!(cart.get("A").map(|i| i.quantity), Some(i64::MAX - 1));
        assert_eq!(cart.subtotal().cents(), i64::MAX);

        cart.add_item(&a, 10);
        assert_eq!(cart.get("A").map(|i| i.quantity), Some(i64::MAX));

        let mut free = Cart::new();
        free.add_item(&test_product("A", 0), i64::MAX);
        free.add_item(&test_product("B", 0), 1);
        assert_eq!(free.item_count(), i64::MAX);
        assert_eq!(free.subtotal(), Money::zero());

        free.update_quantity("B", i64::MAX);
        let totals = free.totals();
        assert_eq!(totals.item_count, i64::MAX);
        assert_eq!(totals.line_count, 2);
    }

    #[test]
    fn test_totals_snapshot() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("A", 10), 3);
        cart.add_item(&test_product("B", 250), 2);

        assert_eq!(
            cart.totals(),
            CartTotals {
                line_count: 2,
                item_count: 5,
                subtotal_cents: 530,
            }
        );
    }

    #[test]
    fn test_try_add_item_rejects_bad_quantity() {
        let mut cart = Cart::new();
        let a = test_product("A", 10);

        assert!(matches!(
            cart.try_add_item(&a, 0),
            Err(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));
        assert!(cart.is_empty());

        cart.try_add_item(&a, 990).unwrap();
        assert!(matches!(
            cart.try_add_item(&a, 10),
            Err(CoreError::QuantityTooLarge { requested: 1000, max: 999 })
        ));
        assert_eq!(cart.item_count(), 990);
    }

    #[test]
    fn test_try_add_item_enforces_cart_size() {
        let mut cart = Cart::new();
        for n in 0..MAX_CART_ITEMS {
            cart.try_add_item(&test_product(&format!("p{n}"), 1), 1).unwrap();
        }

        let overflow = cart.try_add_item(&test_product("one-more", 1), 1);
        assert!(matches!(overflow, Err(CoreError::CartTooLarge { max: 100 })));

        // merging into an existing line is still fine
        cart.try_add_item(&test_product("p0", 1), 1).unwrap();
        assert_eq!(cart.line_count(), MAX_CART_ITEMS);
    }

    #[test]
    fn test_try_update_and_remove() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("A", 10), 1);

        cart.try_update_quantity("A", 4).unwrap();
        assert_eq!(cart.item_count(), 4);

        assert!(matches!(
            cart.try_update_quantity("A", -2),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            cart.try_update_quantity("A", 1000),
            Err(CoreError::QuantityTooLarge { .. })
        ));
        assert!(matches!(
            cart.try_update_quantity("B", 1),
            Err(CoreError::ItemNotInCart(id)) if id == "B"
        ));

        cart.try_update_quantity("A", 0).unwrap();
        assert!(cart.is_empty());

        assert!(matches!(
            cart.try_remove_item("A"),
            Err(CoreError::ItemNotInCart(_))
        ));
    }
}
