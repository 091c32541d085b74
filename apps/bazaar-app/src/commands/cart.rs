//! # Cart Commands
//!
//! Commands the cart screens invoke.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                        │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │                        │
//! │  │  Cart    │     │          │     │ (server) │                        │
//! │  └──────────┘     └──────────┘     └──────────┘                        │
//! │                        │                 │                              │
//! │                   add_to_cart            │                              │
//! │                   update_cart_item       │                              │
//! │                   remove_from_cart       │                              │
//! │                        │                 ▼                              │
//! │                   clear_cart ◄───────────┘  (back to empty)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! add and update go through the cart's strict operations so the UI gets a
//! toast for bad input. remove is idempotent: a second swipe on a line that
//! is already gone succeeds.

use bazaar_core::validation::validate_product_id;
use bazaar_core::{Cart, CartTotals, CoreError, LineItem};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::{CartStore, CatalogState};

/// Cart contents and totals, returned by every cart command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub cart_id: String,
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            cart_id: cart.id().to_string(),
            items: cart.items().to_vec(),
            totals: cart.totals(),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartStore) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Adds a catalog product to the cart.
///
/// ## Behavior
/// - Product already in cart: quantity increases
/// - Product not in cart: appended as a new line
/// - The catalog price is snapshotted into the line
///
/// ## Arguments
/// * `product_id` - Catalog product id
/// * `quantity` - Units to add (default: 1)
pub fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartStore,
    product_id: &str,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id = %product_id, quantity = %quantity, "add_to_cart command");

    validate_product_id(product_id)?;

    let product = catalog
        .get(product_id)
        .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

    if !product.is_active {
        warn!(product_id = %product_id, "Attempt to add inactive product");
        return Err(ApiError::validation("Product is not available for sale"));
    }

    cart.with_cart_mut(|c| -> Result<CartResponse, ApiError> {
        c.try_add_item(&product, quantity)?;
        Ok(CartResponse::from(&*c))
    })
}

/// Sets the quantity of a line.
///
/// ## Behavior
/// - Quantity 0: removes the line
/// - Negative or above the maximum: validation / cart error
/// - Product not in cart: not found
pub fn update_cart_item(
    cart: &CartStore,
    product_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    cart.with_cart_mut(|c| -> Result<CartResponse, ApiError> {
        c.try_update_quantity(product_id, quantity)?;
        Ok(CartResponse::from(&*c))
    })
}

/// Removes a line from the cart. Removing an absent product is a no-op.
pub fn remove_from_cart(cart: &CartStore, product_id: &str) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");

    validate_product_id(product_id)?;

    Ok(cart.with_cart_mut(|c| {
        c.remove_item(product_id);
        CartResponse::from(&*c)
    }))
}

/// Clears all items from the cart.
///
/// ## When Used
/// - User empties the cart
/// - After a successful checkout
pub fn clear_cart(cart: &CartStore) -> CartResponse {
    debug!("clear_cart command");

    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::from(&*c)
    })
}
