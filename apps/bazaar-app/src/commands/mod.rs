//! # Commands
//!
//! Handlers the UI invokes, one module per screen area.
//!
//! | Module    | Commands                                                        |
//! |-----------|-----------------------------------------------------------------|
//! | `cart`    | get_cart, add_to_cart, update_cart_item, remove_from_cart, clear_cart |
//! | `catalog` | list_products, get_product                                      |
//! | `config`  | get_config                                                      |
//!
//! Each handler takes only the state it needs and returns
//! `Result<T, ApiError>` when it can fail.

pub mod cart;
pub mod catalog;
pub mod config;

pub use cart::CartResponse;
