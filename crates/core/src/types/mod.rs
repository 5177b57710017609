//! Core types for the cart.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod id;
pub mod line_item;
pub mod price;
pub mod quantity;

pub use id::LineItemId;
pub use line_item::LineItem;
pub use price::{CURRENCY_SYMBOL, Price, PriceError};
pub use quantity::{Quantity, QuantityError, parse_quantity_input};
