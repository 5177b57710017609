//! Tiffin Core - Cart domain library.
//!
//! This crate provides the cart model used by the Tiffin storefront:
//! - line items, prices and quantities
//! - the cart itself and its derived order summary
//! - the cart view-model that mirrors the cart into a key-value store
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no HTTP, no sessions,
//! no database access. Persistence, navigation and user confirmation are
//! expressed as ports ([`store::KeyValueStore`], [`navigation::Navigator`],
//! [`navigation::Confirmation`]) that the storefront implements.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, quantities and line items
//! - [`cart`] - The ordered cart and its order summary
//! - [`store`] - Key-value store port and an in-memory implementation
//! - [`navigation`] - Navigation and confirmation ports
//! - [`view_model`] - Load/mutate/save state container for the cart page

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod navigation;
pub mod store;
pub mod types;
pub mod view_model;

pub use cart::{Cart, CartError, MAX_SUBTOTAL, OrderSummary, PricingPolicy};
pub use navigation::{Confirmation, Navigator, Route};
pub use store::{InMemoryStore, KeyValueStore, StoreError};
pub use types::*;
pub use view_model::{CART_STORE_KEY, CartPhase, CartViewModel, IgnoreReason, Mutation};
