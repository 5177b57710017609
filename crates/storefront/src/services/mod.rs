//! Adapters that plug the storefront's HTTP plumbing into the cart ports.
//!
//! - `cart_store` - Session-backed [`KeyValueStore`](tiffin_core::KeyValueStore)
//! - `navigation` - Response-building [`Navigator`](tiffin_core::Navigator)

pub mod cart_store;
pub mod navigation;

pub use cart_store::SessionCartStore;
pub use navigation::ResponseNavigator;
