//! Cart view-model: the single owner of cart state for one page mount.
//!
//! Lifecycle:
//!
//! ```text
//! new() ──> Loading ──load()──> Ready(empty | nonempty)
//!                                  │  ▲
//!                                  └──┘ add / update / remove / clear / checkout
//! ```
//!
//! `Loading` is entered once, at construction, and never again. While the
//! model is loading every mutation is ignored, so an empty cart can never be
//! written over data that has not been read yet. Once ready, each applied
//! mutation writes the full cart back to the store exactly once. Loading
//! itself never writes.

use thiserror::Error;
use tracing::{debug, warn};

use crate::cart::{Cart, CartError, OrderSummary, PricingPolicy};
use crate::navigation::{Confirmation, Navigator, Route};
use crate::store::{KeyValueStore, StoreError};
use crate::types::{LineItem, LineItemId, Price, Quantity, QuantityError};

/// Store key holding the serialized cart.
pub const CART_STORE_KEY: &str = "cart";

/// Prompt shown before clearing the cart.
pub const CLEAR_CART_PROMPT: &str = "Are you sure you want to clear your cart?";

/// Page phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartPhase {
    /// The stored cart has not been read yet.
    Loading,
    /// The cart is loaded and may be mutated.
    Ready,
}

/// Outcome of a mutation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Mutation {
    /// The cart was replaced and written back to the store.
    Applied,
    /// Nothing changed and nothing was written.
    Ignored(IgnoreReason),
}

impl Mutation {
    /// Whether the mutation was applied.
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Why a mutation request was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The model has not finished loading.
    Loading,
    /// The requested quantity was below 1.
    BelowMinimumQuantity,
    /// The requested or merged quantity does not fit in a line item.
    QuantityTooLarge,
    /// The change would push the cart subtotal past its ceiling.
    TotalTooLarge,
    /// The user declined the confirmation prompt.
    Declined,
}

/// Why a load fell back to an empty cart.
#[derive(Debug, Error)]
pub enum CartLoadError {
    #[error("failed to read stored cart: {0}")]
    Store(#[from] StoreError),
    #[error("stored cart is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Owns the cart for one page mount and mirrors it into a key-value store.
#[derive(Debug)]
pub struct CartViewModel<S> {
    store: S,
    pricing: PricingPolicy,
    cart: Cart,
    phase: CartPhase,
}

impl<S: KeyValueStore> CartViewModel<S> {
    /// Create a model in the `Loading` phase with an empty cart.
    pub fn new(store: S, pricing: PricingPolicy) -> Self {
        Self {
            store,
            pricing,
            cart: Cart::new(),
            phase: CartPhase::Loading,
        }
    }

    /// Create a model and immediately load the stored cart.
    pub async fn mount(store: S, pricing: PricingPolicy) -> Self {
        let mut model = Self::new(store, pricing);
        model.load().await;
        model
    }

    /// Read the stored cart and move to `Ready`.
    ///
    /// An absent value yields an empty cart. A value that cannot be read or
    /// parsed is logged and also yields an empty cart; the failure is never
    /// returned to the caller.
    pub async fn load(&mut self) {
        if self.phase == CartPhase::Ready {
            debug!("cart already loaded, ignoring repeated load");
            return;
        }

        self.cart = match self.read_stored_cart().await {
            Ok(cart) => cart,
            Err(error) => {
                warn!(%error, "error loading cart, starting empty");
                Cart::new()
            }
        };
        self.phase = CartPhase::Ready;
        debug!(items = self.cart.len(), "cart loaded");
    }

    async fn read_stored_cart(&self) -> Result<Cart, CartLoadError> {
        match self.store.get(CART_STORE_KEY).await? {
            Some(json) => Ok(Cart::from_json(&json)?),
            None => Ok(Cart::new()),
        }
    }

    /// Write the full cart to the store, overwriting the previous value.
    ///
    /// Fire-and-forget: failures are logged and otherwise ignored.
    async fn save(&self) {
        let result = match self.cart.to_json() {
            Ok(json) => self.store.set(CART_STORE_KEY, json).await,
            Err(e) => Err(StoreError::from(e)),
        };
        if let Err(error) = result {
            warn!(%error, "failed to save cart");
        }
    }

    /// Set the quantity of every item matching `id`.
    ///
    /// Requests below 1, or that would push the subtotal past its ceiling,
    /// are ignored without touching the cart or the store. Any other request
    /// is applied, and saved, even when no item matches.
    pub async fn update_quantity(&mut self, id: &LineItemId, requested: i64) -> Mutation {
        if self.phase == CartPhase::Loading {
            return Mutation::Ignored(IgnoreReason::Loading);
        }
        let quantity = match Quantity::new(requested) {
            Ok(quantity) => quantity,
            Err(error) => {
                debug!(%id, %error, "ignoring quantity update");
                return Mutation::Ignored(match error {
                    QuantityError::BelowMinimum(_) => IgnoreReason::BelowMinimumQuantity,
                    QuantityError::TooLarge(_) => IgnoreReason::QuantityTooLarge,
                });
            }
        };

        let Ok(matched) = self.cart.set_quantity(id, quantity) else {
            debug!(%id, %quantity, "ignoring quantity update past subtotal ceiling");
            return Mutation::Ignored(IgnoreReason::TotalTooLarge);
        };
        debug!(%id, %quantity, matched, "quantity updated");
        self.save().await;
        Mutation::Applied
    }

    /// Drop every item matching `id`. Saves even when nothing matched.
    pub async fn remove_item(&mut self, id: &LineItemId) -> Mutation {
        if self.phase == CartPhase::Loading {
            return Mutation::Ignored(IgnoreReason::Loading);
        }

        let removed = self.cart.remove(id);
        debug!(%id, removed, "item removed");
        self.save().await;
        Mutation::Applied
    }

    /// Add an item, merging quantities when its id is already in the cart.
    ///
    /// An item whose merged quantity does not fit, or that would push the
    /// subtotal past its ceiling, is ignored.
    pub async fn add_item(&mut self, item: LineItem) -> Mutation {
        if self.phase == CartPhase::Loading {
            return Mutation::Ignored(IgnoreReason::Loading);
        }

        let (id, quantity) = (item.id.clone(), item.quantity);
        if let Err(error) = self.cart.add(item) {
            debug!(%id, %quantity, %error, "ignoring add");
            return Mutation::Ignored(match error {
                CartError::TotalTooLarge => IgnoreReason::TotalTooLarge,
                CartError::QuantityTooLarge => IgnoreReason::QuantityTooLarge,
            });
        }
        debug!(%id, %quantity, "item added");
        self.save().await;
        Mutation::Applied
    }

    /// Empty the cart once the user confirms.
    pub async fn clear_cart(&mut self, confirmation: &impl Confirmation) -> Mutation {
        if self.phase == CartPhase::Loading {
            return Mutation::Ignored(IgnoreReason::Loading);
        }
        if !confirmation.confirm(CLEAR_CART_PROMPT).await {
            debug!("clear cart declined");
            return Mutation::Ignored(IgnoreReason::Declined);
        }

        self.cart.clear();
        self.save().await;
        Mutation::Applied
    }

    /// Checkout placeholder: empty the cart and go to the success page.
    ///
    /// No payment, validation or inventory check takes place.
    pub async fn checkout(&mut self, navigator: &mut impl Navigator) -> Mutation {
        if self.phase == CartPhase::Loading {
            return Mutation::Ignored(IgnoreReason::Loading);
        }

        let units = self.cart.item_count();
        self.cart.clear();
        self.save().await;
        tracing::info!(units, "checkout placeholder completed");
        navigator.push(Route::CheckoutSuccess);
        Mutation::Applied
    }

    /// Current page phase.
    pub const fn phase(&self) -> CartPhase {
        self.phase
    }

    /// Whether the stored cart is still being read.
    pub fn is_loading(&self) -> bool {
        self.phase == CartPhase::Loading
    }

    /// The current cart.
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The current items in display order.
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Sum of `unit_price × quantity`, recomputed on every call.
    pub fn total_price(&self) -> Price {
        self.cart.total_price()
    }

    /// Total number of units in the cart.
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    /// Subtotal, delivery fee and total under the configured pricing.
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::compute(&self.cart, &self.pricing)
    }

    /// The backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }
}
