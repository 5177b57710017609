//! The ordered collection of line items.
//!
//! `Cart` is plain data: it knows nothing about where it is stored. Every
//! operation that matches by id applies to *all* matching items, since id
//! uniqueness is not enforced by the collection itself.
//!
//! A cart's subtotal never exceeds [`MAX_SUBTOTAL`]. Constructors and
//! mutations that would break the bound fail with [`CartError`] and leave
//! the cart untouched, so totals are always exact.

pub mod summary;

pub use summary::{OrderSummary, PricingPolicy};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{LineItem, LineItemId, Price, Quantity};

/// Largest subtotal a cart may hold (1,000,000,000,000.00).
pub const MAX_SUBTOTAL: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Errors from building or changing a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("cart subtotal would exceed {}", MAX_SUBTOTAL)]
    TotalTooLarge,
    #[error("line quantity would exceed {}", u32::MAX)]
    QuantityTooLarge,
}

/// Ordered sequence of line items.
///
/// Order has no effect on totals but is preserved so the page renders rows
/// in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

/// Exact subtotal of `items`, or `None` past [`MAX_SUBTOTAL`].
fn bounded_subtotal(items: &[LineItem]) -> Option<Price> {
    let subtotal = items.iter().try_fold(Price::ZERO, |sum, item| {
        item.checked_line_total()
            .and_then(|line| sum.checked_add(line))
    })?;
    (subtotal.amount() <= MAX_SUBTOTAL).then_some(subtotal)
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Create a cart from existing items, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `CartError::TotalTooLarge` if the subtotal exceeds
    /// [`MAX_SUBTOTAL`].
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, CartError> {
        bounded_subtotal(&items).ok_or(CartError::TotalTooLarge)?;
        Ok(Self { items })
    }

    /// Parse a cart from its serialized JSON form.
    ///
    /// # Errors
    ///
    /// Returns the JSON error when the text is not a valid serialized cart,
    /// including one whose subtotal is out of bounds.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the cart to JSON.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// The items in display order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of line items (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the items in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Quantity of the first item whose id matches.
    #[must_use]
    pub fn quantity_of(&self, id: &LineItemId) -> Option<Quantity> {
        self.items
            .iter()
            .find(|item| &item.id == id)
            .map(|item| item.quantity)
    }

    /// Set the quantity of every item whose id matches.
    ///
    /// Returns the number of items that matched.
    ///
    /// # Errors
    ///
    /// Returns `CartError::TotalTooLarge`, leaving the cart unchanged, if
    /// the new quantities push the subtotal past [`MAX_SUBTOTAL`].
    pub fn set_quantity(
        &mut self,
        id: &LineItemId,
        quantity: Quantity,
    ) -> Result<usize, CartError> {
        let mut candidate = self.items.clone();
        let mut matched = 0;
        for item in candidate.iter_mut().filter(|item| &item.id == id) {
            item.quantity = quantity;
            matched += 1;
        }
        self.replace(candidate)?;
        Ok(matched)
    }

    /// Drop every item whose id matches.
    ///
    /// Returns the number of items removed.
    pub fn remove(&mut self, id: &LineItemId) -> usize {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        before - self.items.len()
    }

    /// Add an item, merging into an existing line with the same id.
    ///
    /// When the id is already present the first matching line's quantity is
    /// increased by the incoming quantity and its other fields are kept.
    ///
    /// # Errors
    ///
    /// Leaves the cart unchanged and returns `CartError::QuantityTooLarge`
    /// if the merged quantity does not fit, or `CartError::TotalTooLarge`
    /// if the subtotal would pass [`MAX_SUBTOTAL`].
    pub fn add(&mut self, item: LineItem) -> Result<(), CartError> {
        let mut candidate = self.items.clone();
        if let Some(existing) = candidate.iter_mut().find(|existing| existing.id == item.id) {
            existing.quantity = existing
                .quantity
                .checked_add(item.quantity)
                .ok_or(CartError::QuantityTooLarge)?;
        } else {
            candidate.push(item);
        }
        self.replace(candidate)
    }

    /// Remove all items.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `unit_price × quantity` over all items.
    #[must_use]
    pub fn total_price(&self) -> Price {
        // Exact: the subtotal is bounded well below `Decimal::MAX`.
        self.items
            .iter()
            .map(LineItem::line_total)
            .fold(Price::ZERO, Price::saturating_add)
    }

    /// Total number of units across all items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .map(|item| item.quantity.get())
            .fold(0, u32::saturating_add)
    }

    fn replace(&mut self, items: Vec<LineItem>) -> Result<(), CartError> {
        bounded_subtotal(&items).ok_or(CartError::TotalTooLarge)?;
        self.items = items;
        Ok(())
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = CartError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
