//! A single product entry in the cart.

use serde::{Deserialize, Serialize};

use super::{LineItemId, Price, Quantity};

/// One product in the cart, with its unit price and quantity.
///
/// The serialized field names (`_id`, `price`, `image`) match the cart format
/// stored by the storefront since its first release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identity within the cart.
    #[serde(rename = "_id")]
    pub id: LineItemId,
    /// Display name.
    pub name: String,
    /// Price of a single unit.
    #[serde(rename = "price")]
    pub unit_price: Price,
    /// Image URL or path.
    #[serde(rename = "image")]
    pub image_ref: String,
    /// Number of units, at least one.
    pub quantity: Quantity,
    /// Free-text category label.
    pub category: String,
}

impl LineItem {
    /// Price of all units of this line (`unit_price × quantity`), or `None`
    /// when the product is not representable.
    #[must_use]
    pub fn checked_line_total(&self) -> Option<Price> {
        self.unit_price.checked_mul(self.quantity.get())
    }

    /// Price of all units of this line, clamped at the largest
    /// representable amount. Exact for every line of a [`Cart`](crate::Cart).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.saturating_mul(self.quantity.get())
    }
}
