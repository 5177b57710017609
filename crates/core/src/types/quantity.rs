//! Line item quantity with a minimum of one.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when constructing a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("quantity must be at least 1 (got {0})")]
    BelowMinimum(i64),
    #[error("quantity {0} is too large")]
    TooLarge(i64),
}

/// Number of units of a line item. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(1);

    /// Create a quantity from a requested value.
    ///
    /// # Errors
    ///
    /// Returns `QuantityError::BelowMinimum` for values below 1 and
    /// `QuantityError::TooLarge` for values that do not fit in a `u32`.
    pub fn new(requested: i64) -> Result<Self, QuantityError> {
        if requested < 1 {
            return Err(QuantityError::BelowMinimum(requested));
        }
        u32::try_from(requested)
            .map(Self)
            .map_err(|_| QuantityError::TooLarge(requested))
    }

    /// Get the underlying count.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Add another quantity, or `None` past `u32::MAX`.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(sum) => Some(Self(sum)),
            None => None,
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Interpret the text of the quantity input box.
///
/// Reads like a browser's `parseInt`: leading whitespace is skipped, an
/// optional sign and the following digits are taken, and parsing stops at the
/// first non-digit. Text without leading digits, or a result of zero, falls
/// back to 1. Negative results are returned as-is so the caller can reject
/// them.
#[must_use]
pub fn parse_quantity_input(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, trimmed.get(1..).unwrap_or_default()),
        Some(b'+') => (false, trimmed.get(1..).unwrap_or_default()),
        _ => (false, trimmed),
    };

    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 1;
    }

    // Overlong input saturates instead of wrapping.
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    let value = if negative { -magnitude } else { magnitude };

    if value == 0 { 1 } else { value }
}
