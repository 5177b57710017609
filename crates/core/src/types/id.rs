//! Newtype id for cart line items.
//!
//! Line item ids come from the product catalogue as opaque strings, so the
//! wrapper is string-backed rather than numeric.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a line item within a cart.
///
/// Uniqueness is not enforced by the type: two line items may carry the same
/// id, in which case cart operations apply to both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(String);

impl LineItemId {
    /// Create a new id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for LineItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for LineItemId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<LineItemId> for String {
    fn from(id: LineItemId) -> Self {
        id.0
    }
}

impl AsRef<str> for LineItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for LineItemId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
