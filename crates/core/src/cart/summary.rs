//! Order summary shown beside the cart table.
//!
//! The summary lists a subtotal, a delivery fee and a total. The total is
//! `subtotal + total_surcharge`, which is *not* necessarily
//! `subtotal + delivery_fee`: the storefront has always displayed a 45.00
//! delivery fee while adding 5.00 to the total, and that behaviour is kept
//! as the default. Operators who want the lines to agree set both values to
//! the same amount.

use rust_decimal::Decimal;

use super::Cart;
use crate::types::Price;

/// Default delivery fee shown in the summary (45.00).
pub const DEFAULT_DELIVERY_FEE: Decimal = Decimal::from_parts(45, 0, 0, false, 0);

/// Default amount added to the subtotal to form the total (5.00).
pub const DEFAULT_TOTAL_SURCHARGE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Fixed charges applied on top of the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    /// Delivery fee line shown in the summary.
    pub delivery_fee: Price,
    /// Amount added to the subtotal to produce the total.
    pub total_surcharge: Price,
}

impl PricingPolicy {
    /// Create a policy from explicit amounts.
    #[must_use]
    pub const fn new(delivery_fee: Price, total_surcharge: Price) -> Self {
        Self {
            delivery_fee,
            total_surcharge,
        }
    }

    /// Whether the displayed delivery fee is what gets added to the total.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.delivery_fee == self.total_surcharge
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        // Both constants are non-negative literals.
        Self {
            delivery_fee: Price::new(DEFAULT_DELIVERY_FEE).unwrap_or(Price::ZERO),
            total_surcharge: Price::new(DEFAULT_TOTAL_SURCHARGE).unwrap_or(Price::ZERO),
        }
    }
}

/// Derived totals for one render of the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSummary {
    /// Sum of line totals.
    pub subtotal: Price,
    /// Delivery fee line.
    pub delivery_fee: Price,
    /// Grand total (`subtotal + total_surcharge`).
    pub total: Price,
    /// Total number of units.
    pub item_count: u32,
}

impl OrderSummary {
    /// Compute the summary for a cart under a pricing policy.
    #[must_use]
    pub fn compute(cart: &Cart, policy: &PricingPolicy) -> Self {
        let subtotal = cart.total_price();
        Self {
            subtotal,
            delivery_fee: policy.delivery_fee,
            total: subtotal.saturating_add(policy.total_surcharge),
            item_count: cart.item_count(),
        }
    }
}
