//! Cart totals calculation.

use crate::cart::LineItem;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Default flat shipping fee (15.00) in minor units.
pub const DEFAULT_SHIPPING_FEE_CENTS: i64 = 1500;

/// Totals derived from a cart snapshot. Never persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of unit price times quantity.
    pub subtotal: Money,
    /// Flat shipping, charged only when the subtotal is positive.
    pub shipping: Money,
    /// Subtotal plus shipping.
    pub grand_total: Money,
    /// Sum of quantities.
    pub item_count: i64,
}

impl CartTotals {
    /// Totals of an empty cart.
    pub fn zero(currency: Currency) -> Self {
        Self {
            subtotal: Money::zero(currency),
            shipping: Money::zero(currency),
            grand_total: Money::zero(currency),
            item_count: 0,
        }
    }
}

/// Flat-fee shipping rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingPolicy {
    /// Fee added to any non-empty order.
    pub flat_fee: Money,
}

impl ShippingPolicy {
    /// Create a policy with the given flat fee.
    pub fn flat(flat_fee: Money) -> Self {
        Self { flat_fee }
    }

    /// Currency totals are computed in.
    pub fn currency(&self) -> Currency {
        self.flat_fee.currency
    }

    /// Compute totals for a list of line items.
    ///
    /// Depends only on the multiset of items, so permuting them or calling
    /// twice gives the same answer.
    pub fn calculate_total(&self, items: &[LineItem]) -> Result<CartTotals, CommerceError> {
        let currency = self.currency();
        let mut subtotal = Money::zero(currency);
        let mut item_count: i64 = 0;

        for item in items {
            let line = item.line_total()?;
            subtotal = subtotal
                .try_add(&line)
                .ok_or_else(|| mismatch_or_overflow(currency, &line))?;
            item_count = item_count
                .checked_add(item.quantity)
                .ok_or(CommerceError::Overflow)?;
        }

        let shipping = if subtotal.is_positive() {
            self.flat_fee
        } else {
            Money::zero(currency)
        };
        let grand_total = subtotal.try_add(&shipping).ok_or(CommerceError::Overflow)?;

        Ok(CartTotals {
            subtotal,
            shipping,
            grand_total,
            item_count,
        })
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self::flat(Money::new(DEFAULT_SHIPPING_FEE_CENTS, Currency::default()))
    }
}

fn mismatch_or_overflow(expected: Currency, got: &Money) -> CommerceError {
    if got.currency != expected {
        CommerceError::CurrencyMismatch {
            expected: expected.code().to_string(),
            got: got.currency.code().to_string(),
        }
    } else {
        CommerceError::Overflow
    }
}
