//! What the shopper sees of the cart.

use joyeria_commerce::cart::{Cart, CartTotals, LineItem, ShippingPolicy};
use joyeria_commerce::{CommerceError, Currency};
use serde::Serialize;

/// Rendering model rebuilt from each cart snapshot.
///
/// An empty or unavailable cart is always shown as [`CartView::Empty`]
/// with zero totals, never as the previous snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CartView {
    Items {
        items: Vec<LineItem>,
        totals: CartTotals,
    },
    Empty {
        totals: CartTotals,
    },
}

impl CartView {
    /// The empty view: subtotal 0.00, shipping 0.00.
    pub fn empty(currency: Currency) -> Self {
        CartView::Empty {
            totals: CartTotals::zero(currency),
        }
    }

    /// Build a view from a snapshot.
    pub fn from_cart(cart: &Cart, policy: &ShippingPolicy) -> Result<Self, CommerceError> {
        if cart.is_empty() {
            return Ok(Self::empty(policy.currency()));
        }
        Ok(CartView::Items {
            items: cart.items.clone(),
            totals: cart.calculate_total(policy)?,
        })
    }

    pub fn items(&self) -> &[LineItem] {
        match self {
            CartView::Items { items, .. } => items,
            CartView::Empty { .. } => &[],
        }
    }

    pub fn totals(&self) -> &CartTotals {
        match self {
            CartView::Items { totals, .. } | CartView::Empty { totals } => totals,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CartView::Empty { .. })
    }

    /// Badge count: sum of quantities.
    pub fn item_count(&self) -> i64 {
        self.totals().item_count
    }
}
