//! Shopping cart module.
//!
//! Contains the cart snapshot, line items and client-side totals.

mod cart;
mod pricing;

pub use cart::{
    validate_quantity, Cart, LineItem, NormalizeReport, MAX_QUANTITY_PER_ITEM, PLACEHOLDER_IMAGE,
};
pub use pricing::{CartTotals, ShippingPolicy, DEFAULT_SHIPPING_FEE_CENTS};
