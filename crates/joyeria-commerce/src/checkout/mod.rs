//! Checkout module.
//!
//! Order placement payloads, receipts and the admin order listing types.

mod order;

pub use order::{
    Customer, Order, OrderItem, OrderReceipt, OrderRequest, OrderStats, OrderStatus,
    DEFAULT_PAYMENT_METHOD,
};
