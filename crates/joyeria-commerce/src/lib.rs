//! Domain types for the Joyeria storefront.
//!
//! This crate provides the types shared by the storefront client and CLI:
//!
//! - **Cart**: cart snapshots, line items and client-side totals
//! - **Checkout**: order requests, receipts and stored orders
//! - **Catalog**: products and categories
//!
//! # Example
//!
//! ```rust
//! use joyeria_commerce::prelude::*;
//!
//! let items = vec![
//!     LineItem::new(ProductId::new("p1"), "Anillo", Money::from_decimal(100.0, Currency::BOB), 2),
//!     LineItem::new(ProductId::new("p2"), "Collar", Money::from_decimal(50.0, Currency::BOB), 1),
//! ];
//!
//! let totals = ShippingPolicy::default().calculate_total(&items).unwrap();
//! assert_eq!(totals.grand_total.display(), "Bs 265.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{
        validate_quantity, Cart, CartTotals, LineItem, NormalizeReport, ShippingPolicy,
        MAX_QUANTITY_PER_ITEM,
    };

    // Catalog
    pub use crate::catalog::{Category, CategoryUpdate, NewCategory, Product};

    // Checkout
    pub use crate::checkout::{
        Customer, Order, OrderItem, OrderReceipt, OrderRequest, OrderStats, OrderStatus,
        DEFAULT_PAYMENT_METHOD,
    };
}
