//! Catalog module.
//!
//! Products and categories, plus the bodies of the admin category writes.

mod category;
mod product;

pub use category::{Category, CategoryUpdate, NewCategory};
pub use product::{Product, DEFAULT_PRODUCT_TYPE};
