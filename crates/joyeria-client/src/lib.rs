//! Storefront clients for the Joyeria backend.
//!
//! - [`CartClient`] keeps a shopper's cart in sync with the server-owned cart
//!   resource: it creates and remembers the cart id, adds and removes lines,
//!   reloads after every change and checks out.
//! - [`CatalogClient`] reads products, categories and orders.
//! - [`AdminClient`] creates and edits categories and deletes products,
//!   categories and order records.
//!
//! Both are generic over [`Transport`](joyeria_data::Transport), so they run
//! against [`FetchClient`](joyeria_data::FetchClient) in production and an
//! in-memory backend in tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use joyeria_client::{CartClient, FileStore, DEFAULT_ADD_QUANTITY};
//! use joyeria_commerce::ProductId;
//! use joyeria_data::FetchClient;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = FetchClient::new("http://127.0.0.1:5000")?;
//! let cart = CartClient::open(transport, Arc::new(FileStore::new("state.json")))?;
//!
//! let view = cart.add_item(&ProductId::new("65a1f0c2"), DEFAULT_ADD_QUANTITY).await?;
//! println!("{} items, total {}", view.item_count(), view.totals().grand_total);
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod store;
pub mod ui;
pub mod view;

pub use admin::AdminClient;
pub use cart::{CartClient, IdStrategy, OrderOutcome, DEFAULT_ADD_QUANTITY};
pub use catalog::{CatalogClient, DEFAULT_HIGHLIGHT_LIMIT};
pub use error::{CartError, ErrorKind, StoreError};
pub use store::{CartIdStore, FileStore, MemoryStore, CART_ID_KEY};
pub use ui::{AutoConfirm, CartRenderer, Confirm, LogNotifier, NoRender, Notifier, Toast, ToastLevel};
pub use view::CartView;
