//! CLI command implementations.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod orders;

use clap::{Args, Subcommand};
use joyeria_client::{CartError, DEFAULT_ADD_QUANTITY, DEFAULT_HIGHLIGHT_LIMIT};
use joyeria_commerce::checkout::DEFAULT_PAYMENT_METHOD;
use thiserror::Error;

/// A failure that has already been shown to the user.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct Reported(pub String);

impl From<CartError> for Reported {
    fn from(e: CartError) -> Self {
        Reported(e.to_string())
    }
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart (default).
    Show,
    /// Add a product.
    Add {
        /// Product id.
        product_id: String,
        /// Quantity to add.
        #[arg(short, long, default_value_t = DEFAULT_ADD_QUANTITY)]
        quantity: i64,
    },
    /// Remove a product's line.
    Remove {
        /// Product id.
        product_id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Remove every product.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the number of items.
    Count,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Payment method.
    #[arg(short, long, default_value = DEFAULT_PAYMENT_METHOD)]
    pub payment_method: String,

    /// Customer name.
    #[arg(long)]
    pub name: Option<String>,

    /// Customer email.
    #[arg(long)]
    pub email: Option<String>,

    /// Customer phone.
    #[arg(long)]
    pub phone: Option<String>,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only products in this category id.
    #[arg(long)]
    pub category: Option<String>,

    /// Most viewed products instead of the full list.
    #[arg(long, conflicts_with_all = ["best_sellers", "category"])]
    pub most_viewed: bool,

    /// Best selling products instead of the full list.
    #[arg(long, conflicts_with = "category")]
    pub best_sellers: bool,

    /// Size of the most viewed / best sellers list.
    #[arg(short, long, default_value_t = DEFAULT_HIGHLIGHT_LIMIT)]
    pub limit: usize,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product id.
    pub id: String,
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: Option<OrdersCommand>,
}

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// List orders, newest first.
    List {
        /// Only orders with this status (completed, payment_failed, pending).
        #[arg(short, long)]
        status: Option<String>,
        /// Show only the last N orders.
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show one order by its number.
    Find {
        /// Order number, e.g. ORD-000042.
        order_number: String,
    },
    /// Sales totals.
    Stats,
}

/// Arguments for the admin command.
#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Create a category.
    CategoryAdd {
        /// Category name.
        name: String,
        /// Short description.
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Rename a category or change its description.
    CategoryEdit {
        /// Category id.
        id: String,
        /// New name.
        #[arg(short, long)]
        name: Option<String>,
        /// New description.
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a category with no products.
    CategoryDelete {
        /// Category id.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete a product.
    ProductDelete {
        /// Product id.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete an order record.
    OrderDelete {
        /// Order id (not the order number).
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
