//! Joyeria CLI - terminal front end for the Joyeria storefront.
//!
//! Commands:
//! - `joyeria cart` - Show and change the current cart
//! - `joyeria checkout` - Place an order for the current cart
//! - `joyeria products` / `joyeria product` - Browse the catalog
//! - `joyeria categories` - List categories
//! - `joyeria orders` - List, find and summarize orders
//! - `joyeria admin` - Manage categories and delete products or orders
//! - `joyeria config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;
mod ui;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    AdminArgs, CartArgs, CategoriesArgs, CheckoutArgs, ConfigArgs, OrdersArgs, ProductArgs,
    ProductsArgs, Reported,
};

/// Joyeria CLI - Shop and administer the Joyeria storefront
#[derive(Parser)]
#[command(name = "joyeria")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Named environment from the config file
    #[arg(short, long, global = true)]
    env: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show and change the current cart
    Cart(CartArgs),

    /// Place an order for the current cart
    Checkout(CheckoutArgs),

    /// List products
    Products(ProductsArgs),

    /// Show one product
    Product(ProductArgs),

    /// List categories
    Categories(CategoriesArgs),

    /// List, find and summarize orders
    Orders(OrdersArgs),

    /// Manage categories and delete products or orders
    Admin(AdminArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), cli.env.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };
    logging::init(&ctx.config.log, cli.verbose)?;
    tracing::debug!(
        api = %ctx.config.api.base_url,
        config = ?ctx.config_path,
        "context loaded"
    );

    // Execute command
    let result = match cli.command {
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Products(args) => commands::catalog::products(args, &ctx).await,
        Commands::Product(args) => commands::catalog::product(args, &ctx).await,
        Commands::Categories(args) => commands::catalog::categories(args, &ctx).await,
        Commands::Orders(args) => commands::orders::run(args, &ctx).await,
        Commands::Admin(args) => commands::admin::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        // Cart failures were already shown as a toast.
        if e.downcast_ref::<Reported>().is_none() {
            ctx.output.error(&format!("{:#}", e));
        }
        std::process::exit(1);
    }

    Ok(())
}
