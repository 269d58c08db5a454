//! Catalog commands: products and categories.

use anyhow::{Context as _, Result};
use joyeria_commerce::catalog::Product;
use joyeria_commerce::{CategoryId, ProductId};

use super::{CategoriesArgs, ProductArgs, ProductsArgs};
use crate::context::Context;
use crate::output::truncate;

/// Run the products command.
pub async fn products(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog_client()?;
    let category = args.category.map(CategoryId::new);

    let (title, spinner) = if args.most_viewed {
        ("Most viewed", ctx.output.spinner("Loading most viewed products..."))
    } else if args.best_sellers {
        ("Best sellers", ctx.output.spinner("Loading best sellers..."))
    } else {
        ("Products", ctx.output.spinner("Loading products..."))
    };

    let result = if args.most_viewed {
        catalog.most_viewed(args.limit).await
    } else if args.best_sellers {
        catalog.best_sellers(args.limit).await
    } else {
        catalog.list_products(category.as_ref()).await
    };
    spinner.finish_and_clear();
    let products = result.context("Failed to load products")?;

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(title);
    if products.is_empty() {
        ctx.output.info("No products found.");
        return Ok(());
    }
    print_products(&products, ctx);
    ctx.output.info(&format!("Total: {} product(s)", products.len()));
    Ok(())
}

fn print_products(products: &[Product], ctx: &Context) {
    let table = ctx.output.table(&[
        ("ID", 26),
        ("NAME", 30),
        ("PRICE", 12),
        ("VIEWS", 7),
        ("SOLD", 7),
    ]);
    for p in products {
        table.row(&[
            p.id.to_string(),
            truncate(&p.name, 30),
            p.price.display(),
            p.views.to_string(),
            p.purchases.to_string(),
        ]);
    }
}

/// Run the product command.
pub async fn product(args: ProductArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog_client()?;

    let spinner = ctx.output.spinner("Loading product...");
    let result = catalog.get_product(&ProductId::new(&args.id)).await;
    spinner.finish_and_clear();
    let product = result.with_context(|| format!("Failed to load product {}", args.id))?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Price", &product.price.display());
    ctx.output.kv("Type", &product.kind);
    if let Some(category) = &product.category_id {
        ctx.output.kv("Category", category.as_str());
    }
    if !product.description.is_empty() {
        ctx.output.kv("Description", &product.description);
    }
    ctx.output.kv("Photo", product.primary_photo());
    ctx.output.kv("Views", &product.views.to_string());
    ctx.output.kv("Sold", &product.purchases.to_string());

    let characteristics = product.characteristic_pairs();
    if !characteristics.is_empty() {
        ctx.output.info("");
        ctx.output.info("Characteristics:");
        for (key, value) in &characteristics {
            ctx.output.list_item(&format!("{}: {}", key, value));
        }
    }
    Ok(())
}

/// Run the categories command.
pub async fn categories(_args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog_client()?;

    let spinner = ctx.output.spinner("Loading categories...");
    let result = catalog.list_categories().await;
    spinner.finish_and_clear();
    let categories = result.context("Failed to load categories")?;

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    if categories.is_empty() {
        ctx.output.info("No categories found.");
        return Ok(());
    }
    let table = ctx.output.table(&[("ID", 26), ("NAME", 24), ("DESCRIPTION", 40)]);
    for c in &categories {
        table.row(&[
            c.id.to_string(),
            truncate(&c.name, 24),
            truncate(c.description_or_default(), 40),
        ]);
    }
    Ok(())
}
