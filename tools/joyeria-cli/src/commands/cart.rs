//! Cart commands.

use anyhow::Result;
use joyeria_client::CartView;
use joyeria_commerce::ProductId;

use super::{CartArgs, CartCommand, Reported};
use crate::context::Context;
use crate::output::truncate;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show_cart(ctx).await,
        CartCommand::Add {
            product_id,
            quantity,
        } => add_item(&product_id, quantity, ctx).await,
        CartCommand::Remove { product_id, yes } => remove_item(&product_id, yes, ctx).await,
        CartCommand::Clear { yes } => clear_cart(yes, ctx).await,
        CartCommand::Count => count_items(ctx).await,
    }
}

async fn show_cart(ctx: &Context) -> Result<()> {
    let client = ctx.cart_client(false)?;

    let spinner = ctx.output.spinner("Loading cart...");
    let view = client.load_cart().await;
    spinner.finish_and_clear();

    print_view(&view, ctx);
    Ok(())
}

async fn add_item(product_id: &str, quantity: i64, ctx: &Context) -> Result<()> {
    let client = ctx.cart_client(false)?;

    let spinner = ctx.output.spinner(&format!("Adding {} x{}...", product_id, quantity));
    let result = client.add_item(&ProductId::new(product_id), quantity).await;
    spinner.finish_and_clear();

    let view = result.map_err(Reported::from)?;
    print_view(&view, ctx);
    Ok(())
}

async fn remove_item(product_id: &str, yes: bool, ctx: &Context) -> Result<()> {
    let client = ctx.cart_client(yes)?;

    // The prompt needs the line's name, so load first.
    client.load_cart().await;
    let removed = client
        .remove_item(&ProductId::new(product_id))
        .await
        .map_err(Reported::from)?;

    if !removed {
        ctx.output.warn("Nothing removed");
    }
    print_view(&client.view(), ctx);
    Ok(())
}

async fn clear_cart(yes: bool, ctx: &Context) -> Result<()> {
    let client = ctx.cart_client(yes)?;

    let cleared = client.clear_cart().await.map_err(Reported::from)?;
    if !cleared {
        ctx.output.warn("Cart left unchanged");
    }
    print_view(&client.view(), ctx);
    Ok(())
}

async fn count_items(ctx: &Context) -> Result<()> {
    let client = ctx.cart_client(false)?;
    client.load_cart().await;
    let count = client.cart_count();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "count": count }));
    } else {
        println!("{}", count);
    }
    Ok(())
}

/// Print a cart view as a table with totals.
pub fn print_view(view: &CartView, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(view);
        return;
    }

    ctx.output.header("Cart");
    let totals = view.totals();

    if view.is_empty() {
        ctx.output.info("Your cart is empty.");
    } else {
        let table = ctx.output.table(&[
            ("PRODUCT", 26),
            ("NAME", 28),
            ("PRICE", 12),
            ("QTY", 5),
            ("TOTAL", 12),
        ]);
        for item in view.items() {
            let line_total = item
                .line_total()
                .map(|m| m.display())
                .unwrap_or_else(|_| "-".to_string());
            table.row(&[
                item.product_id.to_string(),
                truncate(&item.name, 28),
                item.price.display(),
                item.quantity.to_string(),
                line_total,
            ]);
        }
        println!();
    }

    ctx.output.kv("Items", &totals.item_count.to_string());
    ctx.output.kv("Subtotal", &totals.subtotal.display());
    ctx.output.kv("Shipping", &totals.shipping.display());
    ctx.output.kv("Total", &totals.grand_total.display());
}
