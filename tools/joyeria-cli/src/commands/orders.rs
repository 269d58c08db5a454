//! Order commands.

use anyhow::{bail, Context as _, Result};
use joyeria_commerce::checkout::{Order, OrderStatus};

use super::{OrdersArgs, OrdersCommand};
use crate::context::Context;
use crate::output::{status_badge, truncate};

/// Run the orders command.
pub async fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(OrdersCommand::List {
        status: None,
        limit: None,
    }) {
        OrdersCommand::List { status, limit } => list_orders(status.as_deref(), limit, ctx).await,
        OrdersCommand::Find { order_number } => find_order(&order_number, ctx).await,
        OrdersCommand::Stats => order_stats(ctx).await,
    }
}

async fn list_orders(status: Option<&str>, limit: Option<usize>, ctx: &Context) -> Result<()> {
    let status = status.map(parse_status).transpose()?;
    let catalog = ctx.catalog_client()?;

    let spinner = ctx.output.spinner("Loading orders...");
    let result = catalog.list_orders(status).await;
    spinner.finish_and_clear();
    let mut orders = result.context("Failed to load orders")?;

    // Apply limit
    if let Some(limit) = limit {
        orders.truncate(limit);
    }

    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return Ok(());
    }

    ctx.output.header("Orders");
    if orders.is_empty() {
        ctx.output.info("No orders found.");
        return Ok(());
    }

    let table = ctx.output.table(&[
        ("NUMBER", 12),
        ("DATE", 17),
        ("CUSTOMER", 22),
        ("ITEMS", 6),
        ("TOTAL", 12),
        ("STATUS", 16),
    ]);
    for order in &orders {
        table.row(&[
            order.order_number.clone(),
            format_date(order),
            truncate(customer_name(order), 22),
            order.item_count().to_string(),
            order.total.display(),
            status_badge(order.status),
        ]);
    }

    ctx.output.info("");
    ctx.output.info(&format!("Total: {} order(s)", orders.len()));
    Ok(())
}

async fn find_order(order_number: &str, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog_client()?;

    let spinner = ctx.output.spinner("Looking up order...");
    let result = catalog.find_order(order_number).await;
    spinner.finish_and_clear();
    let order = result.with_context(|| format!("Failed to find order {}", order_number))?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }

    ctx.output.header(&format!("Order {}", order.order_number));
    ctx.output.kv("Date", &format_date(&order));
    ctx.output.kv("Status", &status_badge(order.status));
    ctx.output.kv("Customer", customer_name(&order));
    if let Some(customer) = &order.customer {
        if let Some(email) = &customer.email {
            ctx.output.kv("Email", email);
        }
        if let Some(phone) = &customer.phone {
            ctx.output.kv("Phone", phone);
        }
    }
    if let Some(method) = &order.payment_method {
        ctx.output.kv("Payment", method);
    }
    ctx.output.kv("Total", &order.total.display());

    if !order.items.is_empty() {
        ctx.output.info("");
        ctx.output.info("Items:");
        for item in &order.items {
            ctx.output.list_item(&format!(
                "{} x{} @ {}",
                item.name,
                item.quantity,
                item.price.display()
            ));
        }
    }
    Ok(())
}

async fn order_stats(ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog_client()?;

    let spinner = ctx.output.spinner("Loading statistics...");
    let result = catalog.order_stats().await;
    spinner.finish_and_clear();
    let stats = result.context("Failed to load order statistics")?;

    if ctx.output.is_json() {
        ctx.output.json(&stats);
        return Ok(());
    }

    ctx.output.header("Sales");
    ctx.output.kv("Completed orders", &stats.total_sales_count.to_string());
    ctx.output.kv("Revenue", &stats.total_revenue.display());
    ctx.output.kv("Failed payments", &stats.failed_payments.to_string());
    Ok(())
}

fn parse_status(value: &str) -> Result<OrderStatus> {
    match OrderStatus::from_str_opt(value.trim()) {
        Some(status) => Ok(status),
        None => bail!(
            "Unknown status: {}. Available: completed, payment_failed, pending",
            value
        ),
    }
}

fn customer_name(order: &Order) -> &str {
    order
        .customer
        .as_ref()
        .and_then(|c| c.name.as_deref())
        .unwrap_or("-")
}

fn format_date(order: &Order) -> String {
    match order.placed_at() {
        Some(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        None => order.date.clone().unwrap_or_else(|| "-".to_string()),
    }
}
