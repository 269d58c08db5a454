//! Admin commands: category writes and record deletion.

use anyhow::{Context as _, Result};
use joyeria_commerce::catalog::{CategoryUpdate, NewCategory};
use joyeria_commerce::{CategoryId, OrderId, ProductId};

use super::{AdminArgs, AdminCommand};
use crate::context::Context;

/// Run the admin command.
pub async fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AdminCommand::CategoryAdd { name, description } => {
            add_category(&name, &description, ctx).await
        }
        AdminCommand::CategoryEdit {
            id,
            name,
            description,
        } => edit_category(&id, CategoryUpdate { name, description }, ctx).await,
        AdminCommand::CategoryDelete { id, yes } => {
            let admin = ctx.admin_client(yes)?;
            let deleted = admin
                .delete_category(&CategoryId::new(id.as_str()))
                .await
                .with_context(|| format!("Failed to delete category {id}"))?;
            report_delete("category", &id, deleted, ctx);
            Ok(())
        }
        AdminCommand::ProductDelete { id, yes } => {
            let admin = ctx.admin_client(yes)?;
            let deleted = admin
                .delete_product(&ProductId::new(id.as_str()))
                .await
                .with_context(|| format!("Failed to delete product {id}"))?;
            report_delete("product", &id, deleted, ctx);
            Ok(())
        }
        AdminCommand::OrderDelete { id, yes } => {
            let admin = ctx.admin_client(yes)?;
            let deleted = admin
                .delete_order(&OrderId::new(id.as_str()))
                .await
                .with_context(|| format!("Failed to delete order {id}"))?;
            report_delete("order", &id, deleted, ctx);
            Ok(())
        }
    }
}

async fn add_category(name: &str, description: &str, ctx: &Context) -> Result<()> {
    let category = NewCategory::new(name, description)?;
    let admin = ctx.admin_client(false)?;

    let spinner = ctx.output.spinner(&format!("Creating {}...", category.name));
    let result = admin.create_category(&category).await;
    spinner.finish_and_clear();
    let id = result.context("Failed to create category")?;

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "id": id, "name": category.name }));
    } else {
        ctx.output
            .success(&format!("Category {} created ({})", category.name, id));
    }
    Ok(())
}

async fn edit_category(id: &str, update: CategoryUpdate, ctx: &Context) -> Result<()> {
    let admin = ctx.admin_client(false)?;
    admin
        .update_category(&CategoryId::new(id), &update)
        .await
        .with_context(|| format!("Failed to update category {id}"))?;

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "id": id, "updated": true }));
    } else {
        ctx.output.success(&format!("Category {id} updated"));
    }
    Ok(())
}

fn report_delete(what: &str, id: &str, deleted: bool, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "id": id, "deleted": deleted }));
    } else if deleted {
        ctx.output.success(&format!("Deleted {what} {id}"));
    } else {
        ctx.output.warn(&format!("Kept {what} {id}"));
    }
}
