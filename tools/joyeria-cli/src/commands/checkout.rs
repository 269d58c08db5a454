//! Checkout command.

use anyhow::Result;
use joyeria_client::{Confirm, OrderOutcome};
use joyeria_commerce::checkout::Customer;

use super::cart::print_view;
use super::{CheckoutArgs, Reported};
use crate::context::Context;
use crate::output::status_badge;
use crate::ui::TerminalUi;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let client = ctx.cart_client(args.yes)?;

    let spinner = ctx.output.spinner("Loading cart...");
    let view = client.load_cart().await;
    spinner.finish_and_clear();

    if !ctx.output.is_json() {
        print_view(&view, ctx);
    }

    if !view.is_empty() {
        let ui = TerminalUi::new(ctx.output.clone(), args.yes);
        let prompt = format!(
            "Pay {} with {}?",
            view.totals().grand_total,
            args.payment_method
        );
        if !ui.confirm(&prompt) {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    let customer = Customer {
        name: args.name,
        email: args.email,
        phone: args.phone,
    };

    let spinner = ctx.output.spinner("Placing order...");
    let result = client.place_order_with(&args.payment_method, customer).await;
    spinner.finish_and_clear();

    let outcome = result.map_err(Reported::from)?;
    let receipt = outcome.receipt();

    if ctx.output.is_json() {
        ctx.output.json(receipt);
    } else {
        ctx.output.header(&format!("Order {}", receipt.order_number));
        ctx.output.kv("Status", &status_badge(receipt.status));
        ctx.output.kv("Total", &receipt.total.display());
        if !receipt.message.is_empty() {
            ctx.output.kv("Message", &receipt.message);
        }
    }

    match outcome {
        OrderOutcome::Approved(_) => Ok(()),
        OrderOutcome::Rejected(receipt) => Err(Reported(format!(
            "payment declined for order {}",
            receipt.order_number
        ))
        .into()),
    }
}
