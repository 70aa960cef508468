//! Walk the checkout flow.

use crate::context::{take, Context};
use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use shopfront_sdk::{CheckoutStage, OrderDraft, ShippingAddress};

#[derive(Args)]
pub struct CheckoutArgs {
    #[command(subcommand)]
    pub command: CheckoutCommand,
}

#[derive(Subcommand)]
pub enum CheckoutCommand {
    /// Set the shipping address
    Shipping {
        #[arg(long)]
        address: String,

        #[arg(long)]
        city: String,

        #[arg(long)]
        postal_code: String,

        #[arg(long)]
        country: String,
    },

    /// Choose a payment method
    Payment {
        /// Payment method name (e.g. "PayPal")
        method: String,
    },

    /// Review the quote and place the order
    Place,
}

pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CheckoutCommand::Shipping {
            address,
            city,
            postal_code,
            country,
        } => {
            ctx.storefront.set_shipping_address(ShippingAddress {
                address,
                city,
                postal_code,
                country,
            })?;
            ctx.output.success("Shipping address saved");
            Ok(())
        }
        CheckoutCommand::Payment { method } => payment(ctx, method),
        CheckoutCommand::Place => place(ctx).await,
    }
}

fn payment(ctx: &Context, method: String) -> Result<()> {
    // The guard redirects backward when shipping is incomplete.
    match ctx.storefront.checkout_stage(CheckoutStage::Payment) {
        CheckoutStage::Payment => {}
        stage => bail!(
            "cannot choose a payment method yet; complete the {} step first",
            stage.as_str()
        ),
    }
    ctx.storefront.set_payment_method(method)?;
    ctx.output.success("Payment method saved");
    Ok(())
}

async fn place(ctx: &Context) -> Result<()> {
    match ctx.storefront.checkout_stage(CheckoutStage::PlaceOrder) {
        CheckoutStage::PlaceOrder => {}
        stage => bail!(
            "checkout is not ready; complete the {} step first",
            stage.as_str()
        ),
    }

    // Show the quote before committing.
    let draft = OrderDraft::from_cart(&ctx.storefront.store().cart())?;
    ctx.output.header("Order summary");
    ctx.output.kv("Items", &draft.items_price.to_string());
    ctx.output.kv("Shipping", &draft.shipping_price.to_string());
    ctx.output.kv("Tax", &draft.tax_price.to_string());
    ctx.output.kv("Total", &draft.total_price.to_string());

    let spinner = ctx.output.spinner("Placing order...");
    let result = ctx.storefront.place_order().await;
    spinner.finish_and_clear();
    result?;

    let order = take(ctx.storefront.store().order_create().snapshot())?;
    ctx.output
        .success(&format!("Order #{} placed", order.id));
    ctx.output
        .info(&format!("Track it with `shopfront orders show {}`", order.id));
    Ok(())
}
