//! Manage the shopping cart.

use crate::context::Context;
use anyhow::Result;
use clap::{Args, Subcommand};
use shopfront_sdk::ProductId;

#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Add a product, or set the quantity of its existing line
    Add {
        /// Product ID
        id: i64,

        /// Desired quantity (clamped to available stock)
        #[arg(default_value_t = 1)]
        qty: i64,
    },

    /// Remove a product from the cart
    Remove {
        /// Product ID
        id: i64,
    },

    /// Show the cart contents and totals
    Show,

    /// Empty the cart
    Clear,
}

pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CartCommand::Add { id, qty } => add(ctx, ProductId::new(id), qty).await,
        CartCommand::Remove { id } => {
            ctx.storefront.remove_from_cart(ProductId::new(id))?;
            ctx.output.success("Removed from cart");
            Ok(())
        }
        CartCommand::Show => show(ctx),
        CartCommand::Clear => {
            ctx.storefront.clear_cart()?;
            ctx.output.success("Cart emptied");
            Ok(())
        }
    }
}

async fn add(ctx: &Context, id: ProductId, qty: i64) -> Result<()> {
    let spinner = ctx.output.spinner("Fetching product...");
    let result = ctx.storefront.add_to_cart(id, qty).await;
    spinner.finish_and_clear();
    result?;

    let cart = ctx.storefront.store().cart();
    if let Some(line) = cart.line(id) {
        if line.qty < qty {
            ctx.output
                .warn(&format!("Only {} in stock; quantity clamped", line.qty));
        }
        ctx.output
            .success(&format!("{} x{} in cart", line.name, line.qty));
    }
    Ok(())
}

fn show(ctx: &Context) -> Result<()> {
    let cart = ctx.storefront.store().cart();
    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    ctx.output.header("Cart");
    for line in &cart.lines {
        ctx.output.kv(
            &format!("#{}", line.product),
            &format!("{}  {} x{}", line.name, line.price, line.qty),
        );
    }
    ctx.output.kv("Items", &cart.item_count().to_string());
    ctx.output.kv("Subtotal", &cart.subtotal()?.to_string());
    Ok(())
}
