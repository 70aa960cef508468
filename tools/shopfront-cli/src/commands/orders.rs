//! Order history and tracking.

use crate::context::{take, Context};
use anyhow::Result;
use clap::{Args, Subcommand};
use shopfront_sdk::{Order, OrderId, PaymentResult};

#[derive(Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// Show one order
    Show {
        /// Order ID
        id: i64,
    },

    /// List your own orders
    My,

    /// Record a payment confirmation for an order
    Pay {
        /// Order ID
        id: i64,

        /// Payment provider transaction ID
        #[arg(long)]
        transaction: String,
    },
}

pub async fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    match args.command {
        OrdersCommand::Show { id } => show(ctx, OrderId::new(id)).await,
        OrdersCommand::My => my(ctx).await,
        OrdersCommand::Pay { id, transaction } => pay(ctx, OrderId::new(id), transaction).await,
    }
}

async fn show(ctx: &Context, id: OrderId) -> Result<()> {
    let spinner = ctx.output.spinner("Loading order...");
    ctx.storefront.load_order(id).await;
    spinner.finish_and_clear();

    let order = take(ctx.storefront.store().order_detail().snapshot())?;
    print_order(ctx, &order);
    Ok(())
}

async fn my(ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading orders...");
    ctx.storefront.load_my_orders().await;
    spinner.finish_and_clear();

    let orders = take(ctx.storefront.store().my_orders().snapshot())?;
    if orders.is_empty() {
        ctx.output.info("No orders yet");
        return Ok(());
    }
    ctx.output.header("Your orders");
    for order in &orders {
        ctx.output.kv(
            &format!("#{}", order.id),
            &format!(
                "{}  {}  {}",
                order.total_price,
                if order.is_paid { "paid" } else { "unpaid" },
                if order.is_delivered { "delivered" } else { "in transit" },
            ),
        );
    }
    Ok(())
}

async fn pay(ctx: &Context, id: OrderId, transaction: String) -> Result<()> {
    let payment = PaymentResult {
        id: transaction,
        status: "COMPLETED".to_string(),
        update_time: None,
        email_address: None,
    };
    let spinner = ctx.output.spinner("Recording payment...");
    ctx.storefront.pay_order(id, payment).await;
    spinner.finish_and_clear();

    take(ctx.storefront.store().order_pay().snapshot())?;
    ctx.output.success("Order marked as paid");
    Ok(())
}

fn print_order(ctx: &Context, order: &Order) {
    ctx.output.header(&format!("Order #{}", order.id));
    for line in &order.order_items {
        ctx.output.kv(
            &format!("#{}", line.product),
            &format!("{}  {} x{}", line.name, line.price, line.qty),
        );
    }
    if let Some(addr) = &order.shipping_address {
        ctx.output.kv(
            "Ship to",
            &format!("{}, {}, {} {}", addr.address, addr.city, addr.postal_code, addr.country),
        );
    }
    ctx.output.kv("Payment", &order.payment_method);
    ctx.output.kv("Items", &order.items_price().to_string());
    ctx.output.kv("Shipping", &order.shipping_price.to_string());
    ctx.output.kv("Tax", &order.tax_price.to_string());
    ctx.output.kv("Total", &order.total_price.to_string());
    match order.paid_at {
        Some(at) => ctx.output.kv("Paid", &at.format("%Y-%m-%d %H:%M").to_string()),
        None => ctx.output.kv("Paid", "not yet"),
    }
    match order.delivered_at {
        Some(at) => ctx.output.kv("Delivered", &at.format("%Y-%m-%d %H:%M").to_string()),
        None => ctx.output.kv("Delivered", "not yet"),
    }
}
