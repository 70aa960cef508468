//! Administration commands.

use crate::context::{take, Context};
use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use shopfront_sdk::{OrderId, Price, ProductId, ProductUpdate, UserId, UserUpdate};

#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// List all user accounts
    Users,

    /// List all orders
    Orders,

    /// Mark an order as delivered
    Deliver {
        /// Order ID
        id: i64,
    },

    /// Create a product with server defaults
    CreateProduct,

    /// Update a product
    UpdateProduct {
        /// Product ID
        id: i64,

        #[arg(long)]
        name: String,

        /// Price in decimal form, e.g. 19.99
        #[arg(long)]
        price: f64,

        #[arg(long, default_value = "")]
        brand: String,

        #[arg(long, default_value = "")]
        category: String,

        #[arg(long, default_value_t = 0)]
        stock: i64,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Delete a product
    DeleteProduct {
        /// Product ID
        id: i64,
    },

    /// Upload a product image
    Upload {
        /// Product ID
        id: i64,

        /// Path to the image file
        path: String,
    },

    /// Update a user account
    UpdateUser {
        /// User ID
        id: i64,

        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// Grant admin rights
        #[arg(long)]
        admin: bool,
    },

    /// Delete a user account
    DeleteUser {
        /// User ID
        id: i64,
    },
}

pub async fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    ctx.require_admin()?;

    match args.command {
        AdminCommand::Users => users(ctx).await,
        AdminCommand::Orders => orders(ctx).await,
        AdminCommand::Deliver { id } => deliver(ctx, OrderId::new(id)).await,
        AdminCommand::CreateProduct => create_product(ctx).await,
        AdminCommand::UpdateProduct {
            id,
            name,
            price,
            brand,
            category,
            stock,
            description,
        } => {
            let update = ProductUpdate {
                name,
                price: Price::from_decimal(price),
                brand,
                category,
                count_in_stock: stock,
                description,
            };
            update_product(ctx, ProductId::new(id), update).await
        }
        AdminCommand::DeleteProduct { id } => delete_product(ctx, ProductId::new(id)).await,
        AdminCommand::Upload { id, path } => upload(ctx, ProductId::new(id), &path).await,
        AdminCommand::UpdateUser {
            id,
            name,
            email,
            admin,
        } => update_user(ctx, UserId::new(id), name, email, admin).await,
        AdminCommand::DeleteUser { id } => delete_user(ctx, UserId::new(id)).await,
    }
}

async fn users(ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading users...");
    ctx.storefront.load_users().await;
    spinner.finish_and_clear();

    let users = take(ctx.storefront.store().user_list().snapshot())?;
    ctx.output.header("Users");
    for user in &users {
        ctx.output.kv(
            &format!("#{}", user.id),
            &format!(
                "{} <{}>{}",
                user.name,
                user.email,
                if user.is_admin { " [admin]" } else { "" }
            ),
        );
    }
    Ok(())
}

async fn orders(ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading orders...");
    ctx.storefront.load_all_orders().await;
    spinner.finish_and_clear();

    let orders = take(ctx.storefront.store().all_orders().snapshot())?;
    ctx.output.header("Orders");
    for order in &orders {
        let customer = order
            .user
            .as_ref()
            .map(|u| u.name.as_str())
            .unwrap_or("unknown");
        ctx.output.kv(
            &format!("#{}", order.id),
            &format!(
                "{}  {}  {}  {}",
                customer,
                order.total_price,
                if order.is_paid { "paid" } else { "unpaid" },
                if order.is_delivered { "delivered" } else { "pending" },
            ),
        );
    }
    Ok(())
}

async fn deliver(ctx: &Context, id: OrderId) -> Result<()> {
    let spinner = ctx.output.spinner("Marking delivered...");
    ctx.storefront.deliver_order(id).await;
    spinner.finish_and_clear();

    take(ctx.storefront.store().order_deliver().snapshot())?;
    ctx.output.success("Order marked as delivered");
    Ok(())
}

async fn create_product(ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Creating product...");
    ctx.storefront.create_product().await;
    spinner.finish_and_clear();

    let product = take(ctx.storefront.store().product_create().snapshot())?;
    ctx.output.success(&format!(
        "Product #{} created; update it with `shopfront admin update-product {}`",
        product.id, product.id
    ));
    Ok(())
}

async fn update_product(ctx: &Context, id: ProductId, update: ProductUpdate) -> Result<()> {
    let spinner = ctx.output.spinner("Updating product...");
    ctx.storefront.update_product(id, update).await;
    spinner.finish_and_clear();

    take(ctx.storefront.store().product_update().snapshot())?;
    ctx.output.success("Product updated");
    Ok(())
}

async fn delete_product(ctx: &Context, id: ProductId) -> Result<()> {
    let spinner = ctx.output.spinner("Deleting product...");
    ctx.storefront.delete_product(id).await;
    spinner.finish_and_clear();

    take(ctx.storefront.store().product_delete().snapshot())?;
    ctx.output.success("Product deleted");
    Ok(())
}

async fn upload(ctx: &Context, id: ProductId, path: &str) -> Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read image: {path}"))?;
    let file_name = std::path::Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image.jpg");

    let spinner = ctx.output.spinner("Uploading image...");
    let message = ctx.storefront.upload_product_image(id, file_name, bytes).await;
    spinner.finish_and_clear();

    ctx.output.success(&message?);
    Ok(())
}

async fn update_user(
    ctx: &Context,
    id: UserId,
    name: String,
    email: String,
    admin: bool,
) -> Result<()> {
    let update = UserUpdate {
        name,
        email,
        is_admin: admin,
    };
    let spinner = ctx.output.spinner("Updating user...");
    ctx.storefront.update_user(id, update).await;
    spinner.finish_and_clear();

    take(ctx.storefront.store().user_update().snapshot())?;
    ctx.output.success("User updated");
    Ok(())
}

async fn delete_user(ctx: &Context, id: UserId) -> Result<()> {
    let spinner = ctx.output.spinner("Deleting user...");
    ctx.storefront.delete_user(id).await;
    spinner.finish_and_clear();

    take(ctx.storefront.store().user_delete().snapshot())?;
    ctx.output.success("User deleted");
    Ok(())
}
