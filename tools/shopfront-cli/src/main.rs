//! Shopfront CLI - drive the storefront client from a terminal.
//!
//! Commands:
//! - `shopfront products` - search and inspect the catalog
//! - `shopfront cart` - manage the shopping cart
//! - `shopfront login` / `register` / `logout` / `profile` - session
//! - `shopfront checkout` - shipping, payment, order placement
//! - `shopfront orders` - order history and tracking
//! - `shopfront admin` - product/user/order administration
//!
//! The session and cart persist between invocations through the SDK's
//! durable storage, so a login carries over to later commands.

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    AdminArgs, CartArgs, CheckoutArgs, LoginArgs, OrdersArgs, ProductsArgs, ProfileArgs,
    RegisterArgs,
};

/// Shopfront - a storefront client in your terminal
#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// API base URL (overrides config)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and search the product catalog
    Products(ProductsArgs),

    /// Manage the shopping cart
    Cart(CartArgs),

    /// Log in with an existing account
    Login(LoginArgs),

    /// Create a new account
    Register(RegisterArgs),

    /// Log out and clear the stored session
    Logout,

    /// Show or update the signed-in profile
    Profile(ProfileArgs),

    /// Walk the checkout flow: shipping, payment, place order
    Checkout(CheckoutArgs),

    /// Order history and tracking
    Orders(OrdersArgs),

    /// Administration (requires an admin account)
    Admin(AdminArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = output::Output::new(cli.verbose);
    let ctx = context::Context::load(cli.config.as_deref(), cli.base_url, output)?;

    match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Login(args) => commands::auth::login(args, &ctx).await,
        Commands::Register(args) => commands::auth::register(args, &ctx).await,
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Profile(args) => commands::auth::profile(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Orders(args) => commands::orders::run(args, &ctx).await,
        Commands::Admin(args) => commands::admin::run(args, &ctx).await,
    }
}
