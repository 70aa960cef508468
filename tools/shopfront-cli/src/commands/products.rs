//! Browse and search the product catalog.

use crate::context::{take, Context};
use anyhow::Result;
use clap::{Args, Subcommand};
use shopfront_sdk::{Product, ProductId, ReviewDraft};

#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// Search the catalog by keyword
    Search {
        /// Keyword to search for (empty lists everything)
        #[arg(default_value = "")]
        keyword: String,

        /// Result page
        #[arg(long, default_value_t = 1)]
        page: i64,
    },

    /// Show one product with its reviews
    Show {
        /// Product ID
        id: i64,
    },

    /// Show the top-rated products
    Top,

    /// Submit a review for a product (requires login)
    Review {
        /// Product ID
        id: i64,

        /// Star rating, 1-5
        #[arg(long)]
        rating: f64,

        /// Review text
        #[arg(long, default_value = "")]
        comment: String,
    },
}

pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ProductsCommand::Search { keyword, page } => search(ctx, &keyword, page).await,
        ProductsCommand::Show { id } => show(ctx, ProductId::new(id)).await,
        ProductsCommand::Top => top(ctx).await,
        ProductsCommand::Review { id, rating, comment } => {
            review(ctx, ProductId::new(id), rating, comment).await
        }
    }
}

async fn review(ctx: &Context, id: ProductId, rating: f64, comment: String) -> Result<()> {
    let spinner = ctx.output.spinner("Submitting review...");
    ctx.storefront
        .submit_review(id, ReviewDraft { rating, comment })
        .await;
    spinner.finish_and_clear();

    take(ctx.storefront.store().review_create().snapshot())?;
    ctx.output.success("Review submitted");
    Ok(())
}

/// Build the product-list query string, percent-encoding the keyword so
/// characters like `&` or `#` cannot truncate it.
fn search_query(keyword: &str, page: i64) -> String {
    let params = form_urlencoded::Serializer::new(String::new())
        .append_pair("keyword", keyword)
        .append_pair("page", &page.to_string())
        .finish();
    format!("?{params}")
}

async fn search(ctx: &Context, keyword: &str, page: i64) -> Result<()> {
    let query = search_query(keyword, page);
    let spinner = ctx.output.spinner("Searching products...");
    ctx.storefront.load_products(&query).await;
    spinner.finish_and_clear();

    let page = take(ctx.storefront.store().product_list().snapshot())?;
    ctx.output.header(&format!(
        "Products (page {}/{})",
        page.page, page.pages
    ));
    if page.products.is_empty() {
        ctx.output.info("No products found");
        return Ok(());
    }
    for product in &page.products {
        print_line(ctx, product);
    }
    Ok(())
}

async fn show(ctx: &Context, id: ProductId) -> Result<()> {
    let spinner = ctx.output.spinner("Loading product...");
    ctx.storefront.load_product(id).await;
    spinner.finish_and_clear();

    let product = take(ctx.storefront.store().product_detail().snapshot())?;
    ctx.output.header(&product.name);
    ctx.output.kv("Brand", &product.brand);
    ctx.output.kv("Category", &product.category);
    ctx.output.kv("Price", &product.price.to_string());
    ctx.output.kv("In stock", &product.count_in_stock.to_string());
    ctx.output.kv(
        "Rating",
        &match product.rating {
            Some(r) => format!("{r:.1} ({} reviews)", product.num_reviews),
            None => "no reviews yet".to_string(),
        },
    );
    if !product.description.is_empty() {
        println!("\n{}", product.description);
    }
    if !product.reviews.is_empty() {
        ctx.output.header("Reviews");
        for review in &product.reviews {
            println!("  {:.0}★ {}: {}", review.rating, review.name, review.comment);
        }
    }
    Ok(())
}

async fn top(ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading top products...");
    ctx.storefront.load_top_products().await;
    spinner.finish_and_clear();

    let products = take(ctx.storefront.store().top_products().snapshot())?;
    ctx.output.header("Top rated");
    for product in &products {
        print_line(ctx, product);
    }
    Ok(())
}

fn print_line(ctx: &Context, product: &Product) {
    ctx.output.kv(
        &format!("#{}", product.id),
        &format!(
            "{}  {}  ({} in stock)",
            product.name, product.price, product.count_in_stock
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_plain_keyword() {
        assert_eq!(search_query("phone", 1), "?keyword=phone&page=1");
        assert_eq!(search_query("", 3), "?keyword=&page=3");
    }

    #[test]
    fn test_search_query_encodes_reserved_characters() {
        assert_eq!(search_query("a&b #c", 2), "?keyword=a%26b+%23c&page=2");
    }
}
