//! Shopfront Core - domain data model for the storefront client.
//!
//! Everything the remote REST API exchanges with the client lives here:
//! products, reviews, users, orders, the shopping cart aggregate, and the
//! checkout sequencing machine. Wire shapes mirror the server's JSON
//! (camelCase keys, integer `_id` primary keys, decimal prices that may
//! arrive as numbers or strings).
//!
//! This crate is pure data and pure logic: no I/O, no async, no global
//! state. The synchronization layer (`shopfront-state`, `shopfront-sdk`)
//! builds on top of it.

pub mod cart;
pub mod checkout;
pub mod error;
pub mod ids;
pub mod order;
pub mod price;
pub mod product;
pub mod user;

pub use cart::{Cart, CartLine};
pub use checkout::{CheckoutStage, ShippingAddress};
pub use error::{CartError, CheckoutError, ErrorInfo, ErrorKind};
pub use ids::{OrderId, ProductId, ReviewId, UserId};
pub use order::{Order, OrderDraft};
pub use price::Price;
pub use product::{Product, ProductPage, Review, ReviewDraft};
pub use user::{UserProfile, UserSession};
