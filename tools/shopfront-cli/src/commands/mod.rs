//! Command implementations.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;

pub use admin::AdminArgs;
pub use auth::{LoginArgs, ProfileArgs, RegisterArgs};
pub use cart::CartArgs;
pub use checkout::CheckoutArgs;
pub use orders::OrdersArgs;
pub use products::ProductsArgs;
