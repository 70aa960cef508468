//! Shopfront SDK - the storefront's command layer.
//!
//! Every UI-originated intent is a method on [`Storefront`]: load a
//! product page, add to the cart, log in, place an order. Commands that
//! touch the network run through the request lifecycle machine and land
//! in one slice of the observable [`Store`](shopfront_state::Store);
//! commands that touch the cart run synchronously through the cart
//! aggregate and re-persist its snapshot. Presentation layers read the
//! store and subscribe to its change events; they never talk to the API
//! client directly.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_sdk::Storefront;
//! use shopfront_storage::MemoryStore;
//!
//! let shop = Storefront::builder("http://localhost:8000")
//!     .storage(MemoryStore::new())
//!     .build()?;
//!
//! shop.load_products("").await;
//! if let Some(page) = shop.store().product_list().data() {
//!     println!("{} products", page.products.len());
//! }
//! ```

mod error;
mod storefront;

pub use error::SdkError;
pub use storefront::{Storefront, StorefrontBuilder};

// The SDK surface re-exports the types its methods exchange, so most
// consumers depend on this crate alone.
pub use shopfront_api::{ApiClient, ApiError, PaymentResult, ProductUpdate, ProfileUpdate, UserUpdate};
pub use shopfront_core::{
    Cart, CartLine, CheckoutStage, ErrorInfo, ErrorKind, Order, OrderDraft, OrderId, Price,
    Product, ProductId, ProductPage, Review, ReviewDraft, ShippingAddress, UserId, UserProfile,
    UserSession,
};
pub use shopfront_state::{BeginPolicy, RequestState, SliceKey, Status, Store};
pub use shopfront_storage::{DurableStore, FileStore, MemoryStore, Slot};
