//! Shopfront State - the client-side state synchronization layer.
//!
//! Every remote resource the storefront touches moves through the same
//! request lifecycle: `idle -> pending -> (fulfilled | failed)`, with an
//! explicit reset back to `idle`. This crate provides that machine once,
//! generically ([`RequestState`], [`Slice`]), and instantiates it per
//! resource in one typed, observable [`Store`].
//!
//! Slices are fully independent: no cross-slice locking, transitions
//! applied in completion order, and stale completions (superseded by a
//! newer `begin` or a reset) are dropped by a per-slice generation guard.

mod notify;
mod request;
mod slice;
mod store;

pub use notify::{Notifier, SliceKey};
pub use request::{BeginPolicy, RequestState, Status};
pub use slice::{RequestToken, Slice};
pub use store::Store;
