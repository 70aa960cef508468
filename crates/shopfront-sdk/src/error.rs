//! SDK error types.

use shopfront_api::ApiError;
use shopfront_core::{CartError, CheckoutError};
use shopfront_storage::StorageError;
use thiserror::Error;

/// Errors a storefront command can return to its caller.
///
/// Remote failures that travel through a lifecycle slice are *not* here:
/// they are recorded as the slice's `failed` payload and the command
/// still returns `Ok`. What remains is everything local: validation
/// performed before any network call, cart rule violations, storage
/// failures, and the few calls that bypass the lifecycle machine.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Local validation failure; no request was attempted.
    #[error("{0}")]
    Validation(String),
}
