//! Shared error types for the storefront client.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Classification of a failed remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// No usable response reached the client.
    Transport,
    /// The server answered with a non-2xx status.
    Api,
    /// The caller did something wrong before any network I/O.
    Client,
}

/// The normalized failure payload stored in a request slice.
///
/// Both transport and API errors are reduced to a single human-readable
/// message at the remote-client boundary; nothing past that boundary ever
/// sees a raw protocol error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Human-readable message, suitable for direct display.
    pub message: String,
    /// Error classification.
    pub kind: ErrorKind,
    /// HTTP status code, for API errors.
    pub status: Option<u16>,
}

impl ErrorInfo {
    /// A transport-level failure (connection refused, timeout, ...).
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ErrorKind::Transport,
            status: None,
        }
    }

    /// A server-reported failure with an HTTP status.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ErrorKind::Api,
            status: Some(status),
        }
    }

    /// A local caller error; no request was attempted.
    pub fn client(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ErrorKind::Client,
            status: None,
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Errors from cart mutations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Product has no stock at all; a line cannot be created for it.
    #[error("Product {0} is out of stock")]
    OutOfStock(ProductId),

    /// Arithmetic overflow while computing a derived total.
    #[error("Arithmetic overflow in cart total")]
    Overflow,
}

/// Errors from checkout sequencing and order-draft construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Order placement was attempted with no lines in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// A shipping address with a non-blank street line is required.
    #[error("Shipping address is missing")]
    MissingShippingAddress,

    /// A payment method must be chosen before placing the order.
    #[error("Payment method is missing")]
    MissingPaymentMethod,

    /// Arithmetic overflow while quoting the order.
    #[error("Arithmetic overflow in order totals")]
    Overflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_info_constructors() {
        let e = ErrorInfo::api(404, "Product not found");
        assert_eq!(e.kind, ErrorKind::Api);
        assert_eq!(e.status, Some(404));
        assert_eq!(e.to_string(), "Product not found");

        let e = ErrorInfo::transport("connection refused");
        assert_eq!(e.kind, ErrorKind::Transport);
        assert_eq!(e.status, None);
    }

    #[test]
    fn test_cart_error_display() {
        let e = CartError::OutOfStock(ProductId::new(3));
        assert_eq!(e.to_string(), "Product 3 is out of stock");
    }
}
