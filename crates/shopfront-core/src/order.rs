//! Order types.
//!
//! Orders are server-authoritative: once placed, the client mirrors what
//! the server returns and never recomputes the stored totals. The one
//! exception is `items_price`, which is derived locally from the line
//! items for display before the full order round-trips.

use crate::cart::{Cart, CartLine};
use crate::checkout::ShippingAddress;
use crate::error::CheckoutError;
use crate::ids::OrderId;
use crate::price::Price;
use crate::user::UserProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An order as served by the remote API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    #[serde(default)]
    pub order_items: Vec<CartLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<ShippingAddress>,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub shipping_price: Price,
    #[serde(default)]
    pub tax_price: Price,
    #[serde(default)]
    pub total_price: Price,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_delivered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Present on admin order listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

impl Order {
    /// Items subtotal derived from the line items. Saturates on overflow
    /// rather than failing a display path.
    pub fn items_price(&self) -> Price {
        self.order_items
            .iter()
            .filter_map(|l| l.price.checked_mul(l.qty))
            .fold(Price::zero(), |acc, p| {
                acc.checked_add(p).unwrap_or(acc)
            })
    }
}

/// Flat shipping charge below the free-shipping threshold.
pub const SHIPPING_FLAT: Price = Price::from_cents(1000);
/// Orders at or above this items subtotal ship free.
pub const FREE_SHIPPING_THRESHOLD: Price = Price::from_cents(10_000);
/// Sales tax applied to the items subtotal, in percent.
pub const TAX_RATE_PERCENT: f64 = 8.2;

/// The order-placement payload, quoted client-side from the cart.
///
/// These values are drafts for display and submission; the server
/// revalidates every one of them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub order_items: Vec<CartLine>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub items_price: Price,
    pub shipping_price: Price,
    pub tax_price: Price,
    pub total_price: Price,
}

impl OrderDraft {
    /// Quote an order from the cart: items subtotal, $10 flat shipping
    /// waived at or over $100, 8.2% tax on items, and the grand total.
    ///
    /// Fails before any network I/O when the cart is empty or checkout
    /// fields are missing.
    pub fn from_cart(cart: &Cart) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let shipping_address = cart
            .shipping_address
            .clone()
            .filter(ShippingAddress::has_street)
            .ok_or(CheckoutError::MissingShippingAddress)?;
        let payment_method = cart
            .payment_method
            .clone()
            .ok_or(CheckoutError::MissingPaymentMethod)?;

        let items_price = cart.subtotal().map_err(|_| CheckoutError::Overflow)?;
        let shipping_price = if items_price >= FREE_SHIPPING_THRESHOLD {
            Price::zero()
        } else {
            SHIPPING_FLAT
        };
        let tax_price = items_price.percentage(TAX_RATE_PERCENT);
        let total_price = Price::checked_sum([items_price, shipping_price, tax_price].into_iter())
            .ok_or(CheckoutError::Overflow)?;

        Ok(Self {
            order_items: cart.lines.clone(),
            shipping_address,
            payment_method,
            items_price,
            shipping_price,
            tax_price,
            total_price,
        })
    }
}
