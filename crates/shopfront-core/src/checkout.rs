//! Checkout sequencing.
//!
//! A thin state machine over the cart: each stage has an entry
//! precondition evaluated against the cart's checkout fields, and a
//! request to enter a stage whose precondition fails redirects backward
//! to the stage that can satisfy it.

use crate::cart::Cart;
use serde::{Deserialize, Serialize};

/// Postal address collected during checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
}

impl ShippingAddress {
    /// The street line is the one field checkout gates on.
    pub fn has_street(&self) -> bool {
        !self.address.trim().is_empty()
    }
}

/// Stages of the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutStage {
    /// Cart review.
    Cart,
    /// Shipping address entry.
    Shipping,
    /// Payment method selection.
    Payment,
    /// Final review and order placement.
    PlaceOrder,
    /// Order created; tracking hands off to server-authoritative data.
    Confirmation,
}

impl CheckoutStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStage::Cart => "cart",
            CheckoutStage::Shipping => "shipping",
            CheckoutStage::Payment => "payment",
            CheckoutStage::PlaceOrder => "place-order",
            CheckoutStage::Confirmation => "confirmation",
        }
    }

    /// Get the stage number (1-indexed), for progress display.
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStage::Cart => 1,
            CheckoutStage::Shipping => 2,
            CheckoutStage::Payment => 3,
            CheckoutStage::PlaceOrder => 4,
            CheckoutStage::Confirmation => 5,
        }
    }
}

/// Resolve which stage may actually be entered when `requested` is asked
/// for, given the cart's current checkout fields.
///
/// - `Payment` requires a shipping address with a non-blank street line,
///   else the flow is sent back to `Shipping`.
/// - `PlaceOrder` additionally requires a payment method, else back to
///   `Payment` (or `Shipping` if the address is missing too).
/// - `Cart`, `Shipping`, and `Confirmation` have no entry precondition
///   at this layer.
pub fn entry_stage(requested: CheckoutStage, cart: &Cart) -> CheckoutStage {
    let has_address = cart
        .shipping_address
        .as_ref()
        .map(ShippingAddress::has_street)
        .unwrap_or(false);
    let has_payment = cart.payment_method.is_some();

    match requested {
        CheckoutStage::Payment if !has_address => CheckoutStage::Shipping,
        CheckoutStage::PlaceOrder if !has_address => CheckoutStage::Shipping,
        CheckoutStage::PlaceOrder if !has_payment => CheckoutStage::Payment,
        stage => stage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> ShippingAddress {
        ShippingAddress {
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            postal_code: "12345".to_string(),
            country: "US".to_string(),
        }
    }

    #[test]
    fn test_payment_requires_address() {
        let cart = Cart::new();
        assert_eq!(entry_stage(CheckoutStage::Payment, &cart), CheckoutStage::Shipping);
    }

    #[test]
    fn test_blank_street_does_not_satisfy_guard() {
        let mut cart = Cart::new();
        cart.set_shipping_address(ShippingAddress {
            address: "   ".to_string(),
            ..ShippingAddress::default()
        });
        assert_eq!(entry_stage(CheckoutStage::Payment, &cart), CheckoutStage::Shipping);
    }

    #[test]
    fn test_payment_enterable_with_address() {
        let mut cart = Cart::new();
        cart.set_shipping_address(address());
        assert_eq!(entry_stage(CheckoutStage::Payment, &cart), CheckoutStage::Payment);
    }

    #[test]
    fn test_place_order_requires_payment_method() {
        let mut cart = Cart::new();
        cart.set_shipping_address(address());
        assert_eq!(entry_stage(CheckoutStage::PlaceOrder, &cart), CheckoutStage::Payment);

        cart.set_payment_method("PayPal");
        assert_eq!(
            entry_stage(CheckoutStage::PlaceOrder, &cart),
            CheckoutStage::PlaceOrder
        );
    }

    #[test]
    fn test_place_order_with_nothing_set_goes_to_shipping() {
        let cart = Cart::new();
        assert_eq!(entry_stage(CheckoutStage::PlaceOrder, &cart), CheckoutStage::Shipping);
    }

    #[test]
    fn test_unguarded_stages_pass_through() {
        let cart = Cart::new();
        assert_eq!(entry_stage(CheckoutStage::Cart, &cart), CheckoutStage::Cart);
        assert_eq!(entry_stage(CheckoutStage::Shipping, &cart), CheckoutStage::Shipping);
        assert_eq!(
            entry_stage(CheckoutStage::Confirmation, &cart),
            CheckoutStage::Confirmation
        );
    }
}
