//! Shopping cart aggregate.
//!
//! The cart owns the list of line items and enforces the two invariants
//! the storefront relies on: at most one line per product, and quantities
//! clamped to the stock snapshot taken at the moment of the write.
//! Derived totals are always recomputed, never stored.

use crate::checkout::ShippingAddress;
use crate::error::CartError;
use crate::ids::ProductId;
use crate::price::Price;
use crate::product::Product;
use serde::{Deserialize, Serialize};

/// One product-quantity pairing in the cart.
///
/// `count_in_stock` is a cached snapshot taken when the line was last
/// written; it bounds the quantity selector but is not authoritative.
/// The server re-validates stock at order placement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// The product this line refers to.
    pub product: ProductId,
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub price: Price,
    #[serde(default)]
    pub count_in_stock: i64,
    pub qty: i64,
}

/// The shopping cart: line items plus checkout fields filled in along the
/// way. Persisted wholesale to the `cart` durable slot after every
/// mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default)]
    pub lines: Vec<CartLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<ShippingAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line for `product`, or replace the quantity of the existing
    /// line. The quantity is the absolute desired amount from the
    /// selector, never a delta, and is clamped to `[1, count_in_stock]`
    /// (clamp-to-max policy). Returns the quantity actually written.
    ///
    /// A product with no stock at all is rejected rather than clamped.
    pub fn upsert_line(&mut self, product: &Product, qty: i64) -> Result<i64, CartError> {
        if product.count_in_stock <= 0 {
            return Err(CartError::OutOfStock(product.id));
        }
        let qty = qty.clamp(1, product.count_in_stock);

        if let Some(line) = self.lines.iter_mut().find(|l| l.product == product.id) {
            line.name = product.name.clone();
            line.image = product.image.clone();
            line.price = product.price;
            line.count_in_stock = product.count_in_stock;
            line.qty = qty;
        } else {
            self.lines.push(CartLine {
                product: product.id,
                name: product.name.clone(),
                image: product.image.clone(),
                price: product.price,
                count_in_stock: product.count_in_stock,
                qty,
            });
        }
        Ok(qty)
    }

    /// Remove the line for `product`. Absent lines are a no-op, not an
    /// error.
    pub fn remove_line(&mut self, product: ProductId) {
        self.lines.retain(|l| l.product != product);
    }

    /// Empty all lines, keeping the shipping/payment fields. Used after
    /// successful order placement.
    pub fn clear_lines(&mut self) {
        self.lines.clear();
    }

    /// Set the shipping address for checkout.
    pub fn set_shipping_address(&mut self, address: ShippingAddress) {
        self.shipping_address = Some(address);
    }

    /// Set the payment method for checkout.
    pub fn set_payment_method(&mut self, method: impl Into<String>) {
        self.payment_method = Some(method.into());
    }

    /// Look up the line for a product.
    pub fn line(&self, product: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product == product)
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.qty).sum()
    }

    /// Sum of `qty * price` across all lines.
    pub fn subtotal(&self) -> Result<Price, CartError> {
        let mut total = Price::zero();
        for line in &self.lines {
            let line_total = line.price.checked_mul(line.qty).ok_or(CartError::Overflow)?;
            total = total.checked_add(line_total).ok_or(CartError::Overflow)?;
        }
        Ok(total)
    }
}
