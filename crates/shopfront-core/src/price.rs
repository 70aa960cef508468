//! Price type for monetary values.
//!
//! Uses a cents-based integer representation to avoid floating-point
//! precision issues. On the wire the remote API represents prices as
//! decimal values that may arrive either as JSON numbers or as strings
//! (the server serializes its decimal column type as a string), so the
//! deserializer accepts both.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A monetary value in a single implicit currency.
///
/// Amounts are stored in cents. Serializes as a two-decimal JSON number;
/// deserializes from a number or a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Price {
    cents: i64,
}

impl Price {
    /// Create a Price from cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Create a Price from a decimal amount.
    ///
    /// ```
    /// use shopfront_core::price::Price;
    /// let p = Price::from_decimal(49.99);
    /// assert_eq!(p.cents(), 4999);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self {
            cents: (amount * 100.0).round() as i64,
        }
    }

    /// A zero amount.
    pub const fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Get the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// Checked addition.
    pub fn checked_add(&self, other: Price) -> Option<Price> {
        self.cents.checked_add(other.cents).map(Price::from_cents)
    }

    /// Checked multiplication by a quantity.
    pub fn checked_mul(&self, qty: i64) -> Option<Price> {
        self.cents.checked_mul(qty).map(Price::from_cents)
    }

    /// Apply a percentage (e.g. tax), rounding to the nearest cent.
    pub fn percentage(&self, percent: f64) -> Price {
        Price::from_cents((self.cents as f64 * percent / 100.0).round() as i64)
    }

    /// Checked sum of an iterator of prices.
    pub fn checked_sum(iter: impl Iterator<Item = Price>) -> Option<Price> {
        let mut total = Price::zero();
        for p in iter {
            total = total.checked_add(p)?;
        }
        Some(total)
    }

    /// Format without the currency symbol (e.g. "49.99").
    pub fn display_amount(&self) -> String {
        format!("{:.2}", self.to_decimal())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.to_decimal())
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}

struct PriceVisitor;

impl<'de> Visitor<'de> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal price as a number or string")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
        Ok(Price::from_decimal(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
        v.checked_mul(100)
            .map(Price::from_cents)
            .ok_or_else(|| E::custom("price out of range"))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
        i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(100))
            .map(Price::from_cents)
            .ok_or_else(|| E::custom("price out of range"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Price, E> {
        v.trim()
            .parse::<f64>()
            .map(Price::from_decimal)
            .map_err(|_| E::custom(format!("invalid price string: {v:?}")))
    }
}

/// Deserialize a rating-like decimal that may arrive as a number, a
/// string, or null.
pub fn lenient_opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Num(v)) => Ok(Some(v)),
        Some(Raw::Text(s)) => Ok(s.trim().parse::<f64>().ok()),
    }
}

/// Deserialize a required rating-like decimal from a number or string.
pub fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    lenient_opt_f64(deserializer)?.ok_or_else(|| de::Error::custom("expected a decimal value"))
}
