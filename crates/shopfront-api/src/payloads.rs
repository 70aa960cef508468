//! Request body shapes for mutating endpoints.

use serde::{Deserialize, Serialize};
use shopfront_core::Price;

/// Fields sent when updating a product (admin).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: String,
    pub price: Price,
    pub brand: String,
    pub category: String,
    pub count_in_stock: i64,
    pub description: String,
}

/// Fields sent when updating the caller's own profile. The password is
/// omitted entirely when unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Fields an admin can change on another user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

/// The payment provider's confirmation, forwarded verbatim when marking
/// an order paid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentResult {
    pub id: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_update_wire_keys() {
        let body = ProductUpdate {
            name: "Widget".to_string(),
            price: Price::from_cents(1999),
            brand: "Acme".to_string(),
            category: "Tools".to_string(),
            count_in_stock: 5,
            description: "A widget".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["countInStock"], 5);
        assert_eq!(json["price"], 19.99);
    }

    #[test]
    fn test_profile_update_omits_unchanged_password() {
        let body = ProfileUpdate {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            password: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("password").is_none());
    }
}
