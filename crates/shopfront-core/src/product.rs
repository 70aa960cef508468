//! Product catalog types.

use crate::ids::{ProductId, ReviewId};
use crate::price::{lenient_f64, lenient_opt_f64, Price};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog product as served by the remote API.
///
/// The `reviews` sequence is append-only and managed server-side; the
/// client treats it as read-only except for submitting a new review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned primary key.
    #[serde(rename = "_id", default)]
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Average review rating; absent until the first review lands.
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub num_reviews: i64,
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub count_in_stock: i64,
    /// Defaults to empty so consumers never dereference an absent array.
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Whether at least one unit can be added to a cart.
    pub fn in_stock(&self) -> bool {
        self.count_in_stock > 0
    }
}

/// A customer review. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: ReviewId,
    /// Display name of the reviewer.
    pub name: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub rating: f64,
    #[serde(default)]
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// The payload submitted when creating a review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewDraft {
    /// Star rating, 1..=5 expected by the server.
    pub rating: f64,
    pub comment: String,
}

/// One page of the product list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default = "one")]
    pub page: i64,
    #[serde(default = "one")]
    pub pages: i64,
}

impl Default for ProductPage {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            page: 1,
            pages: 1,
        }
    }
}

fn one() -> i64 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserialize_wire_shape() {
        let json = r#"{
            "_id": 1,
            "name": "Airpods",
            "image": "/images/airpods.jpg",
            "brand": "Apple",
            "category": "Electronics",
            "description": "Bluetooth headphones",
            "rating": "4.5",
            "numReviews": 12,
            "price": "89.99",
            "countInStock": 10
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, ProductId::new(1));
        assert_eq!(p.rating, Some(4.5));
        assert_eq!(p.price.cents(), 8999);
        assert_eq!(p.count_in_stock, 10);
        assert!(p.reviews.is_empty());
    }

    #[test]
    fn test_product_default_has_empty_reviews() {
        let p = Product::default();
        assert!(p.reviews.is_empty());
        assert!(!p.in_stock());
    }

    #[test]
    fn test_product_page_deserialize() {
        let json = r#"{"products": [], "page": 2, "pages": 5}"#;
        let page: ProductPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.pages, 5);
    }

    #[test]
    fn test_review_draft_serialize() {
        let draft = ReviewDraft {
            rating: 5.0,
            comment: "great".to_string(),
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["rating"], 5.0);
        assert_eq!(json["comment"], "great");
    }
}
