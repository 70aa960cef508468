//! Typed endpoint methods, one per remote operation.

use crate::payloads::{PaymentResult, ProductUpdate, ProfileUpdate, UserUpdate};
use crate::{ApiClient, ApiError};
use http::Method;
use serde_json::json;
use shopfront_core::{
    Order, OrderDraft, OrderId, Product, ProductId, ProductPage, ReviewDraft, UserId, UserProfile,
    UserSession,
};

impl ApiClient {
    // --- products -------------------------------------------------------

    /// List products. `query` is an opaque passthrough query string such
    /// as `?keyword=phone&page=2` (or empty).
    pub async fn list_products(&self, query: &str) -> Result<ProductPage, ApiError> {
        self.execute(self.start(Method::GET, &format!("/api/products{query}")))
            .await
    }

    /// The top-rated products carousel payload.
    pub async fn top_products(&self) -> Result<Vec<Product>, ApiError> {
        self.execute(self.start(Method::GET, "/api/products/top/")).await
    }

    pub async fn product_detail(&self, id: ProductId) -> Result<Product, ApiError> {
        self.execute(self.start(Method::GET, &format!("/api/products/{id}")))
            .await
    }

    /// Create a product with server defaults (admin). The server returns
    /// the new product ready for editing.
    pub async fn create_product(&self, token: Option<&str>) -> Result<Product, ApiError> {
        let request = self.start_authed(Method::POST, "/api/products/create/", token)?;
        self.execute(request).await
    }

    pub async fn update_product(
        &self,
        token: Option<&str>,
        id: ProductId,
        update: &ProductUpdate,
    ) -> Result<Product, ApiError> {
        let request = self
            .start_authed(Method::PUT, &format!("/api/products/update/{id}/"), token)?
            .json(update);
        self.execute(request).await
    }

    pub async fn delete_product(&self, token: Option<&str>, id: ProductId) -> Result<(), ApiError> {
        let request =
            self.start_authed(Method::DELETE, &format!("/api/products/delete/{id}/"), token)?;
        self.execute_empty(request).await
    }

    /// Upload a product image as `multipart/form-data` with `image` and
    /// `product_id` fields. Returns the server's confirmation text.
    pub async fn upload_product_image(
        &self,
        id: ProductId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new()
            .text("product_id", id.to_string())
            .part("image", part);
        let request = self.start(Method::POST, "/api/products/upload/").multipart(form);
        self.execute_text(request).await
    }

    pub async fn create_review(
        &self,
        token: Option<&str>,
        id: ProductId,
        review: &ReviewDraft,
    ) -> Result<(), ApiError> {
        let request = self
            .start_authed(Method::POST, &format!("/api/products/{id}/reviews/"), token)?
            .json(review);
        self.execute_empty(request).await
    }

    // --- users ----------------------------------------------------------

    /// Exchange credentials for a session payload (profile + token). The
    /// server authenticates by username, which is the email.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserSession, ApiError> {
        let request = self
            .start(Method::POST, "/api/users/login")
            .json(&json!({ "username": email, "password": password }));
        self.execute(request).await
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserSession, ApiError> {
        let request = self
            .start(Method::POST, "/api/users/register")
            .json(&json!({ "name": name, "email": email, "password": password }));
        self.execute(request).await
    }

    pub async fn user_detail(
        &self,
        token: Option<&str>,
        id: UserId,
    ) -> Result<UserProfile, ApiError> {
        let request = self.start_authed(Method::GET, &format!("/api/users/{id}/"), token)?;
        self.execute(request).await
    }

    /// Update the caller's own profile. Returns a fresh session payload
    /// (the token is reissued when the password changes).
    pub async fn update_profile(
        &self,
        token: Option<&str>,
        update: &ProfileUpdate,
    ) -> Result<UserSession, ApiError> {
        let request = self
            .start_authed(Method::PUT, "/api/users/profile/update/", token)?
            .json(update);
        self.execute(request).await
    }

    pub async fn list_users(&self, token: Option<&str>) -> Result<Vec<UserProfile>, ApiError> {
        let request = self.start_authed(Method::GET, "/api/users/", token)?;
        self.execute(request).await
    }

    pub async fn update_user(
        &self,
        token: Option<&str>,
        id: UserId,
        update: &UserUpdate,
    ) -> Result<UserProfile, ApiError> {
        let request = self
            .start_authed(Method::PUT, &format!("/api/users/update/{id}/"), token)?
            .json(update);
        self.execute(request).await
    }

    pub async fn delete_user(&self, token: Option<&str>, id: UserId) -> Result<(), ApiError> {
        let request =
            self.start_authed(Method::DELETE, &format!("/api/users/delete/{id}/"), token)?;
        self.execute_empty(request).await
    }

    // --- orders ---------------------------------------------------------

    /// Place an order from a client-side draft. The server revalidates
    /// stock and totals and returns the authoritative order.
    pub async fn place_order(
        &self,
        token: Option<&str>,
        draft: &OrderDraft,
    ) -> Result<Order, ApiError> {
        let request = self
            .start_authed(Method::POST, "/api/orders/add/", token)?
            .json(draft);
        self.execute(request).await
    }

    pub async fn order_detail(&self, token: Option<&str>, id: OrderId) -> Result<Order, ApiError> {
        let request = self.start_authed(Method::GET, &format!("/api/orders/{id}/"), token)?;
        self.execute(request).await
    }

    /// The caller's own order history.
    pub async fn my_orders(&self, token: Option<&str>) -> Result<Vec<Order>, ApiError> {
        let request = self.start_authed(Method::GET, "/api/orders/myorders/", token)?;
        self.execute(request).await
    }

    /// All orders (admin).
    pub async fn all_orders(&self, token: Option<&str>) -> Result<Vec<Order>, ApiError> {
        let request = self.start_authed(Method::GET, "/api/orders/", token)?;
        self.execute(request).await
    }

    /// Mark an order paid, forwarding the payment provider's result.
    pub async fn pay_order(
        &self,
        token: Option<&str>,
        id: OrderId,
        payment: &PaymentResult,
    ) -> Result<(), ApiError> {
        let request = self
            .start_authed(Method::PUT, &format!("/api/orders/{id}/pay/"), token)?
            .json(payment);
        self.execute_empty(request).await
    }

    /// Mark an order delivered (admin).
    pub async fn deliver_order(&self, token: Option<&str>, id: OrderId) -> Result<(), ApiError> {
        let request =
            self.start_authed(Method::PUT, &format!("/api/orders/{id}/deliver/"), token)?;
        self.execute_empty(request).await
    }
}
