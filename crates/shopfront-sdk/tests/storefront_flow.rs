//! End-to-end command tests against a loopback mock of the remote API.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use shopfront_sdk::{
    CheckoutStage, ErrorKind, FileStore, ProductId, ShippingAddress, SliceKey, Status, Storefront,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const TOKEN: &str = "test-token";

fn product_json(id: i64, price: &str, stock: i64) -> Value {
    json!({
        "_id": id,
        "name": format!("Product {id}"),
        "image": format!("/images/{id}.jpg"),
        "brand": "Acme",
        "category": "Things",
        "description": "A thing",
        "rating": "4.5",
        "numReviews": 2,
        "price": price,
        "countInStock": stock,
        "reviews": []
    })
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {TOKEN}"))
        .unwrap_or(false)
}

#[derive(Clone, Default)]
struct MockState {
    orders_placed: Arc<AtomicUsize>,
}

fn mock_api(state: MockState) -> Router {
    Router::new()
        .route(
            "/api/products",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let keyword = params.get("keyword").cloned().unwrap_or_default();
                let products = if keyword == "missing" {
                    vec![]
                } else {
                    vec![product_json(1, "10.00", 10), product_json(2, "5.00", 4)]
                };
                Json(json!({ "products": products, "page": 1, "pages": 3 }))
            }),
        )
        .route(
            "/api/products/{id}",
            get(|Path(id): Path<i64>| async move {
                match id {
                    1 => Json(product_json(1, "10.00", 10)).into_response(),
                    2 => Json(product_json(2, "5.00", 4)).into_response(),
                    _ => (
                        StatusCode::NOT_FOUND,
                        Json(json!({ "detail": "Product not found" })),
                    )
                        .into_response(),
                }
            }),
        )
        .route(
            "/api/users/login",
            post(|Json(body): Json<Value>| async move {
                if body["username"] == "jane@example.com" && body["password"] == "secret" {
                    Json(json!({
                        "_id": 1,
                        "username": "jane@example.com",
                        "email": "jane@example.com",
                        "name": "Jane",
                        "isAdmin": true,
                        "token": TOKEN
                    }))
                    .into_response()
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "detail": "Invalid username or password" })),
                    )
                        .into_response()
                }
            }),
        )
        .route(
            "/api/users/",
            get(|headers: HeaderMap| async move {
                if !authorized(&headers) {
                    return (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "detail": "Not authorized" })),
                    )
                        .into_response();
                }
                Json(json!([
                    { "_id": 1, "username": "jane@example.com", "email": "jane@example.com",
                      "name": "Jane", "isAdmin": true }
                ]))
                .into_response()
            }),
        )
        .route(
            "/api/products/upload/",
            post(|headers: HeaderMap, body: axum::body::Bytes| async move {
                let content_type = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default();
                let body = String::from_utf8_lossy(&body);
                if !content_type.starts_with("multipart/form-data")
                    || !body.contains("name=\"product_id\"")
                    || !body.contains("name=\"image\"")
                {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(json!({ "detail": "Malformed upload" })),
                    )
                        .into_response();
                }
                "Image was uploaded".into_response()
            }),
        )
        .route(
            "/api/orders/add/",
            post(
                |State(state): State<MockState>, headers: HeaderMap, Json(draft): Json<Value>| async move {
                    if !authorized(&headers) {
                        return (
                            StatusCode::UNAUTHORIZED,
                            Json(json!({ "detail": "Not authorized" })),
                        )
                            .into_response();
                    }
                    state.orders_placed.fetch_add(1, Ordering::SeqCst);
                    Json(json!({
                        "_id": 100,
                        "orderItems": draft["orderItems"],
                        "shippingAddress": draft["shippingAddress"],
                        "paymentMethod": draft["paymentMethod"],
                        "taxPrice": draft["taxPrice"],
                        "shippingPrice": draft["shippingPrice"],
                        "totalPrice": draft["totalPrice"],
                        "isPaid": false,
                        "isDelivered": false
                    }))
                    .into_response()
                },
            ),
        )
        .with_state(state)
}

async fn spawn_api(state: MockState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, mock_api(state)).await.unwrap();
    });
    format!("http://{addr}")
}

fn storefront(base_url: &str, dir: &std::path::Path) -> Storefront {
    Storefront::builder(base_url)
        .storage(FileStore::new(dir.join("store")).unwrap())
        .build()
        .unwrap()
}

#[tokio::test]
async fn product_list_lifecycle_fulfills_with_pagination() {
    let base = spawn_api(MockState::default()).await;
    let tmp = tempfile::tempdir().unwrap();
    let shop = storefront(&base, tmp.path());

    assert_eq!(shop.store().product_list().status(), Status::Idle);
    shop.load_products("?keyword=phone").await;

    let state = shop.store().product_list().snapshot();
    assert_eq!(state.status, Status::Fulfilled);
    let page = state.data.unwrap();
    assert_eq!(page.products.len(), 2);
    assert_eq!(page.pages, 3);
}

#[tokio::test]
async fn api_failure_surfaces_detail_in_slice() {
    let base = spawn_api(MockState::default()).await;
    let tmp = tempfile::tempdir().unwrap();
    let shop = storefront(&base, tmp.path());

    shop.load_product(ProductId::new(999)).await;

    let state = shop.store().product_detail().snapshot();
    assert_eq!(state.status, Status::Failed);
    let error = state.error.unwrap();
    assert_eq!(error.message, "Product not found");
    assert_eq!(error.kind, ErrorKind::Api);
    assert_eq!(error.status, Some(404));
}

#[tokio::test]
async fn transport_failure_surfaces_as_transport_error() {
    // Nothing is listening on this port.
    let tmp = tempfile::tempdir().unwrap();
    let shop = storefront("http://127.0.0.1:1", tmp.path());

    shop.load_top_products().await;

    let error = shop.store().top_products().error().unwrap();
    assert_eq!(error.kind, ErrorKind::Transport);
}

#[tokio::test]
async fn login_then_logout_cascades_resets() {
    let base = spawn_api(MockState::default()).await;
    let tmp = tempfile::tempdir().unwrap();
    let shop = storefront(&base, tmp.path());

    shop.login("jane@example.com", "secret").await.unwrap();
    assert_eq!(shop.store().session().status(), Status::Fulfilled);
    assert!(shop.store().is_admin());

    shop.load_users().await;
    assert_eq!(shop.store().user_list().status(), Status::Fulfilled);
    assert_eq!(shop.store().user_list().data().unwrap().len(), 1);

    shop.logout().unwrap();
    assert_eq!(shop.store().session().status(), Status::Idle);
    assert_eq!(shop.store().user_list().status(), Status::Idle);
    assert_eq!(shop.store().user_list().data(), None);
    assert_eq!(shop.store().my_orders().status(), Status::Idle);

    // The session slot is gone: a fresh storefront starts anonymous.
    let shop2 = storefront(&base, tmp.path());
    assert_eq!(shop2.store().auth_token(), None);
}

#[tokio::test]
async fn rejected_login_records_failure_and_persists_nothing() {
    let base = spawn_api(MockState::default()).await;
    let tmp = tempfile::tempdir().unwrap();
    let shop = storefront(&base, tmp.path());

    shop.login("jane@example.com", "wrong").await.unwrap();

    let state = shop.store().session().snapshot();
    assert_eq!(state.status, Status::Failed);
    assert_eq!(state.error.unwrap().message, "Invalid username or password");

    let shop2 = storefront(&base, tmp.path());
    assert_eq!(shop2.store().auth_token(), None);
}

#[tokio::test]
async fn protected_call_without_token_is_client_error() {
    let base = spawn_api(MockState::default()).await;
    let tmp = tempfile::tempdir().unwrap();
    let shop = storefront(&base, tmp.path());

    shop.load_users().await;

    let error = shop.store().user_list().error().unwrap();
    assert_eq!(error.kind, ErrorKind::Client);
}

#[tokio::test]
async fn add_to_cart_clamps_and_persists() {
    let base = spawn_api(MockState::default()).await;
    let tmp = tempfile::tempdir().unwrap();
    let shop = storefront(&base, tmp.path());

    // Product 2 has countInStock = 4.
    shop.add_to_cart(ProductId::new(2), 99).await.unwrap();
    let cart = shop.store().cart();
    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.lines[0].qty, 4);

    // Absolute upsert, not additive.
    shop.add_to_cart(ProductId::new(2), 2).await.unwrap();
    assert_eq!(shop.store().cart().lines.len(), 1);
    assert_eq!(shop.store().cart().lines[0].qty, 2);

    // The persisted snapshot survives a restart.
    let shop2 = storefront(&base, tmp.path());
    let restored = shop2.store().cart();
    assert_eq!(restored.lines.len(), 1);
    assert_eq!(restored.lines[0].qty, 2);
    assert_eq!(restored.item_count(), 2);
}

#[tokio::test]
async fn checkout_flow_guards_and_order_placement_clears_cart() {
    let state = MockState::default();
    let placed = state.orders_placed.clone();
    let base = spawn_api(state).await;
    let tmp = tempfile::tempdir().unwrap();
    let shop = storefront(&base, tmp.path());

    shop.login("jane@example.com", "secret").await.unwrap();
    shop.add_to_cart(ProductId::new(1), 2).await.unwrap();

    // Payment is not enterable until a shipping address exists.
    assert_eq!(shop.checkout_stage(CheckoutStage::Payment), CheckoutStage::Shipping);

    shop.set_shipping_address(ShippingAddress {
        address: "1 Main St".to_string(),
        city: "Springfield".to_string(),
        postal_code: "12345".to_string(),
        country: "US".to_string(),
    })
    .unwrap();
    assert_eq!(shop.checkout_stage(CheckoutStage::Payment), CheckoutStage::Payment);
    assert_eq!(shop.checkout_stage(CheckoutStage::PlaceOrder), CheckoutStage::Payment);

    shop.set_payment_method("PayPal").unwrap();
    assert_eq!(
        shop.checkout_stage(CheckoutStage::PlaceOrder),
        CheckoutStage::PlaceOrder
    );

    shop.place_order().await.unwrap();
    assert_eq!(placed.load(Ordering::SeqCst), 1);
    assert_eq!(shop.store().order_create().status(), Status::Fulfilled);
    let order = shop.store().order_create().data().unwrap();
    assert_eq!(order.order_items.len(), 1);

    // Order placement empties the cart, durably.
    assert!(shop.store().cart().is_empty());
    let shop2 = storefront(&base, tmp.path());
    assert!(shop2.store().cart().is_empty());
}

#[tokio::test]
async fn place_order_with_empty_cart_fails_locally() {
    let state = MockState::default();
    let placed = state.orders_placed.clone();
    let base = spawn_api(state).await;
    let tmp = tempfile::tempdir().unwrap();
    let shop = storefront(&base, tmp.path());

    let err = shop.place_order().await.unwrap_err();
    assert!(err.to_string().contains("empty"), "unexpected error: {err}");
    // No request reached the server and the slice never left idle.
    assert_eq!(placed.load(Ordering::SeqCst), 0);
    assert_eq!(shop.store().order_create().status(), Status::Idle);
}

#[tokio::test]
async fn register_password_mismatch_is_local_validation() {
    let base = spawn_api(MockState::default()).await;
    let tmp = tempfile::tempdir().unwrap();
    let shop = storefront(&base, tmp.path());

    let err = shop
        .register("Jane", "jane@example.com", "secret", "different")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Passwords do not match");
    // Bypassed the lifecycle machine entirely.
    assert_eq!(shop.store().session().status(), Status::Idle);
}

#[tokio::test]
async fn session_restores_across_restarts() {
    let base = spawn_api(MockState::default()).await;
    let tmp = tempfile::tempdir().unwrap();
    {
        let shop = storefront(&base, tmp.path());
        shop.login("jane@example.com", "secret").await.unwrap();
    }
    let shop = storefront(&base, tmp.path());
    assert_eq!(shop.store().auth_token().as_deref(), Some(TOKEN));
    assert_eq!(shop.store().session().status(), Status::Fulfilled);

    // And the restored token works for protected calls.
    shop.load_users().await;
    assert_eq!(shop.store().user_list().status(), Status::Fulfilled);
}

#[tokio::test]
async fn image_upload_sends_multipart_form() {
    let base = spawn_api(MockState::default()).await;
    let tmp = tempfile::tempdir().unwrap();
    let shop = storefront(&base, tmp.path());

    let message = shop
        .upload_product_image(ProductId::new(1), "photo.jpg", b"not a real jpeg".to_vec())
        .await
        .unwrap();
    assert_eq!(message, "Image was uploaded");
}

#[tokio::test]
async fn store_publishes_change_events() {
    let base = spawn_api(MockState::default()).await;
    let tmp = tempfile::tempdir().unwrap();
    let shop = storefront(&base, tmp.path());

    let events = Arc::new(event_log::EventLog::default());
    {
        let events = events.clone();
        shop.store().subscribe(move |key, status| events.push(key, status));
    }

    shop.load_products("").await;
    let log = events.take();
    assert_eq!(
        log,
        vec![
            (SliceKey::ProductList, Status::Pending),
            (SliceKey::ProductList, Status::Fulfilled),
        ]
    );
}

/// Tiny synchronized event log for the subscription test.
mod event_log {
    use shopfront_sdk::{SliceKey, Status};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct EventLog {
        events: Mutex<Vec<(SliceKey, Status)>>,
    }

    impl EventLog {
        pub fn push(&self, key: SliceKey, status: Status) {
            self.events.lock().unwrap().push((key, status));
        }

        pub fn take(&self) -> Vec<(SliceKey, Status)> {
            std::mem::take(&mut self.events.lock().unwrap())
        }
    }
}
