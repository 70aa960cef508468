//! The storefront facade: one method per command.

use crate::SdkError;
use shopfront_api::{ApiClient, PaymentResult, ProductUpdate, ProfileUpdate, UserUpdate};
use shopfront_core::checkout::entry_stage;
use shopfront_core::{
    CheckoutStage, OrderDraft, OrderId, ProductId, ReviewDraft, ShippingAddress, UserId,
};
use shopfront_state::{Status, Store};
use shopfront_storage::{self as storage, DurableStore, FileStore, Slot};
use std::time::Duration;

/// Builder for [`Storefront`].
pub struct StorefrontBuilder {
    base_url: String,
    timeout: Option<Duration>,
    storage: Option<Box<dyn DurableStore>>,
}

impl StorefrontBuilder {
    /// Whole-request timeout for remote calls. Without it the transport's
    /// own limits apply.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Durable storage backend for the session and cart slots. Defaults
    /// to a [`FileStore`] under the per-user data directory.
    pub fn storage(mut self, storage: impl DurableStore + 'static) -> Self {
        self.storage = Some(Box::new(storage));
        self
    }

    /// Build the storefront, seeding the store from whatever the durable
    /// slots hold. Restoration is best-effort: absent or malformed blobs
    /// start the corresponding state empty.
    pub fn build(self) -> Result<Storefront, SdkError> {
        let api = ApiClient::with_timeout(self.base_url, self.timeout)?;
        let storage = match self.storage {
            Some(storage) => storage,
            None => Box::new(FileStore::in_user_data_dir()?),
        };
        let session = storage::restore(storage.as_ref(), Slot::Session);
        let cart = storage::restore(storage.as_ref(), Slot::Cart).unwrap_or_default();
        let store = Store::with_initial(session, cart);
        Ok(Storefront { api, store, storage })
    }
}

/// The storefront client.
///
/// Owns the API client, the observable store, and the durable storage
/// slots. Commands that run through a lifecycle slice return `Ok` even
/// when the remote call fails; the failure is the slice's `failed`
/// payload, read back through [`Storefront::store`]. Returned errors are
/// local: validation, cart rules, storage.
pub struct Storefront {
    api: ApiClient,
    store: Store,
    storage: Box<dyn DurableStore>,
}

impl Storefront {
    /// Start building a storefront against `base_url`.
    pub fn builder(base_url: impl Into<String>) -> StorefrontBuilder {
        StorefrontBuilder {
            base_url: base_url.into(),
            timeout: None,
            storage: None,
        }
    }

    /// The observable store presentation layers read from.
    pub fn store(&self) -> &Store {
        &self.store
    }

    fn token(&self) -> Option<String> {
        self.store.auth_token()
    }

    fn persist_cart(&self) -> Result<(), SdkError> {
        storage::persist(self.storage.as_ref(), Slot::Cart, &self.store.cart())?;
        Ok(())
    }

    // --- catalog --------------------------------------------------------

    /// Load a product page. `query` is the raw query string (keyword,
    /// page) passed through untouched.
    pub async fn load_products(&self, query: &str) {
        self.store
            .product_list()
            .run(async { self.api.list_products(query).await.map_err(Into::into) })
            .await;
    }

    pub async fn load_top_products(&self) {
        self.store
            .top_products()
            .run(async { self.api.top_products().await.map_err(Into::into) })
            .await;
    }

    pub async fn load_product(&self, id: ProductId) {
        self.store
            .product_detail()
            .run(async { self.api.product_detail(id).await.map_err(Into::into) })
            .await;
    }

    /// Create a product with server defaults (admin). On success the new
    /// product is the `product_create` slice payload, ready for editing.
    pub async fn create_product(&self) {
        let token = self.token();
        self.store
            .product_create()
            .run(async {
                self.api
                    .create_product(token.as_deref())
                    .await
                    .map_err(Into::into)
            })
            .await;
    }

    pub async fn update_product(&self, id: ProductId, update: ProductUpdate) {
        let token = self.token();
        self.store
            .product_update()
            .run(async {
                self.api
                    .update_product(token.as_deref(), id, &update)
                    .await
                    .map_err(Into::into)
            })
            .await;
    }

    pub async fn delete_product(&self, id: ProductId) {
        let token = self.token();
        self.store
            .product_delete()
            .run(async {
                self.api
                    .delete_product(token.as_deref(), id)
                    .await
                    .map_err(Into::into)
            })
            .await;
    }

    /// Upload a product image. This is the one remote call with no slice:
    /// the caller holds the outcome directly (upload progress is a local
    /// form concern, not shared state).
    pub async fn upload_product_image(
        &self,
        id: ProductId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, SdkError> {
        Ok(self.api.upload_product_image(id, file_name, bytes).await?)
    }

    /// Submit a review. On success the `review_create` slice is
    /// fulfilled; reload the product to see the updated review list.
    pub async fn submit_review(&self, id: ProductId, review: ReviewDraft) {
        let token = self.token();
        self.store
            .review_create()
            .run(async {
                self.api
                    .create_review(token.as_deref(), id, &review)
                    .await
                    .map_err(Into::into)
            })
            .await;
    }

    // --- session --------------------------------------------------------

    /// Log in. On a fulfilled transition the session is persisted to its
    /// durable slot as an explicit second effect; a rejected login is
    /// recorded in the session slice and persists nothing.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), SdkError> {
        let applied = self
            .store
            .session()
            .run(async { self.api.login(email, password).await.map_err(Into::into) })
            .await;
        if applied {
            if let Some(session) = self.store.session().data() {
                storage::persist(self.storage.as_ref(), Slot::Session, &session)?;
            }
        }
        Ok(())
    }

    /// Register a new account and log it in. The password confirmation
    /// check happens here, before any network call.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<(), SdkError> {
        if password != confirm_password {
            return Err(SdkError::Validation("Passwords do not match".to_string()));
        }
        let applied = self
            .store
            .session()
            .run(async {
                self.api
                    .register(name, email, password)
                    .await
                    .map_err(Into::into)
            })
            .await;
        if applied {
            if let Some(session) = self.store.session().data() {
                storage::persist(self.storage.as_ref(), Slot::Session, &session)?;
            }
        }
        Ok(())
    }

    /// Log out: clear the session slot and cascade resets to every slice
    /// that reflects the departing identity.
    pub fn logout(&self) -> Result<(), SdkError> {
        storage::clear(self.storage.as_ref(), Slot::Session)?;
        self.store.reset_for_logout();
        Ok(())
    }

    pub async fn load_user(&self, id: UserId) {
        let token = self.token();
        self.store
            .user_detail()
            .run(async {
                self.api
                    .user_detail(token.as_deref(), id)
                    .await
                    .map_err(Into::into)
            })
            .await;
    }

    pub async fn load_users(&self) {
        let token = self.token();
        self.store
            .user_list()
            .run(async { self.api.list_users(token.as_deref()).await.map_err(Into::into) })
            .await;
    }

    /// Update the caller's own profile. The server reissues the session
    /// payload; on success it replaces the current session and is
    /// re-persisted.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<(), SdkError> {
        let token = self.token();
        let applied = self
            .store
            .profile_update()
            .run(async {
                self.api
                    .update_profile(token.as_deref(), &update)
                    .await
                    .map_err(Into::into)
            })
            .await;
        if applied {
            if let Some(session) = self.store.profile_update().data() {
                self.store.adopt_session(session.clone());
                storage::persist(self.storage.as_ref(), Slot::Session, &session)?;
            }
        }
        Ok(())
    }

    pub async fn update_user(&self, id: UserId, update: UserUpdate) {
        let token = self.token();
        self.store
            .user_update()
            .run(async {
                self.api
                    .update_user(token.as_deref(), id, &update)
                    .await
                    .map(|_| ())
                    .map_err(Into::into)
            })
            .await;
    }

    pub async fn delete_user(&self, id: UserId) {
        let token = self.token();
        self.store
            .user_delete()
            .run(async {
                self.api
                    .delete_user(token.as_deref(), id)
                    .await
                    .map_err(Into::into)
            })
            .await;
    }

    // --- cart -----------------------------------------------------------

    /// Add `qty` of a product to the cart, or replace the existing line's
    /// quantity. Fetches a fresh product snapshot (price, image, stock)
    /// first; the quantity is clamped to the snapshot's available stock.
    /// The cart snapshot is re-persisted synchronously after the write.
    pub async fn add_to_cart(&self, id: ProductId, qty: i64) -> Result<(), SdkError> {
        let product = self.api.product_detail(id).await?;
        self.store.update_cart(|cart| cart.upsert_line(&product, qty))?;
        self.persist_cart()
    }

    /// Remove a line. Absent lines are a no-op.
    pub fn remove_from_cart(&self, id: ProductId) -> Result<(), SdkError> {
        self.store.update_cart(|cart| cart.remove_line(id));
        self.persist_cart()
    }

    /// Empty the cart and its durable slot.
    pub fn clear_cart(&self) -> Result<(), SdkError> {
        self.store.update_cart(|cart| cart.clear_lines());
        self.persist_cart()
    }

    pub fn set_shipping_address(&self, address: ShippingAddress) -> Result<(), SdkError> {
        self.store
            .update_cart(|cart| cart.set_shipping_address(address));
        self.persist_cart()
    }

    pub fn set_payment_method(&self, method: impl Into<String>) -> Result<(), SdkError> {
        let method = method.into();
        self.store.update_cart(|cart| cart.set_payment_method(method));
        self.persist_cart()
    }

    /// Resolve which checkout stage may actually be entered, redirecting
    /// backward when a precondition is unmet.
    pub fn checkout_stage(&self, requested: CheckoutStage) -> CheckoutStage {
        entry_stage(requested, &self.store.cart())
    }

    // --- orders ---------------------------------------------------------

    /// Quote an order from the cart and place it. Quote failures (empty
    /// cart, missing checkout fields) return before any network call; a
    /// fulfilled placement clears the cart lines and re-persists the
    /// emptied snapshot.
    pub async fn place_order(&self) -> Result<(), SdkError> {
        let draft = OrderDraft::from_cart(&self.store.cart())?;
        let token = self.token();
        let applied = self
            .store
            .order_create()
            .run(async {
                self.api
                    .place_order(token.as_deref(), &draft)
                    .await
                    .map_err(Into::into)
            })
            .await;
        if applied && self.store.order_create().status() == Status::Fulfilled {
            self.store.update_cart(|cart| cart.clear_lines());
            self.persist_cart()?;
        }
        Ok(())
    }

    pub async fn load_order(&self, id: OrderId) {
        let token = self.token();
        self.store
            .order_detail()
            .run(async {
                self.api
                    .order_detail(token.as_deref(), id)
                    .await
                    .map_err(Into::into)
            })
            .await;
    }

    pub async fn load_my_orders(&self) {
        let token = self.token();
        self.store
            .my_orders()
            .run(async { self.api.my_orders(token.as_deref()).await.map_err(Into::into) })
            .await;
    }

    pub async fn load_all_orders(&self) {
        let token = self.token();
        self.store
            .all_orders()
            .run(async { self.api.all_orders(token.as_deref()).await.map_err(Into::into) })
            .await;
    }

    pub async fn pay_order(&self, id: OrderId, payment: PaymentResult) {
        let token = self.token();
        self.store
            .order_pay()
            .run(async {
                self.api
                    .pay_order(token.as_deref(), id, &payment)
                    .await
                    .map_err(Into::into)
            })
            .await;
    }

    pub async fn deliver_order(&self, id: OrderId) {
        let token = self.token();
        self.store
            .order_deliver()
            .run(async {
                self.api
                    .deliver_order(token.as_deref(), id)
                    .await
                    .map_err(Into::into)
            })
            .await;
    }
}
