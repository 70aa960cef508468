//! The process-lifetime observable store.

use crate::notify::{Notifier, SliceKey};
use crate::request::{BeginPolicy, Status};
use crate::slice::Slice;
use parking_lot::RwLock;
use shopfront_core::{Cart, Order, Product, ProductPage, UserProfile, UserSession};
use std::sync::Arc;

/// All client-side application state, one typed field per resource
/// concern. Constructed once at startup and reachable only through
/// accessors; there is no ambient global and no string-keyed lookup.
pub struct Store {
    notifier: Arc<Notifier>,

    product_list: Slice<ProductPage>,
    top_products: Slice<Vec<Product>>,
    product_detail: Slice<Product>,
    product_create: Slice<Product>,
    product_update: Slice<Product>,
    product_delete: Slice<()>,
    review_create: Slice<()>,

    session: Slice<UserSession>,
    user_detail: Slice<UserProfile>,
    user_list: Slice<Vec<UserProfile>>,
    profile_update: Slice<UserSession>,
    user_update: Slice<()>,
    user_delete: Slice<()>,

    order_create: Slice<Order>,
    order_detail: Slice<Order>,
    order_pay: Slice<()>,
    order_deliver: Slice<()>,
    my_orders: Slice<Vec<Order>>,
    all_orders: Slice<Vec<Order>>,

    cart: RwLock<Cart>,
}

impl Store {
    /// Create a store with every slice idle and an empty cart.
    pub fn new() -> Self {
        use BeginPolicy::{DropData, RetainData};

        fn slice<T: Clone>(key: SliceKey, policy: BeginPolicy, notifier: &Arc<Notifier>) -> Slice<T> {
            Slice::new(key, policy, notifier.clone())
        }

        let n = Arc::new(Notifier::new());
        Self {
            product_list: slice(SliceKey::ProductList, DropData, &n),
            top_products: slice(SliceKey::TopProducts, DropData, &n),
            // The last loaded product stays visible while a reload is in
            // flight; its empty-reviews default means consumers never see
            // an absent array.
            product_detail: slice(SliceKey::ProductDetail, RetainData, &n),
            product_create: slice(SliceKey::ProductCreate, DropData, &n),
            product_update: slice(SliceKey::ProductUpdate, DropData, &n),
            product_delete: slice(SliceKey::ProductDelete, DropData, &n),
            review_create: slice(SliceKey::ReviewCreate, DropData, &n),
            session: slice(SliceKey::Session, DropData, &n),
            user_detail: slice(SliceKey::UserDetail, DropData, &n),
            user_list: slice(SliceKey::UserList, DropData, &n),
            profile_update: slice(SliceKey::ProfileUpdate, DropData, &n),
            user_update: slice(SliceKey::UserUpdate, DropData, &n),
            user_delete: slice(SliceKey::UserDelete, DropData, &n),
            order_create: slice(SliceKey::OrderCreate, DropData, &n),
            order_detail: slice(SliceKey::OrderDetail, DropData, &n),
            order_pay: slice(SliceKey::OrderPay, DropData, &n),
            order_deliver: slice(SliceKey::OrderDeliver, DropData, &n),
            my_orders: slice(SliceKey::MyOrders, DropData, &n),
            all_orders: slice(SliceKey::AllOrders, DropData, &n),
            cart: RwLock::new(Cart::new()),
            notifier: n,
        }
    }

    /// Create a store seeded from durable storage: the restored session
    /// (if any) lands in the session slice as already fulfilled, and the
    /// restored cart replaces the empty one.
    pub fn with_initial(session: Option<UserSession>, cart: Cart) -> Self {
        let store = Self::new();
        if let Some(session) = session {
            store.session.seed(session);
        }
        *store.cart.write() = cart;
        store
    }

    /// Register an observer for every subsequent state change.
    pub fn subscribe(&self, observer: impl Fn(SliceKey, Status) + Send + Sync + 'static) {
        self.notifier.subscribe(observer);
    }

    // --- product slices -------------------------------------------------

    pub fn product_list(&self) -> &Slice<ProductPage> {
        &self.product_list
    }

    pub fn top_products(&self) -> &Slice<Vec<Product>> {
        &self.top_products
    }

    pub fn product_detail(&self) -> &Slice<Product> {
        &self.product_detail
    }

    /// The loaded product, or the placeholder with an empty review
    /// sequence so dependent views never dereference an absent array.
    pub fn product_detail_or_default(&self) -> Product {
        self.product_detail.data().unwrap_or_default()
    }

    pub fn product_create(&self) -> &Slice<Product> {
        &self.product_create
    }

    pub fn product_update(&self) -> &Slice<Product> {
        &self.product_update
    }

    pub fn product_delete(&self) -> &Slice<()> {
        &self.product_delete
    }

    pub fn review_create(&self) -> &Slice<()> {
        &self.review_create
    }

    // --- user slices ----------------------------------------------------

    pub fn session(&self) -> &Slice<UserSession> {
        &self.session
    }

    pub fn user_detail(&self) -> &Slice<UserProfile> {
        &self.user_detail
    }

    pub fn user_list(&self) -> &Slice<Vec<UserProfile>> {
        &self.user_list
    }

    pub fn profile_update(&self) -> &Slice<UserSession> {
        &self.profile_update
    }

    pub fn user_update(&self) -> &Slice<()> {
        &self.user_update
    }

    pub fn user_delete(&self) -> &Slice<()> {
        &self.user_delete
    }

    /// The bearer token for protected calls, if authenticated.
    pub fn auth_token(&self) -> Option<String> {
        self.session.data().map(|s| s.token)
    }

    /// The authenticated user's profile, if any.
    pub fn current_user(&self) -> Option<UserProfile> {
        self.session.data().map(|s| s.profile)
    }

    /// Whether the authenticated user has admin rights.
    pub fn is_admin(&self) -> bool {
        self.current_user().map(|u| u.is_admin).unwrap_or(false)
    }

    /// Replace the authenticated session outside the lifecycle machine.
    /// Used when a profile update returns a reissued session payload.
    pub fn adopt_session(&self, session: UserSession) {
        self.session.seed(session);
        self.notifier.notify(SliceKey::Session, Status::Fulfilled);
    }

    /// Logout cascade: the session is cleared, and every slice whose
    /// contents depend on the departing identity returns to its default
    /// empty state (user directory, user detail, own orders).
    pub fn reset_for_logout(&self) {
        self.session.reset();
        self.user_list.reset();
        self.user_detail.reset();
        self.my_orders.reset();
    }

    // --- order slices ---------------------------------------------------

    pub fn order_create(&self) -> &Slice<Order> {
        &self.order_create
    }

    pub fn order_detail(&self) -> &Slice<Order> {
        &self.order_detail
    }

    pub fn order_pay(&self) -> &Slice<()> {
        &self.order_pay
    }

    pub fn order_deliver(&self) -> &Slice<()> {
        &self.order_deliver
    }

    pub fn my_orders(&self) -> &Slice<Vec<Order>> {
        &self.my_orders
    }

    pub fn all_orders(&self) -> &Slice<Vec<Order>> {
        &self.all_orders
    }

    // --- cart -----------------------------------------------------------

    /// A snapshot of the cart.
    pub fn cart(&self) -> Cart {
        self.cart.read().clone()
    }

    /// Mutate the cart under its lock and publish the change.
    pub fn update_cart<R>(&self, f: impl FnOnce(&mut Cart) -> R) -> R {
        let result = f(&mut self.cart.write());
        self.notifier.notify(SliceKey::Cart, Status::Fulfilled);
        result
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::{ProductId, UserId};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn session() -> UserSession {
        UserSession {
            profile: UserProfile {
                id: UserId::new(1),
                username: "jane".to_string(),
                email: "jane@example.com".to_string(),
                name: "Jane".to_string(),
                is_admin: true,
            },
            token: "jwt".to_string(),
        }
    }

    #[test]
    fn test_new_store_is_all_idle() {
        let store = Store::new();
        assert_eq!(store.product_list().status(), Status::Idle);
        assert_eq!(store.session().status(), Status::Idle);
        assert!(store.cart().is_empty());
        assert_eq!(store.auth_token(), None);
        assert!(!store.is_admin());
    }

    #[test]
    fn test_with_initial_seeds_session_and_cart() {
        let mut cart = Cart::new();
        cart.set_payment_method("PayPal");
        let store = Store::with_initial(Some(session()), cart);
        assert_eq!(store.session().status(), Status::Fulfilled);
        assert_eq!(store.auth_token().as_deref(), Some("jwt"));
        assert!(store.is_admin());
        assert_eq!(store.cart().payment_method.as_deref(), Some("PayPal"));
    }

    #[test]
    fn test_logout_cascade() {
        let store = Store::with_initial(Some(session()), Cart::new());
        let token = store.user_list().begin();
        store.user_list().succeed(
            token,
            vec![UserProfile {
                id: UserId::new(2),
                username: "bob".to_string(),
                email: "bob@example.com".to_string(),
                name: "Bob".to_string(),
                is_admin: false,
            }],
        );
        assert_eq!(store.user_list().status(), Status::Fulfilled);

        store.reset_for_logout();
        assert_eq!(store.session().status(), Status::Idle);
        assert_eq!(store.auth_token(), None);
        assert_eq!(store.user_list().status(), Status::Idle);
        assert_eq!(store.user_list().data(), None);
        assert_eq!(store.user_detail().status(), Status::Idle);
        assert_eq!(store.my_orders().status(), Status::Idle);
    }

    #[test]
    fn test_product_detail_default_has_empty_reviews() {
        let store = Store::new();
        let product = store.product_detail_or_default();
        assert!(product.reviews.is_empty());
        assert_eq!(product.id, ProductId::new(0));
    }

    #[test]
    fn test_cart_updates_publish() {
        let store = Store::new();
        let events = std::sync::Arc::new(AtomicUsize::new(0));
        {
            let events = events.clone();
            store.subscribe(move |key, _| {
                if key == SliceKey::Cart {
                    events.fetch_add(1, Ordering::SeqCst);
                }
            });
        }
        store.update_cart(|cart| cart.set_payment_method("Stripe"));
        assert_eq!(events.load(Ordering::SeqCst), 1);
        assert_eq!(store.cart().payment_method.as_deref(), Some("Stripe"));
    }

    #[test]
    fn test_slices_are_independent() {
        let store = Store::new();
        let token = store.product_list().begin();
        store.product_list().fail(token, shopfront_core::ErrorInfo::transport("down"));
        // A failure in one slice leaves every other slice untouched.
        assert_eq!(store.top_products().status(), Status::Idle);
        assert_eq!(store.session().status(), Status::Idle);
    }
}
