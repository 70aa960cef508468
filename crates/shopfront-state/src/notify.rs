//! Change notification for store observers.

use crate::request::Status;
use parking_lot::RwLock;

/// Identifies one slice of the store in change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceKey {
    ProductList,
    TopProducts,
    ProductDetail,
    ProductCreate,
    ProductUpdate,
    ProductDelete,
    ReviewCreate,
    Session,
    UserDetail,
    UserList,
    ProfileUpdate,
    UserUpdate,
    UserDelete,
    OrderCreate,
    OrderDetail,
    OrderPay,
    OrderDeliver,
    MyOrders,
    AllOrders,
    /// The cart aggregate; not a lifecycle slice, but its mutations are
    /// published on the same channel.
    Cart,
}

impl SliceKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SliceKey::ProductList => "product_list",
            SliceKey::TopProducts => "top_products",
            SliceKey::ProductDetail => "product_detail",
            SliceKey::ProductCreate => "product_create",
            SliceKey::ProductUpdate => "product_update",
            SliceKey::ProductDelete => "product_delete",
            SliceKey::ReviewCreate => "review_create",
            SliceKey::Session => "session",
            SliceKey::UserDetail => "user_detail",
            SliceKey::UserList => "user_list",
            SliceKey::ProfileUpdate => "profile_update",
            SliceKey::UserUpdate => "user_update",
            SliceKey::UserDelete => "user_delete",
            SliceKey::OrderCreate => "order_create",
            SliceKey::OrderDetail => "order_detail",
            SliceKey::OrderPay => "order_pay",
            SliceKey::OrderDeliver => "order_deliver",
            SliceKey::MyOrders => "my_orders",
            SliceKey::AllOrders => "all_orders",
            SliceKey::Cart => "cart",
        }
    }
}

type Observer = Box<dyn Fn(SliceKey, Status) + Send + Sync>;

/// Fan-out of `(SliceKey, Status)` change events to registered observers.
///
/// Presentation layers subscribe once and re-read the store on each
/// event; the notifier carries no payloads.
#[derive(Default)]
pub struct Notifier {
    observers: RwLock<Vec<Observer>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer for all subsequent changes.
    pub fn subscribe(&self, observer: impl Fn(SliceKey, Status) + Send + Sync + 'static) {
        self.observers.write().push(Box::new(observer));
    }

    pub(crate) fn notify(&self, key: SliceKey, status: Status) {
        for observer in self.observers.read().iter() {
            observer(key, status);
        }
    }
}
