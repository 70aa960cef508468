//! One lifecycle machine instance wrapping one remote operation.

use crate::notify::{Notifier, SliceKey};
use crate::request::{BeginPolicy, RequestState, Status};
use parking_lot::RwLock;
use shopfront_core::ErrorInfo;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Proof of a particular `begin`, required to apply its terminal
/// transition. A token issued before a newer `begin` or a reset is stale
/// and its completion is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// An independently addressable region of application state owned by one
/// lifecycle machine instance.
///
/// Concurrent re-invocation while pending is allowed; the generation
/// guard ensures only the newest request's completion lands, so an
/// overlapping older call that completes late cannot clobber the slice.
pub struct Slice<T> {
    key: SliceKey,
    policy: BeginPolicy,
    state: RwLock<RequestState<T>>,
    generation: AtomicU64,
    notifier: Arc<Notifier>,
}

impl<T: Clone> Slice<T> {
    pub(crate) fn new(key: SliceKey, policy: BeginPolicy, notifier: Arc<Notifier>) -> Self {
        Self {
            key,
            policy,
            state: RwLock::new(RequestState::idle()),
            generation: AtomicU64::new(0),
            notifier,
        }
    }

    /// The key this slice publishes changes under.
    pub fn key(&self) -> SliceKey {
        self.key
    }

    /// Transition to pending and issue the token for this request.
    pub fn begin(&self) -> RequestToken {
        let token = RequestToken(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
        self.state.write().begin(self.policy);
        self.notifier.notify(self.key, Status::Pending);
        token
    }

    /// Apply a successful completion. Returns `false` (and leaves the
    /// slice untouched) when the token is stale.
    pub fn succeed(&self, token: RequestToken, data: T) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.state.write().succeed(data);
        self.notifier.notify(self.key, Status::Fulfilled);
        true
    }

    /// Apply a failed completion. Returns `false` when the token is stale.
    pub fn fail(&self, token: RequestToken, error: ErrorInfo) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.state.write().fail(error);
        self.notifier.notify(self.key, Status::Failed);
        true
    }

    /// Return to idle from any state. Also invalidates any in-flight
    /// request so a late completion cannot resurrect the slice.
    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.write().reset();
        self.notifier.notify(self.key, Status::Idle);
    }

    /// Drive one request through the lifecycle: begin, await, then apply
    /// exactly one terminal transition. Returns whether that transition
    /// was applied (i.e. the request was not superseded meanwhile).
    pub async fn run<F>(&self, operation: F) -> bool
    where
        F: Future<Output = Result<T, ErrorInfo>>,
    {
        let token = self.begin();
        match operation.await {
            Ok(data) => self.succeed(token, data),
            Err(error) => self.fail(token, error),
        }
    }

    /// A full copy of the current state.
    pub fn snapshot(&self) -> RequestState<T> {
        self.state.read().clone()
    }

    /// Current lifecycle status.
    pub fn status(&self) -> Status {
        self.state.read().status
    }

    /// Current payload, if fulfilled (or retained under
    /// [`BeginPolicy::RetainData`]).
    pub fn data(&self) -> Option<T> {
        self.state.read().data.clone()
    }

    /// Current failure, if failed.
    pub fn error(&self) -> Option<ErrorInfo> {
        self.state.read().error.clone()
    }

    /// Seed a restored payload at construction time, bypassing the
    /// lifecycle. Used only when rehydrating the store from durable
    /// storage.
    pub(crate) fn seed(&self, data: T) {
        self.state.write().succeed(data);
    }

    fn is_current(&self, token: RequestToken) -> bool {
        let current = self.generation.load(Ordering::SeqCst);
        if token.0 != current {
            tracing::debug!(
                slice = self.key.as_str(),
                token = token.0,
                current,
                "dropping stale completion"
            );
            return false;
        }
        true
    }
}
