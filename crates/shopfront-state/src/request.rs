//! The request lifecycle state machine.

use shopfront_core::ErrorInfo;
use std::fmt;

/// Lifecycle status of one remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// No request has been made (or the slice was reset).
    #[default]
    Idle,
    /// A request is in flight.
    Pending,
    /// The last request completed with a payload.
    Fulfilled,
    /// The last request failed.
    Failed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Pending => "pending",
            Status::Fulfilled => "fulfilled",
            Status::Failed => "failed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What `begin` does to a previously fulfilled payload.
///
/// The default everywhere is [`BeginPolicy::DropData`], matching the
/// storefront's "list becomes empty again while reloading" behavior. The
/// product-detail slice opts into [`BeginPolicy::RetainData`] so the last
/// loaded product stays visible while a reload is in flight. The policy
/// is fixed per slice at construction, never implicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BeginPolicy {
    /// Clear any previous payload when a new request begins.
    #[default]
    DropData,
    /// Keep the previous payload while the new request is pending.
    RetainData,
}

/// The state of one request slice.
///
/// Invariants: `error` is present only when `status == Failed`;
/// transitioning to `Pending` always clears a previous error; `data` is
/// present only when `status == Fulfilled`, except that a slice with
/// [`BeginPolicy::RetainData`] carries the previous payload through
/// `Pending` and `Failed`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestState<T> {
    pub status: Status,
    pub data: Option<T>,
    pub error: Option<ErrorInfo>,
}

impl<T> RequestState<T> {
    /// The initial state: idle, no data, no error.
    pub fn idle() -> Self {
        Self {
            status: Status::Idle,
            data: None,
            error: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.status == Status::Idle
    }

    pub fn is_pending(&self) -> bool {
        self.status == Status::Pending
    }

    pub fn is_fulfilled(&self) -> bool {
        self.status == Status::Fulfilled
    }

    pub fn is_failed(&self) -> bool {
        self.status == Status::Failed
    }

    pub(crate) fn begin(&mut self, policy: BeginPolicy) {
        self.status = Status::Pending;
        self.error = None;
        if policy == BeginPolicy::DropData {
            self.data = None;
        }
    }

    pub(crate) fn succeed(&mut self, data: T) {
        self.status = Status::Fulfilled;
        self.data = Some(data);
        self.error = None;
    }

    // Does not touch `data`: under RetainData the previous payload stays
    // available alongside the error.
    pub(crate) fn fail(&mut self, error: ErrorInfo) {
        self.status = Status::Failed;
        self.error = Some(error);
    }

    pub(crate) fn reset(&mut self) {
        self.status = Status::Idle;
        self.data = None;
        self.error = None;
    }
}
