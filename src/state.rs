//! Loading/error state of API calls.
//!
//! A [`CallStateHandle`] is owned by one [`ApiClient`](crate::client::ApiClient)
//! and is the only writer of its [`CallState`]. Renderers observe it through
//! [`CallStateHandle::subscribe`].
//!
//! Per call the state moves `Idle -> Loading -> Idle`; a failure records its
//! message while still loading, then loading is cleared. Overlapping calls on
//! one handle are not serialized: the last writer wins.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::error::ApiError;

/// Status of the most recent call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallState {
    /// A call is in flight.
    pub loading: bool,
    /// Message of the last failure, cleared when a new call starts.
    pub error: Option<String>,
}

impl CallState {
    /// Neither loading nor failed.
    pub fn is_idle(&self) -> bool {
        !self.loading && self.error.is_none()
    }
}

/// Shared, observable [`CallState`].
#[derive(Debug, Clone)]
pub struct CallStateHandle {
    tx: Arc<watch::Sender<CallState>>,
}

impl CallStateHandle {
    /// Create a handle in the idle state.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(CallState::default());
        Self { tx: Arc::new(tx) }
    }

    /// Current state.
    pub fn snapshot(&self) -> CallState {
        self.tx.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<CallState> {
        self.tx.subscribe()
    }

    /// Start a call: set `loading`, clear `error`.
    ///
    /// Loading is cleared when the returned guard is dropped, whatever the
    /// exit path.
    pub fn begin(&self) -> LoadingGuard {
        self.tx.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });
        LoadingGuard {
            handle: self.clone(),
        }
    }

    fn record_failure(&self, err: &ApiError) {
        let message = err.to_string();
        self.tx.send_modify(|state| state.error = Some(message));
    }

    fn finish(&self) {
        self.tx.send_modify(|state| state.loading = false);
    }
}

impl Default for CallStateHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Scope of one in-flight call. Dropping it clears `loading`.
#[derive(Debug)]
#[must_use = "dropping the guard ends the call immediately"]
pub struct LoadingGuard {
    handle: CallStateHandle,
}

impl LoadingGuard {
    /// Mirror a failure into the call state.
    pub fn fail(&self, err: &ApiError) {
        self.handle.record_failure(err);
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        debug!("call finished, clearing loading state");
        self.handle.finish();
    }
}
