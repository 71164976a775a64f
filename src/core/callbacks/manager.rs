//! `LoggingCallbackManager`: the four ordered hook lists spec.md §4.9
//! describes, with copy-on-write iteration (spec.md §5: "only the manager
//! mutates them; readers may iterate without locking").

use super::payload::StandardLoggingPayload;
use arc_swap::ArcSwap;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// A callback invoked inline, before the dispatching call returns control.
/// Kept cheap and infallible-looking on the outside; errors are logged, not
/// propagated, per spec.md §4.9 ("a failing callback logs and does not
/// block others").
pub trait SyncLoggingCallback: Send + Sync {
    fn call(&self, payload: &StandardLoggingPayload) -> crate::utils::error::Result<()>;
}

/// A callback run as a detached task after the response has already been
/// delivered to the client, so it never adds to user-visible latency.
#[async_trait]
pub trait AsyncLoggingCallback: Send + Sync {
    async fn call(&self, payload: StandardLoggingPayload) -> crate::utils::error::Result<()>;
}

type SyncList = ArcSwap<Vec<Arc<dyn SyncLoggingCallback>>>;
type AsyncList = ArcSwap<Vec<Arc<dyn AsyncLoggingCallback>>>;

fn empty_sync_list() -> SyncList {
    ArcSwap::from_pointee(Vec::new())
}

fn empty_async_list() -> AsyncList {
    ArcSwap::from_pointee(Vec::new())
}

/// Owns the four ordered callback lists (sync_success, sync_failure,
/// async_success, async_failure) and the single entry point through which
/// they may be mutated. Registration is additive only; there is no removal
/// API because nothing in this codebase ever needs to unregister a sink.
#[derive(Default)]
pub struct LoggingCallbackManager {
    sync_success: SyncList,
    sync_failure: SyncList,
    async_success: AsyncList,
    async_failure: AsyncList,
}

impl std::fmt::Debug for LoggingCallbackManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingCallbackManager")
            .field("sync_success", &self.sync_success.load().len())
            .field("sync_failure", &self.sync_failure.load().len())
            .field("async_success", &self.async_success.load().len())
            .field("async_failure", &self.async_failure.load().len())
            .finish()
    }
}

impl LoggingCallbackManager {
    pub fn new() -> Self {
        Self {
            sync_success: empty_sync_list(),
            sync_failure: empty_sync_list(),
            async_success: empty_async_list(),
            async_failure: empty_async_list(),
        }
    }

    pub fn register_sync_success(&self, callback: Arc<dyn SyncLoggingCallback>) {
        push(&self.sync_success, callback);
    }

    pub fn register_sync_failure(&self, callback: Arc<dyn SyncLoggingCallback>) {
        push(&self.sync_failure, callback);
    }

    pub fn register_async_success(&self, callback: Arc<dyn AsyncLoggingCallback>) {
        push(&self.async_success, callback);
    }

    pub fn register_async_failure(&self, callback: Arc<dyn AsyncLoggingCallback>) {
        push(&self.async_failure, callback);
    }

    /// Run the success path's sync callbacks inline, then spawn the async
    /// ones as a detached task. Call this only after the response has been
    /// handed back to the caller.
    pub fn dispatch_success(&self, payload: StandardLoggingPayload) {
        run_sync(&self.sync_success, &payload);
        spawn_async(self.async_success.load_full(), payload);
    }

    /// Run the failure path's sync callbacks inline, then spawn the async
    /// ones as a detached task.
    pub fn dispatch_failure(&self, payload: StandardLoggingPayload) {
        run_sync(&self.sync_failure, &payload);
        spawn_async(self.async_failure.load_full(), payload);
    }
}

fn push<T: ?Sized>(list: &ArcSwap<Vec<Arc<T>>>, item: Arc<T>) {
    list.rcu(move |current| {
        let mut next = (**current).clone();
        next.push(item.clone());
        next
    });
}

fn run_sync(list: &SyncList, payload: &StandardLoggingPayload) {
    for callback in list.load().iter() {
        if let Err(err) = callback.call(payload) {
            warn!(request_id = %payload.request_id, error = %err, "sync logging callback failed");
        }
    }
}

fn spawn_async(callbacks: Arc<Vec<Arc<dyn AsyncLoggingCallback>>>, payload: StandardLoggingPayload) {
    if callbacks.is_empty() {
        return;
    }
    tokio::spawn(async move {
        for callback in callbacks.iter() {
            if let Err(err) = callback.call(payload.clone()).await {
                warn!(request_id = %payload.request_id, error = %err, "async logging callback failed");
            }
        }
    });
}
