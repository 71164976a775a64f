use super::manager::{AsyncLoggingCallback, LoggingCallbackManager, SyncLoggingCallback};
use super::payload::{CallOutcome, PrincipalInfo, StandardLoggingPayload};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn payload(request_id: &str) -> StandardLoggingPayload {
    StandardLoggingPayload {
        request_id: request_id.to_string(),
        call_type: "chat_completion",
        model_requested: "gpt-4".to_string(),
        model_used: Some("gpt-4".to_string()),
        deployment_id: Some("d1".to_string()),
        principal: PrincipalInfo::default(),
        response: None,
        usage: None,
        cache_hit: false,
        attempts: 1,
        duration: Duration::from_millis(5),
        outcome: CallOutcome::Success,
        dynamic_params: Default::default(),
    }
}

struct CountingSync(Arc<AtomicUsize>);
impl SyncLoggingCallback for CountingSync {
    fn call(&self, _payload: &StandardLoggingPayload) -> crate::utils::error::Result<()> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct FailingSync;
impl SyncLoggingCallback for FailingSync {
    fn call(&self, _payload: &StandardLoggingPayload) -> crate::utils::error::Result<()> {
        Err(crate::utils::error::GatewayError::internal("boom"))
    }
}

struct CountingAsync(Arc<AtomicUsize>);
#[async_trait]
impl AsyncLoggingCallback for CountingAsync {
    async fn call(&self, _payload: StandardLoggingPayload) -> crate::utils::error::Result<()> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn sync_callbacks_run_in_registration_order_and_survive_a_failure() {
    let manager = LoggingCallbackManager::new();
    let count = Arc::new(AtomicUsize::new(0));

    manager.register_sync_success(Arc::new(CountingSync(count.clone())));
    manager.register_sync_success(Arc::new(FailingSync));
    manager.register_sync_success(Arc::new(CountingSync(count.clone())));

    manager.dispatch_success(payload("r1"));

    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn async_success_callbacks_run_without_blocking_dispatch() {
    let manager = LoggingCallbackManager::new();
    let count = Arc::new(AtomicUsize::new(0));
    manager.register_async_success(Arc::new(CountingAsync(count.clone())));
    manager.register_async_success(Arc::new(CountingAsync(count.clone())));

    manager.dispatch_success(payload("r2"));

    // dispatch_success returns immediately; give the spawned task a chance.
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn failure_path_uses_the_separate_failure_lists() {
    let manager = LoggingCallbackManager::new();
    let success_count = Arc::new(AtomicUsize::new(0));
    let failure_count = Arc::new(AtomicUsize::new(0));

    manager.register_sync_success(Arc::new(CountingSync(success_count.clone())));
    manager.register_sync_failure(Arc::new(CountingSync(failure_count.clone())));

    let mut failed = payload("r3");
    failed.outcome = CallOutcome::Failure {
        kind: "rate-limit".to_string(),
        message: "too many requests".to_string(),
    };
    manager.dispatch_failure(failed);

    assert_eq!(success_count.load(Ordering::SeqCst), 0);
    assert_eq!(failure_count.load(Ordering::SeqCst), 1);
}
