//! The request pipeline (spec.md §4.8): the orchestrator that wires
//! canonicalize → pre-call hooks → admission → cache lookup → selection →
//! dispatch → translate → accounting → post-call hooks into the 9 ordered
//! stages every chat-completion call goes through.
//!
//! No teacher module owns this orchestration as a single unit (the teacher
//! spreads it across its HTTP handlers and a top-level `acompletion`
//! entry point); this module is built fresh in the teacher's idiom — an
//! async orchestrator struct holding `Arc`s to its collaborators, one method
//! per call shape.

mod dimensions;
mod force_non_streaming;
mod limits;

#[cfg(test)]
mod tests;

pub use force_non_streaming::{single_chunk_stream, ChatChunkStream};
pub use limits::{PrincipalLimitsProvider, StaticLimitsProvider};

use crate::core::cache_manager::{CacheKey, CacheManager};
use crate::core::callbacks::{CallOutcome, LoggingCallbackManager, PrincipalInfo, StandardLoggingPayload};
use crate::core::providers::unified_provider::ProviderError;
use crate::core::rate_limiter::RateLimitAdmitter;
use crate::core::router::Router;
use crate::core::types::context::RequestContext;
use crate::core::types::requests::ChatRequest;
use crate::core::types::responses::ChatResponse;
use crate::utils::error::{GatewayError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Everything the pipeline needs to service a call, gathered into one
/// struct so callers don't have to thread five `Arc`s through every
/// handler.
pub struct RequestPipeline {
    router: Arc<Router>,
    admitter: Arc<RateLimitAdmitter>,
    cache: Arc<CacheManager>,
    callbacks: Arc<LoggingCallbackManager>,
    limits: Arc<dyn PrincipalLimitsProvider>,
}

impl RequestPipeline {
    pub fn new(
        router: Arc<Router>,
        admitter: Arc<RateLimitAdmitter>,
        cache: Arc<CacheManager>,
        callbacks: Arc<LoggingCallbackManager>,
        limits: Arc<dyn PrincipalLimitsProvider>,
    ) -> Self {
        Self {
            router,
            admitter,
            cache,
            callbacks,
            limits,
        }
    }

    /// Service a non-streaming (or force-non-streaming-collapsed) chat
    /// completion: stages 1-9 of spec.md §4.8 for the buffered-response
    /// shape.
    pub async fn chat_completion(
        &self,
        mut request: ChatRequest,
        context: RequestContext,
    ) -> Result<ChatResponse> {
        let start = Instant::now();

        // 1. Canonicalize
        canonicalize(&mut request)?;
        let model_name = self.router.resolve_model_name(&request.model);
        request.model = model_name.clone();

        // 2. Pre-call hooks (C9): dynamic per-request callback params.
        let dynamic_params = request_metadata_params(&context);

        // 3. Admission (C5)
        let principal_dimensions = dimensions::build_dimensions(&context, &model_name, self.limits.as_ref());
        let estimated_tokens = estimate_prompt_tokens(&request);
        let admission = match self.admitter.admit(&principal_dimensions, estimated_tokens).await {
            Ok(admission) => admission,
            Err(err) => {
                self.log_failure(&context, &request, None, None, start, 0, false, &err, &dynamic_params);
                return Err(err);
            }
        };

        // 4. Cache lookup (C6), 5-7. Selection/dispatch/translate on a miss.
        // `get_or_build` gives every concurrent caller for this exact
        // fingerprint a single in-flight build (spec.md §4.6 single-flight);
        // a side channel carries the dispatch metadata `get_or_build`'s
        // `ChatResponse`-only return type can't.
        let cache_key = CacheKey::from_request(&request, context.user_id.as_deref());
        let dispatch_meta: Arc<Mutex<Option<DispatchMeta>>> = Arc::new(Mutex::new(None));
        let built = Arc::new(AtomicBool::new(false));

        let router = self.router.clone();
        let base_request = request.clone();
        let base_context = context.clone();
        let meta_slot = dispatch_meta.clone();
        let built_flag = built.clone();
        let dispatch_model_name = model_name.clone();

        let response = match self
            .cache
            .get_or_build(cache_key, move || async move {
                built_flag.store(true, Ordering::Relaxed);
                let router_for_dispatch = router.clone();
                let exec_result = router
                    .execute(&dispatch_model_name, move |deployment_id| {
                        let router = router_for_dispatch.clone();
                        let request = base_request.clone();
                        let mut context = base_context.clone();
                        async move { dispatch_once(&router, &deployment_id, request, &mut context).await }
                    })
                    .await
                    .map_err(GatewayError::from)?;

                *meta_slot.lock().unwrap() = Some(DispatchMeta {
                    deployment_id: exec_result.deployment_id,
                    model_used: exec_result.model_used,
                    attempts: exec_result.attempts,
                });
                Ok(exec_result.result)
            })
            .await
        {
            Ok(response) => response,
            Err(err) => {
                self.admitter.record_failure(&admission).await;
                self.log_failure(&context, &request, None, None, start, 0, false, &err, &dynamic_params);
                return Err(err);
            }
        };

        let cache_hit = !built.load(Ordering::Relaxed);
        let meta = dispatch_meta.lock().unwrap().take();

        // 8. Accounting (C5 post-call), post-call hooks (C9). Cache store
        // happens inside `get_or_build` itself on a miss.
        if cache_hit {
            self.admitter.record_success(&admission, 0, 0.0).await;
        } else if let Some(meta) = &meta {
            let spend_delta = self.spend_delta(&meta.deployment_id, &response).await;
            let actual_tokens = response.usage.as_ref().map(|u| u.total_tokens).unwrap_or(0);
            self.admitter.record_success(&admission, actual_tokens, spend_delta).await;
        }

        self.log_success(
            &context,
            &request,
            meta.as_ref().map(|m| m.deployment_id.clone()),
            Some(meta.as_ref().map(|m| m.model_used.clone()).unwrap_or_else(|| request.model.clone())),
            start,
            meta.as_ref().map(|m| m.attempts).unwrap_or(0),
            cache_hit,
            response.clone(),
            &dynamic_params,
        );

        // 9. Return.
        Ok(response)
    }

    /// Service a streaming chat completion: same stages 1-3 as
    /// [`Self::chat_completion`], then either a true provider stream or,
    /// when the selected deployment forces non-streaming, a single buffered
    /// response wrapped as a one-chunk stream (spec.md §4.8 stage 6, S4).
    pub async fn chat_completion_stream(
        &self,
        mut request: ChatRequest,
        context: RequestContext,
    ) -> Result<ChatChunkStream> {
        let start = Instant::now();

        canonicalize(&mut request)?;
        let model_name = self.router.resolve_model_name(&request.model);
        request.model = model_name.clone();
        let dynamic_params = request_metadata_params(&context);

        let principal_dimensions = dimensions::build_dimensions(&context, &model_name, self.limits.as_ref());
        let estimated_tokens = estimate_prompt_tokens(&request);
        let admission = match self.admitter.admit(&principal_dimensions, estimated_tokens).await {
            Ok(admission) => admission,
            Err(err) => {
                self.log_failure(&context, &request, None, None, start, 0, false, &err, &dynamic_params);
                return Err(err);
            }
        };

        let router = self.router.clone();
        let base_request = request.clone();
        let base_context = context.clone();

        let exec_result = self
            .router
            .execute(&model_name, move |deployment_id| {
                let router = router.clone();
                let request = base_request.clone();
                let mut context = base_context.clone();
                async move { dispatch_stream_once(&router, &deployment_id, request, &mut context).await }
            })
            .await;

        match exec_result {
            Ok(result) => {
                // Accounting for a streaming call is necessarily approximate
                // (actual usage isn't known until the stream drains); the
                // RPM/parallel reservation is finalized immediately and no
                // spend is recorded here. A future chunk-counting layer can
                // call `record_success` again once the stream completes.
                self.admitter.record_success(&admission, 0, 0.0).await;
                self.log_success(
                    &context,
                    &request,
                    Some(result.deployment_id),
                    Some(result.model_used),
                    start,
                    result.attempts,
                    false,
                    ChatResponse {
                        id: request_id_placeholder(&context),
                        object: "chat.completion".to_string(),
                        created: 0,
                        model: request.model.clone(),
                        choices: Vec::new(),
                        usage: None,
                        system_fingerprint: None,
                    },
                    &dynamic_params,
                );
                Ok(result.result)
            }
            Err(router_err) => {
                self.admitter.record_failure(&admission).await;
                let err: GatewayError = router_err.into();
                self.log_failure(&context, &request, None, None, start, 0, false, &err, &dynamic_params);
                Err(err)
            }
        }
    }

    async fn spend_delta(&self, deployment_id: &str, response: &ChatResponse) -> f64 {
        let Some(deployment) = self.router.get_deployment(deployment_id) else {
            return 0.0;
        };
        let provider = deployment.provider.clone();
        let model = deployment.model.clone();
        drop(deployment);

        let Some(usage) = &response.usage else {
            return 0.0;
        };
        provider
            .calculate_cost(&model, usage.prompt_tokens, usage.completion_tokens)
            .await
            .unwrap_or(0.0)
    }

    #[allow(clippy::too_many_arguments)]
    fn log_success(
        &self,
        context: &RequestContext,
        request: &ChatRequest,
        deployment_id: Option<String>,
        model_used: Option<String>,
        start: Instant,
        attempts: u32,
        cache_hit: bool,
        response: ChatResponse,
        dynamic_params: &std::collections::HashMap<String, serde_json::Value>,
    ) {
        let usage = response.usage.clone();
        let payload = StandardLoggingPayload {
            request_id: context.request_id.clone(),
            call_type: "chat_completion",
            model_requested: request.model.clone(),
            model_used,
            deployment_id,
            principal: PrincipalInfo::from(context),
            response: Some(response),
            usage,
            cache_hit,
            attempts: attempts.max(1),
            duration: start.elapsed(),
            outcome: CallOutcome::Success,
            dynamic_params: dynamic_params.clone(),
        };
        self.callbacks.dispatch_success(payload);
    }

    #[allow(clippy::too_many_arguments)]
    fn log_failure(
        &self,
        context: &RequestContext,
        request: &ChatRequest,
        deployment_id: Option<String>,
        model_used: Option<String>,
        start: Instant,
        attempts: u32,
        cache_hit: bool,
        err: &GatewayError,
        dynamic_params: &std::collections::HashMap<String, serde_json::Value>,
    ) {
        let (_, code, message) = err.error_parts();
        let payload = StandardLoggingPayload {
            request_id: context.request_id.clone(),
            call_type: "chat_completion",
            model_requested: request.model.clone(),
            model_used,
            deployment_id,
            principal: PrincipalInfo::from(context),
            response: None,
            usage: None,
            cache_hit,
            attempts: attempts.max(1),
            duration: start.elapsed(),
            outcome: CallOutcome::Failure {
                kind: code.to_string(),
                message,
            },
            dynamic_params: dynamic_params.clone(),
        };
        self.callbacks.dispatch_failure(payload);
    }
}

fn request_id_placeholder(context: &RequestContext) -> String {
    context.request_id.clone()
}

fn canonicalize(request: &mut ChatRequest) -> Result<()> {
    if request.model.trim().is_empty() {
        return Err(GatewayError::bad_request("model is required"));
    }
    if request.messages.is_empty() {
        return Err(GatewayError::bad_request("messages must not be empty"));
    }
    Ok(())
}

fn request_metadata_params(context: &RequestContext) -> std::collections::HashMap<String, serde_json::Value> {
    context.metadata.clone()
}

/// Rough pre-call token estimate (chars / 4) used only to guard TPM
/// admission before the real usage is known; refined post-call via
/// `RateLimitAdmitter::record_success`.
fn estimate_prompt_tokens(request: &ChatRequest) -> u32 {
    let chars: usize = request
        .messages
        .iter()
        .map(|m| match &m.content {
            Some(crate::core::types::requests::MessageContent::Text(text)) => text.len(),
            Some(crate::core::types::requests::MessageContent::Parts(parts)) => {
                parts.len() * 16
            }
            None => 0,
        })
        .sum();
    ((chars / 4) as u32).max(1)
}

async fn dispatch_once(
    router: &Router,
    deployment_id: &str,
    mut request: ChatRequest,
    context: &mut RequestContext,
) -> std::result::Result<(ChatResponse, u64), ProviderError> {
    let (provider, force_non_streaming) = {
        let deployment = router.get_deployment(deployment_id).ok_or_else(|| ProviderError::Other {
            provider: "router",
            message: format!("deployment {deployment_id} vanished mid-dispatch"),
        })?;
        (deployment.provider.clone(), deployment.config.force_non_streaming)
    };
    context.force_non_streaming = force_non_streaming;
    request.stream = false;

    let response = provider.chat_completion(request, context.clone()).await?;
    let tokens = response.usage.as_ref().map(|u| u.total_tokens as u64).unwrap_or(0);
    Ok((response, tokens))
}

async fn dispatch_stream_once(
    router: &Router,
    deployment_id: &str,
    mut request: ChatRequest,
    context: &mut RequestContext,
) -> std::result::Result<(ChatChunkStream, u64), ProviderError> {
    let (provider, force_non_streaming) = {
        let deployment = router.get_deployment(deployment_id).ok_or_else(|| ProviderError::Other {
            provider: "router",
            message: format!("deployment {deployment_id} vanished mid-dispatch"),
        })?;
        (deployment.provider.clone(), deployment.config.force_non_streaming)
    };
    context.force_non_streaming = force_non_streaming;

    if force_non_streaming {
        request.stream = false;
        let response = provider.chat_completion(request, context.clone()).await?;
        Ok((single_chunk_stream(response), 0))
    } else {
        request.stream = true;
        let stream = provider.chat_completion_stream(request, context.clone()).await?;
        Ok((stream, 0))
    }
}

/// Dispatch metadata `get_or_build`'s `Result<ChatResponse>` signature has no
/// room for; the build closure stashes it here for the caller to read back.
struct DispatchMeta {
    deployment_id: String,
    model_used: String,
    attempts: u32,
}
