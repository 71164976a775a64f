//! The `LLMProvider` trait: the core abstraction every provider adapter implements.

use async_trait::async_trait;
use futures::Stream;
use std::collections::HashMap;
use std::fmt::Debug;
use std::pin::Pin;

use crate::core::types::{
    common::{HealthStatus, ModelInfo, ProviderCapability, RequestContext},
    requests::{ChatRequest, EmbeddingRequest, ImageGenerationRequest},
    responses::{ChatChunk, ChatResponse, EmbeddingResponse, ImageGenerationResponse},
};

use super::super::config::ProviderConfig;
use crate::core::traits::error_mapper::ErrorMapper;
use crate::core::types::errors::ProviderErrorTrait;
use serde_json::Value;

/// Unified LLM Provider interface.
///
/// This is the core abstraction every adapter (OpenAI, Anthropic, Azure,
/// Bedrock, Gemini) implements so the router and request pipeline can treat
/// them uniformly.
#[async_trait]
pub trait LLMProvider: Send + Sync + Debug + 'static {
    /// Provider configuration type.
    type Config: ProviderConfig + Clone + Send + Sync;

    /// Provider-specific error type.
    type Error: ProviderErrorTrait;

    /// Error mapper for converting HTTP/JSON/network errors into `Self::Error`.
    type ErrorMapper: ErrorMapper<Self::Error>;

    /// Static string identifier for the provider, e.g. `"openai"`.
    fn name(&self) -> &'static str;

    /// Static capability list for this provider.
    fn capabilities(&self) -> &'static [ProviderCapability];

    /// Models this provider supports.
    fn models(&self) -> &[ModelInfo];

    fn supports_model(&self, model: &str) -> bool {
        self.models().iter().any(|m| m.id == model)
    }

    fn supports_tools(&self) -> bool {
        self.capabilities()
            .contains(&ProviderCapability::ToolCalling)
    }

    fn supports_streaming(&self) -> bool {
        self.capabilities()
            .contains(&ProviderCapability::ChatCompletionStream)
    }

    fn supports_image_generation(&self) -> bool {
        self.capabilities()
            .contains(&ProviderCapability::ImageGeneration)
    }

    fn supports_embeddings(&self) -> bool {
        self.capabilities().contains(&ProviderCapability::Embeddings)
    }

    fn supports_vision(&self) -> bool {
        false
    }

    /// OpenAI parameter names this provider understands for `model`.
    fn get_supported_openai_params(&self, model: &str) -> &'static [&'static str];

    /// Map OpenAI-shaped parameters onto this provider's own parameter names.
    async fn map_openai_params(
        &self,
        params: HashMap<String, Value>,
        model: &str,
    ) -> Result<HashMap<String, Value>, Self::Error>;

    /// Convert a canonical `ChatRequest` into this provider's wire payload.
    ///
    /// Implementations must honor `context.force_non_streaming`: when set,
    /// the outgoing payload's `stream` field must be `false` regardless of
    /// the request's own `stream` flag, and no `force_non_streaming` key may
    /// leak into the payload sent upstream.
    async fn transform_request(
        &self,
        request: ChatRequest,
        context: RequestContext,
    ) -> Result<Value, Self::Error>;

    /// Convert a provider's raw response bytes into a canonical `ChatResponse`.
    async fn transform_response(
        &self,
        raw_response: &[u8],
        model: &str,
        request_id: &str,
    ) -> Result<ChatResponse, Self::Error>;

    fn get_error_mapper(&self) -> Self::ErrorMapper;

    /// Execute a (possibly buffered-non-streaming) chat completion.
    async fn chat_completion(
        &self,
        request: ChatRequest,
        context: RequestContext,
    ) -> Result<ChatResponse, Self::Error>;

    /// Execute a streaming chat completion. Defaults to "not supported" for
    /// providers that never implement it.
    async fn chat_completion_stream(
        &self,
        _request: ChatRequest,
        _context: RequestContext,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<ChatChunk, Self::Error>> + Send>>, Self::Error>
    {
        Err(Self::Error::not_supported("streaming"))
    }

    async fn embeddings(
        &self,
        _request: EmbeddingRequest,
        _context: RequestContext,
    ) -> Result<EmbeddingResponse, Self::Error> {
        Err(Self::Error::not_supported("embeddings"))
    }

    async fn image_generation(
        &self,
        _request: ImageGenerationRequest,
        _context: RequestContext,
    ) -> Result<ImageGenerationResponse, Self::Error> {
        Err(Self::Error::not_supported("image_generation"))
    }

    async fn health_check(&self) -> HealthStatus;

    async fn calculate_cost(
        &self,
        model: &str,
        input_tokens: u32,
        output_tokens: u32,
    ) -> Result<f64, Self::Error>;

    async fn get_average_latency(&self) -> Result<std::time::Duration, Self::Error> {
        Ok(std::time::Duration::from_millis(100))
    }

    async fn get_success_rate(&self) -> Result<f32, Self::Error> {
        Ok(0.99)
    }

    async fn estimate_tokens(&self, text: &str) -> Result<u32, Self::Error> {
        Ok((text.len() as f64 / 4.0).ceil() as u32)
    }
}
