//! AI Provider implementations using Rust-idiomatic enum-based design
//!
//! This module contains the unified Provider enum and all provider implementations.

// Base infrastructure
pub mod base;

// Provider modules
pub mod anthropic;
pub mod azure;
pub mod bedrock;
pub mod gemini;
pub mod openai;

// Registry and unified provider
pub mod base_provider;
pub mod provider_registry;
pub mod thinking;
pub mod unified_provider;

// Export main types
pub use crate::core::traits::LLMProvider;
use crate::core::types::common::{ProviderCapability, RequestContext};
use crate::core::types::requests::{ChatRequest, EmbeddingRequest, ImageGenerationRequest};
use crate::core::types::responses::{
    ChatChunk, ChatResponse, EmbeddingResponse, ImageGenerationResponse,
};
use chrono::{DateTime, Utc};
pub use provider_registry::ProviderRegistry;
pub use unified_provider::{ProviderError, UnifiedProviderError}; // Both for compatibility

/// Normalize a `ChatRequest` before handing it to a provider's own
/// transform logic: when the selected deployment forces non-streaming
/// dispatch, clear `stream` regardless of what the caller asked for, and
/// strip any stray `force_non_streaming` key a caller might have set as an
/// extra param so it never reaches the upstream payload. Every adapter's
/// `transform_request` calls this first.
pub(crate) fn sanitize_request_for_dispatch(mut request: ChatRequest, context: &RequestContext) -> ChatRequest {
    request.extra_params.remove("force_non_streaming");
    if context.force_non_streaming {
        request.stream = false;
    }
    request
}

/// Model pricing information
#[derive(Debug, Clone)]
pub struct ModelPricing {
    pub model: String,
    pub input_cost_per_1k: f64,
    pub output_cost_per_1k: f64,
    pub currency: String,
    pub updated_at: DateTime<Utc>,
}

/// Provider type enumeration
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ProviderType {
    OpenAI,
    Anthropic,
    Bedrock,
    Azure,
    Gemini,
    Custom(String),
}

impl From<&str> for ProviderType {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "openai" => ProviderType::OpenAI,
            "anthropic" => ProviderType::Anthropic,
            "bedrock" | "aws-bedrock" => ProviderType::Bedrock,
            "azure" | "azure-openai" => ProviderType::Azure,
            "gemini" | "google" | "vertex" => ProviderType::Gemini,
            _ => ProviderType::Custom(s.to_string()),
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderType::OpenAI => write!(f, "openai"),
            ProviderType::Anthropic => write!(f, "anthropic"),
            ProviderType::Bedrock => write!(f, "bedrock"),
            ProviderType::Azure => write!(f, "azure"),
            ProviderType::Gemini => write!(f, "gemini"),
            ProviderType::Custom(name) => write!(f, "{}", name),
        }
    }
}

// ==================== Provider Dispatch Macros ====================
// These macros eliminate repetitive match patterns across all provider methods

/// Macro for dispatching synchronous methods to all providers
macro_rules! dispatch_provider {
    ($self:expr, $method:ident) => {
        match $self {
            Provider::OpenAI(p) => p.$method(),
            Provider::Anthropic(p) => p.$method(),
            Provider::Azure(p) => p.$method(),
            Provider::Bedrock(p) => p.$method(),
            Provider::Gemini(p) => p.$method(),
        }
    };

    ($self:expr, $method:ident, $($arg:expr),+) => {
        match $self {
            Provider::OpenAI(p) => p.$method($($arg),+),
            Provider::Anthropic(p) => p.$method($($arg),+),
            Provider::Azure(p) => p.$method($($arg),+),
            Provider::Bedrock(p) => p.$method($($arg),+),
            Provider::Gemini(p) => p.$method($($arg),+),
        }
    };
}

/// Macro for dispatching async methods with unified error conversion
macro_rules! dispatch_provider_async {
    ($self:expr, $method:ident, $($arg:expr),*) => {
        match $self {
            Provider::OpenAI(p) => LLMProvider::$method(p, $($arg),*).await.map_err(ProviderError::from),
            Provider::Anthropic(p) => LLMProvider::$method(p, $($arg),*).await.map_err(ProviderError::from),
            Provider::Azure(p) => LLMProvider::$method(p, $($arg),*).await.map_err(ProviderError::from),
            Provider::Bedrock(p) => LLMProvider::$method(p, $($arg),*).await.map_err(ProviderError::from),
            Provider::Gemini(p) => LLMProvider::$method(p, $($arg),*).await.map_err(ProviderError::from),
        }
    };
}

/// Macro for dispatching methods that return values directly (no Result)
macro_rules! dispatch_provider_value {
    ($self:expr, $method:ident) => {
        match $self {
            Provider::OpenAI(p) => LLMProvider::$method(p),
            Provider::Anthropic(p) => LLMProvider::$method(p),
            Provider::Azure(p) => LLMProvider::$method(p),
            Provider::Bedrock(p) => LLMProvider::$method(p),
            Provider::Gemini(p) => LLMProvider::$method(p),
        }
    };

    ($self:expr, $method:ident, $($arg:expr),+) => {
        match $self {
            Provider::OpenAI(p) => LLMProvider::$method(p, $($arg),+),
            Provider::Anthropic(p) => LLMProvider::$method(p, $($arg),+),
            Provider::Azure(p) => LLMProvider::$method(p, $($arg),+),
            Provider::Bedrock(p) => LLMProvider::$method(p, $($arg),+),
            Provider::Gemini(p) => LLMProvider::$method(p, $($arg),+),
        }
    };
}

/// Macro for dispatching async methods without error transformation
macro_rules! dispatch_provider_async_direct {
    ($self:expr, $method:ident) => {
        match $self {
            Provider::OpenAI(p) => LLMProvider::$method(p).await,
            Provider::Anthropic(p) => LLMProvider::$method(p).await,
            Provider::Azure(p) => LLMProvider::$method(p).await,
            Provider::Bedrock(p) => LLMProvider::$method(p).await,
            Provider::Gemini(p) => LLMProvider::$method(p).await,
        }
    };
}

/// Unified Provider Enum (Rust-idiomatic design)
///
/// This enum provides zero-cost abstractions and type safety for all providers.
/// Each variant contains a concrete provider implementation.
#[derive(Debug, Clone)]
pub enum Provider {
    OpenAI(openai::OpenAIProvider),
    Anthropic(anthropic::AnthropicProvider),
    Azure(azure::AzureOpenAIProvider),
    Bedrock(bedrock::BedrockProvider),
    Gemini(gemini::GeminiProvider),
}

impl Provider {
    /// Get provider name
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAI(_) => "openai",
            Provider::Anthropic(_) => "anthropic",
            Provider::Azure(_) => "azure",
            Provider::Bedrock(_) => "bedrock",
            Provider::Gemini(_) => "gemini",
        }
    }

    /// Get provider type
    pub fn provider_type(&self) -> ProviderType {
        match self {
            Provider::OpenAI(_) => ProviderType::OpenAI,
            Provider::Anthropic(_) => ProviderType::Anthropic,
            Provider::Azure(_) => ProviderType::Azure,
            Provider::Bedrock(_) => ProviderType::Bedrock,
            Provider::Gemini(_) => ProviderType::Gemini,
        }
    }

    /// Check if provider supports a specific model
    pub fn supports_model(&self, model: &str) -> bool {
        use crate::core::traits::LLMProvider;
        dispatch_provider_value!(self, supports_model, model)
    }

    /// Get provider capabilities
    pub fn capabilities(&self) -> &'static [ProviderCapability] {
        dispatch_provider!(self, capabilities)
    }

    /// Execute chat completion
    pub async fn chat_completion(
        &self,
        request: ChatRequest,
        context: RequestContext,
    ) -> Result<ChatResponse, UnifiedProviderError> {
        use crate::core::traits::LLMProvider;
        dispatch_provider_async!(self, chat_completion, request, context)
    }

    /// Execute health check
    pub async fn health_check(&self) -> crate::core::types::common::HealthStatus {
        use crate::core::traits::LLMProvider;
        dispatch_provider_async_direct!(self, health_check)
    }

    /// List available models
    pub fn list_models(&self) -> &[crate::core::types::common::ModelInfo] {
        use crate::core::traits::LLMProvider;
        dispatch_provider_value!(self, models)
    }

    /// Calculate cost using unified pricing database
    pub async fn calculate_cost(
        &self,
        model: &str,
        input_tokens: u32,
        output_tokens: u32,
    ) -> Result<f64, UnifiedProviderError> {
        let usage = crate::core::providers::base::pricing::Usage {
            prompt_tokens: input_tokens,
            completion_tokens: output_tokens,
            total_tokens: input_tokens + output_tokens,
            reasoning_tokens: None,
        };

        Ok(crate::core::providers::base::get_pricing_db().calculate(model, &usage))
    }

    /// Execute streaming chat completion
    pub async fn chat_completion_stream(
        &self,
        request: ChatRequest,
        context: RequestContext,
    ) -> Result<
        std::pin::Pin<
            Box<
                dyn futures::Stream<Item = Result<ChatChunk, UnifiedProviderError>>
                    + Send
                    + 'static,
            >,
        >,
        UnifiedProviderError,
    > {
        use crate::core::traits::LLMProvider;
        use futures::StreamExt;

        match self {
            Provider::OpenAI(p) => {
                let stream = LLMProvider::chat_completion_stream(p, request, context).await?;
                Ok(Box::pin(stream.map(|result| result)))
            }
            Provider::Anthropic(p) => {
                let stream = LLMProvider::chat_completion_stream(p, request, context).await?;
                Ok(Box::pin(stream.map(|result| result)))
            }
            Provider::Azure(p) => {
                let stream = LLMProvider::chat_completion_stream(p, request, context).await?;
                Ok(Box::pin(stream.map(|result| result)))
            }
            Provider::Bedrock(p) => {
                let stream = LLMProvider::chat_completion_stream(p, request, context).await?;
                Ok(Box::pin(stream.map(|result| result)))
            }
            Provider::Gemini(p) => {
                let stream = LLMProvider::chat_completion_stream(p, request, context).await?;
                Ok(Box::pin(stream.map(|result| result)))
            }
        }
    }

    /// Create embeddings
    pub async fn create_embeddings(
        &self,
        request: EmbeddingRequest,
        context: RequestContext,
    ) -> Result<EmbeddingResponse, UnifiedProviderError> {
        use crate::core::traits::LLMProvider;

        match self {
            Provider::OpenAI(p) => LLMProvider::embeddings(p, request, context).await,
            Provider::Azure(p) => LLMProvider::embeddings(p, request, context).await,
            _ => Err(UnifiedProviderError::not_implemented(
                "unknown",
                format!("Embeddings not supported by {}", self.name()),
            )),
        }
    }

    /// Create images
    pub async fn create_images(
        &self,
        request: ImageGenerationRequest,
        context: RequestContext,
    ) -> Result<ImageGenerationResponse, UnifiedProviderError> {
        use crate::core::traits::LLMProvider;

        match self {
            Provider::OpenAI(p) => LLMProvider::image_generation(p, request, context).await,
            _ => Err(UnifiedProviderError::not_implemented(
                "unknown",
                format!("Image generation not supported by {}", self.name()),
            )),
        }
    }

    /// Alias for chat_completion (for backward compatibility)
    pub async fn completion(
        &self,
        request: ChatRequest,
        context: RequestContext,
    ) -> Result<ChatResponse, UnifiedProviderError> {
        self.chat_completion(request, context).await
    }

    /// Alias for create_embeddings (for backward compatibility)
    pub async fn embedding(
        &self,
        request: EmbeddingRequest,
        context: RequestContext,
    ) -> Result<EmbeddingResponse, UnifiedProviderError> {
        self.create_embeddings(request, context).await
    }

    /// Alias for create_images (for backward compatibility)
    pub async fn image_generation(
        &self,
        request: ImageGenerationRequest,
        context: RequestContext,
    ) -> Result<ImageGenerationResponse, UnifiedProviderError> {
        self.create_images(request, context).await
    }

    /// Get model information by ID
    pub async fn get_model(
        &self,
        model_id: &str,
    ) -> Result<Option<crate::core::types::common::ModelInfo>, UnifiedProviderError> {
        let models = self.list_models();
        for model in models {
            if model.id == model_id || model.name == model_id {
                return Ok(Some(model.clone()));
            }
        }
        Ok(None)
    }
}

/// Create a provider from configuration
///
/// This is the main factory function for creating providers
pub async fn create_provider(
    config: crate::core::types::common::ProviderConfig,
) -> Result<Provider, ProviderError> {
    let provider_type = match config.name.as_str() {
        "openai" => ProviderType::OpenAI,
        "anthropic" => ProviderType::Anthropic,
        "azure" => ProviderType::Azure,
        "bedrock" => ProviderType::Bedrock,
        "gemini" => ProviderType::Gemini,
        name => {
            return Err(ProviderError::not_implemented(
                "unknown",
                format!("Unknown provider: {}", name),
            ));
        }
    };

    Err(ProviderError::not_implemented(
        "unknown",
        format!(
            "Provider factory for {:?} not yet fully implemented",
            provider_type
        ),
    ))
}

// Provider factory functions
impl Provider {
    /// Create provider from configuration
    pub fn from_config(
        provider_type: ProviderType,
        _config: serde_json::Value,
    ) -> Result<Self, ProviderError> {
        match provider_type {
            ProviderType::OpenAI => Err(ProviderError::not_implemented("openai", "factory creation")),
            ProviderType::Anthropic => Err(ProviderError::not_implemented(
                "anthropic",
                "factory creation",
            )),
            _ => Err(ProviderError::not_implemented(
                "unknown",
                format!("Factory for {:?} not implemented", provider_type),
            )),
        }
    }
}
