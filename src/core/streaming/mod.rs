//! Streaming response handling for AI providers
//!
//! This module provides Server-Sent Events (SSE) streaming support for real-time AI responses.

use bytes::Bytes;
use crate::utils::error::Result;
use futures::stream::Stream;

// Module declarations
mod types;
mod handler;
mod assembly;
pub mod providers;
pub mod utils;

#[cfg(test)]
mod tests;

// Re-export types for backward compatibility
pub use types::{
    ChatCompletionChunk,
    ChatCompletionChunkChoice,
    ChatCompletionDelta,
    Event,
    FunctionCallDelta,
    ToolCallDelta,
};

// Re-export handler
pub use handler::StreamingHandler;

// Re-export the tool-call index assembler
pub use assembly::ToolCallAssembler;

// Re-export provider implementations
pub use providers::{
    AnthropicStreaming,
    GenericStreaming,
    OpenAIStreaming,
};

// Re-export utils
pub use utils::{
    create_error_event,
    create_heartbeat_event,
    is_done_line,
    parse_sse_line,
};

/// The headers an HTTP front end must set to serve an [`SseResponse`] as
/// `text/event-stream`.
pub const SSE_HEADERS: &[(&str, &str)] = &[
    ("content-type", "text/event-stream"),
    ("cache-control", "no-cache"),
    ("connection", "keep-alive"),
];

/// A Server-Sent Events response: the headers to send plus the byte stream
/// to forward as the body. Building the actual wire response is left to
/// whatever HTTP front end is serving requests.
pub struct SseResponse<S>
where
    S: Stream<Item = Result<Bytes>> + Send + 'static,
{
    pub headers: &'static [(&'static str, &'static str)],
    pub body: S,
}

/// Wrap a provider byte stream into an [`SseResponse`].
pub fn create_sse_response<S>(stream: S) -> SseResponse<S>
where
    S: Stream<Item = Result<Bytes>> + Send + 'static,
{
    SseResponse {
        headers: SSE_HEADERS,
        body: stream,
    }
}
