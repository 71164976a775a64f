//! Wraps a buffered `ChatResponse` as a single-chunk stream, for deployments
//! with `force_non_streaming=true` that still need to answer a client that
//! asked for `stream=true` (spec.md §4.8 stage 6, testable property S4).

use crate::core::providers::unified_provider::ProviderError;
use crate::core::types::requests::MessageContent;
use crate::core::types::responses::{
    ChatChunk, ChatDelta, ChatResponse, ChatStreamChoice, ToolCallDelta,
};
use futures::stream;
use std::pin::Pin;

pub type ChatChunkStream =
    Pin<Box<dyn futures::Stream<Item = Result<ChatChunk, ProviderError>> + Send>>;

/// Turn a complete `ChatResponse` into the single terminal chunk a streaming
/// client expects: one `ChatChunk` per choice carrying the full message
/// content and that choice's finish reason, usage attached on this (the
/// only) chunk.
pub fn single_chunk_stream(response: ChatResponse) -> ChatChunkStream {
    let choices = response
        .choices
        .into_iter()
        .map(|choice| {
            let content = match choice.message.content {
                Some(MessageContent::Text(text)) => Some(text),
                Some(MessageContent::Parts(_)) | None => None,
            };
            let tool_calls = choice.message.tool_calls.map(|calls| {
                calls
                    .into_iter()
                    .enumerate()
                    .map(|(index, call)| ToolCallDelta {
                        index: index as u32,
                        id: Some(call.id),
                        tool_type: Some(call.tool_type),
                        function: Some(crate::core::types::responses::FunctionCallDelta {
                            name: Some(call.function.name),
                            arguments: Some(call.function.arguments),
                        }),
                    })
                    .collect()
            });

            ChatStreamChoice {
                index: choice.index,
                delta: ChatDelta {
                    role: Some(choice.message.role),
                    content,
                    tool_calls,
                    function_call: None,
                },
                finish_reason: choice.finish_reason,
                logprobs: choice.logprobs,
            }
        })
        .collect();

    let chunk = ChatChunk {
        id: response.id,
        object: "chat.completion.chunk".to_string(),
        created: response.created,
        model: response.model,
        choices,
        usage: response.usage,
        system_fingerprint: response.system_fingerprint,
    };

    Box::pin(stream::iter(vec![Ok(chunk)]))
}
