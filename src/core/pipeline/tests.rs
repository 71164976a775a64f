//! Pipeline unit tests.
//!
//! Full end-to-end coverage of `chat_completion`/`chat_completion_stream`
//! would need a fake `Provider` the router could dispatch to; this crate
//! has no such double (the router's own tests exercise `execute`/
//! `execute_once` with closures that never touch a real `Provider` either —
//! see `core::router::tests::execution_tests`). These tests cover the
//! pipeline's own pure logic instead.

use super::*;
use crate::core::types::requests::{ChatMessage, MessageContent, MessageRole};

fn request(model: &str, content: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![ChatMessage {
            role: MessageRole::User,
            content: Some(MessageContent::Text(content.to_string())),
            ..Default::default()
        }],
        ..Default::default()
    }
}

#[test]
fn canonicalize_rejects_empty_model() {
    let mut req = request("", "hi");
    let err = canonicalize(&mut req).unwrap_err();
    assert!(err.to_string().to_lowercase().contains("model"));
}

#[test]
fn canonicalize_rejects_empty_messages() {
    let mut req = request("gpt-4", "hi");
    req.messages.clear();
    let err = canonicalize(&mut req).unwrap_err();
    assert!(err.to_string().to_lowercase().contains("messages"));
}

#[test]
fn canonicalize_accepts_well_formed_request() {
    let mut req = request("gpt-4", "hi");
    assert!(canonicalize(&mut req).is_ok());
}

#[test]
fn estimate_prompt_tokens_scales_with_content_length() {
    let short = request("gpt-4", "hi");
    let long = request("gpt-4", &"a".repeat(400));
    assert!(estimate_prompt_tokens(&long) > estimate_prompt_tokens(&short));
}

#[test]
fn estimate_prompt_tokens_is_never_zero() {
    let mut req = request("gpt-4", "");
    req.messages[0].content = Some(MessageContent::Text(String::new()));
    assert_eq!(estimate_prompt_tokens(&req), 1);
}

#[test]
fn request_metadata_params_copies_context_metadata() {
    let mut context = RequestContext::default();
    context.metadata.insert("langfuse_key".to_string(), serde_json::json!("abc"));

    let params = request_metadata_params(&context);
    assert_eq!(params.get("langfuse_key"), Some(&serde_json::json!("abc")));
}
