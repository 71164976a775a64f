//! Test fixtures and data factories
//!
//! Provides factory methods for creating test data with sensible defaults.
//! All factories create real objects, not mocks.

/// Factory for creating chat requests
pub struct ChatRequestFactory;

impl ChatRequestFactory {
    /// Create a simple chat request with user message
    pub fn simple(model: &str, content: &str) -> SimpleChatRequest {
        SimpleChatRequest {
            model: model.to_string(),
            content: content.to_string(),
            stream: false,
        }
    }

    /// Create a streaming chat request
    pub fn streaming(model: &str, content: &str) -> SimpleChatRequest {
        SimpleChatRequest {
            model: model.to_string(),
            content: content.to_string(),
            stream: true,
        }
    }
}

/// Simple chat request for testing
#[derive(Debug, Clone)]
pub struct SimpleChatRequest {
    pub model: String,
    pub content: String,
    pub stream: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_factory() {
        let request = ChatRequestFactory::simple("gpt-4", "Hello");
        assert_eq!(request.model, "gpt-4");
        assert!(!request.stream);
    }

    #[test]
    fn test_streaming_request() {
        let request = ChatRequestFactory::streaming("gpt-4", "Hello");
        assert!(request.stream);
    }
}
