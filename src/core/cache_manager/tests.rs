//! Cache manager tests

#[cfg(test)]
mod tests {
    use crate::core::cache_manager::{CacheConfig, CacheKey, CacheManager};
    use crate::core::types::requests::{ChatMessage, ChatRequest, MessageContent, MessageRole};
    use crate::core::types::responses::ChatResponse;
    use crate::utils::error::Result;

    fn request(content: &str) -> ChatRequest {
        ChatRequest {
            model: "gpt-4".to_string(),
            messages: vec![ChatMessage {
                role: MessageRole::User,
                content: Some(MessageContent::Text(content.to_string())),
                name: None,
                tool_calls: None,
                tool_call_id: None,
                function_call: None,
            }],
            ..Default::default()
        }
    }

    fn response(id: &str) -> ChatResponse {
        ChatResponse {
            id: id.to_string(),
            object: "chat.completion".to_string(),
            created: 1234567890,
            model: "gpt-4".to_string(),
            choices: vec![],
            usage: None,
            system_fingerprint: None,
        }
    }

    #[tokio::test]
    async fn test_cache_manager() -> Result<()> {
        let config = CacheConfig::default();
        let cache = CacheManager::new(config)?;

        let key = CacheKey::from_request(&request("Hello"), None);

        // Should be empty initially
        let initial_result = cache.get(&key).await?;
        assert!(initial_result.is_none());

        // Store a response
        let response = response("test");
        cache.put(key.clone(), response.clone()).await?;

        // Should find the cached response
        let cached = cache.get(&key).await?;
        assert!(cached.is_some());
        if let Some(cached_response) = cached {
            assert_eq!(cached_response.id, response.id);
        }

        Ok(())
    }

    #[test]
    fn test_cache_key_generation() {
        let key1 = CacheKey::from_request(&request("Hello"), None);
        let key2 = CacheKey::from_request(&request("Hello"), None);

        assert_eq!(key1, key2);
    }

    #[tokio::test]
    async fn test_single_flight_build_runs_once() -> Result<()> {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let cache = Arc::new(CacheManager::new(CacheConfig::default())?);
        let key = CacheKey::from_request(&request("single-flight"), None);
        let build_count = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            let key = key.clone();
            let build_count = build_count.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_build(key, || async {
                        build_count.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                        Ok(response("built-once"))
                    })
                    .await
            }));
        }

        for handle in handles {
            let response = handle.await.unwrap()?;
            assert_eq!(response.id, "built-once");
        }

        assert_eq!(build_count.load(Ordering::SeqCst), 1);
        Ok(())
    }
}
