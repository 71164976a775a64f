//! Process-wide pooled HTTP client shared by every provider adapter.

use std::env;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures::Stream;
use reqwest::{Client, Response};

use crate::core::providers::base::connection_pool::PoolConfig;
use crate::core::providers::unified_provider::ProviderError;

use super::sse::SseByteStream;

fn default_user_agent() -> String {
    env::var("LITELLM_USER_AGENT").unwrap_or_else(|_| format!("litellm-rs/{}", env!("CARGO_PKG_VERSION")))
}

/// A boxed raw byte stream as handed back by `reqwest::Response::bytes_stream`.
pub type RawByteStream = Pin<Box<dyn Stream<Item = reqwest::Result<Bytes>> + Send>>;

/// Outcome of a provider HTTP call: a buffered response, or (for `stream:
/// true` requests) a line-oriented SSE byte stream.
pub enum TransportResponse {
    Buffered(Response),
    Streaming(SseByteStream<RawByteStream>),
}

/// The single pooled `reqwest::Client` every adapter dispatches through.
///
/// Built once behind an `Arc` so cloning `HttpTransport` is cheap and every
/// adapter shares the same connection pool, matching the teacher's
/// `GlobalPoolManager` shape.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Arc<Client>,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(default_user_agent())
            .timeout(Duration::from_secs(PoolConfig::TIMEOUT_SECS))
            .pool_idle_timeout(Duration::from_secs(PoolConfig::KEEPALIVE_SECS))
            .pool_max_idle_per_host(PoolConfig::POOL_SIZE)
            .build()
            .map_err(|e| ProviderError::configuration("transport", e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Issue a POST, returning either the buffered response or, when
    /// `stream` is true, a line-oriented SSE byte stream with blank-line
    /// filtering already applied.
    ///
    /// On a 429 or 5xx response, returns `Err` with the upstream `retry-after`
    /// header (if present) copied onto `ProviderError::RateLimit`/
    /// `ProviderUnavailable` rather than handing the error response back to
    /// the caller to re-parse.
    pub async fn post(
        &self,
        provider: &'static str,
        url: &str,
        headers: Vec<(String, String)>,
        body: serde_json::Value,
        stream: bool,
    ) -> Result<TransportResponse, ProviderError> {
        let mut request = self.client.post(url).header("Content-Type", "application/json").json(&body);
        for (key, value) in headers {
            request = request.header(&key, &value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::network(provider, e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            let retry_after = retry_after_from_headers(response.headers());
            let body_text = response.text().await.unwrap_or_default();
            return Err(if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                ProviderError::rate_limit_with_retry(provider, body_text, retry_after)
            } else {
                ProviderError::provider_unavailable_with_retry_after(provider, body_text, retry_after)
            });
        }

        if stream {
            let byte_stream: RawByteStream = Box::pin(response.bytes_stream());
            Ok(TransportResponse::Streaming(SseByteStream::new(byte_stream)))
        } else {
            Ok(TransportResponse::Buffered(response))
        }
    }
}

/// Parse the `retry-after` response header as whole seconds, per RFC 9110
/// (the HTTP-date form isn't honored; every provider this gateway talks to
/// sends the delay-seconds form).
fn retry_after_from_headers(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new().unwrap_or_else(|e| {
            tracing::error!("failed to build HttpTransport: {}, falling back to a bare client", e);
            Self {
                client: Arc::new(Client::new()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_user_agent_carries_crate_version() {
        // SAFETY: tests run single-threaded for this check; no other test mutates this var.
        unsafe {
            env::remove_var("LITELLM_USER_AGENT");
        }
        let ua = default_user_agent();
        assert!(ua.starts_with("litellm-rs/"));
    }

    #[test]
    fn user_agent_override_is_honored() {
        unsafe {
            env::set_var("LITELLM_USER_AGENT", "custom-agent/9.9");
        }
        assert_eq!(default_user_agent(), "custom-agent/9.9");
        unsafe {
            env::remove_var("LITELLM_USER_AGENT");
        }
    }

    #[tokio::test]
    async fn transport_builds_with_pooled_defaults() {
        let transport = HttpTransport::new();
        assert!(transport.is_ok());
    }
}
