//! Request context types

use std::collections::HashMap;
use std::time::{Duration, SystemTime};

/// Request context for tracking and metadata
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Request ID
    pub request_id: String,
    /// User ID
    pub user_id: Option<String>,
    /// Client IP
    pub client_ip: Option<String>,
    /// User agent
    pub user_agent: Option<String>,
    /// Custom headers
    pub headers: HashMap<String, String>,
    /// Start time
    pub start_time: SystemTime,
    /// Extra metadata
    pub metadata: HashMap<String, serde_json::Value>,
    /// Trace ID (for distributed tracing)
    pub trace_id: Option<String>,
    /// Span ID
    pub span_id: Option<String>,
    /// Set by the request pipeline when the selected deployment's
    /// `DeploymentConfig::force_non_streaming` is set. Provider adapters
    /// must force `stream: false` on the outgoing payload when this is true,
    /// regardless of what the caller's `ChatRequest.stream` asked for.
    pub force_non_streaming: bool,
    /// API key identifier, for the `api-key` rate-limit/budget dimension.
    pub api_key: Option<String>,
    /// Team identifier, for the `team` rate-limit/budget dimension.
    pub team_id: Option<String>,
    /// Organization identifier, for the `organization` rate-limit/budget dimension.
    pub organization_id: Option<String>,
    /// End-user identifier passed through from the caller (distinct from
    /// `user_id`, which identifies the authenticated proxy user), for the
    /// `end-user` rate-limit/budget dimension.
    pub end_user_id: Option<String>,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            user_id: None,
            client_ip: None,
            user_agent: None,
            headers: HashMap::new(),
            start_time: SystemTime::now(),
            metadata: HashMap::new(),
            trace_id: None,
            span_id: None,
            force_non_streaming: false,
            api_key: None,
            team_id: None,
            organization_id: None,
            end_user_id: None,
        }
    }
}

impl RequestContext {
    /// Create new request context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set user ID
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Set client IP
    pub fn with_client_ip(mut self, client_ip: impl Into<String>) -> Self {
        self.client_ip = Some(client_ip.into());
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Add header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Set trace ID
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Mark this request as forced non-streaming by the selected deployment.
    pub fn with_force_non_streaming(mut self, force_non_streaming: bool) -> Self {
        self.force_non_streaming = force_non_streaming;
        self
    }

    /// Set the API key identifier.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the team identifier.
    pub fn with_team_id(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }

    /// Set the organization identifier.
    pub fn with_organization_id(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    /// Set the end-user identifier.
    pub fn with_end_user_id(mut self, end_user_id: impl Into<String>) -> Self {
        self.end_user_id = Some(end_user_id.into());
        self
    }

    /// Get elapsed time
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed().unwrap_or_default()
    }
}
