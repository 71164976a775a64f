//! The canonical, serializable record handed to every logging callback
//! (spec.md §4.9).

use crate::core::types::context::RequestContext;
use crate::core::types::responses::{ChatResponse, Usage};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

/// The subject of rate-limit/budget accounting for this call, mirrored from
/// `RequestContext` so callback sinks don't need to hold onto the context
/// itself.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PrincipalInfo {
    pub api_key: Option<String>,
    pub user_id: Option<String>,
    pub team_id: Option<String>,
    pub organization_id: Option<String>,
    pub end_user_id: Option<String>,
}

impl From<&RequestContext> for PrincipalInfo {
    fn from(context: &RequestContext) -> Self {
        Self {
            api_key: context.api_key.clone(),
            user_id: context.user_id.clone(),
            team_id: context.team_id.clone(),
            organization_id: context.organization_id.clone(),
            end_user_id: context.end_user_id.clone(),
        }
    }
}

/// Outcome of the pipeline call this payload describes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallOutcome {
    Success,
    Failure { kind: String, message: String },
}

/// Canonical, serializable record passed to every registered logging
/// callback after a request completes (spec.md §4.9): request identity,
/// response/usage summary, the deployment and principal involved, timings,
/// and whether the response came from cache.
#[derive(Debug, Clone, Serialize)]
pub struct StandardLoggingPayload {
    pub request_id: String,
    pub call_type: &'static str,
    pub model_requested: String,
    pub model_used: Option<String>,
    pub deployment_id: Option<String>,
    pub principal: PrincipalInfo,
    pub response: Option<ChatResponse>,
    pub usage: Option<Usage>,
    pub cache_hit: bool,
    pub attempts: u32,
    pub duration: Duration,
    pub outcome: CallOutcome,
    /// Per-request dynamic parameters for provider-specific sinks (e.g.
    /// langfuse keys), extracted from the request's metadata at pipeline
    /// entry.
    pub dynamic_params: HashMap<String, serde_json::Value>,
}
