//! # Request-lifecycle engine for a unified LLM gateway
//!
//! This crate implements the provider-agnostic core of an LLM gateway: canonical
//! request/response types, provider adapters, a pooled HTTP transport, a streaming
//! engine, rate limiting and budget enforcement, response caching, a router with
//! load balancing and failover, a request pipeline tying those stages together,
//! and logging/callback hooks.
//!
//! It is a library, not a server: an HTTP front end (routes, auth, admin UI)
//! is expected to sit on top of [`core::router::Router`] and the request
//! pipeline and is out of scope here.

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod transport;
pub mod utils;

pub use config::Config;
pub use utils::error::{GatewayError, Result};

// Canonical message/content types
pub use core::types::{MessageContent, MessageRole};

// Streaming types
pub use core::streaming::{ChatCompletionChunk, ChatCompletionChunkChoice, ChatCompletionDelta};

// Provider adapters
pub use core::models::{RequestContext, openai::*};
pub use core::providers::{
    Provider, ProviderError, ProviderRegistry, ProviderType, UnifiedProviderError,
};

// Router
pub use core::router::{Deployment, DeploymentConfig, Router, RouterConfig, RoutingStrategy};

// Request pipeline
pub use core::pipeline::{ChatChunkStream, PrincipalLimitsProvider, RequestPipeline, StaticLimitsProvider};

// Logging & callbacks
pub use core::callbacks::{
    AsyncLoggingCallback, CallOutcome, LoggingCallbackManager, PrincipalInfo, StandardLoggingPayload,
    SyncLoggingCallback,
};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Gateway build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: "unknown",
            git_hash: "unknown",
            rust_version: "unknown",
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info() {
        let info = build_info();
        assert!(!info.version.is_empty());
        assert_eq!(info.version, VERSION);
    }

    #[test]
    fn test_constants() {
        // Test that constants are defined and have expected values
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
        assert_eq!(NAME, env!("CARGO_PKG_NAME"));
        assert_eq!(DESCRIPTION, env!("CARGO_PKG_DESCRIPTION"));
    }
}
