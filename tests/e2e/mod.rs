//! End-to-end tests for the gateway engine.
//!
//! These tests verify complete request flows through the router and provider
//! adapters and require real API keys. Run with:
//! `cargo test --all-features -- --ignored`.
//!
//! Required environment variables:
//! - OPENAI_API_KEY: For OpenAI tests
//! - ANTHROPIC_API_KEY: For Anthropic tests
