//! Router tests module
//!
//! Contains comprehensive tests for the unified router system.

mod cooldown_tests;
mod deployment_tests;
mod execution_tests;
mod fallback_tests;
mod router_tests;
mod strategy_tests;
