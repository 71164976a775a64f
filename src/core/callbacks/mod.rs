//! Logging & callback dispatch (spec.md §4.9).
//!
//! `LoggingCallbackManager` owns four ordered hook lists — sync_success,
//! sync_failure, async_success, async_failure — and is the only thing
//! allowed to mutate them. Every dispatch hands registered sinks a
//! `StandardLoggingPayload`: the canonical, serializable record of what the
//! pipeline just did.

mod manager;
mod payload;

#[cfg(test)]
mod tests;

pub use manager::{AsyncLoggingCallback, LoggingCallbackManager, SyncLoggingCallback};
pub use payload::{CallOutcome, PrincipalInfo, StandardLoggingPayload};
