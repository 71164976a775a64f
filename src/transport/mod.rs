//! Shared HTTP transport: one pooled client per process, plus the
//! line-oriented SSE byte stream every streaming adapter sits on top of.

pub mod client;
pub mod sse;

pub use client::{HttpTransport, RawByteStream, TransportResponse};
pub use sse::SseByteStream;
