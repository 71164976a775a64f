//! Line-oriented SSE byte stream.
//!
//! Sits between the raw chunked HTTP body and the per-provider SSE parsers
//! in `core/providers/base/sse.rs`. Buffers partial lines across chunk
//! boundaries and filters blank keep-alive lines at the transport boundary,
//! so every adapter receives well-formed `data: ...` lines without having to
//! re-implement line splitting itself.

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::Stream;

use crate::core::providers::unified_provider::ProviderError;

/// Wraps a raw byte-chunk stream and yields complete, non-blank SSE lines.
pub struct SseByteStream<S> {
    inner: S,
    buffer: String,
    pending_lines: VecDeque<String>,
    done: bool,
}

impl<S> SseByteStream<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            buffer: String::new(),
            pending_lines: VecDeque::new(),
            done: false,
        }
    }

    fn drain_complete_lines(&mut self) {
        while let Some(pos) = self.buffer.find('\n') {
            let mut line = self.buffer[..pos].to_string();
            self.buffer.drain(..=pos);
            if line.ends_with('\r') {
                line.pop();
            }
            // Blank-line filtering: SSE keep-alives and field separators
            // carry no data for the provider-level parsers to consume.
            if !line.trim().is_empty() {
                self.pending_lines.push_back(line);
            }
        }
    }
}

impl<S> Stream for SseByteStream<S>
where
    S: Stream<Item = reqwest::Result<Bytes>> + Unpin,
{
    type Item = Result<String, ProviderError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(line) = self.pending_lines.pop_front() {
                return Poll::Ready(Some(Ok(line)));
            }

            if self.done {
                return Poll::Ready(None);
            }

            match Pin::new(&mut self.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => {
                    let text = String::from_utf8_lossy(&chunk);
                    self.buffer.push_str(&text);
                    self.drain_complete_lines();
                }
                Poll::Ready(Some(Err(e))) => {
                    self.done = true;
                    return Poll::Ready(Some(Err(ProviderError::network("common", e.to_string()))));
                }
                Poll::Ready(None) => {
                    self.done = true;
                    if !self.buffer.trim().is_empty() {
                        let remainder = std::mem::take(&mut self.buffer);
                        if !remainder.trim().is_empty() {
                            self.pending_lines.push_back(remainder);
                        }
                    }
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::{StreamExt, stream};

    fn byte_stream(chunks: Vec<&'static str>) -> impl Stream<Item = reqwest::Result<Bytes>> {
        stream::iter(chunks.into_iter().map(|c| Ok(Bytes::from_static(c.as_bytes()))))
    }

    #[tokio::test]
    async fn filters_blank_lines_and_splits_on_newline() {
        let raw = byte_stream(vec!["data: one\n\n", "data: two\n"]);
        let mut sse = SseByteStream::new(raw);
        let mut lines = Vec::new();
        while let Some(line) = sse.next().await {
            lines.push(line.unwrap());
        }
        assert_eq!(lines, vec!["data: one", "data: two"]);
    }

    #[tokio::test]
    async fn reassembles_a_line_split_across_chunks() {
        let raw = byte_stream(vec!["data: hel", "lo world\n"]);
        let mut sse = SseByteStream::new(raw);
        let line = sse.next().await.unwrap().unwrap();
        assert_eq!(line, "data: hello world");
    }

    #[tokio::test]
    async fn flushes_a_trailing_line_with_no_terminator() {
        let raw = byte_stream(vec!["data: trailing"]);
        let mut sse = SseByteStream::new(raw);
        let line = sse.next().await.unwrap().unwrap();
        assert_eq!(line, "data: trailing");
        assert!(sse.next().await.is_none());
    }
}
