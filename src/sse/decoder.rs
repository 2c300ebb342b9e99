//! Chunk-to-event decoding.

use std::sync::Arc;

use super::lines::LineBuffer;
use super::utf8::Utf8StreamDecoder;
use super::Event;
use crate::error::ParseError;
use crate::traits::DiagnosticSink;

/// Prefix that marks a payload line. Exactly six characters, space included.
pub const DATA_PREFIX: &str = "data: ";

/// Parse one complete line.
///
/// Returns `None` for lines that do not start with [`DATA_PREFIX`] (blank
/// lines, `event:`, `id:`, comments, `data:` without the space), otherwise the
/// decoded JSON payload or the reason it could not be decoded.
pub fn parse_data_line(line: &str) -> Option<Result<Event, ParseError>> {
    let payload = line.strip_prefix(DATA_PREFIX)?;
    Some(serde_json::from_str(payload).map_err(|e| ParseError::from_json(payload, &e)))
}

/// Incremental decoder for one SSE response body.
///
/// Feed it raw chunks in arrival order; it returns the events each chunk
/// completes. A decoder is bound to a single body: [`finish`](SseDecoder::finish)
/// consumes it.
pub struct SseDecoder {
    text: Utf8StreamDecoder,
    lines: LineBuffer,
    sink: Arc<dyn DiagnosticSink>,
}

impl SseDecoder {
    /// Create a decoder that reports bad payloads to `sink`.
    pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            text: Utf8StreamDecoder::new(),
            lines: LineBuffer::new(),
            sink,
        }
    }

    /// Decode one chunk and return the events it completes, in line order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Event> {
        let text = self.text.decode(chunk);
        let lines = self.lines.push(&text);
        self.collect_events(lines)
    }

    /// End of input: decode whatever is still buffered as a final line.
    pub fn finish(mut self) -> Vec<Event> {
        let tail = self.text.finish();
        let mut lines = self.lines.push(&tail);
        lines.extend(self.lines.take_remaining());
        self.collect_events(lines)
    }

    /// The partial line held back waiting for its newline.
    pub fn pending_line(&self) -> &str {
        self.lines.pending()
    }

    fn collect_events(&self, lines: Vec<String>) -> Vec<Event> {
        lines
            .iter()
            .filter_map(|line| match parse_data_line(line)? {
                Ok(event) => Some(event),
                Err(err) => {
                    self.sink.parse_failure(&err);
                    None
                }
            })
            .collect()
    }
}

impl std::fmt::Debug for SseDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SseDecoder")
            .field("text", &self.text)
            .field("lines", &self.lines)
            .finish_non_exhaustive()
    }
}
