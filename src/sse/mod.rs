//! Incremental decoding of `data:`-line event streams.
//!
//! The chat endpoint answers with newline-delimited text where each line of
//! interest looks like `data: <json>`. Decoding happens in three layers:
//!
//! - [`Utf8StreamDecoder`] - bytes to text, holding back split characters
//! - [`LineBuffer`] - text to complete lines, holding back the partial line
//! - [`SseDecoder`] - lines to JSON events, reporting bad payloads
//!
//! [`decode`] wraps all three around a chunk stream and yields events lazily.
//! Only `data: ` lines are consumed; `event:`, `id:`, `retry:`, comments and
//! blank lines are skipped.

mod decoder;
mod lines;
mod stream;
mod utf8;

pub use decoder::{parse_data_line, SseDecoder, DATA_PREFIX};
pub use lines::LineBuffer;
pub use stream::decode;
pub use utf8::Utf8StreamDecoder;

/// One decoded `data:` payload. Any JSON value is accepted as-is.
pub type Event = serde_json::Value;
