//! Per-line SSE payload errors.

use std::fmt;

/// A `data:` line whose payload is not valid JSON.
///
/// These never abort a stream. The decoder hands them to a
/// [`DiagnosticSink`](crate::traits::DiagnosticSink) and moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The payload text after the `data: ` prefix.
    pub payload: String,
    /// The JSON parser's message.
    pub message: String,
}

impl ParseError {
    /// Build a parse error for `payload` from the JSON parser's failure.
    pub fn from_json(payload: &str, err: &serde_json::Error) -> Self {
        Self {
            payload: payload.to_string(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to parse SSE data: {}", self.message)
    }
}

impl std::error::Error for ParseError {}
