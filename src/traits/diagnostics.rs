//! Diagnostic sink for recoverable stream problems.

use crate::error::ParseError;

/// Receives per-line failures that do not end a stream.
///
/// The production sink logs through `tracing`; tests install a recording
/// sink and assert on what it captured.
pub trait DiagnosticSink: Send + Sync {
    /// Called once for each `data:` line whose payload is not valid JSON.
    fn parse_failure(&self, error: &ParseError);
}
