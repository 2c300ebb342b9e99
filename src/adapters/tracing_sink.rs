//! Default diagnostic sink.

use tracing::warn;

use crate::error::ParseError;
use crate::traits::DiagnosticSink;

/// Logs stream diagnostics as `tracing` warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn parse_failure(&self, error: &ParseError) {
        warn!(payload = %error.payload, "Failed to parse SSE data: {}", error.message);
    }
}
