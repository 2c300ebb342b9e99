//! Recording diagnostic sink for tests.

use std::sync::{Arc, Mutex};

use crate::error::ParseError;
use crate::traits::DiagnosticSink;

/// Keeps every reported [`ParseError`]. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    failures: Arc<Mutex<Vec<ParseError>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything reported so far, in order.
    pub fn failures(&self) -> Vec<ParseError> {
        self.failures
            .lock()
            .map(|failures| failures.clone())
            .unwrap_or_default()
    }
}

impl DiagnosticSink for RecordingSink {
    fn parse_failure(&self, error: &ParseError) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.push(error.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order_and_shares_between_clones() {
        let sink = RecordingSink::new();
        let clone = sink.clone();

        for payload in ["a", "b"] {
            clone.parse_failure(&ParseError {
                payload: payload.to_string(),
                message: "bad".to_string(),
            });
        }

        let payloads: Vec<_> = sink.failures().into_iter().map(|f| f.payload).collect();
        assert_eq!(payloads, vec!["a", "b"]);
    }
}
