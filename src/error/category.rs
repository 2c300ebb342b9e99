//! Error category classification.
//!
//! Categories give callers a coarse way to decide how to react to a failed
//! call (show a connectivity hint, report a bug, wait and resend).

use std::fmt;

/// High-level categorization of API errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS and timeout failures.
    /// Generally transient and retryable.
    Network,

    /// The backend answered with a 5xx status or an unreadable body.
    Server,

    /// The backend rejected the request (4xx) or the request could not be built.
    Client,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    ///
    /// The client never retries on its own; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check that the API server is reachable and try again",
            ErrorCategory::Server => "The server may be experiencing issues. Please try again later",
            ErrorCategory::Client => "Check the organization id and message, then try again",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
