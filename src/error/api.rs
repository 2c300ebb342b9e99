//! Errors returned by the API client.

use std::fmt;

use super::category::ErrorCategory;
use crate::traits::HttpError;

/// Type alias for Results using [`ApiError`].
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a whole API call.
///
/// `Display` of [`ApiError::HttpStatus`] and [`ApiError::Transport`] is the bare
/// message, which is what ends up in [`CallState::error`](crate::state::CallState).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The endpoint answered with a non-2xx status.
    HttpStatus { status: u16, message: String },

    /// Network-level failure (connection reset, DNS, broken body stream).
    Transport { message: String },

    /// No data arrived within the configured deadline.
    Timeout { operation: String, duration_secs: u64 },

    /// A 2xx response whose body did not have the expected shape.
    InvalidResponse { message: String },

    /// The request body could not be built.
    InvalidRequest { message: String },
}

impl ApiError {
    /// High-level category for handling decisions.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::HttpStatus { status, .. } if *status >= 500 => ErrorCategory::Server,
            ApiError::HttpStatus { .. } => ErrorCategory::Client,
            ApiError::Transport { .. } | ApiError::Timeout { .. } => ErrorCategory::Network,
            ApiError::InvalidResponse { .. } => ErrorCategory::Server,
            ApiError::InvalidRequest { .. } => ErrorCategory::Client,
        }
    }

    /// Whether resending the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::HttpStatus { status, .. } => *status >= 500 || *status == 429 || *status == 408,
            other => other.category().is_retryable(),
        }
    }

    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::HttpStatus { .. } => "E_API_HTTP",
            ApiError::Transport { .. } => "E_API_TRANSPORT",
            ApiError::Timeout { .. } => "E_API_TIMEOUT",
            ApiError::InvalidResponse { .. } => "E_API_INVALID",
            ApiError::InvalidRequest { .. } => "E_API_REQUEST",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::HttpStatus { message, .. } => write!(f, "{}", message),
            ApiError::Transport { message } => write!(f, "{}", message),
            ApiError::Timeout {
                operation,
                duration_secs,
            } => write!(f, "{} timed out after {} seconds", operation, duration_secs),
            ApiError::InvalidResponse { message } => write!(f, "Invalid response: {}", message),
            ApiError::InvalidRequest { message } => write!(f, "Invalid request: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        ApiError::Transport {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidResponse {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display_is_bare_message() {
        let err = ApiError::HttpStatus {
            status: 500,
            message: "Failed to fetch organizations".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to fetch organizations");
    }

    #[test]
    fn test_transport_display_is_bare_message() {
        let err: ApiError = HttpError::ConnectionFailed("connection reset".to_string()).into();
        assert_eq!(err.to_string(), "Connection failed: connection reset");
        assert!(matches!(err, ApiError::Transport { .. }));
    }

    #[test]
    fn test_timeout_display() {
        let err = ApiError::Timeout {
            operation: "chat stream".to_string(),
            duration_secs: 30,
        };
        assert_eq!(err.to_string(), "chat stream timed out after 30 seconds");
    }

    #[test]
    fn test_category() {
        let server = ApiError::HttpStatus {
            status: 503,
            message: "down".to_string(),
        };
        let client = ApiError::HttpStatus {
            status: 404,
            message: "missing".to_string(),
        };
        let network = ApiError::Transport {
            message: "reset".to_string(),
        };
        assert_eq!(server.category(), ErrorCategory::Server);
        assert_eq!(client.category(), ErrorCategory::Client);
        assert_eq!(network.category(), ErrorCategory::Network);
    }

    #[test]
    fn test_is_retryable() {
        assert!(ApiError::HttpStatus {
            status: 502,
            message: String::new()
        }
        .is_retryable());
        assert!(ApiError::HttpStatus {
            status: 429,
            message: String::new()
        }
        .is_retryable());
        assert!(!ApiError::HttpStatus {
            status: 400,
            message: String::new()
        }
        .is_retryable());
        assert!(ApiError::Timeout {
            operation: "x".to_string(),
            duration_secs: 1
        }
        .is_retryable());
        assert!(!ApiError::InvalidRequest {
            message: String::new()
        }
        .is_retryable());
    }

    #[test]
    fn test_error_codes_are_distinct() {
        use std::collections::HashSet;
        let codes: HashSet<_> = [
            ApiError::HttpStatus { status: 500, message: String::new() },
            ApiError::Transport { message: String::new() },
            ApiError::Timeout { operation: String::new(), duration_secs: 0 },
            ApiError::InvalidResponse { message: String::new() },
            ApiError::InvalidRequest { message: String::new() },
        ]
        .iter()
        .map(|e| e.error_code())
        .collect();
        assert_eq!(codes.len(), 5);
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let err: ApiError = json_err.into();
        assert!(matches!(err, ApiError::InvalidResponse { .. }));
        assert!(err.to_string().starts_with("Invalid response:"));
    }
}
