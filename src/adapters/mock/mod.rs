//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`RecordingSink`] - diagnostic sink that keeps what it receives

pub mod diagnostics;
pub mod http;

pub use diagnostics::RecordingSink;
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
