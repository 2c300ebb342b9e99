//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - transport operations (buffered GET, streaming POST)
//! - [`DiagnosticSink`] - where non-fatal stream diagnostics go

pub mod diagnostics;
pub mod http;

pub use diagnostics::DiagnosticSink;
pub use http::{ByteStream, Headers, HttpClient, HttpError, Response, StreamingResponse};
