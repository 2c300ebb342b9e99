//! Concrete implementations of the traits in `crate::traits`.
//!
//! - [`ReqwestHttpClient`] - HTTP transport using reqwest
//! - [`TracingSink`] - diagnostics logged through `tracing`
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - scripted responses and chunk streams
//! - [`mock::RecordingSink`] - captures diagnostics for assertions

pub mod mock;
pub mod reqwest_http;
pub mod tracing_sink;

pub use mock::{MockHttpClient, RecordingSink};
pub use reqwest_http::ReqwestHttpClient;
pub use tracing_sink::TracingSink;
