//! Shared helpers for integration tests.

#![allow(dead_code)]

use claudeapi::client::ApiClient;
use claudeapi::config::ClientConfig;
use std::time::Duration;
use wiremock::MockServer;

/// A reqwest-backed client pointed at `server`.
pub fn client_for(server: &MockServer) -> ApiClient {
    let config = ClientConfig::new()
        .with_base_url(&server.uri())
        .expect("mock server uri is http")
        .with_idle_timeout(Some(Duration::from_secs(5)));
    ApiClient::new(config).expect("client builds")
}

/// Render `payloads` as `data:` lines separated by blank lines.
pub fn sse_body(payloads: &[serde_json::Value]) -> String {
    payloads
        .iter()
        .map(|p| format!("data: {}\n\n", p))
        .collect()
}

/// Split `bytes` into chunks of `size` bytes (the last may be shorter).
pub fn chunked(bytes: &[u8], size: usize) -> Vec<Vec<u8>> {
    bytes.chunks(size).map(<[u8]>::to_vec).collect()
}
