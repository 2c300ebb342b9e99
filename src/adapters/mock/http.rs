//! Mock HTTP client for testing.
//!
//! Responses are scripted per URL. Streaming responses are given as an explicit
//! list of chunks so tests control exactly where chunk boundaries fall.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, Response, StreamingResponse};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method (GET or POST)
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body (for POST requests)
    pub body: Option<String>,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a buffered response
    Success(Response),
    /// Fail at the transport level
    Error(HttpError),
    /// Return a streamed body; each item is one chunk or a mid-body failure
    Stream {
        status: u16,
        chunks: Vec<Result<Bytes, HttpError>>,
    },
    /// Deliver the chunks, then never produce another one
    Hang { chunks: Vec<Bytes> },
}

impl MockResponse {
    /// A 200 response whose body arrives as `chunks`.
    pub fn stream<I, B>(chunks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        MockResponse::Stream {
            status: 200,
            chunks: chunks.into_iter().map(|c| Ok(c.into())).collect(),
        }
    }

    /// A buffered JSON response.
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        MockResponse::Success(Response::new(status, Bytes::from(value.to_string())))
    }

    /// A bodyless response with `status`.
    pub fn status(status: u16) -> Self {
        MockResponse::Stream {
            status,
            chunks: Vec::new(),
        }
    }
}

/// Mock HTTP client for testing.
///
/// # Example
///
/// ```ignore
/// use claudeapi::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "http://localhost:3000/api/chat/org-1",
///     MockResponse::stream(["data: {\"a\":", "1}\n"]),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Configured responses by URL
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the response for a URL. The URL is matched exactly.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record_request(&self, method: &str, url: &str, headers: &Headers, body: Option<String>) {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });
    }

    fn get_response(&self, url: &str) -> Result<MockResponse, HttpError> {
        self.responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| HttpError::Other(format!("No mock response for URL: {}", url)))
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("GET", url, headers, None);

        match self.get_response(url)? {
            MockResponse::Success(response) => Ok(response),
            MockResponse::Error(err) => Err(err),
            MockResponse::Stream { status, chunks } => {
                let mut body = Vec::new();
                for chunk in chunks {
                    body.extend_from_slice(&chunk?);
                }
                Ok(Response::new(status, Bytes::from(body)))
            }
            MockResponse::Hang { .. } => Err(HttpError::Other(
                "Hanging response on non-stream request".to_string(),
            )),
        }
    }

    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<StreamingResponse, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()));

        let (status, stream): (u16, ByteStream) = match self.get_response(url)? {
            MockResponse::Stream { status, chunks } => (status, Box::pin(stream::iter(chunks))),
            MockResponse::Hang { chunks } => (
                200,
                Box::pin(stream::iter(chunks.into_iter().map(Ok)).chain(stream::pending())),
            ),
            MockResponse::Success(response) => (
                response.status,
                Box::pin(stream::once(async move { Ok(response.body) })),
            ),
            MockResponse::Error(err) => return Err(err),
        };

        Ok(StreamingResponse::new(status, Headers::new(), stream))
    }
}
