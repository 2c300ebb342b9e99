//! API client for the ClaudeAPI backend.
//!
//! [`ApiClient`] owns the [`CallState`] of its calls. Every call sets
//! `loading` on entry and clears it on every exit path: normal completion,
//! failure, or the caller dropping a chat stream half way through.

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{self, Stream};
use futures_util::StreamExt;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::adapters::{ReqwestHttpClient, TracingSink};
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{ChatRequest, Organization};
use crate::sse::{self, Event};
use crate::state::{CallState, CallStateHandle, LoadingGuard};
use crate::traits::{ByteStream, DiagnosticSink, Headers, HttpClient, HttpError};

/// Message recorded when the organizations endpoint answers non-2xx.
pub const FETCH_ORGANIZATIONS_FAILED: &str = "Failed to fetch organizations";
/// Message recorded when the chat endpoint answers non-2xx.
pub const CREATE_CHAT_FAILED: &str = "Failed to create chat";

/// Events of one chat reply, in the order the server sent them.
///
/// Yields `Err` at most once, as its last item.
pub type ChatStream = Pin<Box<dyn Stream<Item = ApiResult<Event>> + Send>>;

/// Client for the organizations and chat endpoints.
///
/// Calls on one client share a single [`CallState`]. Issue one call at a time
/// per client; overlapping calls overwrite each other's state.
pub struct ApiClient<C = ReqwestHttpClient> {
    http: C,
    config: ClientConfig,
    state: CallStateHandle,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl ApiClient<ReqwestHttpClient> {
    /// Create a client backed by reqwest.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let http = ReqwestHttpClient::with_connect_timeout(config.connect_timeout)?;
        Ok(Self::with_http_client(http, config))
    }
}

impl<C: HttpClient> ApiClient<C> {
    /// Create a client over any transport.
    pub fn with_http_client(http: C, config: ClientConfig) -> Self {
        Self {
            http,
            config,
            state: CallStateHandle::new(),
            diagnostics: Arc::new(TracingSink),
        }
    }

    /// Send per-line parse failures to `sink` instead of the log.
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Current call state.
    pub fn state(&self) -> CallState {
        self.state.snapshot()
    }

    /// Subscribe to call state changes.
    pub fn subscribe(&self) -> watch::Receiver<CallState> {
        self.state.subscribe()
    }

    /// Fetch the organizations available to the signed-in account.
    pub async fn get_organizations(&self) -> ApiResult<Vec<Organization>> {
        let guard = self.state.begin();
        let result = self.fetch_organizations().await;
        if let Err(err) = &result {
            record_failure(&guard, err, "get_organizations");
        }
        result
    }

    async fn fetch_organizations(&self) -> ApiResult<Vec<Organization>> {
        let url = self.config.organizations_url();
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        debug!(%url, "fetching organizations");
        let response = self.http.get(&url, &headers).await?;

        if !response.is_success() {
            return Err(ApiError::HttpStatus {
                status: response.status,
                message: FETCH_ORGANIZATIONS_FAILED.to_string(),
            });
        }

        let organizations: Vec<Organization> = response.json()?;
        info!(count = organizations.len(), "fetched organizations");
        Ok(organizations)
    }

    /// Send `message` to the chat endpoint of `org_id` and stream the reply.
    ///
    /// Resolves once the response headers are in. The call stays loading
    /// until the returned stream is exhausted, fails, or is dropped.
    pub async fn stream_chat(&self, org_id: &str, message: &str) -> ApiResult<ChatStream> {
        let guard = self.state.begin();
        match self.open_chat(org_id, message).await {
            Ok(body) => Ok(self.track(body, guard)),
            Err(err) => {
                record_failure(&guard, &err, "stream_chat");
                Err(err)
            }
        }
    }

    async fn open_chat(&self, org_id: &str, message: &str) -> ApiResult<ChatBody> {
        let url = self.config.chat_url(org_id);
        let body = serde_json::to_string(&ChatRequest::new(message)).map_err(|e| {
            ApiError::InvalidRequest {
                message: e.to_string(),
            }
        })?;

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "text/event-stream".to_string());

        debug!(%url, org_id, "opening chat stream");
        let response = self.http.post_stream(&url, &body, &headers).await?;

        if !response.is_success() {
            return Err(ApiError::HttpStatus {
                status: response.status,
                message: CREATE_CHAT_FAILED.to_string(),
            });
        }

        Ok(with_idle_timeout(response.body, self.config.idle_timeout))
    }

    /// Decode `body` into events, holding `guard` until the stream ends.
    fn track(&self, body: ChatBody, guard: LoadingGuard) -> ChatStream {
        let events = Box::pin(sse::decode(body, self.diagnostics.clone()));

        Box::pin(stream::unfold(
            Some((events, guard)),
            |slot| async move {
                let Some((mut events, guard)) = slot else {
                    return None;
                };
                match events.next().await {
                    Some(Ok(event)) => Some((Ok(event), Some((events, guard)))),
                    Some(Err(err)) => {
                        let err = ApiError::from(err);
                        record_failure(&guard, &err, "stream_chat");
                        Some((Err(err), None))
                    }
                    None => {
                        debug!("chat stream complete");
                        None
                    }
                }
            },
        ))
    }
}

fn record_failure(guard: &LoadingGuard, err: &ApiError, operation: &str) {
    warn!(
        operation,
        error_code = err.error_code(),
        category = %err.category(),
        retryable = err.is_retryable(),
        "{}",
        err
    );
    guard.fail(err);
}

/// Why a chat body stopped producing chunks.
#[derive(Debug)]
enum BodyError {
    Transport(HttpError),
    Idle(Duration),
}

impl From<BodyError> for ApiError {
    fn from(err: BodyError) -> Self {
        match err {
            BodyError::Transport(err) => err.into(),
            BodyError::Idle(idle) => ApiError::Timeout {
                operation: "chat stream".to_string(),
                duration_secs: idle.as_secs(),
            },
        }
    }
}

type ChatBody = Pin<Box<dyn Stream<Item = Result<bytes::Bytes, BodyError>> + Send>>;

/// Fail the body with [`BodyError::Idle`] if no chunk arrives within `idle`.
fn with_idle_timeout(body: ByteStream, idle: Option<Duration>) -> ChatBody {
    let Some(idle) = idle else {
        return Box::pin(body.map(|chunk| chunk.map_err(BodyError::Transport)));
    };

    Box::pin(stream::unfold(Some(body), move |body| async move {
        let Some(mut body) = body else {
            return None;
        };
        match tokio::time::timeout(idle, body.next()).await {
            Ok(Some(chunk)) => Some((chunk.map_err(BodyError::Transport), Some(body))),
            Ok(None) => None,
            Err(_) => Some((Err(BodyError::Idle(idle)), None)),
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse, RecordingSink};
    use serde_json::json;

    const BASE: &str = "http://api.test";

    fn client(mock: &MockHttpClient) -> ApiClient<MockHttpClient> {
        let config = ClientConfig::new().with_base_url(BASE).unwrap();
        ApiClient::with_http_client(mock.clone(), config)
    }

    fn chat_url(org: &str) -> String {
        format!("{}/api/chat/{}", BASE, org)
    }

    #[tokio::test]
    async fn test_get_organizations_success() {
        let mock = MockHttpClient::new();
        mock.set_response(
            &format!("{}/api/organizations", BASE),
            MockResponse::json(200, &json!([{"id": "org-1", "name": "Personal"}])),
        );
        let client = client(&mock);

        let orgs = client.get_organizations().await.unwrap();
        assert_eq!(
            orgs,
            vec![Organization {
                id: "org-1".to_string(),
                name: "Personal".to_string()
            }]
        );
        assert!(client.state().is_idle());

        let request = &mock.get_requests()[0];
        assert_eq!(request.method, "GET");
        assert_eq!(request.headers.get("Accept").map(String::as_str), Some("application/json"));
    }

    #[tokio::test]
    async fn test_get_organizations_http_error() {
        let mock = MockHttpClient::new();
        mock.set_response(
            &format!("{}/api/organizations", BASE),
            MockResponse::json(401, &json!({"detail": "Not authenticated"})),
        );
        let client = client(&mock);

        let err = client.get_organizations().await.unwrap_err();
        assert_eq!(
            err,
            ApiError::HttpStatus {
                status: 401,
                message: FETCH_ORGANIZATIONS_FAILED.to_string()
            }
        );

        let state = client.state();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Failed to fetch organizations"));
    }

    #[tokio::test]
    async fn test_get_organizations_bad_body() {
        let mock = MockHttpClient::new();
        mock.set_response(
            &format!("{}/api/organizations", BASE),
            MockResponse::json(200, &json!({"not": "a list"})),
        );
        let client = client(&mock);

        let err = client.get_organizations().await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse { .. }));
        assert_eq!(client.state().error, Some(err.to_string()));
    }

    #[tokio::test]
    async fn test_get_organizations_transport_error() {
        let mock = MockHttpClient::new();
        mock.set_response(
            &format!("{}/api/organizations", BASE),
            MockResponse::Error(HttpError::ConnectionFailed("dns failure".to_string())),
        );
        let client = client(&mock);

        let err = client.get_organizations().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
        assert_eq!(
            client.state().error.as_deref(),
            Some("Connection failed: dns failure")
        );
        assert!(!client.state().loading);
    }

    #[tokio::test]
    async fn test_stream_chat_sends_message_body() {
        let mock = MockHttpClient::new();
        mock.set_response(&chat_url("org-1"), MockResponse::stream(["data: {}\n"]));
        let client = client(&mock);

        let events: Vec<_> = client
            .stream_chat("org-1", "hello there")
            .await
            .unwrap()
            .collect()
            .await;
        assert_eq!(events, vec![Ok(json!({}))]);

        let request = &mock.get_requests()[0];
        assert_eq!(request.method, "POST");
        assert_eq!(request.url, chat_url("org-1"));
        let body: serde_json::Value =
            serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"message": "hello there"}));
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_stream_chat_loading_until_exhausted() {
        let mock = MockHttpClient::new();
        mock.set_response(
            &chat_url("org-1"),
            MockResponse::stream(["data: {\"x\":1}\n", "data: {\"x\":2}\n"]),
        );
        let client = client(&mock);

        let mut events = client.stream_chat("org-1", "hi").await.unwrap();
        assert!(client.state().loading);

        assert_eq!(events.next().await, Some(Ok(json!({"x": 1}))));
        assert!(client.state().loading);
        assert_eq!(events.next().await, Some(Ok(json!({"x": 2}))));
        assert_eq!(events.next().await, None);

        let state = client.state();
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_stream_chat_http_error() {
        let mock = MockHttpClient::new();
        mock.set_response(&chat_url("org-1"), MockResponse::status(500));
        let client = client(&mock);

        let err = client.stream_chat("org-1", "hi").await.err().unwrap();
        assert_eq!(err.to_string(), CREATE_CHAT_FAILED);
        assert_eq!(client.state().error.as_deref(), Some("Failed to create chat"));
        assert!(!client.state().loading);
    }

    #[tokio::test]
    async fn test_stream_chat_dropped_stream_clears_loading() {
        let mock = MockHttpClient::new();
        mock.set_response(
            &chat_url("org-1"),
            MockResponse::stream(["data: 1\n", "data: 2\n", "data: 3\n"]),
        );
        let client = client(&mock);

        let mut events = client.stream_chat("org-1", "hi").await.unwrap();
        assert_eq!(events.next().await, Some(Ok(json!(1))));
        assert!(client.state().loading);

        drop(events);
        assert!(!client.state().loading);
        assert_eq!(client.state().error, None);
    }

    #[tokio::test]
    async fn test_stream_chat_mid_stream_failure() {
        let mock = MockHttpClient::new();
        mock.set_response(
            &chat_url("org-1"),
            MockResponse::Stream {
                status: 200,
                chunks: vec![
                    Ok(bytes::Bytes::from("data: 1\n")),
                    Err(HttpError::Io("connection reset".to_string())),
                ],
            },
        );
        let client = client(&mock);

        let items: Vec<_> = client
            .stream_chat("org-1", "hi")
            .await
            .unwrap()
            .collect()
            .await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], Ok(json!(1)));
        assert!(matches!(items[1], Err(ApiError::Transport { .. })));

        let state = client.state();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("IO error: connection reset"));
    }

    #[tokio::test]
    async fn test_stream_chat_idle_timeout() {
        let mock = MockHttpClient::new();
        mock.set_response(
            &chat_url("org-1"),
            MockResponse::Hang {
                chunks: vec![bytes::Bytes::from("data: 1\n")],
            },
        );
        let config = ClientConfig::new()
            .with_base_url(BASE)
            .unwrap()
            .with_idle_timeout(Some(Duration::from_millis(50)));
        let client = ApiClient::with_http_client(mock.clone(), config);

        let items: Vec<_> = client
            .stream_chat("org-1", "hi")
            .await
            .unwrap()
            .collect()
            .await;
        assert_eq!(items[0], Ok(json!(1)));
        assert!(matches!(items[1], Err(ApiError::Timeout { .. })));
        assert!(!client.state().loading);
        assert!(client.state().error.unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_stream_chat_reports_bad_lines_to_sink() {
        let mock = MockHttpClient::new();
        mock.set_response(
            &chat_url("org-1"),
            MockResponse::stream(["data: not-json\n", "data: {\"ok\":true}\n"]),
        );
        let sink = RecordingSink::new();
        let client = client(&mock).with_diagnostics(Arc::new(sink.clone()));

        let events: Vec<_> = client
            .stream_chat("org-1", "hi")
            .await
            .unwrap()
            .collect()
            .await;
        assert_eq!(events, vec![Ok(json!({"ok": true}))]);
        assert_eq!(sink.failures().len(), 1);
        assert_eq!(client.state().error, None);
    }

    #[tokio::test]
    async fn test_new_call_clears_previous_error() {
        let mock = MockHttpClient::new();
        mock.set_response(&chat_url("bad"), MockResponse::status(404));
        mock.set_response(&chat_url("good"), MockResponse::stream(["data: 1\n"]));
        let client = client(&mock);

        assert!(client.stream_chat("bad", "hi").await.is_err());
        assert!(client.state().error.is_some());

        let stream = client.stream_chat("good", "hi").await.unwrap();
        assert_eq!(client.state().error, None);
        drop(stream);
    }
}
