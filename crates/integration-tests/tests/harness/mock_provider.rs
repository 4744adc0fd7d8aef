//! Mock provider backend for integration tests
//!
//! Speaks just enough of the `OpenAI`, Anthropic, and Google generation APIs
//! to exercise the dispatcher, and records every request it receives.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use promptsmith_core::ProviderKind;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// How the mock answers generation requests
#[derive(Debug, Clone)]
pub enum Behavior {
    /// 200 with the given text at each provider's usual path
    Reply(String),
    /// Given status with a raw text body
    Fail(StatusCode, String),
    /// Sleep, then reply
    Slow(Duration, String),
    /// 200 with a body that is not JSON
    Malformed(String),
    /// 200 with a JSON body that is not an object
    NonObject(Value),
    /// 200 with a JSON object lacking the text path
    NoContent,
}

/// A request the mock received
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Value,
}

struct MockState {
    behavior: Behavior,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Running mock backend
pub struct MockProvider {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

impl MockProvider {
    /// Start a mock that answers with `content`
    pub async fn start(content: &str) -> anyhow::Result<Self> {
        Self::start_with(Behavior::Reply(content.to_owned())).await
    }

    /// Start a mock with an explicit behavior
    pub async fn start_with(behavior: Behavior) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            behavior,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_openai))
            .route("/v1/messages", routing::post(handle_anthropic))
            .route("/v1beta/models/{action}", routing::post(handle_google))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL to configure for `provider`
    pub fn base_url(&self, provider: ProviderKind) -> String {
        match provider {
            ProviderKind::OpenAi | ProviderKind::Anthropic => format!("http://{}/v1", self.addr),
            ProviderKind::Google => format!("http://{}/v1beta", self.addr),
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("mock state poisoned").clone()
    }

    /// The single request received; panics if there were zero or several
    pub fn only_request(&self) -> RecordedRequest {
        let mut requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one upstream request");
        requests.remove(0)
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn record(state: &MockState, path: String, query: Option<String>, headers: HeaderMap, body: &Bytes) {
    let body = serde_json::from_slice(body).unwrap_or(Value::Null);
    state.requests.lock().expect("mock state poisoned").push(RecordedRequest {
        path,
        query,
        headers,
        body,
    });
}

async fn respond(state: &MockState, success: impl FnOnce(&str) -> Value) -> Response {
    match &state.behavior {
        Behavior::Reply(text) => Json(success(text)).into_response(),
        Behavior::Fail(status, body) => (*status, body.clone()).into_response(),
        Behavior::Slow(delay, text) => {
            tokio::time::sleep(*delay).await;
            Json(success(text)).into_response()
        }
        Behavior::Malformed(body) => (StatusCode::OK, body.clone()).into_response(),
        Behavior::NonObject(value) => Json(value.clone()).into_response(),
        Behavior::NoContent => Json(json!({"id": "mock", "usage": {}})).into_response(),
    }
}

async fn handle_openai(State(state): State<Arc<MockState>>, headers: HeaderMap, body: Bytes) -> Response {
    record(&state, "/v1/chat/completions".to_owned(), None, headers, &body);
    respond(&state, |text| {
        json!({
            "id": "chatcmpl-mock",
            "object": "chat.completion",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": text}, "finish_reason": "stop"}]
        })
    })
    .await
}

async fn handle_anthropic(State(state): State<Arc<MockState>>, headers: HeaderMap, body: Bytes) -> Response {
    record(&state, "/v1/messages".to_owned(), None, headers, &body);
    respond(&state, |text| {
        json!({
            "id": "msg_mock",
            "type": "message",
            "role": "assistant",
            "content": [{"type": "text", "text": text}],
            "stop_reason": "end_turn"
        })
    })
    .await
}

async fn handle_google(
    State(state): State<Arc<MockState>>,
    Path(action): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    record(&state, format!("/v1beta/models/{action}"), query, headers, &body);
    respond(&state, |text| {
        json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}, "finishReason": "STOP"}]
        })
    })
    .await
}
