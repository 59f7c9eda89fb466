//! Shared test fixtures: a scripted LLM, a scripted search backend, and a
//! throwaway local HTTP server.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::Router;
use serde_json::{Value, json};

use crate::llm::LlmConnector;
use crate::llm::config::ProviderSelection;
use crate::llm::types::{LlmChat, LlmError, Message, Tool};
use crate::services::search::{SearchError, WebSearch};

// =============================================================================
// MockLlm
// =============================================================================

/// One recorded model call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub kind: &'static str,
    pub model: String,
    pub messages: Vec<Message>,
    pub tool_names: Option<Vec<String>>,
}

/// Replays scripted responses in order and records every call it receives.
/// Once the script is exhausted it answers with a plain `"done"` completion.
#[derive(Default)]
pub struct MockLlm {
    responses: Mutex<VecDeque<Result<Value, LlmError>>>,
    models: Mutex<Option<Value>>,
    pub calls: Mutex<Vec<RecordedCall>>,
}

impl MockLlm {
    pub fn new(responses: Vec<Value>) -> Self {
        Self { responses: Mutex::new(responses.into_iter().map(Ok).collect()), ..Self::default() }
    }

    pub fn with_results(responses: Vec<Result<Value, LlmError>>) -> Self {
        Self { responses: Mutex::new(responses.into()), ..Self::default() }
    }

    pub fn with_models(listing: Value) -> Self {
        Self { models: Mutex::new(Some(listing)), ..Self::default() }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn next(&self, call: RecordedCall) -> Result<Value, LlmError> {
        self.calls.lock().unwrap().push(call);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(chat_completion("done")))
    }
}

#[async_trait::async_trait]
impl LlmChat for MockLlm {
    async fn chat(&self, model: &str, messages: &[Message], tools: Option<&[Tool]>) -> Result<Value, LlmError> {
        self.next(RecordedCall {
            kind: "chat",
            model: model.to_string(),
            messages: messages.to_vec(),
            tool_names: tools.map(|t| t.iter().map(|tool| tool.name.clone()).collect()),
        })
    }

    async fn chat_with_native_search(&self, model: &str, messages: &[Message]) -> Result<Value, LlmError> {
        self.next(RecordedCall {
            kind: "native_search",
            model: model.to_string(),
            messages: messages.to_vec(),
            tool_names: None,
        })
    }

    async fn list_models(&self) -> Result<Value, LlmError> {
        self.models
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| LlmError::ApiRequest("no models scripted".into()))
    }
}

/// A chat-completions response with plain assistant text.
pub fn chat_completion(content: &str) -> Value {
    json!({
        "model": "mock",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

/// A chat-completions response whose assistant message carries tool calls.
pub fn tool_call_completion(content: Option<&str>, tool_calls: Value) -> Value {
    json!({
        "model": "mock",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content, "tool_calls": tool_calls },
            "finish_reason": "tool_calls"
        }]
    })
}

// =============================================================================
// MockConnector
// =============================================================================

/// Hands out the same chat client for every selection and records the
/// selections it was asked to connect.
pub struct MockConnector {
    llm: Arc<dyn LlmChat>,
    pub selections: Mutex<Vec<ProviderSelection>>,
}

impl MockConnector {
    pub fn new(llm: Arc<dyn LlmChat>) -> Self {
        Self { llm, selections: Mutex::new(Vec::new()) }
    }

    pub fn selections(&self) -> Vec<ProviderSelection> {
        self.selections.lock().unwrap().clone()
    }
}

impl LlmConnector for MockConnector {
    fn connect(&self, selection: &ProviderSelection) -> Result<Arc<dyn LlmChat>, LlmError> {
        self.selections.lock().unwrap().push(selection.clone());
        Ok(self.llm.clone())
    }
}

// =============================================================================
// MockSearch
// =============================================================================

/// Records queries and answers each with a fixed body (or a fixed failure).
pub struct MockSearch {
    body: Result<String, String>,
    pub queries: Mutex<Vec<String>>,
}

impl MockSearch {
    pub fn ok(body: &str) -> Self {
        Self { body: Ok(body.to_string()), queries: Mutex::new(Vec::new()) }
    }

    pub fn failing(reason: &str) -> Self {
        Self { body: Err(reason.to_string()), queries: Mutex::new(Vec::new()) }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl WebSearch for MockSearch {
    async fn search(&self, query: &str) -> Result<String, SearchError> {
        self.queries.lock().unwrap().push(query.to_string());
        self.body
            .clone()
            .map_err(|reason| SearchError::Transport { reason, url: "mock://search".into() })
    }
}

// =============================================================================
// LOCAL SERVER
// =============================================================================

/// Serve `app` on an ephemeral localhost port and return its base URL.
pub async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server failed");
    });
    format!("http://{addr}")
}

/// A base URL nothing listens on: bind a port, then release it.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

/// Requests captured by a recording server: `(authorization header, JSON body)`.
pub type Captured = Arc<Mutex<Vec<(Option<String>, Value)>>>;

// =============================================================================
// ROUTER
// =============================================================================

/// Drive one request through `app` and decode the JSON response body
/// (`Value::Null` for an empty body).
pub async fn send(app: Router, request: axum::http::Request<axum::body::Body>) -> (axum::http::StatusCode, Value) {
    use tower::ServiceExt;

    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).expect("JSON body") };
    (status, body)
}

/// A `POST` with a JSON body.
pub fn post_json(uri: &str, body: &Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header("content-type", "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .expect("valid request")
}
