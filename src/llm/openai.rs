//! OpenAI-compatible API client.
//!
//! Serves both providers: `OpenAI` itself and Ollama through its
//! OpenAI-compatible `/v1` surface. Supports `/chat/completions` (plain and
//! function-calling), `/responses` with the built-in `web_search` tool, and
//! `/models`.

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::config::{LlmTimeouts, ProviderSelection};
use super::types::{LlmChat, LlmError, Message, Role, Tool};

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    /// Build a client for the selected provider.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(selection: &ProviderSelection, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            api_key: selection.api_key.clone(),
            base_url: selection.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn send_json(&self, path: &str, body: &impl Serialize) -> Result<Value, LlmError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "llm: POST");
        let request = self.http.post(url).bearer_auth(&self.api_key).json(body);
        Self::read_json(request).await
    }

    async fn get_json(&self, path: &str) -> Result<Value, LlmError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "llm: GET");
        let request = self.http.get(url).bearer_auth(&self.api_key);
        Self::read_json(request).await
    }

    async fn read_json(request: reqwest::RequestBuilder) -> Result<Value, LlmError> {
        let response = request
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if !status.is_success() {
            return Err(LlmError::ApiResponse { status: status.as_u16(), body: text });
        }
        parse_json_body(&text)
    }
}

#[async_trait::async_trait]
impl LlmChat for OpenAiClient {
    async fn chat(&self, model: &str, messages: &[Message], tools: Option<&[Tool]>) -> Result<Value, LlmError> {
        let tool_defs: Option<Vec<CcToolDef<'_>>> = tools.map(|t| t.iter().map(CcToolDef::from).collect());
        let body = CcRequest { model, messages, tools: tool_defs.as_deref() };
        self.send_json("/chat/completions", &body).await
    }

    async fn chat_with_native_search(&self, model: &str, messages: &[Message]) -> Result<Value, LlmError> {
        let input: Vec<RespInputMessage<'_>> = messages.iter().map(RespInputMessage::from).collect();
        let body = RespRequest { model, input: &input, tools: &[RespBuiltinTool { tool_type: "web_search" }] };
        self.send_json("/responses", &body).await
    }

    async fn list_models(&self) -> Result<Value, LlmError> {
        self.get_json("/models").await
    }
}

pub(crate) fn parse_json_body(text: &str) -> Result<Value, LlmError> {
    serde_json::from_str(text).map_err(|e| LlmError::ApiParse(e.to_string()))
}

// =============================================================================
// CHAT COMPLETIONS — wire types
// =============================================================================

#[derive(Serialize)]
struct CcRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [CcToolDef<'a>]>,
}

#[derive(Serialize)]
struct CcToolDef<'a> {
    #[serde(rename = "type")]
    tool_type: &'static str,
    function: CcFunctionDef<'a>,
}

#[derive(Serialize)]
struct CcFunctionDef<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a Value,
}

impl<'a> From<&'a Tool> for CcToolDef<'a> {
    fn from(tool: &'a Tool) -> Self {
        Self {
            tool_type: "function",
            function: CcFunctionDef {
                name: &tool.name,
                description: &tool.description,
                parameters: &tool.input_schema,
            },
        }
    }
}

// =============================================================================
// RESPONSES — wire types
// =============================================================================

#[derive(Serialize)]
struct RespRequest<'a> {
    model: &'a str,
    input: &'a [RespInputMessage<'a>],
    tools: &'a [RespBuiltinTool],
}

#[derive(Serialize)]
struct RespInputMessage<'a> {
    role: Role,
    content: &'a str,
}

impl<'a> From<&'a Message> for RespInputMessage<'a> {
    fn from(message: &'a Message) -> Self {
        Self { role: message.role, content: &message.content }
    }
}

#[derive(Serialize)]
struct RespBuiltinTool {
    #[serde(rename = "type")]
    tool_type: &'static str,
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
