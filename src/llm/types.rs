//! LLM types — provider-neutral message types and errors.
//!
//! The message shape follows the OpenAI chat wire format because both
//! supported providers speak it: the OpenAI API natively, Ollama through its
//! OpenAI-compatible endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The HTTP request to the LLM provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The LLM provider returned a non-success HTTP status. The body is part
    /// of the message so provider error codes stay visible to classification.
    #[error("API response error: status {status}: {body}")]
    ApiResponse { status: u16, body: String },

    /// The LLM provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// TOOL DEFINITION
// =============================================================================

/// A tool definition passed to the LLM provider API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

// =============================================================================
// TOOL CALLS
// =============================================================================

/// Canonical tool call, independent of the provider shape that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: String,
    pub function: FunctionCall,
}

/// Function name plus its JSON-encoded arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

impl ToolCall {
    #[must_use]
    pub fn function(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            call_type: "function".into(),
            function: FunctionCall { name: name.into(), arguments: arguments.into() },
        }
    }
}

// =============================================================================
// MESSAGE TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    fn plain(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into(), tool_calls: None, tool_call_id: None }
    }

    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::plain(Role::System, content)
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::plain(Role::User, content)
    }

    /// Assistant turn that carries the tool calls it issued.
    #[must_use]
    pub fn assistant_with_tools(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self { role: Role::Assistant, content: content.into(), tool_calls: Some(tool_calls), tool_call_id: None }
    }

    /// Tool result answering the call identified by `tool_call_id`.
    #[must_use]
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self { role: Role::Tool, content: content.into(), tool_calls: None, tool_call_id: Some(tool_call_id.into()) }
    }
}

// =============================================================================
// LLM CHAT TRAIT
// =============================================================================

/// Provider-neutral async trait for LLM calls. Enables mocking in tests.
///
/// Responses are returned as raw JSON; turning them into text is the job of
/// [`super::normalize::extract_response_text`].
#[async_trait::async_trait]
pub trait LlmChat: Send + Sync {
    /// Send a chat request, optionally declaring function tools.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or the body is not JSON.
    async fn chat(&self, model: &str, messages: &[Message], tools: Option<&[Tool]>) -> Result<Value, LlmError>;

    /// Send a single request with the provider's built-in web search enabled.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or the body is not JSON.
    async fn chat_with_native_search(&self, model: &str, messages: &[Message]) -> Result<Value, LlmError>;

    /// List the models the provider exposes.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or the body is not JSON.
    async fn list_models(&self) -> Result<Value, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
