//! Web-search orchestration.
//!
//! DESIGN
//! ======
//! Providers with native search get one call with the built-in tool enabled.
//! Function-calling providers get at most two rounds:
//!
//! 1. Propose: the conversation plus a declared `web_search` tool. No tool
//!    calls in the answer means the answer is final.
//! 2. Resolve: every `web_search` call is executed, then the conversation is
//!    extended with the assistant turn and one tool result per executed call
//!    and sent again without tools. Whatever comes back is final.
//!
//! There is never a third round and never a silent retry here; falling back
//! to a plain call on empty output is the caller's decision.

use serde_json::{Value, json};
use tracing::{debug, info};

use crate::llm::LlmChat;
use crate::llm::config::SearchMode;
use crate::llm::normalize::{assistant_message, extract_response_text};
use crate::llm::tools::{WEB_SEARCH_TOOL, canonical_tool_calls, parse_tool_arguments, search_query, web_search_tool};
use crate::llm::types::{LlmError, Message};

use super::search::{SearchError, WebSearch};

/// Tool result sent back when the model called `web_search` without a query.
const MISSING_QUERY_ERROR: &str = "Missing search query.";

#[derive(Debug, thiserror::Error)]
pub enum WebSearchError {
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Produce an answer to `messages`, letting the model consult the web.
///
/// # Errors
///
/// Returns an error if a model call or a search call fails.
pub async fn run_with_web_search(
    mode: SearchMode,
    llm: &dyn LlmChat,
    search: &dyn WebSearch,
    model: &str,
    messages: &[Message],
) -> Result<String, WebSearchError> {
    match mode {
        SearchMode::Native => run_native_search(llm, model, messages).await,
        SearchMode::FunctionCalling => run_tool_flow(llm, search, model, messages).await,
    }
}

async fn run_native_search(llm: &dyn LlmChat, model: &str, messages: &[Message]) -> Result<String, WebSearchError> {
    let response = llm.chat_with_native_search(model, messages).await?;
    Ok(extract_response_text(&response))
}

async fn run_tool_flow(
    llm: &dyn LlmChat,
    search: &dyn WebSearch,
    model: &str,
    messages: &[Message],
) -> Result<String, WebSearchError> {
    let tools = [web_search_tool()];
    let response = llm.chat(model, messages, Some(tools.as_slice())).await?;

    let message = assistant_message(&response);
    let raw_calls = message
        .and_then(|m| m.get("tool_calls"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    if raw_calls.is_empty() {
        debug!(model, "web_search: no tool calls, answer is final");
        return Ok(extract_response_text(&response));
    }

    let tool_calls = canonical_tool_calls(raw_calls);
    let mut tool_messages = Vec::new();
    for call in &tool_calls {
        if call.function.name != WEB_SEARCH_TOOL {
            debug!(tool = %call.function.name, "web_search: skipping unknown tool");
            continue;
        }
        let args = parse_tool_arguments(&call.function.arguments);
        let result = match search_query(&args) {
            Some(query) => {
                info!(call_id = %call.id, query_len = query.len(), "web_search: executing search");
                search.search(query).await?
            }
            None => json!({ "error": MISSING_QUERY_ERROR }).to_string(),
        };
        tool_messages.push(Message::tool_result(&call.id, result));
    }

    let content = message
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .unwrap_or("");
    if tool_messages.is_empty() {
        return Ok(content.to_string());
    }

    let mut followup = Vec::with_capacity(messages.len() + 1 + tool_messages.len());
    followup.extend_from_slice(messages);
    followup.push(Message::assistant_with_tools(content, tool_calls));
    followup.extend(tool_messages);

    info!(model, rounds = 2, messages = followup.len(), "web_search: resolving with tool results");
    let final_response = llm.chat(model, &followup, None).await?;
    Ok(extract_response_text(&final_response))
}

#[cfg(test)]
#[path = "web_search_test.rs"]
mod tests;
