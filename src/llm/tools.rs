//! The `web_search` tool and the tool-call codec.
//!
//! Tool calls reach us in two forms: raw JSON mappings straight off the wire
//! (where any field may be missing, and Ollama sends `arguments` as an object
//! instead of a string) and already-typed [`ToolCall`]s. Both decode into the
//! canonical [`ToolCall`] used to build follow-up messages.

use serde_json::{Map, Value};

use super::types::{Tool, ToolCall};

/// Name the model must use for a call to be dispatched to web search.
pub const WEB_SEARCH_TOOL: &str = "web_search";

/// Argument keys that may carry the search query, in priority order.
const QUERY_KEYS: [&str; 3] = ["query", "search_query", "q"];

/// Function-calling declaration of the `web_search` tool.
#[must_use]
pub fn web_search_tool() -> Tool {
    Tool {
        name: WEB_SEARCH_TOOL.into(),
        description: "Search the web for relevant, recent information.".into(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "Search query" }
            },
            "required": ["query"]
        }),
    }
}

// =============================================================================
// CODEC
// =============================================================================

/// Anything that can be read as a tool call.
pub trait ToolCallSource {
    fn to_tool_call(&self) -> ToolCall;
}

/// Mapping form: every missing field defaults to empty text, `type` to `"function"`.
impl ToolCallSource for Value {
    fn to_tool_call(&self) -> ToolCall {
        let text = |v: Option<&Value>| v.and_then(Value::as_str).unwrap_or("").to_string();
        let function = self.get("function");
        let arguments = match function.and_then(|f| f.get("arguments")) {
            Some(Value::String(s)) => s.clone(),
            Some(v @ Value::Object(_)) => v.to_string(),
            _ => String::new(),
        };
        let mut call = ToolCall::function(text(self.get("id")), text(function.and_then(|f| f.get("name"))), arguments);
        let call_type = text(self.get("type"));
        if !call_type.is_empty() {
            call.call_type = call_type;
        }
        call
    }
}

/// Typed form: fields are taken as they are.
impl ToolCallSource for ToolCall {
    fn to_tool_call(&self) -> ToolCall {
        self.clone()
    }
}

/// Decode a sequence of tool calls, preserving order and count.
#[must_use]
pub fn canonical_tool_calls<T: ToolCallSource>(calls: &[T]) -> Vec<ToolCall> {
    calls.iter().map(ToolCallSource::to_tool_call).collect()
}

// =============================================================================
// ARGUMENTS
// =============================================================================

/// Parse JSON-encoded tool arguments. Anything that is not a JSON object
/// (including malformed text) becomes an empty object.
#[must_use]
pub fn parse_tool_arguments(arguments: &str) -> Map<String, Value> {
    match serde_json::from_str::<Value>(arguments) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// First non-empty query among `query`, `search_query`, `q`.
#[must_use]
pub fn search_query(args: &Map<String, Value>) -> Option<&str> {
    QUERY_KEYS
        .iter()
        .filter_map(|key| args.get(*key).and_then(Value::as_str))
        .find(|q| !q.is_empty())
}

#[cfg(test)]
#[path = "tools_test.rs"]
mod tests;
