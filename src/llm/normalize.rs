//! Response normalization — pull plain text out of any supported response shape.
//!
//! Providers disagree on where the answer lives: Ollama's native chat puts it
//! under `message.content`, generate-style endpoints under `response`, chat
//! completions under `choices[0].message.content`, and the Responses API
//! under `output_text` or a list of `output` items with text blocks. Each
//! shape is one strategy; strategies run in order and a miss just moves on.

use serde_json::Value;

type Strategy = fn(&Value) -> Option<String>;

const STRATEGIES: &[Strategy] = &[message_content, response_field, first_choice_content, output_text, output_blocks];

/// Return the best-effort answer text of `response`, or an empty string.
#[must_use]
pub fn extract_response_text(response: &Value) -> String {
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(response))
        .unwrap_or_default()
}

/// The assistant message of a chat response, in either the chat-completions
/// (`choices[0].message`) or the Ollama-native (`message`) position.
#[must_use]
pub fn assistant_message(response: &Value) -> Option<&Value> {
    response
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .or_else(|| response.get("message"))
        .filter(|message| message.is_object())
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn message_content(response: &Value) -> Option<String> {
    non_empty_str(response.get("message").and_then(|m| m.get("content")))
}

fn response_field(response: &Value) -> Option<String> {
    non_empty_str(response.get("response"))
}

fn first_choice_content(response: &Value) -> Option<String> {
    let choice = response
        .get("choices")
        .and_then(Value::as_array)?
        .first()?;
    non_empty_str(choice.get("message").and_then(|m| m.get("content")))
}

fn output_text(response: &Value) -> Option<String> {
    response
        .get("output_text")
        .and_then(Value::as_str)
        .map(str::to_owned)
}

fn output_blocks(response: &Value) -> Option<String> {
    let items = response.get("output").and_then(Value::as_array)?;
    let texts: Vec<&str> = items
        .iter()
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .filter_map(|block| block.get("text").and_then(Value::as_str))
        .filter(|text| !text.is_empty())
        .collect();
    if texts.is_empty() { None } else { Some(texts.join("\n")) }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
