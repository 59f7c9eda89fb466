//! Rewrite service — one request from validation to rewritten HTML.
//!
//! DESIGN
//! ======
//! The flow is strictly ordered so that cheap failures come first:
//!
//! 1. Resolve provider and model (never fails).
//! 2. Validate that there is something to do.
//! 3. Check provider configuration, before any network call.
//! 4. Compose the `[system, user]` conversation.
//! 5. Orchestrate web search when asked; on blank output, or when search was
//!    not requested, make one plain call without tools.
//! 6. Reject blank output.
//!
//! Upstream failures keep their message and are mapped to a status by
//! [`classify_error`]; local failures carry fixed statuses.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::llm::classify::classify_error;
use crate::llm::config::{ConfigError, ProviderKind};
use crate::llm::models::resolve_model;
use crate::llm::normalize::extract_response_text;
use crate::llm::types::LlmError;
use crate::state::AppState;

use super::prompt::{PromptInput, compose_messages, effective_instruction};
use super::web_search::{WebSearchError, run_with_web_search};

// =============================================================================
// TYPES
// =============================================================================

/// Body of `POST /rewrite`. Every field is optional; `null` reads as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RewriteRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub instruction: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub use_web_search: Option<bool>,
    #[serde(default)]
    pub context_mode: Option<String>,
    #[serde(default)]
    pub context_text: Option<String>,
    #[serde(default)]
    pub context_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteResponse {
    pub rewritten_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_note: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    #[error("No instruction provided")]
    NoInstruction,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Model returned empty output.")]
    EmptyOutput,
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error(transparent)]
    WebSearch(#[from] WebSearchError),
}

impl RewriteError {
    /// HTTP status and the message to show the caller.
    #[must_use]
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::NoInstruction => (StatusCode::BAD_REQUEST, self.to_string()),
            Self::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            Self::EmptyOutput => (StatusCode::BAD_GATEWAY, self.to_string()),
            Self::Llm(_) | Self::WebSearch(_) => {
                let (message, status) = classify_error(self);
                (status, message)
            }
        }
    }
}

// =============================================================================
// SERVICE
// =============================================================================

/// Rewrite (or generate) text per the request.
///
/// # Errors
///
/// See [`RewriteError`]; the variant determines the HTTP status.
pub async fn rewrite(state: &AppState, request: &RewriteRequest) -> Result<RewriteResponse, RewriteError> {
    let provider = ProviderKind::parse(request.provider.as_deref());
    let requested_model = request
        .model
        .as_deref()
        .filter(|m| !m.is_empty())
        .or(state.config.default_model.as_deref())
        .unwrap_or_default();
    let resolved = resolve_model(provider, requested_model);

    let text = request.text.as_deref().unwrap_or_default();
    let instruction = effective_instruction(text, request.instruction.as_deref().unwrap_or_default());
    if text.trim().is_empty() && instruction.trim().is_empty() {
        return Err(RewriteError::NoInstruction);
    }

    let selection = state.config.select_provider(provider)?;
    let llm = state.connector.connect(&selection)?;

    let use_web_search = request.use_web_search.unwrap_or(false);
    let context_mode = request
        .context_mode
        .as_deref()
        .unwrap_or_default()
        .trim()
        .to_lowercase();
    let input = PromptInput {
        text,
        instruction,
        use_web_search,
        context_mode: &context_mode,
        context_text: request.context_text.as_deref().unwrap_or_default(),
        context_note: request.context_note.as_deref().unwrap_or_default(),
        model_warning: resolved.warning.as_deref(),
    };
    let messages = compose_messages(&input);

    info!(
        provider = provider.as_str(),
        model = %resolved.model,
        use_web_search,
        text_len = text.len(),
        "rewrite: calling model"
    );

    let mut rewritten = String::new();
    if use_web_search {
        rewritten = run_with_web_search(
            provider.search_mode(),
            llm.as_ref(),
            state.search.as_ref(),
            &resolved.model,
            &messages,
        )
        .await?;
        if rewritten.trim().is_empty() {
            warn!(provider = provider.as_str(), "rewrite: web search produced no text, retrying without tools");
        }
    }
    if rewritten.trim().is_empty() {
        let response = llm.chat(&resolved.model, &messages, None).await?;
        rewritten = extract_response_text(&response);
    }

    if rewritten.trim().is_empty() {
        warn!(provider = provider.as_str(), model = %resolved.model, "rewrite: model returned empty output");
        return Err(RewriteError::EmptyOutput);
    }

    info!(provider = provider.as_str(), output_len = rewritten.len(), "rewrite: done");
    Ok(RewriteResponse { rewritten_text: rewritten, model_note: resolved.warning })
}

#[cfg(test)]
#[path = "rewrite_test.rs"]
mod tests;
