//! Prompt composition for a rewrite request.
//!
//! Pure string building: no configuration, no I/O. The system prompt is a
//! base instruction extended by clauses that depend on the request shape;
//! the user message lays out instruction, text, and optional context.

use crate::llm::types::Message;

/// Instruction used when the caller sends text but no instruction.
pub const DEFAULT_INSTRUCTION: &str = "Rewrite this text in a formal academic tone";

const BASE_PROMPT: &str = "Rewrite the user's text according to the instruction and produce HTML fragments \
     (for example, <p>, <strong>, <em>, <ul>, <li>). Return only the rewritten content without \
     introductions, explanations, AI commentary, and do not emit <html> or <body> tags.";

const EMPTY_TEXT_CLAUSE: &str = " If the input text is empty, generate new content that satisfies the instruction and \
     fits the provided context. Avoid repeating nearby context.";

const CONTEXT_CLAUSE: &str = " Use the provided document context to keep continuity and avoid repeating content. \
     The context may contain markers like [[EDIT_START]], [[EDIT_END]], or [[CURSOR]] to show \
     the rewrite location; never include these markers in the output.";

const WEB_SEARCH_CLAUSE: &str = " Verify factual accuracy using web search. After the rewrite, include a short \
     'Sources' section with clickable links (HTML list is fine). Do not add any extra commentary.";

const NO_CITATIONS_CLAUSE: &str = " Do not include citations or source lists.";

/// Everything the composer reads, borrowed from the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptInput<'a> {
    pub text: &'a str,
    pub instruction: &'a str,
    pub use_web_search: bool,
    /// Lower-cased context mode label; empty means "custom".
    pub context_mode: &'a str,
    pub context_text: &'a str,
    pub context_note: &'a str,
    /// Note produced when the requested model was substituted.
    pub model_warning: Option<&'a str>,
}

/// The instruction to send: the caller's, or the default when only text was given.
/// Empty when both are blank.
#[must_use]
pub fn effective_instruction<'a>(text: &str, instruction: &'a str) -> &'a str {
    if instruction.trim().is_empty() && !text.trim().is_empty() {
        DEFAULT_INSTRUCTION
    } else {
        instruction
    }
}

#[must_use]
pub fn system_prompt(input: &PromptInput<'_>) -> String {
    let mut prompt = String::from(BASE_PROMPT);
    if input.text.trim().is_empty() {
        prompt.push_str(EMPTY_TEXT_CLAUSE);
    }
    if !input.context_text.is_empty() {
        prompt.push_str(CONTEXT_CLAUSE);
    }
    prompt.push_str(if input.use_web_search { WEB_SEARCH_CLAUSE } else { NO_CITATIONS_CLAUSE });
    prompt
}

#[must_use]
pub fn user_message(input: &PromptInput<'_>) -> String {
    let mut message = format!("Instruction: {}", input.instruction);

    if input.text.trim().is_empty() {
        message.push_str("\n\nText: (none)");
    } else {
        message.push_str("\n\nText: ");
        message.push_str(input.text);
    }

    if !input.context_text.is_empty() {
        let mode = if input.context_mode.is_empty() { "custom" } else { input.context_mode };
        message.push_str(&format!("\n\nContext ({mode}):\n{}", input.context_text));
        if !input.context_note.is_empty() {
            message.push_str("\n\nContext note: ");
            message.push_str(input.context_note);
        }
    }

    if let Some(warning) = input.model_warning {
        message.push_str("\n\nModel note: ");
        message.push_str(warning);
    }

    message
}

/// The opening conversation: `[system, user]`.
#[must_use]
pub fn compose_messages(input: &PromptInput<'_>) -> Vec<Message> {
    vec![Message::system(system_prompt(input)), Message::user(user_message(input))]
}

#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;
