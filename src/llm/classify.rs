//! Error classification — map provider failure text to an HTTP status.
//!
//! Providers do not agree on structured error codes, so this matches on the
//! message text. Callers go through [`classify_error`] only, which keeps the
//! heuristic replaceable.

use axum::http::StatusCode;

/// Ordered rules: the first rule with a matching needle wins.
const RULES: &[(&[&str], StatusCode)] = &[
    (&["model_not_found", "does not exist"], StatusCode::BAD_REQUEST),
    (&["rate limit", "too many requests"], StatusCode::TOO_MANY_REQUESTS),
    (&["invalid api key", "authentication"], StatusCode::UNAUTHORIZED),
];

/// Classify a failure by its message. The message is returned unchanged.
#[must_use]
pub fn classify_error(error: &(impl std::fmt::Display + ?Sized)) -> (String, StatusCode) {
    let message = error.to_string();
    let lowered = message.to_lowercase();
    let status = RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| lowered.contains(needle)))
        .map_or(StatusCode::INTERNAL_SERVER_ERROR, |(_, status)| *status);
    (message, status)
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;
