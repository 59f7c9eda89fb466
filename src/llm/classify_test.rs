use super::*;
use crate::llm::types::LlmError;

#[test]
fn rate_limit_any_case() {
    let (message, status) = classify_error("Rate Limit Exceeded for org");
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(message, "Rate Limit Exceeded for org");

    let (_, status) = classify_error("RATE LIMIT EXCEEDED");
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}

#[test]
fn too_many_requests() {
    let (_, status) = classify_error("429 Too Many Requests");
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}

#[test]
fn invalid_api_key() {
    let (_, status) = classify_error("Invalid API key provided: sk-****");
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[test]
fn authentication_failure() {
    let (_, status) = classify_error("Authentication failed for this request");
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[test]
fn model_not_found() {
    let (_, status) = classify_error("{\"error\":{\"code\":\"model_not_found\"}}");
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, status) = classify_error("The model `gpt-9` does not exist");
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[test]
fn unrelated_is_internal_error() {
    let (message, status) = classify_error("connection reset by peer");
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(message, "connection reset by peer");
}

#[test]
fn first_rule_wins() {
    // Matches both the model rule and the rate-limit rule.
    let (_, status) = classify_error("model does not exist; rate limit also hit");
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[test]
fn classifies_llm_error_with_body() {
    let err = LlmError::ApiResponse { status: 429, body: "Rate limit reached for gpt-4o-mini".into() };
    let (message, status) = classify_error(&err);
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(message, err.to_string());
}
