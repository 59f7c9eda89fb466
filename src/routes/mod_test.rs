use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, header};

use super::*;
use crate::state::test_helpers::{configured, test_app_state_with_llm};
use crate::test_helpers::{MockLlm, send};

fn test_app() -> Router {
    let (state, _connector) = test_app_state_with_llm(configured(), Arc::new(MockLlm::default()));
    app(state)
}

#[tokio::test]
async fn healthz_is_ok() {
    let (status, body) = send(test_app(), Request::get("/healthz").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/rewrite")
        .header(header::ORIGIN, "https://addin.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(test_app(), request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let response = tower::ServiceExt::oneshot(test_app(), Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn error_response_shape() {
    let response = error_response(StatusCode::BAD_GATEWAY, "boom");
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
