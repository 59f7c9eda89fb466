//! `POST /rewrite`.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use tracing::warn;

use crate::services::rewrite::{self as service, RewriteRequest};
use crate::state::AppState;

use super::error_response;

/// `POST /rewrite` — rewrite or generate text as an HTML fragment.
pub async fn rewrite(State(state): State<AppState>, body: Result<Json<RewriteRequest>, JsonRejection>) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rewrite: unreadable request body");
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    match service::rewrite(&state, &request).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            let (status, message) = e.status_and_message();
            warn!(%status, error = %message, "rewrite: failed");
            error_response(status, message)
        }
    }
}

#[cfg(test)]
#[path = "rewrite_test.rs"]
mod tests;
