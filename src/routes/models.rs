//! `GET /models`.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use tracing::warn;

use crate::services::catalog;
use crate::state::AppState;

use super::error_response;

#[derive(Debug, Default, Deserialize)]
pub struct ModelsQuery {
    pub provider: Option<String>,
}

/// `GET /models?provider=<openai|ollama>` — list the provider's model ids.
pub async fn list_models(State(state): State<AppState>, Query(query): Query<ModelsQuery>) -> Response {
    match catalog::list_models(&state, query.provider.as_deref()).await {
        Ok(catalog) => Json(catalog).into_response(),
        Err(e) => {
            warn!(error = %e, "models: listing failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

#[cfg(test)]
#[path = "models_test.rs"]
mod tests;
