//! Model catalog — list the models a provider offers.
//!
//! Failures here are reported as server errors with the raw message and are
//! not run through the classifier.

use serde::Serialize;
use tracing::info;

use crate::llm::config::{ConfigError, ProviderKind};
use crate::llm::models::model_ids;
use crate::llm::types::LlmError;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelCatalog {
    pub provider: &'static str,
    pub models: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// List model ids for the provider named by `provider` (default `openai`).
///
/// # Errors
///
/// Returns an error if the provider is not configured or the listing fails.
pub async fn list_models(state: &AppState, provider: Option<&str>) -> Result<ModelCatalog, CatalogError> {
    let provider = ProviderKind::parse(provider);
    let selection = state.config.select_provider(provider)?;
    let llm = state.connector.connect(&selection)?;

    let listing = llm.list_models().await?;
    let models = model_ids(&listing);
    info!(provider = provider.as_str(), count = models.len(), "models: listed");
    Ok(ModelCatalog { provider: provider.as_str(), models })
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
