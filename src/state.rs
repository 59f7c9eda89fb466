//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the immutable configuration built at startup, the connector that
//! turns a provider selection into a chat client, and the web search caller.
//! Nothing in it is mutated after startup, so requests never coordinate.

use std::sync::Arc;

use crate::llm::config::AppConfig;
use crate::llm::{HttpConnector, LlmConnector};
use crate::services::search::{SearchClient, SearchError, WebSearch};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Builds a chat client per request for the selected provider.
    pub connector: Arc<dyn LlmConnector>,
    /// Web search caller used by function-calling providers.
    pub search: Arc<dyn WebSearch>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig, connector: Arc<dyn LlmConnector>, search: Arc<dyn WebSearch>) -> Self {
        Self { config: Arc::new(config), connector, search }
    }

    /// Wire real HTTP clients from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the search HTTP client cannot be built.
    pub fn from_config(config: AppConfig) -> Result<Self, SearchError> {
        let search = SearchClient::from_config(&config)?;
        tracing::info!(candidates = search.candidates().len(), "search: endpoints configured");
        let connector = HttpConnector::new(config.timeouts);
        Ok(Self::new(config, Arc::new(connector), Arc::new(search)))
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use crate::llm::LlmChat;
    use crate::test_helpers::{MockConnector, MockSearch};

    /// Configuration with both providers and search configured.
    #[must_use]
    pub fn configured() -> AppConfig {
        AppConfig::from_lookup(|key| match key {
            "OPENAI_API_KEY" => Some("sk-test".into()),
            "AI_BASE_URL" => Some("https://ollama.example/v1/".into()),
            "AI_API_KEY" => Some("ollama-key".into()),
            _ => None,
        })
    }

    /// Configuration with nothing set.
    #[must_use]
    pub fn unconfigured() -> AppConfig {
        AppConfig::from_lookup(|_| None)
    }

    /// Create a test `AppState` whose connector always hands out `llm`.
    #[must_use]
    pub fn test_app_state_with_llm(config: AppConfig, llm: Arc<dyn LlmChat>) -> (AppState, Arc<MockConnector>) {
        test_app_state_with(config, llm, Arc::new(MockSearch::ok("{\"results\":[]}")))
    }

    /// Create a test `AppState` with a mock LLM and a mock search backend.
    #[must_use]
    pub fn test_app_state_with(
        config: AppConfig,
        llm: Arc<dyn LlmChat>,
        search: Arc<dyn WebSearch>,
    ) -> (AppState, Arc<MockConnector>) {
        let connector = Arc::new(MockConnector::new(llm));
        (AppState::new(config, connector.clone(), search), connector)
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
