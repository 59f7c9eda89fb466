//! LLM — provider adapter for the rewrite service.
//!
//! DESIGN
//! ======
//! Both providers are reached through one OpenAI-compatible HTTP client; what
//! differs between them is the endpoint, the credential, and how they search
//! the web ([`config::SearchMode`]). A client is connected per request from
//! the immutable [`config::AppConfig`], so requests share no mutable state.

pub mod classify;
pub mod config;
pub mod models;
pub mod normalize;
pub mod openai;
pub mod tools;
pub mod types;

use std::sync::Arc;

use config::{LlmTimeouts, ProviderSelection};
pub use types::LlmChat;
use types::LlmError;

// =============================================================================
// CONNECTOR
// =============================================================================

/// Builds a chat client for a resolved provider selection. Swapped for a
/// scripted client in tests.
pub trait LlmConnector: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the client cannot be constructed.
    fn connect(&self, selection: &ProviderSelection) -> Result<Arc<dyn LlmChat>, LlmError>;
}

/// Connects real HTTP clients.
pub struct HttpConnector {
    timeouts: LlmTimeouts,
}

impl HttpConnector {
    #[must_use]
    pub fn new(timeouts: LlmTimeouts) -> Self {
        Self { timeouts }
    }
}

impl LlmConnector for HttpConnector {
    fn connect(&self, selection: &ProviderSelection) -> Result<Arc<dyn LlmChat>, LlmError> {
        let client = openai::OpenAiClient::new(selection, self.timeouts)?;
        Ok(Arc::new(client))
    }
}
