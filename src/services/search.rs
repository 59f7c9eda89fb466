//! Web search endpoint caller.
//!
//! DESIGN
//! ======
//! Hosted Ollama search has moved between paths over time, and self-hosted
//! gateways mount it under their own base URL. Unless an explicit URL is
//! configured, the caller walks an ordered candidate list and returns the
//! body of the first endpoint that answers with a 2xx. Only exhaustion of
//! the whole list is reported, as the last error seen.

use std::time::Duration;

use reqwest::Url;
use serde_json::json;
use tracing::{info, warn};

use crate::llm::config::AppConfig;

/// Fixed bound on a single search request.
pub const SEARCH_TIMEOUT_SECS: u64 = 90;

/// Well-known public search endpoints, tried first.
const PUBLIC_ENDPOINTS: [&str; 4] = [
    "https://ollama.com/api/web_search",
    "https://api.ollama.com/api/web_search",
    "https://api.ollama.com/v1/web-search",
    "https://api.ollama.com/v1/web/search",
];

/// Paths appended to the provider base URL (with any `/v1` suffix removed).
const BASE_URL_PATHS: [&str; 6] = [
    "/api/web_search",
    "/api/web-search",
    "/api/web/search",
    "/v1/web_search",
    "/v1/web-search",
    "/v1/web/search",
];

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("OLLAMA_WEB_SEARCH_API_KEY or AI_API_KEY must be configured for web search.")]
    NotConfigured,

    #[error("Web search URL is invalid: {0}")]
    InvalidUrl(String),

    #[error("Web search failed: {status} {body} (url: {url})")]
    Http { status: u16, body: String, url: String },

    #[error("Web search failed: {reason} (url: {url})")]
    Transport { reason: String, url: String },

    #[error("Web search URL is not configured.")]
    NoCandidates,

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// TRAIT
// =============================================================================

/// Executes one web search and returns the raw response body.
#[async_trait::async_trait]
pub trait WebSearch: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`SearchError`] when no credential is configured or every
    /// candidate endpoint fails.
    async fn search(&self, query: &str) -> Result<String, SearchError>;
}

// =============================================================================
// CANDIDATES
// =============================================================================

/// Ordered endpoint candidates: the explicit URL alone when configured,
/// otherwise the public endpoints followed by variants of `base_url`.
#[must_use]
pub fn candidate_urls(explicit: Option<&str>, base_url: Option<&str>) -> Vec<String> {
    if let Some(url) = explicit {
        return vec![url.to_string()];
    }

    let mut urls: Vec<String> = PUBLIC_ENDPOINTS.iter().map(|u| (*u).to_string()).collect();
    if let Some(base) = base_url {
        let mut root = base.trim_end_matches('/');
        if let Some(stripped) = root.strip_suffix("/v1") {
            root = stripped.trim_end_matches('/');
        }
        urls.extend(BASE_URL_PATHS.iter().map(|path| format!("{root}{path}")));
    }
    urls
}

/// Absolute URL with both scheme and host.
fn is_absolute_url(candidate: &str) -> bool {
    Url::parse(candidate).is_ok_and(|url| !url.scheme().is_empty() && url.has_host())
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct SearchClient {
    http: reqwest::Client,
    api_key: Option<String>,
    candidates: Vec<String>,
}

impl SearchClient {
    /// Build a client with an explicit credential and candidate list.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(api_key: Option<String>, candidates: Vec<String>) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(SEARCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| SearchError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, candidates })
    }

    /// Build a client from service configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SearchError> {
        let candidates = candidate_urls(config.search.url.as_deref(), config.ollama_base_url.as_deref());
        Self::new(config.search_api_key().map(str::to_owned), candidates)
    }

    #[must_use]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    async fn post_query(&self, url: &str, api_key: &str, query: &str) -> Result<String, SearchError> {
        let response = self
            .http
            .post(url)
            .bearer_auth(api_key)
            .json(&json!({ "query": query }))
            .send()
            .await
            .map_err(|e| SearchError::Transport { reason: e.to_string(), url: url.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Http { status: status.as_u16(), body, url: url.to_string() });
        }
        response
            .text()
            .await
            .map_err(|e| SearchError::Transport { reason: e.to_string(), url: url.to_string() })
    }
}

#[async_trait::async_trait]
impl WebSearch for SearchClient {
    async fn search(&self, query: &str) -> Result<String, SearchError> {
        let api_key = self.api_key.as_deref().ok_or(SearchError::NotConfigured)?;

        let mut last_error = None;
        for url in &self.candidates {
            if !is_absolute_url(url) {
                warn!(%url, "search: skipping invalid endpoint");
                last_error = Some(SearchError::InvalidUrl(url.clone()));
                continue;
            }
            match self.post_query(url, api_key, query).await {
                Ok(body) => {
                    info!(%url, body_len = body.len(), "search: endpoint answered");
                    return Ok(body);
                }
                Err(e) => {
                    warn!(%url, error = %e, "search: endpoint failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(SearchError::NoCandidates))
    }
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
