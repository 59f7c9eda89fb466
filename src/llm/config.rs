//! Service configuration parsed from environment variables.
//!
//! Built once at startup by [`AppConfig::from_env`] and shared read-only.
//! Per-request provider selection is derived from it by
//! [`AppConfig::select_provider`], which is the only place credentials are
//! checked for presence.

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PORT: u16 = 5010;

// =============================================================================
// ERROR
// =============================================================================

/// Missing provider configuration, detected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("OpenAI API key is not configured.")]
    OpenAiNotConfigured,
    #[error("Ollama configuration is missing (AI_BASE_URL/AI_API_KEY).")]
    OllamaNotConfigured,
}

// =============================================================================
// PROVIDERS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Ollama,
}

/// How a provider performs web search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// The provider has a built-in search capability (one round).
    Native,
    /// Search is a declared function tool executed by us (two rounds).
    FunctionCalling,
}

impl ProviderKind {
    /// Parse a caller-supplied provider name. Anything but `ollama` is `OpenAI`.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("ollama") => Self::Ollama,
            _ => Self::OpenAi,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Ollama => "ollama",
        }
    }

    /// Model used when the caller asks for none, or for an incompatible one.
    #[must_use]
    pub fn default_model(self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o-mini",
            Self::Ollama => "llama3.1",
        }
    }

    #[must_use]
    pub fn search_mode(self) -> SearchMode {
        match self {
            Self::OpenAi => SearchMode::Native,
            Self::Ollama => SearchMode::FunctionCalling,
        }
    }
}

/// Endpoint and credential for one provider, resolved per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSelection {
    pub provider: ProviderKind,
    pub base_url: String,
    pub api_key: String,
}

// =============================================================================
// APP CONFIG
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for LlmTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_LLM_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_LLM_CONNECT_TIMEOUT_SECS }
    }
}

/// Web search credentials and endpoint override.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Dedicated search key. When absent the Ollama key is used instead.
    pub api_key: Option<String>,
    /// Explicit search endpoint; replaces the built-in candidate list.
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub openai_api_key: Option<String>,
    pub ollama_base_url: Option<String>,
    pub ollama_api_key: Option<String>,
    pub search: SearchConfig,
    /// Model requested when the caller names none (`MODEL_NAME`).
    pub default_model: Option<String>,
    pub timeouts: LlmTimeouts,
    pub port: u16,
}

impl AppConfig {
    /// Build config from process environment variables.
    ///
    /// - `AI_BASE_URL` / `AI_API_KEY`: Ollama-compatible endpoint and key
    /// - `BASE_URL` / `API_KEY`: legacy fallbacks for the above (and `API_KEY` for `OpenAI`)
    /// - `OPENAI_API_KEY`: `OpenAI` key
    /// - `OLLAMA_WEB_SEARCH_API_KEY` (or lowercase): dedicated search key
    /// - `OLLAMA_WEB_SEARCH_URL`: explicit search endpoint
    /// - `MODEL_NAME`: default requested model
    /// - `LLM_REQUEST_TIMEOUT_SECS`: default 120
    /// - `LLM_CONNECT_TIMEOUT_SECS`: default 10
    /// - `PORT`: default 5010
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Empty values count as unset.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let first = |keys: &[&str]| keys.iter().find_map(|key| get(*key));

        let timeouts = LlmTimeouts {
            request_secs: parse_or(get("LLM_REQUEST_TIMEOUT_SECS"), DEFAULT_LLM_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_or(get("LLM_CONNECT_TIMEOUT_SECS"), DEFAULT_LLM_CONNECT_TIMEOUT_SECS),
        };

        Self {
            openai_api_key: first(&["OPENAI_API_KEY", "API_KEY"]),
            ollama_base_url: first(&["AI_BASE_URL", "BASE_URL"]),
            ollama_api_key: first(&["AI_API_KEY", "API_KEY"]),
            search: SearchConfig {
                api_key: first(&["OLLAMA_WEB_SEARCH_API_KEY", "ollama_web_search_api_key"]),
                url: get("OLLAMA_WEB_SEARCH_URL"),
            },
            default_model: get("MODEL_NAME"),
            timeouts,
            port: parse_or(get("PORT"), DEFAULT_PORT),
        }
    }

    /// Resolve endpoint and credential for `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the provider's key (or, for Ollama, its
    /// base URL) is not configured.
    pub fn select_provider(&self, provider: ProviderKind) -> Result<ProviderSelection, ConfigError> {
        match provider {
            ProviderKind::OpenAi => {
                let api_key = self
                    .openai_api_key
                    .clone()
                    .ok_or(ConfigError::OpenAiNotConfigured)?;
                Ok(ProviderSelection { provider, base_url: DEFAULT_OPENAI_BASE_URL.to_string(), api_key })
            }
            ProviderKind::Ollama => match (&self.ollama_base_url, &self.ollama_api_key) {
                (Some(base_url), Some(api_key)) => Ok(ProviderSelection {
                    provider,
                    base_url: base_url.trim_end_matches('/').to_string(),
                    api_key: api_key.clone(),
                }),
                _ => Err(ConfigError::OllamaNotConfigured),
            },
        }
    }

    /// Key used for web search: the dedicated one, else the Ollama key.
    #[must_use]
    pub fn search_api_key(&self) -> Option<&str> {
        self.search
            .api_key
            .as_deref()
            .or(self.ollama_api_key.as_deref())
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
