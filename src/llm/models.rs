//! Model names — resolve a requested model for a provider, and read model
//! catalogs.

use serde_json::Value;

use super::config::ProviderKind;

/// A model id that is safe to send to the provider, plus an optional note
/// explaining a substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModel {
    pub model: String,
    pub warning: Option<String>,
}

/// Pick a model for `provider`, falling back to its default when the request
/// is empty or clearly meant for the other provider.
///
/// Ollama model ids carry a tag after a colon (`llama3.1:8b`); `OpenAI` ids
/// never do, so a colon sent to `OpenAI` would only earn a `model_not_found`.
/// This is a naming heuristic and never consults a live catalog.
#[must_use]
pub fn resolve_model(provider: ProviderKind, requested: &str) -> ResolvedModel {
    let fallback = provider.default_model();
    let model = requested.trim();
    if model.is_empty() {
        return ResolvedModel { model: fallback.to_string(), warning: None };
    }

    if provider == ProviderKind::OpenAi && model.contains(':') {
        return ResolvedModel {
            model: fallback.to_string(),
            warning: Some(format!("Incompatible model '{model}' for provider openai. Fell back to '{fallback}'.")),
        };
    }

    ResolvedModel { model: model.to_string(), warning: None }
}

/// Extract model ids from a model-listing response.
///
/// Reads the OpenAI-style `data` array, or Ollama's native `models` array.
/// Entries may be bare strings or objects carrying `id` (or `name`/`model`);
/// entries without an id are skipped. Order is preserved.
#[must_use]
pub fn model_ids(listing: &Value) -> Vec<String> {
    let entries = listing
        .get("data")
        .or_else(|| listing.get("models"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(id) => Some(id.as_str()),
            Value::Object(map) => ["id", "name", "model"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str)),
            _ => None,
        })
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "models_test.rs"]
mod tests;
