use std::sync::Arc;

use super::*;
use crate::state::test_helpers::{configured, test_app_state_with_llm, unconfigured};
use crate::test_helpers::MockLlm;

#[tokio::test]
async fn lists_openai_models() {
    let llm = Arc::new(MockLlm::with_models(serde_json::json!({
        "object": "list",
        "data": [{ "id": "gpt-4o-mini", "object": "model" }, { "id": "gpt-4.1", "object": "model" }]
    })));
    let (state, connector) = test_app_state_with_llm(configured(), llm);

    let catalog = list_models(&state, None).await.unwrap();
    assert_eq!(catalog, ModelCatalog { provider: "openai", models: vec!["gpt-4o-mini".into(), "gpt-4.1".into()] });
    assert_eq!(connector.selections()[0].provider, ProviderKind::OpenAi);
}

#[tokio::test]
async fn lists_ollama_native_models() {
    let llm = Arc::new(MockLlm::with_models(serde_json::json!({
        "models": [{ "name": "llama3.1:8b" }, { "name": "qwen2.5:7b" }, {}]
    })));
    let (state, _connector) = test_app_state_with_llm(configured(), llm);

    let catalog = list_models(&state, Some(" OLLAMA ")).await.unwrap();
    assert_eq!(catalog.provider, "ollama");
    assert_eq!(catalog.models, vec!["llama3.1:8b", "qwen2.5:7b"]);
}

#[tokio::test]
async fn unconfigured_provider_fails() {
    let (state, _connector) = test_app_state_with_llm(unconfigured(), Arc::new(MockLlm::default()));
    let err = list_models(&state, Some("ollama")).await.unwrap_err();
    assert_eq!(err.to_string(), "Ollama configuration is missing (AI_BASE_URL/AI_API_KEY).");
}

#[tokio::test]
async fn listing_failure_propagates() {
    let (state, _connector) = test_app_state_with_llm(configured(), Arc::new(MockLlm::default()));
    let err = list_models(&state, Some("openai")).await.unwrap_err();
    assert!(matches!(err, CatalogError::Llm(_)));
}
