mod llm;
mod routes;
mod services;
mod state;

#[cfg(test)]
mod test_helpers;

use llm::config::AppConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    let port = config.port;
    tracing::info!(
        openai = config.openai_api_key.is_some(),
        ollama = config.ollama_base_url.is_some() && config.ollama_api_key.is_some(),
        search_url = config.search.url.as_deref().unwrap_or("(candidates)"),
        "configuration loaded"
    );

    let state = state::AppState::from_config(config).expect("search client init failed");
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "rewrite service listening");
    axum::serve(listener, app).await.expect("server failed");
}
