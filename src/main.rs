use axum::routing::{get, post};
use axum::Router;
use tracing_subscriber::EnvFilter;

use pdf_qa::api;
use pdf_qa::config::Config;
use pdf_qa::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!("Inference API: {}", config.qa.base_url);
    if config.qa.api_key.is_none() {
        tracing::warn!("HUGGINGFACE_API_KEY is not set; requests will be anonymous");
    }

    let state = AppState::new(config.clone())?;

    let app = Router::new()
        .route("/api/chat", post(api::chat::chat))
        .route("/api/models", get(api::models::list_models))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
