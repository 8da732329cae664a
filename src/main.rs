mod agent;
mod config;
mod errors;
mod models;
mod prompts;
mod routes;
mod service;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{routing::get, routing::post, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::agent::GeminiAgentService;
use crate::config::AppConfig;
use crate::prompts::PromptRegistry;
use crate::routes::api_routes::{chat_handler, health_handler, meme_handler};
use crate::service::analysis_service::AnalysisService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finguardian=debug,tower_http=debug".into()),
        )
        .init();

    if config.gemini_api_key.is_empty() {
        warn!("GEMINI_API_KEY is not set; completion calls will fail upstream");
    }

    // ── Dependency wiring ─────────────────────────────────────────────────────
    let prompts = PromptRegistry::load(config.prompts_path.as_deref())?;
    info!("Prompt templates loaded ({})", prompts.version());

    let agent = GeminiAgentService::new(&config)?;
    let service = AnalysisService::new(prompts, Arc::new(agent));
    info!("Completion model: {}", service.model());

    let app = build_router(service, config.cors_allowed_origin.as_deref());

    // ── Listen ────────────────────────────────────────────────────────────────
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Routes plus the tracing and CORS layers. An unset or unparseable origin
/// falls back to allowing any origin.
pub fn build_router(service: AnalysisService, cors_origin: Option<&str>) -> Router {
    let cors = match cors_origin.map(HeaderValue::from_str) {
        Some(Ok(origin)) => CorsLayer::new().allow_origin(origin),
        Some(Err(e)) => {
            warn!("Ignoring invalid CORS_ALLOWED_ORIGIN: {e}");
            CorsLayer::new().allow_origin(Any)
        }
        None => CorsLayer::new().allow_origin(Any),
    }
    .allow_methods(Any)
    .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/api/meme", post(meme_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
