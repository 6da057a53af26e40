mod config;
mod drafting;
mod errors;
mod llm_client;
mod models;
mod routes;
mod shotlist;
mod shots;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{LlmClient, PromptDrafter};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::ShotStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Shotdeck API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the file-backed shot store
    let store = Arc::new(ShotStore::new(config.data_dir.clone()));
    info!("Shot store initialized under {}", config.data_dir.display());

    // Initialize the LLM client; drafting fails at request time without a key
    if config.anthropic_api_key.is_none() {
        warn!("ANTHROPIC_API_KEY is not set; prompt drafting will fail until it is configured");
    }
    let drafter: Arc<dyn PromptDrafter> =
        Arc::new(LlmClient::new(config.anthropic_api_key.clone()));
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Build app state
    let state = AppState { store, drafter };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
