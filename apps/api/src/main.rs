mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod routes;
mod state;
mod storage;
mod workflow;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StorageBackend};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::memory::MemStorage;
use crate::storage::supabase::SupabaseStorage;
use crate::storage::Storage;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting LOR API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize storage
    let storage: Arc<dyn Storage> = match &config.storage_backend {
        StorageBackend::Memory => {
            info!("Storage backend: in-memory (seeded faculty directory)");
            Arc::new(MemStorage::with_seed_faculty())
        }
        StorageBackend::Supabase { url, service_key } => {
            info!("Storage backend: supabase ({url})");
            Arc::new(SupabaseStorage::new(url.clone(), service_key.clone()))
        }
    };

    // Initialize LLM client
    let llm = LlmClient::new(config.openai_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Build app state
    let state = AppState {
        storage,
        llm,
        config: config.clone(),
    };

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
