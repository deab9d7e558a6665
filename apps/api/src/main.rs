mod config;
mod errors;
mod export;
mod extraction;
mod models;
mod resumes;
mod routes;
mod state;
mod suggestions;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::resumes::persistence::JsonDirPersistence;
use crate::resumes::ResumeService;
use crate::routes::build_router;
use crate::state::AppState;
use crate::suggestions::MockSuggestionProvider;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Load saved resumes
    let persistence = JsonDirPersistence::new(&config.storage_dir);
    persistence
        .ensure_dir()
        .await
        .with_context(|| format!("Cannot create storage dir {}", config.storage_dir.display()))?;
    let resumes = ResumeService::load(Arc::new(persistence))
        .await
        .context("Failed to load saved resumes")?;
    info!("Storage directory: {}", config.storage_dir.display());

    let suggester = Arc::new(MockSuggestionProvider::new(Duration::from_millis(
        config.suggestion_delay_ms,
    )));

    let state = AppState {
        config: config.clone(),
        resumes: Arc::new(resumes),
        suggester,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
