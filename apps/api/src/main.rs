mod config;
mod db;
mod document;
mod errors;
mod feedback;
mod llm_client;
mod models;
mod resume;
mod routes;
mod state;

#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::document::{PdfTextExtractor, PopplerRasterizer};
use crate::feedback::PgFeedbackStore;
use crate::llm_client::LlmClient;
use crate::resume::template::load_template;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cvcoach v{}", env!("CARGO_PKG_VERSION"));

    // Extraction template: read once, shared read-only
    let template = load_template(&config.template_path)?;

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("Cannot create upload dir {}", config.upload_dir.display()))?;
    info!("Uploads stored in {}", config.upload_dir.display());

    // Initialize PostgreSQL (feedback store)
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(
        config.groq_api_key.clone(),
        config.groq_api_url.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?;
    info!(
        "LLM client initialized (models: {}, {})",
        llm_client::EXTRACTION_MODEL,
        llm_client::CRITIQUE_MODEL
    );

    let rasterizer = PopplerRasterizer::new(config.pdftoppm_bin.clone(), config.raster_dpi);
    info!(
        "Rasterizer: {} at {} dpi, page text policy: {:?}",
        config.pdftoppm_bin, config.raster_dpi, config.page_policy
    );

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        extractor: Arc::new(PdfTextExtractor),
        rasterizer: Arc::new(rasterizer),
        feedback: Arc::new(PgFeedbackStore::new(db)),
        template,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
