use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use critique::analysis::{Rubric, SectionAnalyzer};
use critique::config::Config;
use critique::extraction::PdfTextExtractor;
use critique::llm_client::{self, LlmClient};
use critique::routes::build_router;
use critique::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = &config.rust_log;
            EnvFilter::new(format!("critique={level},{}={level}", env!("CARGO_CRATE_NAME")))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Critique API v{}", env!("CARGO_PKG_VERSION"));

    // Rubric is fixed for the life of the process
    let rubric = match &config.rubric_path {
        Some(path) => Rubric::load(path)?,
        None => Rubric::default(),
    };

    // Initialize LLM client and inject it into the analyzer
    let llm = LlmClient::new(config.anthropic_api_key.clone())
        .context("Failed to build HTTP client for the LLM API")?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    let analyzer = SectionAnalyzer::new(Arc::new(llm)).with_timeout(config.analysis_timeout);
    info!(
        "Section analyzer ready (timeout: {}s)",
        config.analysis_timeout.as_secs()
    );

    let state = AppState {
        analyzer,
        extractor: Arc::new(PdfTextExtractor),
        rubric: Arc::new(rubric),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the upload UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
