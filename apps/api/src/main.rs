mod config;
mod documents;
mod errors;
mod evaluator;
mod interview;
mod llm_client;
mod routes;
mod shortlist;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::documents::{HttpFetcher, PdfTextExtractor, TextExtractor};
use crate::evaluator::{RemotePerplexityModel, ResumeEvaluator};
use crate::llm_client::{GeminiClient, LanguageModelGateway};
use crate::routes::build_router;
use crate::shortlist::pipeline::{PipelineSettings, ShortlistPipeline};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mitra API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM gateway (constructed once, shared read-only)
    let gemini = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.llm_timeout,
    )?;
    let gateway_timeout = gemini.call_budget();
    let llm: Arc<dyn LanguageModelGateway> = Arc::new(gemini);
    info!("LLM client initialized (model: {})", llm.model_name());

    // Document collaborators
    let fetcher = Arc::new(HttpFetcher::new(
        config.fetch_timeout,
        config.fetch_max_retries,
        config.max_resume_bytes,
    )?);
    let extractor: Arc<dyn TextExtractor> = Arc::new(PdfTextExtractor);

    let shortlist = Arc::new(ShortlistPipeline::new(
        fetcher,
        extractor.clone(),
        llm.clone(),
        PipelineSettings {
            concurrency: config.shortlist_concurrency,
            gateway_timeout,
        },
    ));
    info!(
        "Shortlist pipeline ready (concurrency: {}, gateway budget: {:?})",
        config.shortlist_concurrency, gateway_timeout
    );

    // Optional perplexity scorer sidecar
    let evaluator = match &config.perplexity_service_url {
        Some(url) => {
            let model = RemotePerplexityModel::new(url.clone(), config.llm_timeout)?;
            info!("Perplexity scorer configured at {url}");
            Some(Arc::new(ResumeEvaluator::new(Arc::new(model))))
        }
        None => {
            info!("PERPLEXITY_SERVICE_URL not set; /api/evaluate disabled");
            None
        }
    };

    // Build app state
    let state = AppState {
        llm,
        extractor,
        shortlist,
        evaluator,
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
