mod advice;
mod analysis;
mod config;
mod documents;
mod errors;
mod keywords;
mod llm_client;
mod routes;
mod scraping;
mod similarity;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::advice::AdviceService;
use crate::config::Config;
use crate::keywords::analyzer::build_analyzer;
use crate::keywords::dictionary::SkillDictionary;
use crate::keywords::extractor::KeywordExtractor;
use crate::keywords::reconciler::KeywordReconciler;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::scraping::JobPostingFetcher;
use crate::similarity::OllamaEmbeddingProvider;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on invalid env values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS API v{}", env!("CARGO_PKG_VERSION"));

    // Keyword engine: dictionary and analyzer are built once and shared read-only
    let dictionary = Arc::new(SkillDictionary::builtin());
    let analyzer = build_analyzer(config.text_analyzer);
    let extractor = KeywordExtractor::new(dictionary, analyzer, &config.keyword_limits)
        .context("Failed to compile keyword phrase catalog")?
        .with_filter_policy(config.filter_policy);
    let reconciler = KeywordReconciler::new(&config.keyword_limits);
    info!(
        "Keyword engine initialized (analyzer: {}, policy: {:?}, limits: {:?})",
        extractor.analyzer_name(),
        config.filter_policy,
        config.keyword_limits
    );

    // Initialize model-server client (shared by embeddings and advice)
    let llm = LlmClient::new(config.ollama_url.clone(), config.llm_timeout)
        .context("Failed to build model server HTTP client")?;
    info!("LLM client initialized (server: {})", llm.base_url());

    let embedder = Arc::new(OllamaEmbeddingProvider::new(
        llm.clone(),
        config.embedding_model.clone(),
    ));
    let advisor = AdviceService::new(llm, config.advice_model.clone());
    if advisor.health_check().await {
        info!("Model server reachable (advice model: {})", advisor.model());
    } else {
        tracing::warn!("Model server not reachable; similarity will fail and advice will fall back");
    }

    let job_fetcher = JobPostingFetcher::new().context("Failed to build scraping HTTP client")?;

    // Build app state
    let state = AppState {
        config: config.clone(),
        extractor: Arc::new(extractor),
        reconciler,
        embedder,
        advisor,
        job_fetcher,
    };

    let cors = build_cors_layer(&config.cors_origins)?;

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// CORS restricted to the configured origins.
fn build_cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o).with_context(|| format!("Invalid CORS origin '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
