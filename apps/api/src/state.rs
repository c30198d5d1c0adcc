use std::sync::Arc;

use crate::advice::AdviceService;
use crate::config::Config;
use crate::keywords::extractor::KeywordExtractor;
use crate::keywords::reconciler::KeywordReconciler;
use crate::scraping::JobPostingFetcher;
use crate::similarity::EmbeddingProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only after startup; extraction runs on blocking threads.
    pub extractor: Arc<KeywordExtractor>,
    pub reconciler: KeywordReconciler,
    /// Pluggable embedding backend. Default: OllamaEmbeddingProvider.
    pub embedder: Arc<dyn EmbeddingProvider>,
    pub advisor: AdviceService,
    pub job_fetcher: JobPostingFetcher,
}
