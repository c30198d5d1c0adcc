use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
/// Service information and the endpoint list.
pub async fn root_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "service": "ATS Matching Service",
        "version": env!("CARGO_PKG_VERSION"),
        "embedding_provider": state.embedder.name(),
        "advice_model": state.advisor.model(),
        "endpoints": {
            "GET /": "Service information",
            "GET /health": "Health check",
            "POST /api/v1/similarity": "Calculate resume-job similarity",
            "POST /api/v1/keywords": "Extract keywords from text",
            "POST /api/v1/advice": "Get AI-powered resume advice",
            "POST /api/v1/analyze": "Similarity and advice in one call",
            "POST /api/v1/analyze/upload": "Analyze an uploaded resume file",
            "POST /api/v1/job-description/fetch": "Fetch a job description from a URL"
        }
    }))
}

/// GET /health
/// Reports the configured backends and whether the model server answers.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let llm_available = state.advisor.health_check().await;

    Json(json!({
        "status": "healthy",
        "embedding_provider": state.embedder.name(),
        "text_analyzer": state.extractor.analyzer_name(),
        "llm_available": llm_available,
        "version": env!("CARGO_PKG_VERSION")
    }))
}
