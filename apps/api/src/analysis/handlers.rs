//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::advice::{Advice, AdviceRequest};
use crate::analysis::{
    analyze_match, extract_keywords_blocking, validate_document, SimilarityReport,
};
use crate::documents::extract_document_text;
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SimilarityRequest {
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct AdviceHttpRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
    pub similarity_score: f64,
    #[serde(default)]
    pub shared_keywords: Vec<String>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    pub advice: Advice,
    pub llm_available: bool,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub report: SimilarityReport,
    pub advice: Advice,
    pub llm_available: bool,
}

#[derive(Debug, Serialize)]
pub struct UploadAnalysisResponse {
    pub file_name: String,
    pub resume_characters: usize,
    #[serde(flatten)]
    pub report: SimilarityReport,
}

#[derive(Debug, Deserialize)]
pub struct FetchJobRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct FetchJobResponse {
    pub url: String,
    pub job_description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/similarity
///
/// Embedding similarity plus ranked shared/missing keywords.
pub async fn handle_similarity(
    State(state): State<AppState>,
    Json(request): Json<SimilarityRequest>,
) -> Result<Json<SimilarityReport>, AppError> {
    let resume = validate_document("resume_text", &request.resume_text)?;
    let job = validate_document("job_description", &request.job_description)?;

    let report = analyze_match(
        &state.extractor,
        &state.reconciler,
        state.embedder.as_ref(),
        resume,
        job,
    )
    .await?;

    Ok(Json(report))
}

/// POST /api/v1/keywords
///
/// Keyword set of a single text, alphabetical. Empty text yields no keywords.
pub async fn handle_keywords(
    State(state): State<AppState>,
    Json(request): Json<KeywordsRequest>,
) -> Result<Json<KeywordsResponse>, AppError> {
    let keywords: Vec<String> = extract_keywords_blocking(&state.extractor, &request.text)
        .await?
        .into_iter()
        .collect();

    Ok(Json(KeywordsResponse {
        total: keywords.len(),
        keywords,
    }))
}

/// POST /api/v1/advice
///
/// Advice for an existing similarity result. Falls back to rule-based advice
/// when the model is unavailable; `llm_available` tells the caller which.
pub async fn handle_advice(
    State(state): State<AppState>,
    Json(request): Json<AdviceHttpRequest>,
) -> Result<Json<AdviceResponse>, AppError> {
    if !(0.0..=1.0).contains(&request.similarity_score) {
        return Err(AppError::Validation(
            "similarity_score must be between 0 and 1".to_string(),
        ));
    }

    info!(
        "Generating advice for resume {} chars, job {} chars",
        request.resume_text.len(),
        request.job_description.len()
    );

    let (advice, llm_available) = tokio::join!(
        state.advisor.generate_advice(AdviceRequest {
            similarity_score: request.similarity_score,
            shared_keywords: &request.shared_keywords,
            missing_keywords: &request.missing_keywords,
        }),
        state.advisor.health_check(),
    );

    Ok(Json(AdviceResponse {
        advice,
        llm_available,
    }))
}

/// POST /api/v1/analyze
///
/// Similarity and advice in one round trip.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<SimilarityRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let resume = validate_document("resume_text", &request.resume_text)?;
    let job = validate_document("job_description", &request.job_description)?;

    let report = analyze_match(
        &state.extractor,
        &state.reconciler,
        state.embedder.as_ref(),
        resume,
        job,
    )
    .await?;

    let (advice, llm_available) = tokio::join!(
        state.advisor.generate_advice(AdviceRequest {
            similarity_score: report.similarity_score,
            shared_keywords: &report.shared_keywords,
            missing_keywords: &report.missing_keywords,
        }),
        state.advisor.health_check(),
    );

    Ok(Json(AnalyzeResponse {
        report,
        advice,
        llm_available,
    }))
}

/// POST /api/v1/analyze/upload
///
/// Multipart form: `resume` (file: .pdf, .txt, .md) and `job_description` (text).
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadAnalysisResponse>, AppError> {
    let mut resume: Option<(String, Bytes)> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                resume = Some((file_name, field.bytes().await?));
            }
            "job_description" => {
                job_description = Some(field.text().await?);
            }
            _ => {}
        }
    }

    let (file_name, bytes) =
        resume.ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;
    let job_description = job_description
        .ok_or_else(|| AppError::Validation("job_description is required".to_string()))?;

    if bytes.is_empty() {
        return Err(AppError::Validation("resume file is empty".to_string()));
    }
    let job = validate_document("job_description", &job_description)?;

    info!("Processing uploaded resume {file_name} ({} bytes)", bytes.len());
    let resume_text = extract_document_text(&file_name, bytes).await?;
    let resume = validate_document("resume", &resume_text)?;

    let report = analyze_match(
        &state.extractor,
        &state.reconciler,
        state.embedder.as_ref(),
        resume,
        job,
    )
    .await?;

    Ok(Json(UploadAnalysisResponse {
        resume_characters: resume.chars().count(),
        file_name,
        report,
    }))
}

/// POST /api/v1/job-description/fetch
///
/// Scrapes a job description from a public job posting page.
pub async fn handle_fetch_job_description(
    State(state): State<AppState>,
    Json(request): Json<FetchJobRequest>,
) -> Result<Json<FetchJobResponse>, AppError> {
    if request.url.trim().is_empty() {
        return Err(AppError::Validation("url cannot be empty".to_string()));
    }

    let job_description = state.job_fetcher.fetch_job_description(&request.url).await?;

    Ok(Json(FetchJobResponse {
        url: request.url.trim().to_string(),
        job_description,
    }))
}
