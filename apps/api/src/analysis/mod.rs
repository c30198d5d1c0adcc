//! Match Analysis: the resume/job pipeline behind the HTTP handlers.
//!
//! embed (async, model server) ‖ extract resume ‖ extract job (blocking pool)
//! → reconcile → report.

pub mod handlers;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::keywords::extractor::KeywordExtractor;
use crate::keywords::reconciler::KeywordReconciler;
use crate::keywords::KeywordSet;
use crate::similarity::{cosine_similarity, EmbeddingProvider};

/// Both documents must carry at least this many characters after trimming.
pub const MIN_DOCUMENT_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchMetadata {
    pub total_resume_keywords: usize,
    pub total_job_keywords: usize,
    /// Share of the job's keywords found in the resume, in percent, 2 decimals.
    pub match_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityReport {
    pub similarity_score: f64,
    pub shared_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub metadata: MatchMetadata,
}

/// Rejects documents that are too short to analyze.
pub fn validate_document<'a>(field: &str, text: &'a str) -> Result<&'a str, AppError> {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_DOCUMENT_CHARS {
        return Err(AppError::Validation(format!(
            "{field} must be at least {MIN_DOCUMENT_CHARS} characters"
        )));
    }
    Ok(trimmed)
}

/// Extracts keywords on the blocking pool; the extractor is CPU-bound.
pub async fn extract_keywords_blocking(
    extractor: &Arc<KeywordExtractor>,
    text: &str,
) -> Result<KeywordSet, AppError> {
    let extractor = Arc::clone(extractor);
    let text = text.to_string();
    tokio::task::spawn_blocking(move || extractor.extract_keywords(&text))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("keyword extraction task failed: {e}")))
}

/// Full similarity analysis of one resume against one job description.
/// Inputs must already be validated.
pub async fn analyze_match(
    extractor: &Arc<KeywordExtractor>,
    reconciler: &KeywordReconciler,
    embedder: &dyn EmbeddingProvider,
    resume_text: &str,
    job_text: &str,
) -> Result<SimilarityReport, AppError> {
    info!(
        "Processing similarity: resume {} chars, job {} chars",
        resume_text.len(),
        job_text.len()
    );

    let (embeddings, resume_keywords, job_keywords) = tokio::join!(
        embedder.embed_pair(resume_text, job_text),
        extract_keywords_blocking(extractor, resume_text),
        extract_keywords_blocking(extractor, job_text),
    );
    let (resume_vec, job_vec) = embeddings.map_err(AppError::Embedding)?;
    let (resume_keywords, job_keywords) = (resume_keywords?, job_keywords?);

    let similarity_score = cosine_similarity(&resume_vec, &job_vec);
    let matched = reconciler.reconcile_keywords(&resume_keywords, &job_keywords);

    info!(
        "Similarity: {:.4}, shared: {}, missing: {}",
        similarity_score,
        matched.shared.len(),
        matched.missing.len()
    );

    Ok(SimilarityReport {
        similarity_score,
        metadata: MatchMetadata {
            total_resume_keywords: resume_keywords.len(),
            total_job_keywords: job_keywords.len(),
            match_percentage: match_percentage(matched.shared_total, job_keywords.len()),
        },
        shared_keywords: matched.shared,
        missing_keywords: matched.missing,
    })
}

/// `100 * shared / job`, rounded to two decimals; 0 when the job has no keywords.
pub fn match_percentage(shared_total: usize, job_total: usize) -> f64 {
    if job_total == 0 {
        return 0.0;
    }
    let pct = shared_total as f64 / job_total as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}
