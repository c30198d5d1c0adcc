//! Semantic Similarity: pluggable embedding backend plus cosine scoring.
//!
//! `AppState` holds an `Arc<dyn EmbeddingProvider>`. The default backend is
//! `OllamaEmbeddingProvider`; tests inject a deterministic fake.

use async_trait::async_trait;

use crate::llm_client::{LlmClient, LlmError};

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Backend label reported by `/health`.
    fn name(&self) -> &str;

    /// Embeds both texts with the same model so the vectors are comparable.
    async fn embed_pair(&self, first: &str, second: &str)
        -> Result<(Vec<f32>, Vec<f32>), LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// OllamaEmbeddingProvider
// ────────────────────────────────────────────────────────────────────────────

pub struct OllamaEmbeddingProvider {
    llm: LlmClient,
    model: String,
    label: String,
}

impl OllamaEmbeddingProvider {
    pub fn new(llm: LlmClient, model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            label: format!("ollama:{model}"),
            llm,
            model,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingProvider {
    fn name(&self) -> &str {
        &self.label
    }

    async fn embed_pair(
        &self,
        first: &str,
        second: &str,
    ) -> Result<(Vec<f32>, Vec<f32>), LlmError> {
        tokio::try_join!(
            self.llm.embeddings(&self.model, first),
            self.llm.embeddings(&self.model, second),
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Cosine similarity of two vectors, clamped to `[0, 1]`.
/// Mismatched lengths and zero-norm vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0)
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Deterministic provider: a bag-of-letters vector per text.
    pub struct LetterCountEmbedder;

    fn letters(text: &str) -> Vec<f32> {
        let mut counts = vec![0.0f32; 26];
        for c in text.chars().filter(|c| c.is_ascii_alphabetic()) {
            counts[(c.to_ascii_lowercase() as u8 - b'a') as usize] += 1.0;
        }
        counts
    }

    #[async_trait]
    impl EmbeddingProvider for LetterCountEmbedder {
        fn name(&self) -> &str {
            "letter-count"
        }

        async fn embed_pair(
            &self,
            first: &str,
            second: &str,
        ) -> Result<(Vec<f32>, Vec<f32>), LlmError> {
            Ok((letters(first), letters(second)))
        }
    }

    /// Provider that always fails, standing in for an unreachable model server.
    pub struct UnavailableEmbedder;

    #[async_trait]
    impl EmbeddingProvider for UnavailableEmbedder {
        fn name(&self) -> &str {
            "unavailable"
        }

        async fn embed_pair(&self, _: &str, _: &str) -> Result<(Vec<f32>, Vec<f32>), LlmError> {
            Err(LlmError::RetriesExhausted { retries: 1 })
        }
    }
}
