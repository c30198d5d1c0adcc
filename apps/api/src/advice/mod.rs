//! Advice Generation: turns a similarity report into actionable resume advice.
//!
//! The model is asked for a fixed JSON shape. Anything short of that (server
//! down, malformed JSON, missing fields) degrades to rule-based fallback
//! advice, so this module never fails a request.

pub mod prompts;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{strip_json_fences, GenerateOptions, LlmClient};

use self::prompts::*;

const REQUIRED_FIELDS: &[&str] = &[
    "skills_to_add",
    "skills_to_emphasize",
    "resume_structure",
    "content_optimization",
    "keyword_strategy",
    "overall_priority",
];

/// Keywords carried into fallback advice.
const FALLBACK_KEYWORD_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    pub skills_to_add: Vec<String>,
    pub skills_to_emphasize: Vec<String>,
    pub resume_structure: Vec<String>,
    pub content_optimization: Vec<String>,
    pub keyword_strategy: String,
    pub overall_priority: Vec<String>,
}

/// Inputs to advice generation, borrowed from a similarity report.
#[derive(Debug, Clone, Copy)]
pub struct AdviceRequest<'a> {
    pub similarity_score: f64,
    pub shared_keywords: &'a [String],
    pub missing_keywords: &'a [String],
}

#[derive(Clone)]
pub struct AdviceService {
    llm: LlmClient,
    model: String,
    options: GenerateOptions,
}

impl AdviceService {
    pub fn new(llm: LlmClient, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
            options: GenerateOptions::default(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Model advice, or fallback advice when the model cannot deliver.
    pub async fn generate_advice(&self, request: AdviceRequest<'_>) -> Advice {
        let prompt = build_advice_prompt(&request);

        info!("Generating advice with model {}", self.model);
        let raw = match self
            .llm
            .generate(&self.model, &prompt, JSON_ONLY_SYSTEM, &self.options, true)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Advice generation failed, using fallback advice: {e}");
                return fallback_advice(request.missing_keywords, request.shared_keywords);
            }
        };

        debug!("Generated advice length: {} chars", raw.len());

        parse_advice(&raw).unwrap_or_else(|| {
            warn!("Model advice was unusable, using fallback advice");
            fallback_advice(request.missing_keywords, request.shared_keywords)
        })
    }

    /// True when the model server answers the tag listing.
    pub async fn health_check(&self) -> bool {
        match self.llm.list_models().await {
            Ok(models) => {
                debug!("Model server reachable, {} models installed", models.len());
                true
            }
            Err(e) => {
                debug!("Model server health check failed: {e}");
                false
            }
        }
    }
}

pub fn build_advice_prompt(request: &AdviceRequest<'_>) -> String {
    ADVICE_PROMPT_TEMPLATE
        .replace("{score}", &format!("{:.1}%", request.similarity_score * 100.0))
        .replace("{missing}", &join_or_none(request.missing_keywords))
        .replace("{shared}", &join_or_none(request.shared_keywords))
}

fn join_or_none(keywords: &[String]) -> String {
    if keywords.is_empty() {
        return "None".to_string();
    }
    keywords
        .iter()
        .take(PROMPT_KEYWORD_LIMIT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parses model output into `Advice`.
///
/// Valid JSON missing any required field is rejected. Text that is not JSON
/// gets one more try on its outermost `{...}` slice.
pub fn parse_advice(raw: &str) -> Option<Advice> {
    let text = strip_json_fences(raw);

    let value = match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(e) => {
            warn!("Advice is not valid JSON ({e}), trying embedded object");
            let start = text.find('{')?;
            let end = text.rfind('}')?;
            if end <= start {
                return None;
            }
            serde_json::from_str::<Value>(&text[start..=end]).ok()?
        }
    };

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| value.get(field).is_none())
        .collect();
    if !missing.is_empty() {
        warn!("Advice is missing fields: {missing:?}");
        return None;
    }

    match serde_json::from_value::<Advice>(value) {
        Ok(advice) => Some(advice),
        Err(e) => {
            warn!("Advice fields have unexpected types: {e}");
            None
        }
    }
}

/// Rule-based advice built from the keyword lists alone.
pub fn fallback_advice(missing_keywords: &[String], shared_keywords: &[String]) -> Advice {
    Advice {
        skills_to_add: leading_or(missing_keywords, FALLBACK_SKILLS_TO_ADD),
        skills_to_emphasize: leading_or(shared_keywords, FALLBACK_SKILLS_TO_EMPHASIZE),
        resume_structure: to_owned(FALLBACK_RESUME_STRUCTURE),
        content_optimization: to_owned(FALLBACK_CONTENT_OPTIMIZATION),
        keyword_strategy: FALLBACK_KEYWORD_STRATEGY.to_string(),
        overall_priority: to_owned(FALLBACK_OVERALL_PRIORITY),
    }
}

fn leading_or(keywords: &[String], hint: &str) -> Vec<String> {
    if keywords.is_empty() {
        vec![hint.to_string()]
    } else {
        keywords.iter().take(FALLBACK_KEYWORD_LIMIT).cloned().collect()
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
