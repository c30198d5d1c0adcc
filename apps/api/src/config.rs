use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::keywords::analyzer::AnalyzerKind;
use crate::keywords::extractor::FilterPolicy;
use crate::keywords::KeywordLimits;

/// Application configuration loaded from environment variables.
/// Every value has a default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub cors_origins: Vec<String>,
    pub ollama_url: String,
    pub embedding_model: String,
    pub advice_model: String,
    pub llm_timeout: Duration,
    pub text_analyzer: AnalyzerKind,
    pub filter_policy: FilterPolicy,
    pub keyword_limits: KeywordLimits,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            rust_log: "info".to_string(),
            cors_origins: parse_origins("http://localhost:3000,http://localhost:3001"),
            ollama_url: "http://localhost:11434".to_string(),
            embedding_model: "all-minilm".to_string(),
            advice_model: "qwen2.5:3b-instruct-q4_K_M".to_string(),
            llm_timeout: Duration::from_secs(120),
            text_analyzer: AnalyzerKind::default(),
            filter_policy: FilterPolicy::default(),
            keyword_limits: KeywordLimits::default(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let limits = defaults.keyword_limits;

        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or(defaults.cors_origins),
            ollama_url: std::env::var("OLLAMA_URL").unwrap_or(defaults.ollama_url),
            embedding_model: std::env::var("EMBEDDING_MODEL").unwrap_or(defaults.embedding_model),
            advice_model: std::env::var("ADVICE_MODEL").unwrap_or(defaults.advice_model),
            llm_timeout: Duration::from_secs(parse_env(
                "LLM_TIMEOUT_SECS",
                defaults.llm_timeout.as_secs(),
            )?),
            text_analyzer: parse_env("TEXT_ANALYZER", defaults.text_analyzer)?,
            filter_policy: parse_env("KEYWORD_FILTER_POLICY", defaults.filter_policy)?,
            keyword_limits: KeywordLimits {
                min_keyword_length: parse_env("MIN_KEYWORD_LENGTH", limits.min_keyword_length)?,
                max_shared_keywords: parse_env("MAX_SHARED_KEYWORDS", limits.max_shared_keywords)?,
                max_missing_keywords: parse_env(
                    "MAX_MISSING_KEYWORDS",
                    limits.max_missing_keywords,
                )?,
            },
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
        })
    }
}

/// Reads and parses `key`, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|o| o.trim_end_matches('/').to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_trims_and_skips_blanks() {
        assert_eq!(
            parse_origins(" http://a.test/ , ,http://b.test"),
            vec!["http://a.test", "http://b.test"]
        );
    }

    #[test]
    fn test_defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.keyword_limits.max_shared_keywords, 15);
        assert_eq!(config.keyword_limits.max_missing_keywords, 12);
        assert_eq!(config.text_analyzer, AnalyzerKind::Linguistic);
        assert_eq!(config.filter_policy, FilterPolicy::WhitelistImmune);
        assert_eq!(config.max_upload_bytes, 10_485_760);
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u16 = parse_env("ATS_API_TEST_SURELY_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }
}
