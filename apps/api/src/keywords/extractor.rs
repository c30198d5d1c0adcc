//! Keyword Extractor: turns a free-form document into a set of skill keywords.
//!
//! Pipeline:
//! 1. clean the text (keep letters, digits, whitespace, `+ # . -`)
//! 2. detect catalog phrases on the lower-cased text (`machine_learning`)
//! 3. tokenize with the injected analyzer, falling back to the regex split
//! 4. drop numeric, too-short and letterless tokens
//! 5. accept curated dictionary hits unconditionally
//! 6. accept technology-shaped tokens that are not filler or stop words
//! 7. subtract filler/stop words according to the `FilterPolicy`
//! 8. add the phrase keywords
//!
//! Extraction never fails: analyzer errors degrade to the regex path and, if
//! that fails too, to an empty set.

use std::str::FromStr;
use std::sync::Arc;

use regex::Regex;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::keywords::analyzer::{AnalyzerError, RegexAnalyzer, TextAnalyzer};
use crate::keywords::dictionary::SkillDictionary;
use crate::keywords::patterns::{
    clean_text, has_alphabetic, has_technical_pattern, is_number_like,
};
use crate::keywords::{KeywordLimits, KeywordSet};

/// Whether exact dictionary hits survive the final filler/stop-word subtraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterPolicy {
    /// Dictionary hits are kept even if the word is also listed as filler.
    #[default]
    WhitelistImmune,
    /// Every accepted keyword is filtered, dictionary hits included.
    Strict,
}

#[derive(Debug, Error)]
#[error("unknown filter policy '{0}' (expected 'whitelist' or 'strict')")]
pub struct UnknownFilterPolicy(String);

impl FromStr for FilterPolicy {
    type Err = UnknownFilterPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "whitelist" | "whitelist-immune" => Ok(FilterPolicy::WhitelistImmune),
            "strict" => Ok(FilterPolicy::Strict),
            other => Err(UnknownFilterPolicy(other.to_string())),
        }
    }
}

/// A single token as seen by the classifier. Lives only for one extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRecord {
    pub raw: String,
    pub normalized: String,
    pub is_number_like: bool,
    pub has_technical_pattern: bool,
}

impl TokenRecord {
    /// A token whose lemma loses its technology shape keeps the lower-cased
    /// raw form instead (`expressjs` must not become `expressj`).
    fn new(raw: &str, analyzer: &dyn TextAnalyzer, dictionary: &SkillDictionary) -> Self {
        let lower = raw.to_lowercase();
        let lemma = analyzer.lemmatize(&lower);

        let (normalized, technical) = if has_technical_pattern(&lemma, raw, dictionary) {
            (lemma, true)
        } else if lemma != lower && has_technical_pattern(&lower, raw, dictionary) {
            (lower.clone(), true)
        } else {
            (lemma, false)
        };

        Self {
            is_number_like: is_number_like(&lower),
            has_technical_pattern: technical,
            raw: raw.to_string(),
            normalized,
        }
    }
}

#[derive(Debug, PartialEq)]
enum Acceptance {
    Dictionary(String),
    Pattern(String),
}

pub struct KeywordExtractor {
    dictionary: Arc<SkillDictionary>,
    analyzer: Arc<dyn TextAnalyzer>,
    fallback: RegexAnalyzer,
    phrase_matchers: Vec<(Regex, String)>,
    min_keyword_length: usize,
    filter_policy: FilterPolicy,
}

impl KeywordExtractor {
    pub fn new(
        dictionary: Arc<SkillDictionary>,
        analyzer: Arc<dyn TextAnalyzer>,
        limits: &KeywordLimits,
    ) -> Result<Self, regex::Error> {
        let phrase_matchers = dictionary
            .phrases()
            .iter()
            .map(|phrase| compile_phrase(phrase))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            dictionary,
            analyzer,
            fallback: RegexAnalyzer,
            phrase_matchers,
            min_keyword_length: limits.min_keyword_length,
            filter_policy: FilterPolicy::default(),
        })
    }

    pub fn with_filter_policy(mut self, filter_policy: FilterPolicy) -> Self {
        self.filter_policy = filter_policy;
        self
    }

    pub fn analyzer_name(&self) -> &'static str {
        self.analyzer.name()
    }

    /// Extracts the keyword set of `text`. Empty input yields an empty set.
    pub fn extract_keywords(&self, text: &str) -> KeywordSet {
        if text.trim().is_empty() {
            return KeywordSet::new();
        }

        match self.try_extract(text) {
            Ok(keywords) => {
                debug!(
                    "Extracted {} keywords from {} chars",
                    keywords.len(),
                    text.len()
                );
                keywords
            }
            Err(e) => {
                error!("Keyword extraction failed, returning no keywords: {e}");
                KeywordSet::new()
            }
        }
    }

    fn try_extract(&self, text: &str) -> Result<KeywordSet, AnalyzerError> {
        let cleaned = clean_text(text);
        let phrases = self.detect_phrases(&cleaned.to_lowercase());

        let (analyzer, tokens): (&dyn TextAnalyzer, Vec<String>) =
            match self.analyzer.tokenize(&cleaned) {
                Ok(tokens) => (self.analyzer.as_ref(), tokens),
                Err(e) => {
                    warn!(
                        "{} tokenization failed, falling back to regex split: {e}",
                        self.analyzer.name()
                    );
                    (&self.fallback, self.fallback.tokenize(&cleaned)?)
                }
            };

        let mut dictionary_hits = KeywordSet::new();
        let mut pattern_hits = KeywordSet::new();

        for raw in &tokens {
            match self.classify(raw, analyzer) {
                Some(Acceptance::Dictionary(word)) => {
                    dictionary_hits.insert(word);
                }
                Some(Acceptance::Pattern(word)) => {
                    pattern_hits.insert(word);
                }
                None => {}
            }
        }

        let mut keywords: KeywordSet = pattern_hits
            .into_iter()
            .filter(|word| !dictionary_hits.contains(word) && !self.dictionary.is_excluded(word))
            .collect();

        match self.filter_policy {
            FilterPolicy::WhitelistImmune => keywords.extend(dictionary_hits),
            FilterPolicy::Strict => keywords.extend(
                dictionary_hits
                    .into_iter()
                    .filter(|word| !self.dictionary.is_excluded(word)),
            ),
        }

        keywords.extend(phrases);
        Ok(keywords)
    }

    fn classify(&self, raw: &str, analyzer: &dyn TextAnalyzer) -> Option<Acceptance> {
        let lower = raw.to_lowercase();
        if let Some(entry) = self.dictionary.curated_form(&lower) {
            return Some(Acceptance::Dictionary(entry));
        }

        let record = TokenRecord::new(raw, analyzer, &self.dictionary);
        if record.is_number_like
            || lower.chars().count() <= self.min_keyword_length
            || !has_alphabetic(&lower)
        {
            return None;
        }

        if let Some(entry) = self.dictionary.curated_form(&record.normalized) {
            return Some(Acceptance::Dictionary(entry));
        }

        if self.dictionary.is_excluded(&record.normalized) || self.dictionary.is_excluded(&lower)
        {
            return None;
        }

        record
            .has_technical_pattern
            .then_some(Acceptance::Pattern(record.normalized))
    }

    fn detect_phrases(&self, normalized: &str) -> KeywordSet {
        self.phrase_matchers
            .iter()
            .filter(|(re, _)| re.is_match(normalized))
            .map(|(_, keyword)| keyword.clone())
            .collect()
    }
}

/// `full stack` matches "full stack", "full-stack" and "full  stack" on word
/// boundaries and yields the keyword `full_stack`.
fn compile_phrase(phrase: &str) -> Result<(Regex, String), regex::Error> {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    let pattern = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join(r"[\s\-]+");
    let re = Regex::new(&format!(r"\b{pattern}\b"))?;
    Ok((re, words.join("_")))
}
