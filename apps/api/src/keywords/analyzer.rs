//! Text analyzers: the tokenize/lemmatize capability behind keyword extraction.
//!
//! Two backends:
//! - `LinguisticAnalyzer`: Unicode word segmentation plus noun lemmatization.
//! - `RegexAnalyzer`: a plain `[a-zA-Z0-9+#.-]+` split with no lemmatization.
//!
//! One is selected at startup (`TEXT_ANALYZER`) and injected into the
//! extractor, which always keeps a `RegexAnalyzer` as its fallback.

use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

use crate::keywords::lemmatizer::NounLemmatizer;

/// Inputs beyond this size are left to the regex fallback.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 200_000;

static REGEX_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9+#.\-]+").expect("static regex is valid"));

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("input of {len} characters exceeds the {limit} character limit")]
    InputTooLarge { len: usize, limit: usize },
}

/// Tokenize + lemmatize capability.
pub trait TextAnalyzer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Splits cleaned text into word tokens, preserving case.
    fn tokenize(&self, text: &str) -> Result<Vec<String>, AnalyzerError>;

    /// Base form of a lower-cased token.
    fn lemmatize(&self, token: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalyzerKind {
    #[default]
    Linguistic,
    Regex,
}

#[derive(Debug, Error)]
#[error("unknown text analyzer '{0}' (expected 'linguistic' or 'regex')")]
pub struct UnknownAnalyzer(String);

impl FromStr for AnalyzerKind {
    type Err = UnknownAnalyzer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linguistic" => Ok(AnalyzerKind::Linguistic),
            "regex" => Ok(AnalyzerKind::Regex),
            other => Err(UnknownAnalyzer(other.to_string())),
        }
    }
}

pub fn build_analyzer(kind: AnalyzerKind) -> Arc<dyn TextAnalyzer> {
    match kind {
        AnalyzerKind::Linguistic => Arc::new(LinguisticAnalyzer::default()),
        AnalyzerKind::Regex => Arc::new(RegexAnalyzer),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LinguisticAnalyzer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct LinguisticAnalyzer {
    max_input_chars: usize,
    lemmatizer: NounLemmatizer,
}

impl LinguisticAnalyzer {
    pub fn with_max_input_chars(max_input_chars: usize) -> Self {
        Self {
            max_input_chars,
            lemmatizer: NounLemmatizer,
        }
    }
}

impl Default for LinguisticAnalyzer {
    fn default() -> Self {
        Self::with_max_input_chars(DEFAULT_MAX_INPUT_CHARS)
    }
}

impl TextAnalyzer for LinguisticAnalyzer {
    fn name(&self) -> &'static str {
        "linguistic"
    }

    /// Word-boundary segmentation (UAX #29) that glues technical tokens back
    /// together: `c++`, `c#`, `scikit-learn`. A `.` or `-` only survives when a
    /// word follows it, so sentence punctuation is dropped.
    fn tokenize(&self, text: &str) -> Result<Vec<String>, AnalyzerError> {
        let len = text.chars().count();
        if len > self.max_input_chars {
            return Err(AnalyzerError::InputTooLarge {
                len,
                limit: self.max_input_chars,
            });
        }

        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut joiner: Option<char> = None;

        for segment in text.split_word_bounds() {
            if segment.chars().any(char::is_alphanumeric) {
                if let Some(c) = joiner.take() {
                    current.push(c);
                }
                current.push_str(segment);
                continue;
            }

            match segment {
                "+" | "#" if !current.is_empty() => {
                    joiner = None;
                    current.push_str(segment);
                }
                "." | "-" if !current.is_empty() && joiner.is_none() => {
                    joiner = segment.chars().next();
                }
                _ => {
                    joiner = None;
                    if !current.is_empty() {
                        tokens.push(std::mem::take(&mut current));
                    }
                }
            }
        }

        if !current.is_empty() {
            tokens.push(current);
        }

        Ok(tokens)
    }

    fn lemmatize(&self, token: &str) -> String {
        self.lemmatizer.lemmatize(token)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// RegexAnalyzer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct RegexAnalyzer;

impl TextAnalyzer for RegexAnalyzer {
    fn name(&self) -> &'static str {
        "regex"
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>, AnalyzerError> {
        Ok(REGEX_TOKEN
            .find_iter(text)
            .map(|m| {
                m.as_str()
                    .trim_matches(|c: char| c == '.' || c == '-')
                    .trim_start_matches(|c: char| c == '+' || c == '#')
            })
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn lemmatize(&self, token: &str) -> String {
        token.to_string()
    }
}
