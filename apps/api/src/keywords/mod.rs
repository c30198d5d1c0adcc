// Keyword engine: extraction of skill keywords from free text and
// reconciliation of a resume's keywords against a job posting's.
// Pure functions over a read-only `SkillDictionary`; safe to share across requests.

pub mod analyzer;
pub mod dictionary;
pub mod extractor;
pub mod lemmatizer;
pub mod patterns;
pub mod reconciler;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Lower-case, de-duplicated keywords. Iteration order is alphabetical.
pub type KeywordSet = BTreeSet<String>;

/// Size limits shared by the extractor and the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordLimits {
    /// Tokens must be longer than this unless they are curated terms.
    pub min_keyword_length: usize,
    pub max_shared_keywords: usize,
    pub max_missing_keywords: usize,
}

impl Default for KeywordLimits {
    fn default() -> Self {
        Self {
            min_keyword_length: 3,
            max_shared_keywords: 15,
            max_missing_keywords: 12,
        }
    }
}
