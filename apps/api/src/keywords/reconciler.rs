//! Keyword Reconciler: compares resume and job keyword sets.
//!
//! `shared = resume ∩ job`, `missing = job − resume`. Both lists are ranked
//! technical-first, then alphabetically (case-insensitive), and truncated to
//! the configured limits after ranking.

use serde::{Deserialize, Serialize};

use crate::keywords::patterns::is_all_caps;
use crate::keywords::{KeywordLimits, KeywordSet};

/// Substrings that mark a keyword as technical for ranking purposes.
const TECH_INDICATORS: &[&str] = &[
    "java", "python", "javascript", "react", "aws", "docker",
    "kubernetes", "sql", "api", "framework", "database",
];

/// Ranked, truncated comparison of two keyword sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub shared: Vec<String>,
    pub missing: Vec<String>,
    /// |resume ∩ job| before truncation
    pub shared_total: usize,
    /// |job − resume| before truncation
    pub missing_total: usize,
}

/// A keyword with its ranking tier. Only exists while sorting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedKeyword<'a> {
    pub keyword: &'a str,
    pub is_technical: bool,
}

impl<'a> RankedKeyword<'a> {
    pub fn new(keyword: &'a str) -> Self {
        Self {
            keyword,
            is_technical: is_technical_keyword(keyword),
        }
    }

    /// Technical tier first, then case-insensitive alphabetical, then the raw
    /// string so ordering is total.
    fn sort_key(&self) -> (bool, String, &'a str) {
        (!self.is_technical, self.keyword.to_lowercase(), self.keyword)
    }
}

/// Ranking heuristic. Deliberately looser than the extractor's pattern rules.
pub fn is_technical_keyword(keyword: &str) -> bool {
    let lower = keyword.to_lowercase();

    TECH_INDICATORS.iter().any(|tech| lower.contains(tech))
        || keyword
            .chars()
            .any(|c| c.is_ascii_digit() || c == '+' || c == '#')
        || ["js", "sql", "db"].iter().any(|s| lower.ends_with(s))
        || ((3..=5).contains(&keyword.chars().count()) && is_all_caps(keyword))
}

#[derive(Debug, Clone, Copy)]
pub struct KeywordReconciler {
    max_shared: usize,
    max_missing: usize,
}

impl KeywordReconciler {
    pub fn new(limits: &KeywordLimits) -> Self {
        Self {
            max_shared: limits.max_shared_keywords,
            max_missing: limits.max_missing_keywords,
        }
    }

    pub fn reconcile_keywords(&self, resume: &KeywordSet, job: &KeywordSet) -> KeywordMatch {
        let shared: Vec<&String> = resume.intersection(job).collect();
        let missing: Vec<&String> = job.difference(resume).collect();

        KeywordMatch {
            shared_total: shared.len(),
            missing_total: missing.len(),
            shared: rank(shared, self.max_shared),
            missing: rank(missing, self.max_missing),
        }
    }
}

fn rank(keywords: Vec<&String>, limit: usize) -> Vec<String> {
    let mut ranked: Vec<RankedKeyword<'_>> = keywords
        .into_iter()
        .map(|k| RankedKeyword::new(k.as_str()))
        .collect();
    ranked.sort_by_cached_key(|r| r.sort_key());
    ranked
        .into_iter()
        .take(limit)
        .map(|r| r.keyword.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> KeywordSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn reconciler() -> KeywordReconciler {
        KeywordReconciler::new(&KeywordLimits::default())
    }

    #[test]
    fn test_reference_example() {
        let resume = set(&["python", "sql", "communication"]);
        let job = set(&["python", "docker", "sql", "leadership"]);

        let result = reconciler().reconcile_keywords(&resume, &job);
        assert_eq!(result.shared, vec!["python", "sql"]);
        assert_eq!(result.missing, vec!["docker", "leadership"]);
        assert_eq!(result.shared_total, 2);
        assert_eq!(result.missing_total, 2);
    }

    #[test]
    fn test_technical_tier_sorts_before_alphabetical() {
        let resume = set(&[]);
        let job = set(&["agile", "leadership", "react", "c++", "zookeeper", "mongodb"]);

        let result = reconciler().reconcile_keywords(&resume, &job);
        assert_eq!(
            result.missing,
            vec!["c++", "mongodb", "react", "agile", "leadership", "zookeeper"]
        );
    }

    #[test]
    fn test_empty_inputs_yield_empty_outputs() {
        let result = reconciler().reconcile_keywords(&KeywordSet::new(), &KeywordSet::new());
        assert_eq!(result, KeywordMatch::default());
    }

    #[test]
    fn test_shared_is_truncated_after_ranking() {
        let limits = KeywordLimits {
            max_shared_keywords: 2,
            ..KeywordLimits::default()
        };
        let words = set(&["agile", "scrum", "python", "docker", "mysql"]);

        let result = KeywordReconciler::new(&limits).reconcile_keywords(&words, &words);
        assert_eq!(result.shared, vec!["docker", "mysql"]);
        assert_eq!(result.shared_total, 5);
    }

    #[test]
    fn test_missing_is_truncated_to_limit() {
        let limits = KeywordLimits {
            max_missing_keywords: 1,
            ..KeywordLimits::default()
        };
        let job = set(&["kanban", "terraform", "leadership"]);

        let result = KeywordReconciler::new(&limits).reconcile_keywords(&KeywordSet::new(), &job);
        assert_eq!(result.missing.len(), 1);
        assert_eq!(result.missing_total, 3);
    }

    #[test]
    fn test_shared_subset_of_intersection_and_missing_subset_of_difference() {
        let resume = set(&["rust", "tokio", "axum", "leadership", "sql"]);
        let job = set(&["rust", "sql", "kafka", "grpc", "leadership"]);

        let result = reconciler().reconcile_keywords(&resume, &job);
        for k in &result.shared {
            assert!(resume.contains(k) && job.contains(k));
        }
        for k in &result.missing {
            assert!(job.contains(k) && !resume.contains(k));
        }
        // under the limit, shared equals the full intersection
        let intersection: KeywordSet = resume.intersection(&job).cloned().collect();
        let shared: KeywordSet = result.shared.iter().cloned().collect();
        assert_eq!(shared, intersection);
    }

    #[test]
    fn test_ranking_is_case_insensitive_and_deterministic() {
        let job = set(&["Beta", "alpha", "Gamma"]);
        let first = reconciler().reconcile_keywords(&KeywordSet::new(), &job);
        let second = reconciler().reconcile_keywords(&KeywordSet::new(), &job);
        assert_eq!(first.missing, vec!["alpha", "Beta", "Gamma"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_is_technical_keyword() {
        for kw in ["javascript", "reactjs", "python3", "c#", "nosql", "leveldb", "aws_lambda", "ETL"] {
            assert!(is_technical_keyword(kw), "{kw} should be technical");
        }
        for kw in ["leadership", "communication", "agile", "etl", "MANAGEMENT"] {
            assert!(!is_technical_keyword(kw), "{kw} should not be technical");
        }
    }

    #[test]
    fn test_ranked_keyword_tier() {
        assert!(RankedKeyword::new("docker").is_technical);
        assert!(!RankedKeyword::new("scrum").is_technical);
    }
}
