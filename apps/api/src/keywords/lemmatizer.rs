//! Suffix-rule English noun lemmatizer.
//!
//! Reduces plural nouns to their singular base form (`apis` → `api`,
//! `technologies` → `technology`). Only lower-case ASCII words longer than
//! three characters are touched; everything else passes through unchanged.

/// Irregular plurals and plurals the suffix rules would mangle.
const IRREGULAR: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("caches", "cache"),
    ("children", "child"),
    ("criteria", "criterion"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("men", "man"),
    ("vertices", "vertex"),
    ("women", "woman"),
];

/// Words ending in `s` that are already base forms.
const INVARIANT: &[&str] = &[
    "aws", "business", "devops", "ios", "jenkins", "kubernetes", "macos", "news", "pandas",
    "postgres", "redis", "series", "species",
];

/// Singular endings that look like plurals. `js` covers `expressjs`, `nestjs`.
/// Only `sis`/`xis` are guarded so short `-is` plurals (`apis`) still reduce.
const SINGULAR_ENDINGS: &[&str] = &["ss", "us", "sis", "xis", "ics", "js"];

#[derive(Debug, Clone, Copy, Default)]
pub struct NounLemmatizer;

impl NounLemmatizer {
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some((_, base)) = IRREGULAR.iter().find(|(plural, _)| *plural == word) {
            return (*base).to_string();
        }

        if word.len() <= 3 || !word.chars().all(|c| c.is_ascii_lowercase()) {
            return word.to_string();
        }

        if INVARIANT.contains(&word) || SINGULAR_ENDINGS.iter().any(|s| word.ends_with(s)) {
            return word.to_string();
        }

        if let Some(stem) = word.strip_suffix("ies") {
            if stem.len() >= 2 {
                return format!("{stem}y");
            }
            return word.to_string();
        }

        for suffix in ["sses", "xes", "ches", "shes"] {
            if word.ends_with(suffix) {
                return word[..word.len() - 2].to_string();
            }
        }

        match word.strip_suffix('s') {
            Some(stem) => stem.to_string(),
            None => word.to_string(),
        }
    }
}
