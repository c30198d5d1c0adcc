//! Character-level heuristics shared by the extractor: text cleanup, numeric
//! detection and the "looks like a technology" rules.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::keywords::dictionary::SkillDictionary;

/// Anything that is not a letter, digit, whitespace or one of `+ # . -`.
static NON_KEYWORD_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\s+#.\-]").expect("static regex is valid"));

static NUMBER_LIKE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^[\d,.$€£¥%]+$",           // formatted numbers
        r"^[$€£¥]\d[\d,.]*[kKmMbB]?$", // currency-prefixed amounts
        r"^\d+[kKmMbB]$",            // salary abbreviations
        r"^\d+[-/]\d+$",             // ranges and fractions
        r"^\d{4}$",                  // years
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static regex is valid"))
    .collect()
});

/// `python3`, `vue2`
static VERSIONED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-z]+)\d+$").expect("static regex is valid"));

static ROMAN_NUMERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[IVXLCDM]+$").expect("static regex is valid"));

const TECH_SUFFIXES: &[&str] = &["js", "sql", "db", "py", "rb", "go", "rs", "ts"];

/// Replaces disallowed characters with spaces and collapses whitespace.
/// Case is preserved so acronym detection can still see it.
pub fn clean_text(text: &str) -> String {
    let replaced = NON_KEYWORD_CHARS.replace_all(text, " ");
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes `. - + #` (`node.js` → `nodejs`, `c++` → `c`).
pub fn strip_symbols(word: &str) -> String {
    word.chars()
        .filter(|c| !matches!(c, '.' | '-' | '+' | '#'))
        .collect()
}

pub fn has_alphabetic(word: &str) -> bool {
    word.chars().any(char::is_alphabetic)
}

/// Pure numbers, amounts, salary shorthands, ranges and years.
pub fn is_number_like(word: &str) -> bool {
    if !word.is_empty() && word.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }
    NUMBER_LIKE.iter().any(|re| re.is_match(word))
}

pub fn is_roman_numeral(word: &str) -> bool {
    ROMAN_NUMERAL.is_match(word)
}

/// At least one letter and no lower-case letters.
pub fn is_all_caps(word: &str) -> bool {
    has_alphabetic(word) && !word.chars().any(char::is_lowercase)
}

/// Technology-shaped tokens that are not in the dictionary.
///
/// `word` is the lower-cased (possibly lemmatized) form; `raw` keeps the
/// original casing for acronym detection.
pub fn has_technical_pattern(word: &str, raw: &str, dictionary: &SkillDictionary) -> bool {
    if word.chars().count() < 3 || !has_alphabetic(word) {
        return false;
    }

    if word.contains('+') || word.contains('#') {
        return true;
    }

    if TECH_SUFFIXES.iter().any(|suffix| word.ends_with(suffix)) {
        return true;
    }

    if word.starts_with("api") {
        return true;
    }

    if let Some(caps) = VERSIONED.captures(word) {
        if dictionary.is_technical_term(&caps[1]) {
            return true;
        }
    }

    raw.chars().count() >= 3 && is_all_caps(raw) && !is_roman_numeral(raw)
}
