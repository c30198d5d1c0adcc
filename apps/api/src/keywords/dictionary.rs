//! Skill dictionary: the curated, read-only vocabulary the extractor classifies against.
//!
//! Built once at startup and shared behind an `Arc`. Tests construct their own
//! dictionaries through `SkillDictionary::new` to exercise alternate vocabularies.

use std::collections::HashSet;

use crate::keywords::patterns::strip_symbols;

/// Languages, frameworks, datastores, cloud tooling and engineering practices.
const TECHNICAL_TERMS: &[&str] = &[
    // Programming languages
    "java", "python", "javascript", "typescript", "c++", "c#", "go", "rust", "swift", "kotlin",
    "scala", "ruby", "php", "perl", "r", "matlab", "sql", "html", "css", "bash", "powershell",
    // Frameworks & libraries
    "react", "angular", "vue", "nodejs", "express", "django", "flask", "fastapi", "spring",
    "springboot", "hibernate", "laravel", "rails", "tensorflow", "pytorch", "keras",
    "scikit-learn", "pandas", "numpy", "matplotlib", "jquery", "bootstrap", "tailwind",
    "nextjs", "vuejs", "reactjs", "angularjs",
    // Databases
    "mysql", "postgresql", "mongodb", "redis", "elasticsearch", "cassandra", "dynamodb",
    "oracle", "sqlite", "mariadb", "neo4j", "influxdb", "couchdb", "firestore",
    // Cloud & DevOps
    "aws", "azure", "gcp", "docker", "kubernetes", "jenkins", "gitlab", "github",
    "terraform", "ansible", "chef", "puppet", "vagrant", "helm", "istio",
    "prometheus", "grafana", "circleci", "travis",
    // Tools
    "git", "svn", "jira", "confluence", "slack", "postman", "swagger", "api",
    "rest", "graphql", "soap", "json", "xml", "yaml", "nginx", "apache", "tomcat",
    "webpack", "vite", "babel", "eslint",
    // Methodologies & concepts
    "agile", "scrum", "kanban", "devops", "cicd", "tdd", "bdd", "microservices",
    "algorithms", "blockchain", "cybersecurity", "authentication", "authorization",
    "oauth", "jwt", "saml", "encryption",
];

/// Professional competencies that count as skills even though they are not technologies.
const BUSINESS_TERMS: &[&str] = &[
    "leadership", "stakeholder", "debugging", "optimization",
    "performance", "scalability", "security", "compliance", "architecture",
];

/// Words that appear constantly in resumes and postings but carry no skill signal.
pub(crate) const GENERIC_FILLER: &[&str] = &[
    "ability", "additional", "add", "adding", "address", "addressing", "age",
    "application", "approach", "area", "base", "based", "build", "building",
    "business", "case", "company", "complete", "component", "content",
    "create", "creating", "current", "data", "day", "development", "different",
    "effort", "enable", "enabled", "enabling", "end", "ensure", "environment",
    "example", "experience", "following", "focus", "focused", "focusing",
    "functional", "general", "good", "great", "help", "high", "implement",
    "important", "include", "including", "information", "integration", "large",
    "law", "level", "line", "make", "making", "new", "number", "opportunity",
    "organization", "part", "place", "platform", "process", "product", "program",
    "project", "provide", "providing", "quality", "related", "required",
    "requirements", "responsible", "role", "service", "services", "set",
    "solution", "solutions", "strong", "support", "supporting", "system",
    "systems", "team", "teams", "technical", "technology", "time", "tool",
    "tools", "type", "understanding", "use", "using", "value", "various",
    "way", "well", "work", "working", "world", "year", "years",
    "looking", "seeking", "candidate", "position", "location", "salary",
    "benefits", "insurance", "health", "dental", "vision", "policy",
    "description", "responsibilities", "skills", "preferred", "minimum",
    "maximum", "overview", "summary", "duties", "tasks", "activities",
    "successful", "ideal", "excellent", "proven", "demonstrated", "knowledge",
    "proficiency", "deliver", "delivering", "drive", "driving", "lead",
    "leading", "develop", "developing", "maintain", "maintaining", "coordinate",
    "execute", "perform", "conduct", "establish", "identify", "evaluate",
    "define", "determine", "assess", "review", "monitor", "track", "report",
    "document", "participate", "contribute", "improve", "enhance", "streamline",
    "deploy", "operate", "administer", "facilitate", "organize", "prepare",
    "present", "train", "mentor", "guide", "assist", "manage", "managing",
];

/// English stop words (the standard NLTK list).
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his",
    "himself", "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself",
    "they", "them", "their", "theirs", "themselves", "what", "which", "who", "whom", "this",
    "that", "that'll", "these", "those", "am", "is", "are", "was", "were", "be", "been",
    "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an", "the",
    "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
    "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why", "how",
    "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
    "will", "just", "don", "don't", "should", "should've", "now", "d", "ll", "m", "o", "re",
    "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn", "didn't", "doesn",
    "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn", "isn't", "ma",
    "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// Compound terms detected before tokenization splits them apart.
const PHRASES: &[&str] = &[
    "machine learning", "artificial intelligence", "data science",
    "software engineering", "web development", "mobile development",
    "full stack", "front end", "back end", "database design",
    "system design", "network security", "cloud computing",
    "project management", "product management", "quality assurance",
    "user experience", "user interface", "business intelligence",
    "data analytics", "software architecture", "design patterns",
    "data structures", "computer science", "information technology",
];

/// Immutable vocabulary injected into the extractor.
#[derive(Debug, Clone)]
pub struct SkillDictionary {
    technical_terms: HashSet<String>,
    business_terms: HashSet<String>,
    generic_filler: HashSet<String>,
    stop_words: HashSet<String>,
    phrases: Vec<String>,
}

impl SkillDictionary {
    pub fn new<T, B, F, S, P>(
        technical_terms: T,
        business_terms: B,
        generic_filler: F,
        stop_words: S,
        phrases: P,
    ) -> Self
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        B: IntoIterator,
        B::Item: AsRef<str>,
        F: IntoIterator,
        F::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let mut phrases: Vec<String> = phrases.into_iter().map(lowercase).collect();
        phrases.sort();
        phrases.dedup();

        Self {
            technical_terms: technical_terms.into_iter().map(lowercase).collect(),
            business_terms: business_terms.into_iter().map(lowercase).collect(),
            generic_filler: generic_filler.into_iter().map(lowercase).collect(),
            stop_words: stop_words.into_iter().map(lowercase).collect(),
            phrases,
        }
    }

    /// The vocabulary shipped with the service.
    pub fn builtin() -> Self {
        Self::new(
            TECHNICAL_TERMS,
            BUSINESS_TERMS,
            GENERIC_FILLER,
            STOP_WORDS,
            PHRASES,
        )
    }

    pub fn is_technical_term(&self, word: &str) -> bool {
        self.technical_terms.contains(word)
    }

    /// The curated entry `word` matches, trying the symbol-stripped variant
    /// when the exact form is missing (`c++` stays `c++`, `node.js` → `nodejs`).
    pub fn curated_form(&self, word: &str) -> Option<String> {
        if self.is_curated_exact(word) {
            return Some(word.to_string());
        }
        let stripped = strip_symbols(word);
        (stripped != word && self.is_curated_exact(&stripped)).then_some(stripped)
    }

    fn is_curated_exact(&self, word: &str) -> bool {
        self.technical_terms.contains(word) || self.business_terms.contains(word)
    }

    pub fn is_filler(&self, word: &str) -> bool {
        self.generic_filler.contains(word)
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Filler or stop word.
    pub fn is_excluded(&self, word: &str) -> bool {
        self.is_filler(word) || self.is_stop_word(word)
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }
}

impl Default for SkillDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}

fn lowercase<S: AsRef<str>>(word: S) -> String {
    word.as_ref().trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_curated(dict: &SkillDictionary, word: &str) -> bool {
        dict.curated_form(word).is_some()
    }

    #[test]
    fn test_builtin_contains_core_technologies() {
        let dict = SkillDictionary::builtin();
        for term in ["python", "aws", "docker", "c++", "c#", "scikit-learn"] {
            assert!(is_curated(&dict, term), "{term} should be curated");
        }
        assert!(is_curated(&dict, "leadership"));
    }

    #[test]
    fn test_stripped_variant_matches() {
        let dict = SkillDictionary::builtin();
        assert!(is_curated(&dict, "node.js"), "node.js strips to nodejs");
        assert!(is_curated(&dict, "next.js"), "next.js strips to nextjs");
        assert!(!is_curated(&dict, "nodes"));
        assert!(is_curated(&dict, "ci-cd"), "ci-cd strips to cicd");
    }

    #[test]
    fn test_curated_form_prefers_exact_entry() {
        let dict = SkillDictionary::builtin();
        assert_eq!(dict.curated_form("c++").as_deref(), Some("c++"));
        assert_eq!(dict.curated_form("node.js").as_deref(), Some("nodejs"));
        assert_eq!(dict.curated_form("a.w.s").as_deref(), Some("aws"));
        assert_eq!(dict.curated_form("nodes"), None);
    }

    #[test]
    fn test_builtin_lists_are_disjoint_from_filler() {
        let dict = SkillDictionary::builtin();
        for word in GENERIC_FILLER {
            assert!(
                !is_curated(&dict, word),
                "'{word}' is both filler and curated in the builtin dictionary"
            );
        }
    }

    #[test]
    fn test_custom_dictionary_is_lowercased_and_deduped() {
        let dict = SkillDictionary::new(
            ["Rust", "TOKIO"],
            ["Mentoring"],
            ["Stuff"],
            ["The"],
            ["Event Sourcing", "event sourcing"],
        );
        assert!(dict.is_technical_term("rust"));
        assert!(dict.is_technical_term("tokio"));
        assert!(is_curated(&dict, "mentoring"));
        assert!(dict.is_filler("stuff"));
        assert!(dict.is_stop_word("the"));
        assert_eq!(dict.phrases(), &["event sourcing".to_string()]);
    }

    #[test]
    fn test_excluded_covers_filler_and_stop_words() {
        let dict = SkillDictionary::builtin();
        assert!(dict.is_excluded("experience"));
        assert!(dict.is_excluded("the"));
        assert!(!dict.is_excluded("python"));
    }
}
