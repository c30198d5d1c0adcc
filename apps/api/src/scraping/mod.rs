//! Job Posting Fetcher: pulls a job description out of a public job page.
//!
//! Fetching is async (`reqwest`); HTML parsing is a pure function because
//! `scraper::Html` is not `Send` and must not live across an await.
//! No JavaScript rendering: static HTML only.

use std::time::Duration;

use reqwest::{Client, Url};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::documents::clean_extracted_text;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Tried in order; job boards first, generic containers last.
const JOB_DESCRIPTION_SELECTORS: &[&str] = &[
    "[data-testid='job-description']",
    ".job-description",
    ".jobsearch-jobDescriptionText",
    ".job-details",
    ".description",
    ".content",
    "article",
    ".posting-content",
    ".job-posting-description",
    "main",
];

const JOB_KEYWORDS: &[&str] = &[
    "responsibilities",
    "requirements",
    "qualifications",
    "experience",
    "skills",
    "role",
    "position",
    "job",
    "candidate",
    "we are looking for",
    "what you'll do",
    "what we offer",
    "about the role",
    "key responsibilities",
];

const FOOTER_MARKERS: &[&str] = &["contact us", "apply now", "privacy policy"];
const NON_CONTENT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// A selector match must be longer than this to count.
const MIN_SELECTOR_CHARS: usize = 200;
/// Anything shorter than this is not a job posting.
const MIN_DESCRIPTION_CHARS: usize = 100;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to fetch page: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Page returned status {0}")]
    Status(u16),

    #[error(
        "Could not extract a job description from the provided URL. \
         The page might not contain a job posting or may be protected."
    )]
    NotAJobPosting,
}

#[derive(Clone)]
pub struct JobPostingFetcher {
    client: Client,
}

impl JobPostingFetcher {
    pub fn new() -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(Self { client })
    }

    pub async fn fetch_job_description(&self, url: &str) -> Result<String, ScrapeError> {
        let url = parse_http_url(url)?;
        info!("Fetching job description from {url}");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Job page {url} returned {status}");
            return Err(ScrapeError::Status(status.as_u16()));
        }

        let html = response.text().await?;
        let description = extract_job_description(&html)?;
        info!(
            "Extracted job description from {url}, {} chars",
            description.len()
        );
        Ok(description)
    }
}

/// Accepts absolute http(s) URLs only.
pub fn parse_http_url(raw: &str) -> Result<Url, ScrapeError> {
    let url = Url::parse(raw.trim()).map_err(|e| ScrapeError::InvalidUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ScrapeError::InvalidUrl(format!(
            "unsupported scheme '{other}'"
        ))),
    }
}

/// Locates the job description in a page's HTML.
pub fn extract_job_description(html: &str) -> Result<String, ScrapeError> {
    let document = Html::parse_document(html);

    let description = from_selectors(&document).or_else(|| from_body_sentences(&document));

    match description.map(|d| clean_extracted_text(&d)) {
        Some(d) if d.chars().count() >= MIN_DESCRIPTION_CHARS => Ok(d),
        _ => Err(ScrapeError::NotAJobPosting),
    }
}

fn from_selectors(document: &Html) -> Option<String> {
    for selector_str in JOB_DESCRIPTION_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        let Some(element) = document.select(&selector).next() else {
            continue;
        };

        let text = visible_text(element);
        if text.chars().count() > MIN_SELECTOR_CHARS && contains_job_keywords(&text) {
            debug!("Job description matched selector {selector_str}");
            return Some(text);
        }
    }
    None
}

/// Captures sentences from the first job-related one up to a footer marker.
fn from_body_sentences(document: &Html) -> Option<String> {
    let selector = Selector::parse("body").ok()?;
    let body = document.select(&selector).next()?;
    let text = visible_text(body);
    if text.chars().count() <= MIN_SELECTOR_CHARS {
        return None;
    }

    let mut captured = String::new();
    let mut in_job_section = false;
    for sentence in text.split('.') {
        let lower = sentence.to_lowercase();
        if contains_job_keywords(&lower) {
            in_job_section = true;
        }
        if !in_job_section {
            continue;
        }

        captured.push_str(sentence.trim());
        captured.push_str(". ");

        if FOOTER_MARKERS.iter().any(|m| lower.contains(m)) {
            break;
        }
    }

    debug!("Body fallback captured {} chars", captured.len());
    Some(captured.trim().to_string())
}

/// Text of `element` with whitespace normalized, skipping script-like nodes.
fn visible_text(element: ElementRef<'_>) -> String {
    let pieces: Vec<&str> = element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node
                .parent()
                .and_then(|p| p.value().as_element().map(|e| e.name()))
                .is_some_and(|name| NON_CONTENT_TAGS.contains(&name));
            (!hidden).then_some(&**text)
        })
        .collect();
    clean_extracted_text(&pieces.join(" "))
}

fn contains_job_keywords(text: &str) -> bool {
    let lower = text.to_lowercase();
    JOB_KEYWORDS.iter().any(|k| lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_ROLE: &str = "We are looking for a backend engineer to join our platform team. \
        Responsibilities include designing APIs in Rust, operating Kafka pipelines and mentoring \
        engineers. Requirements: five years of experience with distributed systems, strong SQL \
        skills and comfort with Kubernetes in production.";

    #[test]
    fn test_selector_match_wins() {
        let html = format!(
            "<html><body><nav>Home Jobs</nav>\
             <div class=\"job-description\">{LONG_ROLE}</div>\
             <footer>Privacy policy</footer></body></html>"
        );
        let description = extract_job_description(&html).unwrap();
        assert!(description.starts_with("We are looking for"));
        assert!(!description.contains("Home Jobs"));
    }

    #[test]
    fn test_selector_order_is_respected() {
        let html = format!(
            "<html><body><main>{LONG_ROLE} Main copy.</main>\
             <div data-testid=\"job-description\">{LONG_ROLE} Test id copy.</div></body></html>"
        );
        let description = extract_job_description(&html).unwrap();
        assert!(description.ends_with("Test id copy."));
    }

    #[test]
    fn test_short_selector_falls_through_to_body() {
        let html = format!(
            "<html><body><div class=\"description\">Short blurb.</div>\
             <p>Welcome to Acme. {LONG_ROLE} Apply now to join us. Unrelated footer text.</p>\
             </body></html>"
        );
        let description = extract_job_description(&html).unwrap();
        assert!(description.starts_with("We are looking for"));
        assert!(description.contains("Apply now"));
        assert!(!description.contains("Unrelated footer"));
        assert!(!description.contains("Welcome to Acme"));
    }

    #[test]
    fn test_scripts_are_ignored() {
        let html = format!(
            "<html><body><article><script>var job = 1;</script>{LONG_ROLE}</article></body></html>"
        );
        let description = extract_job_description(&html).unwrap();
        assert!(!description.contains("var job"));
    }

    #[test]
    fn test_non_job_page_is_rejected() {
        let html = "<html><body><h1>Cat pictures</h1><p>Just cats today.</p></body></html>";
        assert!(matches!(
            extract_job_description(html),
            Err(ScrapeError::NotAJobPosting)
        ));
    }

    #[test]
    fn test_parse_http_url() {
        assert!(parse_http_url("https://jobs.example.com/123").is_ok());
        assert!(matches!(
            parse_http_url("ftp://example.com"),
            Err(ScrapeError::InvalidUrl(_))
        ));
        assert!(matches!(
            parse_http_url("not a url"),
            Err(ScrapeError::InvalidUrl(_))
        ));
    }
}
