//! Document Ingestion: plain text out of uploaded resume files.
//!
//! PDF parsing is CPU-bound and can panic on malformed input, so it always
//! runs through `extract_document_text`, which isolates it in `spawn_blocking`.

use std::path::Path;

use bytes::Bytes;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::info;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

pub const SUPPORTED_EXTENSIONS: &[&str] = &[".pdf", ".txt", ".md"];

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Unsupported file type '{0}'. Supported types: {}", SUPPORTED_EXTENSIONS.join(", "))]
    Unsupported(String),

    #[error("Uploaded file is empty")]
    Empty,

    #[error("Could not read document: {0}")]
    Unreadable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
    Markdown,
}

impl DocumentKind {
    /// Resolves the kind from the file name's extension, case-insensitively.
    pub fn from_file_name(file_name: &str) -> Result<Self, DocumentError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(Self::Pdf),
            "txt" => Ok(Self::PlainText),
            "md" | "markdown" => Ok(Self::Markdown),
            _ => Err(DocumentError::Unsupported(file_name.to_string())),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::PlainText => "Plain Text",
            Self::Markdown => "Markdown",
        }
    }
}

/// Synchronous extraction. Call from `spawn_blocking` for PDFs.
pub fn extract_text(kind: DocumentKind, bytes: &[u8]) -> Result<String, DocumentError> {
    if bytes.is_empty() {
        return Err(DocumentError::Empty);
    }

    let raw = match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| DocumentError::Unreadable(e.to_string()))?,
        DocumentKind::PlainText | DocumentKind::Markdown => {
            String::from_utf8_lossy(bytes).into_owned()
        }
    };

    let text = clean_extracted_text(&raw);
    if text.is_empty() {
        return Err(DocumentError::Unreadable(format!(
            "no text found in {} document",
            kind.label()
        )));
    }
    Ok(text)
}

/// Resolves the kind and extracts off the async executor.
pub async fn extract_document_text(
    file_name: &str,
    bytes: Bytes,
) -> Result<String, DocumentError> {
    let kind = DocumentKind::from_file_name(file_name)?;

    let text = tokio::task::spawn_blocking(move || extract_text(kind, &bytes))
        .await
        .map_err(|e| DocumentError::Unreadable(format!("extraction task failed: {e}")))??;

    info!(
        "Extracted {} characters from {} ({})",
        text.len(),
        file_name,
        kind.label()
    );
    Ok(text)
}

/// Drops control characters, collapses whitespace runs to one space, trims.
pub fn clean_extracted_text(text: &str) -> String {
    let without_controls: String = text
        .chars()
        .filter(|c| c.is_whitespace() || !c.is_control())
        .collect();
    WHITESPACE_RUN
        .replace_all(&without_controls, " ")
        .trim()
        .to_string()
}
