use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::identifiers::SourceVersion;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Content must be valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
    #[error("Could not extract text from {0}. The PDF might be image-based or empty.")]
    NoExtractableText(String),
}

/// Plain text extracted from an uploaded document, ready for the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub version: SourceVersion,
    pub origin: String,
    pub text: String,
}

impl SourceDocument {
    /// Ingest raw UTF-8 bytes.
    ///
    /// Whitespace runs collapse to single spaces before the version is
    /// computed, so the version tracks what the generator actually sees.
    pub fn ingest(origin: impl Into<String>, raw_content: Vec<u8>) -> Result<Self, SourceError> {
        let content = String::from_utf8(raw_content)?;
        Ok(Self::from_text(origin, &content))
    }

    pub fn from_text(origin: impl Into<String>, content: &str) -> Self {
        let text = clean_text(content);
        let version = SourceVersion::from_text(&text);

        SourceDocument {
            version,
            origin: origin.into(),
            text,
        }
    }

    /// Extract text from PDF bytes.
    pub fn from_pdf_bytes(origin: impl Into<String>, data: &[u8]) -> Result<Self, SourceError> {
        let origin = origin.into();
        let text = pdf_extract::extract_text_from_mem(data)
            .map_err(|e| SourceError::Pdf(e.to_string()))?;

        if text.trim().is_empty() {
            return Err(SourceError::NoExtractableText(origin));
        }

        Ok(Self::from_text(origin, &text))
    }

    pub fn from_pdf_path(path: &Path) -> Result<Self, SourceError> {
        let data = std::fs::read(path)?;
        Self::from_pdf_bytes(path.display().to_string(), &data)
    }

    /// Load a file, treating `.pdf` files as PDFs and anything else as UTF-8 text.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

        if is_pdf {
            Self::from_pdf_path(path)
        } else {
            let data = std::fs::read(path)?;
            Self::ingest(path.display().to_string(), data)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Collapse every whitespace run (spaces, newlines, tabs) to one space and trim.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
