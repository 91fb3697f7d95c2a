//! The external text generator the pipeline sends prompts to.

pub mod gemini;

use thiserror::Error;

pub use gemini::{GeminiConfig, GeminiGenerator};

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Text generator is not configured: {0}")]
    NotConfigured(String),

    #[error("Text generator request failed: {message}")]
    RequestFailed { message: String },

    #[error("Text generator returned HTTP {code}: {body}")]
    Status { code: u16, body: String },

    #[error("Failed to parse text generator response: {message}")]
    ParseError { message: String },

    #[error("Text generator returned no text")]
    EmptyResponse,
}

/// Prompt in, raw text out. One call per request, no retries.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GeneratorError>;
}

impl<F> TextGenerator for F
where
    F: Fn(&str) -> Result<String, GeneratorError>,
{
    fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
        self(prompt)
    }
}
