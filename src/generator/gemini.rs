//! Blocking client for the Gemini `generateContent` endpoint.

use std::time::Duration;

use serde_json::Value;

use crate::generator::{GeneratorError, TextGenerator};

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const ERROR_BODY_CHARS: usize = 500;
const API_KEY_HEADER: &str = "x-goog-api-key";

fn env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout_secs: 120,
        }
    }

    /// Read `GEMINI_API_KEY` (or `GOOGLE_API_KEY`) and the optional
    /// `STUDY_GEMINI_*` overrides.
    pub fn from_env() -> Result<Self, GeneratorError> {
        let api_key = env("GEMINI_API_KEY")
            .or_else(|| env("GOOGLE_API_KEY"))
            .ok_or_else(|| GeneratorError::NotConfigured("missing GEMINI_API_KEY".to_string()))?;

        let mut config = Self::new(api_key);
        if let Some(model) = env("STUDY_GEMINI_MODEL") {
            config.model = model;
        }
        if let Some(base_url) = env("STUDY_GEMINI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(secs) = env("STUDY_GEMINI_TIMEOUT_SECS").and_then(|s| s.parse::<u64>().ok()) {
            config.timeout_secs = secs.clamp(5, 600);
        }
        Ok(config)
    }

    // The key travels in a header so it never shows up in URL-bearing error text.
    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model,
        )
    }
}

pub struct GeminiGenerator {
    config: GeminiConfig,
    agent: ureq::Agent,
}

impl GeminiGenerator {
    pub fn new(config: GeminiConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Self { config, agent }
    }

    pub fn from_env() -> Result<Self, GeneratorError> {
        Ok(Self::new(GeminiConfig::from_env()?))
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

impl TextGenerator for GeminiGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        tracing::debug!(model = %self.config.model, prompt_chars = prompt.chars().count(), "calling gemini");

        let resp = self
            .agent
            .post(&self.config.endpoint())
            .set("Content-Type", "application/json")
            .set(API_KEY_HEADER, &self.config.api_key)
            .send_json(body)
            .map_err(|e| match e {
                ureq::Error::Status(code, response) => {
                    let body = response.into_string().unwrap_or_default();
                    GeneratorError::Status {
                        code,
                        body: body.chars().take(ERROR_BODY_CHARS).collect(),
                    }
                }
                other => GeneratorError::RequestFailed {
                    message: other.to_string(),
                },
            })?;

        let resp_str = resp.into_string().map_err(|e| GeneratorError::ParseError {
            message: e.to_string(),
        })?;

        let json: Value = serde_json::from_str(&resp_str).map_err(|e| GeneratorError::ParseError {
            message: e.to_string(),
        })?;

        candidate_text(&json)
    }
}

// candidates[0].content.parts[*].text, newline-joined
fn candidate_text(json: &Value) -> Result<String, GeneratorError> {
    let parts = json["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| GeneratorError::ParseError {
            message: "missing 'candidates[0].content.parts'".into(),
        })?;

    let text = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect::<Vec<_>>()
        .join("\n");

    if text.trim().is_empty() {
        return Err(GeneratorError::EmptyResponse);
    }
    Ok(text)
}
