use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::nlp::LanguageConfig;
use crate::prompt::PromptLimits;
use crate::selection::CandidatePolicy;
use crate::types::request::GenerationMode;

pub const DEFAULT_SUMMARY_FAILURE: &str = "Failed to generate summary.";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },
}

/// Counts used when the caller does not give one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestDefaults {
    pub num_questions: usize,
    pub question_mode: GenerationMode,
    pub num_words: usize,
    pub num_sentences: usize,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            num_questions: 5,
            question_mode: GenerationMode::MultipleChoice,
            num_words: 10,
            num_sentences: 3,
        }
    }
}

// Serializable, comparable, explicit defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub over_request: usize,
    pub quiz_char_budget: usize,
    pub summary_char_budget: usize,
    pub vocabulary_char_budget: usize,
    pub summary_failure_message: String,
    pub candidates: CandidatePolicy,
    pub defaults: RequestDefaults,
    pub language: LanguageConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::v0()
    }
}

impl PipelineConfig {
    pub fn v0() -> Self {
        let limits = PromptLimits::default();
        Self {
            over_request: limits.over_request,
            quiz_char_budget: limits.quiz_chars,
            summary_char_budget: limits.summary_chars,
            vocabulary_char_budget: limits.vocabulary_chars,
            summary_failure_message: DEFAULT_SUMMARY_FAILURE.into(),
            candidates: CandidatePolicy::default(),
            defaults: RequestDefaults::default(),
            language: LanguageConfig::default(),
        }
    }

    /// Parse a TOML document. Missing keys keep their `v0` values.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Defaults, then the optional file, then `STUDY_*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::v0(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a key lookup; blank values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &'static str| -> Result<Option<usize>, ConfigError> {
            match lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
                None => Ok(None),
                Some(value) => value
                    .parse::<usize>()
                    .map(Some)
                    .map_err(|_| ConfigError::InvalidEnv { key, value }),
            }
        };

        if let Some(v) = read("STUDY_OVER_REQUEST")? {
            self.over_request = v;
        }
        if let Some(v) = read("STUDY_QUIZ_CHAR_BUDGET")? {
            self.quiz_char_budget = v;
        }
        if let Some(v) = read("STUDY_SUMMARY_CHAR_BUDGET")? {
            self.summary_char_budget = v;
        }
        if let Some(v) = read("STUDY_VOCABULARY_CHAR_BUDGET")? {
            self.vocabulary_char_budget = v;
        }
        Ok(())
    }

    pub fn prompt_limits(&self) -> PromptLimits {
        PromptLimits {
            over_request: self.over_request,
            quiz_chars: self.quiz_char_budget,
            summary_chars: self.summary_char_budget,
            vocabulary_chars: self.vocabulary_char_budget,
        }
    }
}
