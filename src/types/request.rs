use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What kind of study artifact a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    MultipleChoice,
    TrueFalse,
    Vocabulary,
    Summary,
}

impl GenerationMode {
    /// The tag the generator is told to put in each record's `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::MultipleChoice => "multiple_choice",
            GenerationMode::TrueFalse => "true_false",
            GenerationMode::Vocabulary => "vocabulary",
            GenerationMode::Summary => "summary",
        }
    }

    pub fn is_quiz(&self) -> bool {
        matches!(self, GenerationMode::MultipleChoice | GenerationMode::TrueFalse)
    }

    /// Modes whose response is a JSON array of records.
    pub fn expects_records(&self) -> bool {
        !matches!(self, GenerationMode::Summary)
    }

    /// Human wording used inside prompts ("multiple choice").
    pub fn display_name(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMode {
    type Err = InputRejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "multiple_choice" => Ok(GenerationMode::MultipleChoice),
            "true_false" => Ok(GenerationMode::TrueFalse),
            "vocabulary" => Ok(GenerationMode::Vocabulary),
            "summary" => Ok(GenerationMode::Summary),
            _ => Err(InputRejection::UnsupportedMode(s.to_string())),
        }
    }
}

/// Reasons a request is refused before any external call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputRejection {
    #[error("No text to process")]
    EmptySource,
    #[error("Requested count must be at least 1")]
    ZeroCount,
    #[error("Unsupported generation mode: {0}")]
    UnsupportedMode(String),
}

/// One call's worth of input. Built per request, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub source_text: String,
    pub requested_count: usize,
    pub mode: GenerationMode,
}

impl GenerationRequest {
    pub fn new(source_text: impl Into<String>, requested_count: usize, mode: GenerationMode) -> Self {
        Self {
            source_text: source_text.into(),
            requested_count,
            mode,
        }
    }

    /// Build a request from the loosely-typed form an outer layer receives.
    pub fn parse(
        source_text: impl Into<String>,
        requested_count: usize,
        mode: &str,
    ) -> Result<Self, InputRejection> {
        let mode = mode.parse()?;
        Ok(Self::new(source_text, requested_count, mode))
    }

    /// Input checks that must pass before the pipeline spends an external call.
    pub fn check(&self) -> Result<(), InputRejection> {
        if self.source_text.trim().is_empty() {
            return Err(InputRejection::EmptySource);
        }
        if self.requested_count == 0 {
            return Err(InputRejection::ZeroCount);
        }
        Ok(())
    }
}
