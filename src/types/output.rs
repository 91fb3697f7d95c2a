use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::record::Record;
use crate::types::request::GenerationMode;

/// The artifact handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Artifact {
    Records(Vec<Record>),
    Summary(String),
}

impl Artifact {
    /// The empty artifact for a mode: no records, or an empty summary.
    pub fn empty(mode: GenerationMode) -> Self {
        if mode.expects_records() {
            Artifact::Records(Vec::new())
        } else {
            Artifact::Summary(String::new())
        }
    }

    pub fn records(&self) -> &[Record] {
        match self {
            Artifact::Records(records) => records,
            Artifact::Summary(_) => &[],
        }
    }

    pub fn into_records(self) -> Vec<Record> {
        match self {
            Artifact::Records(records) => records,
            Artifact::Summary(_) => Vec::new(),
        }
    }

    pub fn summary(&self) -> Option<&str> {
        match self {
            Artifact::Summary(text) => Some(text),
            Artifact::Records(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    Completed,
    /// Refused before any external call (empty text, zero count).
    InputRejected,
    /// The text had no words left after normalization.
    NoCandidates,
    GeneratorFailed,
    /// The generator answered, but not with a JSON array.
    MalformedResponse,
}

impl GenerationStatus {
    /// Whether the outer layer should report a dependency failure rather than
    /// a client error or a (possibly empty) success.
    pub fn is_dependency_failure(&self) -> bool {
        matches!(self, GenerationStatus::GeneratorFailed)
    }
}

/// Describes how an artifact was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationMetadata {
    pub mode: GenerationMode,
    pub requested_count: usize,

    pub status: GenerationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    pub source_version: Option<String>,
    pub candidates: Vec<String>,
    pub prompt_chars: usize,

    pub elements_received: usize,
    pub elements_dropped: usize,

    pub generated_at: DateTime<Utc>, // informational only
}

impl GenerationMetadata {
    pub fn new(mode: GenerationMode, requested_count: usize) -> Self {
        Self {
            mode,
            requested_count,
            status: GenerationStatus::Completed,
            detail: None,
            source_version: None,
            candidates: Vec::new(),
            prompt_chars: 0,
            elements_received: 0,
            elements_dropped: 0,
            generated_at: Utc::now(),
        }
    }
}

/// The final result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyOutput {
    pub artifact: Artifact,
    pub generation: GenerationMetadata,
}
