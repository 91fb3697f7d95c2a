use serde_json::Value;
use thiserror::Error;

use crate::response::schema::{kind_of, RecordSchema};
use crate::types::record::Record;
use crate::types::request::GenerationMode;

const PREVIEW_CHARS: usize = 200;

/// The payload as a whole could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedResponse {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("expected a JSON array, found {0}")]
    NotAnArray(&'static str),
    #[error("mode '{0}' does not produce records")]
    NoSchema(GenerationMode),
}

/// Outcome of validating one generator response.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// Valid records in emission order, at most the requested count.
    pub records: Vec<Record>,
    /// Elements in the payload array.
    pub received: usize,
    /// Elements that failed the schema.
    pub dropped: usize,
    pub malformed: Option<MalformedResponse>,
}

impl ValidationReport {
    fn malformed(reason: MalformedResponse) -> Self {
        Self {
            records: Vec::new(),
            received: 0,
            dropped: 0,
            malformed: Some(reason),
        }
    }
}

/// Parse, filter, and truncate a JSON payload.
///
/// Never fails: an unusable payload yields an empty report carrying the
/// reason, and each non-conforming element is dropped on its own.
pub fn validate_response(
    json_candidate: &str,
    mode: GenerationMode,
    requested_count: usize,
) -> ValidationReport {
    let Some(schema) = RecordSchema::for_mode(mode) else {
        return ValidationReport::malformed(MalformedResponse::NoSchema(mode));
    };

    let parsed: Value = match serde_json::from_str(json_candidate) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(
                %mode,
                error = %e,
                preview = %preview(json_candidate),
                "generator response is not valid JSON"
            );
            return ValidationReport::malformed(MalformedResponse::InvalidJson(e.to_string()));
        }
    };

    let Value::Array(elements) = parsed else {
        let found = kind_of(&parsed);
        tracing::warn!(
            %mode,
            found,
            preview = %preview(json_candidate),
            "generator response was not a list"
        );
        return ValidationReport::malformed(MalformedResponse::NotAnArray(found));
    };

    let received = elements.len();
    let mut valid = Vec::with_capacity(received);

    for (index, element) in elements.into_iter().enumerate() {
        match schema.check(&element) {
            Ok(()) => {
                if let Value::Object(map) = element {
                    valid.push(Record::from_map(map));
                }
            }
            Err(reason) => {
                tracing::warn!(%mode, index, %reason, element = %element, "skipping malformed or mismatched element");
            }
        }
    }

    let dropped = received - valid.len();
    let records = truncate_results(valid, requested_count);

    ValidationReport {
        records,
        received,
        dropped,
        malformed: None,
    }
}

/// Records only; see [`validate_response`].
pub fn validate_and_filter(
    json_candidate: &str,
    mode: GenerationMode,
    requested_count: usize,
) -> Vec<Record> {
    validate_response(json_candidate, mode, requested_count).records
}

/// Keep the first `requested_count` records. Shorter inputs pass through unchanged.
pub fn truncate_results<T>(mut records: Vec<T>, requested_count: usize) -> Vec<T> {
    records.truncate(requested_count);
    records
}

fn preview(s: &str) -> &str {
    crate::prompt::clip_chars(s, PREVIEW_CHARS)
}
