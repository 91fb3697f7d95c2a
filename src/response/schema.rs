use serde_json::Value;
use thiserror::Error;

use crate::types::request::GenerationMode;

/// Why a single response element was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("element is not an object (found {0})")]
    NotAnObject(&'static str),
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("required field '{0}' is null or empty")]
    EmptyField(&'static str),
    #[error("type '{found}' does not match requested '{expected}'")]
    TypeMismatch { expected: &'static str, found: String },
    #[error("'options' is not an array")]
    OptionsNotArray,
    #[error("expected {expected} options, found {found}")]
    OptionCount { expected: usize, found: usize },
    #[error("option {0} is not a non-empty string")]
    InvalidOption(usize),
}

/// Required shape of one record for a mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    pub mode: GenerationMode,
    pub required: &'static [&'static str],
    /// A declared `type` must equal this tag. Whether `type` must be present
    /// at all is up to `required`.
    pub type_tag: Option<&'static str>,
    /// Exact number of `options` entries, if the mode has options.
    pub option_count: Option<usize>,
}

impl RecordSchema {
    /// `None` for modes that do not return records.
    pub fn for_mode(mode: GenerationMode) -> Option<Self> {
        match mode {
            GenerationMode::MultipleChoice => Some(Self {
                mode,
                required: &["question", "options", "answer", "type", "explanation"],
                type_tag: Some(mode.as_str()),
                option_count: Some(4),
            }),
            GenerationMode::TrueFalse => Some(Self {
                mode,
                required: &["question", "answer", "type", "explanation"],
                type_tag: Some(mode.as_str()),
                option_count: None,
            }),
            GenerationMode::Vocabulary => Some(Self {
                mode,
                required: &["word", "definition", "part_of_speech"],
                type_tag: Some(mode.as_str()),
                option_count: None,
            }),
            GenerationMode::Summary => None,
        }
    }

    pub fn check(&self, element: &Value) -> Result<(), Rejection> {
        let Value::Object(map) = element else {
            return Err(Rejection::NotAnObject(kind_of(element)));
        };

        for &field in self.required {
            match map.get(field) {
                None => return Err(Rejection::MissingField(field)),
                Some(value) if is_blank(value) => return Err(Rejection::EmptyField(field)),
                Some(_) => {}
            }
        }

        if let Some(expected) = self.type_tag {
            match map.get("type") {
                Some(Value::String(found)) if found == expected => {}
                Some(Value::String(found)) => {
                    return Err(Rejection::TypeMismatch {
                        expected,
                        found: found.clone(),
                    })
                }
                Some(other) => {
                    return Err(Rejection::TypeMismatch {
                        expected,
                        found: other.to_string(),
                    })
                }
                None => {}
            }
        }

        if let Some(expected) = self.option_count {
            let Some(Value::Array(options)) = map.get("options") else {
                return Err(Rejection::OptionsNotArray);
            };
            if options.len() != expected {
                return Err(Rejection::OptionCount {
                    expected,
                    found: options.len(),
                });
            }
            for (i, option) in options.iter().enumerate() {
                match option {
                    Value::String(s) if !s.trim().is_empty() => {}
                    _ => return Err(Rejection::InvalidOption(i)),
                }
            }
        }

        Ok(())
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
