pub mod source;

pub use crate::types::identifiers::SourceVersion;
pub use source::{clean_text, SourceDocument, SourceError};
