pub mod lemmatizer;
pub mod resources;
pub mod stopwords;
pub mod tokenizer;

pub use lemmatizer::Lemmatizer;
pub use resources::{LanguageConfig, LanguageResources, ResourceError};
pub use stopwords::{StopwordSet, ENGLISH_STOPWORDS};
pub use tokenizer::{normalize, Normalizer, Token};
