use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::nlp::lemmatizer::Lemmatizer;
use crate::nlp::stopwords::StopwordSet;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Failed to read language resource {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Optional files that extend the built-in English resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Extra stopwords, one per line.
    pub extra_stopwords_path: Option<PathBuf>,
    /// Extra noun base forms, one per line, added to the built-in lexicon.
    pub lexicon_path: Option<PathBuf>,
}

/// Immutable stopword and lemmatization data shared by every request.
#[derive(Debug, Clone)]
pub struct LanguageResources {
    pub stopwords: StopwordSet,
    pub lemmatizer: Lemmatizer,
}

static SHARED: OnceLock<Arc<LanguageResources>> = OnceLock::new();

impl LanguageResources {
    /// The built-in English resources. No I/O.
    pub fn english() -> Self {
        Self {
            stopwords: StopwordSet::english(),
            lemmatizer: Lemmatizer::new(),
        }
    }

    /// Build resources from the built-in English data plus any configured files.
    pub fn load(config: &LanguageConfig) -> Result<Self, ResourceError> {
        let mut resources = Self::english();

        if let Some(path) = &config.extra_stopwords_path {
            resources.stopwords.extend_from_file(path)?;
        }
        if let Some(path) = &config.lexicon_path {
            resources.lemmatizer = resources.lemmatizer.with_lexicon_file(path)?;
        }

        tracing::debug!(
            stopwords = resources.stopwords.len(),
            lexicon = resources.lemmatizer.lexicon_len(),
            "language resources loaded"
        );
        Ok(resources)
    }

    /// Process-wide English resources, built on first use.
    pub fn shared() -> Arc<LanguageResources> {
        SHARED
            .get_or_init(|| Arc::new(LanguageResources::english()))
            .clone()
    }
}
