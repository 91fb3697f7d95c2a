//! Noun-form lemmatization.
//!
//! Words are reduced the way a WordNet noun lookup reduces them: irregular
//! plurals come from an exception table, regular plurals go through suffix
//! detachment rules, and a rule's output is only accepted when the noun
//! lexicon knows it. A word with no accepted form is returned unchanged, so
//! the lemmatizer never produces a string that is not already a word.
//!
//! The built-in lexicon covers common English nouns. A larger list (for
//! example the WordNet noun index) can be layered on with
//! [`Lemmatizer::with_lexicon_file`].

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::nlp::resources::ResourceError;

/// Detachment rules, most specific suffix first.
const NOUN_RULES: &[(&str, &str)] = &[
    ("shes", "sh"),
    ("ches", "ch"),
    ("sses", "ss"),
    ("xes", "x"),
    ("zes", "z"),
    ("ses", "s"),
    ("ies", "y"),
    ("s", ""),
];

const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("people", "people"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("lice", "louse"),
    ("oxen", "ox"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("bacteria", "bacterium"),
    ("fungi", "fungus"),
    ("nuclei", "nucleus"),
    ("stimuli", "stimulus"),
    ("cacti", "cactus"),
    ("radii", "radius"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("vertices", "vertex"),
    ("appendices", "appendix"),
    ("analyses", "analysis"),
    ("axes", "axis"),
    ("hypotheses", "hypothesis"),
    ("theses", "thesis"),
    ("crises", "crisis"),
    ("diagnoses", "diagnosis"),
    ("bases", "base"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("wolves", "wolf"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("selves", "self"),
    ("thieves", "thief"),
    ("loaves", "loaf"),
    ("buses", "bus"),
    ("gases", "gas"),
    ("biases", "bias"),
    ("aliases", "alias"),
    ("atlases", "atlas"),
    ("canvases", "canvas"),
    ("lenses", "lens"),
    ("viruses", "virus"),
    ("bonuses", "bonus"),
    ("campuses", "campus"),
    ("statuses", "status"),
    ("focuses", "focus"),
    ("quizzes", "quiz"),
    ("aches", "ache"),
    ("headaches", "headache"),
    ("caches", "cache"),
    ("niches", "niche"),
    ("avalanches", "avalanche"),
    ("movies", "movie"),
    ("cookies", "cookie"),
    ("calories", "calorie"),
    ("zombies", "zombie"),
];

/// Plural-looking words that are their own base form.
const INVARIANT: &[&str] = &[
    "series", "species", "news", "means", "lens", "chaos", "physics", "mathematics",
    "economics", "politics", "ethics", "genetics", "linguistics", "electronics",
    "gas", "bias", "atlas", "canvas", "alias",
];

const BUILTIN_NOUNS: &str = include_str!("data/nouns.txt");

#[derive(Debug, Clone)]
pub struct Lemmatizer {
    exceptions: HashMap<&'static str, &'static str>,
    invariant: HashSet<&'static str>,
    lexicon: HashSet<String>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self {
            exceptions: IRREGULAR_PLURALS.iter().copied().collect(),
            invariant: INVARIANT.iter().copied().collect(),
            lexicon: HashSet::new(),
        }
        .with_lexicon(lexicon_lines(BUILTIN_NOUNS))
    }
}

impl Lemmatizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add known noun base forms to the lexicon.
    pub fn with_lexicon<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.lexicon.extend(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
        self
    }

    /// Load a lexicon file: one base form per line, `#` starts a comment line.
    pub fn with_lexicon_file(self, path: &Path) -> Result<Self, ResourceError> {
        let content = std::fs::read_to_string(path).map_err(|source| ResourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.with_lexicon(lexicon_lines(&content)))
    }

    /// Whether `word` is a known noun base form.
    pub fn knows(&self, word: &str) -> bool {
        self.lexicon.contains(word)
    }

    pub fn lexicon_len(&self) -> usize {
        self.lexicon.len()
    }

    /// Reduce a lowercase word to its noun base form.
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(base) = self.exceptions.get(word) {
            return (*base).to_string();
        }
        if self.invariant.contains(word) {
            return word.to_string();
        }

        // Every rule output the lexicon knows, plus the word itself; shortest wins.
        let mut forms: Vec<String> = Vec::new();
        if self.lexicon.contains(word) {
            forms.push(word.to_string());
        }
        for (suffix, ending) in NOUN_RULES {
            if let Some(form) = detach(word, suffix, ending) {
                if self.lexicon.contains(&form) && !forms.contains(&form) {
                    forms.push(form);
                }
            }
        }

        forms
            .into_iter()
            .min_by_key(|form| form.len())
            .unwrap_or_else(|| word.to_string())
    }
}

fn lexicon_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

fn detach(word: &str, suffix: &str, ending: &str) -> Option<String> {
    word.strip_suffix(suffix).map(|stem| format!("{stem}{ending}"))
}
