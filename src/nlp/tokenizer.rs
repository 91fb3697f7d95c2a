use crate::nlp::resources::LanguageResources;

/// A normalized word: lowercase ASCII letters, longer than two characters,
/// not a stopword, reduced to its base form.
pub type Token = String;

const MIN_TOKEN_LEN: usize = 3;

/// Turns raw text into the token sequence candidate selection runs on.
pub struct Normalizer<'a> {
    resources: &'a LanguageResources,
}

impl<'a> Normalizer<'a> {
    pub fn new(resources: &'a LanguageResources) -> Self {
        Self { resources }
    }

    /// Tokens in source order, duplicates kept.
    ///
    /// Non-letters are deleted rather than replaced, so "state-of-the-art"
    /// becomes the single word "stateoftheart".
    pub fn normalize(&self, text: &str) -> Vec<Token> {
        let lowered = text.to_lowercase();
        let letters: String = lowered
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
            .collect();

        letters
            .split_whitespace()
            .filter(|word| word.len() >= MIN_TOKEN_LEN && !self.resources.stopwords.contains(word))
            .map(|word| self.resources.lemmatizer.lemmatize(word))
            .collect()
    }
}

/// Normalize with the given resources.
pub fn normalize(text: &str, resources: &LanguageResources) -> Vec<Token> {
    Normalizer::new(resources).normalize(text)
}
