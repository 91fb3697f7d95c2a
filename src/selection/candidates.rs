use serde::{Deserialize, Serialize};

use crate::selection::frequency::FrequencyTable;

/// Thresholds for picking vocabulary candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidatePolicy {
    /// Words seen fewer times than this are treated as noise.
    pub min_count: usize,
    /// Words taking a larger share of all tokens are treated as too generic.
    pub max_frequency_ratio: f64,
    /// Candidates offered per requested word.
    pub oversample: usize,
}

impl Default for CandidatePolicy {
    fn default() -> Self {
        Self {
            min_count: 2,
            max_frequency_ratio: 0.05,
            oversample: 2,
        }
    }
}

/// Outcome of candidate selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSelection {
    pub words: Vec<String>,
    /// The filtered pass came up short and the plain top-N list was used instead.
    pub used_fallback: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CandidateSelector {
    policy: CandidatePolicy,
}

impl CandidateSelector {
    pub fn new(policy: CandidatePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &CandidatePolicy {
        &self.policy
    }

    /// Pick at most `requested_count * oversample` words, most frequent first.
    pub fn select<S: AsRef<str>>(&self, tokens: &[S], requested_count: usize) -> CandidateSelection {
        if tokens.is_empty() {
            return CandidateSelection {
                words: Vec::new(),
                used_fallback: false,
            };
        }

        let limit = requested_count.saturating_mul(self.policy.oversample);
        let table = FrequencyTable::from_tokens(tokens);
        let ranked = table.most_common();

        // 1. Moderately frequent words only
        let filtered: Vec<String> = ranked
            .iter()
            .filter(|(_, count)| {
                *count >= self.policy.min_count
                    && table.relative_frequency(*count) <= self.policy.max_frequency_ratio
            })
            .take(limit)
            .map(|(token, _)| token.to_string())
            .collect();

        if filtered.len() >= requested_count {
            tracing::debug!(
                selected = filtered.len(),
                distinct = table.len(),
                total = table.total(),
                "vocabulary candidates selected"
            );
            return CandidateSelection {
                words: filtered,
                used_fallback: false,
            };
        }

        // 2. Too few survived: replace with the plain top of the ranking
        let words: Vec<String> = ranked
            .iter()
            .take(limit)
            .map(|(token, _)| token.to_string())
            .collect();

        tracing::debug!(
            filtered = filtered.len(),
            selected = words.len(),
            distinct = table.len(),
            "vocabulary candidates fell back to most frequent words"
        );
        CandidateSelection {
            words,
            used_fallback: true,
        }
    }
}

/// Select candidates with the default policy.
pub fn select_candidates<S: AsRef<str>>(tokens: &[S], requested_count: usize) -> Vec<String> {
    CandidateSelector::default()
        .select(tokens, requested_count)
        .words
}
