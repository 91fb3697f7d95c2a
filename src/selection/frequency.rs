use std::collections::HashMap;

/// Occurrence counts over one document's token sequence.
///
/// Entries remember the order in which each token was first seen; that order
/// breaks ties when ranking by count.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
    total: usize,
}

impl FrequencyTable {
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut table = FrequencyTable::default();

        for token in tokens {
            let token = token.as_ref();
            match table.index.get(token) {
                Some(&slot) => table.entries[slot].1 += 1,
                None => {
                    table.index.insert(token.to_string(), table.entries.len());
                    table.entries.push((token.to_string(), 1));
                }
            }
            table.total += 1;
        }

        table
    }

    pub fn count(&self, token: &str) -> usize {
        self.index
            .get(token)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    /// Number of tokens counted, duplicates included.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Share of all tokens taken by `count` occurrences.
    pub fn relative_frequency(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64
        }
    }

    /// Distinct tokens by descending count, first-seen order on ties.
    pub fn most_common(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .entries
            .iter()
            .map(|(token, count)| (token.as_str(), *count))
            .collect();

        // Stable sort keeps discovery order within equal counts.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        debug_assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
        ranked
    }
}
