use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A validated word-frequency request.
///
/// Produced by `RawInput::validate`; by the time a value of this type exists, `text`
/// has been resolved from its source and `top` is known to be at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyRequest {
    pub text: String,
    pub top: usize,
    /// Stoplist in the order the caller supplied it. Matching is case-sensitive.
    pub exclude: Vec<String>,
}

/// One row of the ranked output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub word: String,
    pub count: usize,
}

/// Occurrence data for a single distinct word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordTally {
    pub count: usize,
    /// Position of the word among distinct words, in order of first appearance.
    pub first_seen: usize,
}

/// Mapping from normalized word to its tally.
///
/// Words only enter the map through `record`, so every stored count is at least 1.
#[derive(Debug, Default, Clone)]
pub struct WordCounts {
    tallies: HashMap<String, WordTally>,
}

impl WordCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, word: String) {
        let next_index = self.tallies.len();
        self.tallies
            .entry(word)
            .and_modify(|tally| tally.count += 1)
            .or_insert(WordTally {
                count: 1,
                first_seen: next_index,
            });
    }

    pub fn count(&self, word: &str) -> Option<usize> {
        self.tallies.get(word).map(|tally| tally.count)
    }

    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    pub fn into_tallies(self) -> impl Iterator<Item = (String, WordTally)> {
        self.tallies.into_iter()
    }
}
