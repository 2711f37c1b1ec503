//! Candidate filtering
//!
//! A `Constraint` is compiled once into a `CandidateFilter`, which then tests
//! words with one bitset lookup per position plus the minimum-count checks.

use super::Constraint;
use crate::core::{CharSet, Word};
use crate::error::{Error, Result};

/// Compiled word test for a `Constraint`
#[derive(Debug, Clone)]
pub struct CandidateFilter {
    allowed: Vec<CharSet>,
    min_counts: Vec<(u8, usize)>,
}

impl Constraint {
    /// Compile into a filter
    ///
    /// # Errors
    /// Returns `Error::EmptyPosition` if any position has no allowed
    /// characters. Construction never produces one, so this signals a bug.
    pub fn compile(&self) -> Result<CandidateFilter> {
        if let Some(position) = self.positions().iter().position(|set| set.is_empty()) {
            return Err(Error::EmptyPosition { position });
        }
        Ok(CandidateFilter {
            allowed: self.positions().to_vec(),
            min_counts: self.min_counts().iter().map(|(&c, &n)| (c, n)).collect(),
        })
    }
}

impl CandidateFilter {
    /// True when `word` satisfies every position and every minimum count
    ///
    /// Words of a different length never match.
    #[must_use]
    pub fn matches(&self, word: &Word) -> bool {
        let bytes = word.bytes();
        bytes.len() == self.allowed.len()
            && bytes
                .iter()
                .zip(&self.allowed)
                .all(|(&b, set)| set.contains(b))
            && self
                .min_counts
                .iter()
                .all(|&(ch, min)| word.count_of(ch) >= min)
    }

    /// Matching words, in list order
    #[must_use]
    pub fn filter(&self, words: &[Word]) -> Vec<Word> {
        words.iter().filter(|w| self.matches(w)).cloned().collect()
    }

    /// Number of matching words
    #[must_use]
    pub fn count(&self, words: &[Word]) -> usize {
        words.iter().filter(|w| self.matches(w)).count()
    }
}
