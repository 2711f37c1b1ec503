//! Word scorers over a positional frequency table
//!
//! Each scorer folds the words of one call through a fresh accumulator so
//! that repeated letters are only credited once per call.

use super::PositionScores;
use crate::config::round_to;
use crate::core::{CharSet, Word};
use rayon::prelude::*;
use std::iter;

/// Scores a sequence of words as a whole
pub trait Scorer: Sync {
    /// Per-call record of what has already been credited
    type Credit: Default;

    /// Score one word, updating the accumulator
    fn credit_word(&self, word: &Word, credit: &mut Self::Credit) -> f64;

    /// Decimal digits kept in the total
    fn decimals(&self) -> u32;

    /// Total score of `words`, rounded
    fn score<'a>(&self, words: impl IntoIterator<Item = &'a Word>) -> f64 {
        let mut credit = Self::Credit::default();
        let total = words
            .into_iter()
            .fold(0.0, |total, word| total + self.credit_word(word, &mut credit));
        round_to(total, self.decimals())
    }
}

/// Positions and characters already credited in one call
#[derive(Debug, Default)]
pub struct PositionCredit {
    credited: Vec<CharSet>,
}

impl PositionCredit {
    /// Mark `ch` at `position`; false if it was already credited
    fn mark(&mut self, position: usize, ch: u8) -> bool {
        if self.credited.len() <= position {
            self.credited.resize(position + 1, CharSet::EMPTY);
        }
        let seen = self.credited[position];
        self.credited[position] = seen.with(ch);
        !seen.contains(ch)
    }
}

/// Sum of positional frequencies, each (position, character) credited once
#[derive(Debug, Clone)]
pub struct PositionalScorer {
    scores: PositionScores,
    decimals: u32,
}

impl PositionalScorer {
    #[must_use]
    pub const fn new(scores: PositionScores, decimals: u32) -> Self {
        Self { scores, decimals }
    }
}

impl Scorer for PositionalScorer {
    type Credit = PositionCredit;

    fn credit_word(&self, word: &Word, credit: &mut PositionCredit) -> f64 {
        let mut total = 0.0;
        for (position, &ch) in word.bytes().iter().enumerate() {
            if position >= self.scores.len() {
                break;
            }
            // absent here means the character cannot be at this position
            let Some(score) = self.scores.get(position, ch) else {
                continue;
            };
            if credit.mark(position, ch) {
                total += score;
            }
        }
        total
    }

    fn decimals(&self) -> u32 {
        self.decimals
    }
}

/// Characters already credited in one call
#[derive(Debug, Default)]
pub struct NoveltyCredit {
    credited: CharSet,
}

/// Rewards distinct characters, each at its best-scoring occurrence
///
/// A word's occurrences are visited by descending score; a character counts
/// the first time it is seen in the call and never again, whatever position
/// it appears at later.
#[derive(Debug, Clone)]
pub struct NoveltyScorer {
    scores: PositionScores,
    decimals: u32,
}

impl NoveltyScorer {
    #[must_use]
    pub const fn new(scores: PositionScores, decimals: u32) -> Self {
        Self { scores, decimals }
    }
}

impl Scorer for NoveltyScorer {
    type Credit = NoveltyCredit;

    fn credit_word(&self, word: &Word, credit: &mut NoveltyCredit) -> f64 {
        let mut occurrences: Vec<(f64, usize, u8)> = word
            .bytes()
            .iter()
            .enumerate()
            .map(|(position, &ch)| (self.scores.get(position, ch).unwrap_or(0.0), position, ch))
            .collect();
        occurrences.sort_by(|a, b| {
            b.0.total_cmp(&a.0)
                .then(b.1.cmp(&a.1))
                .then(b.2.cmp(&a.2))
        });

        let mut total = 0.0;
        for (score, _, ch) in occurrences {
            if credit.credited.contains(ch) {
                continue;
            }
            credit.credited = credit.credited.with(ch);
            total += score;
        }
        total
    }

    fn decimals(&self) -> u32 {
        self.decimals
    }
}

/// Score each word of `word_list` appended to `starting_words`
///
/// Returns (score, word) pairs sorted ascending by score; ties keep list order,
/// so the best choices are at the end.
#[must_use]
pub fn best_next_score<S: Scorer>(
    word_list: &[Word],
    starting_words: &[Word],
    scorer: &S,
) -> Vec<(f64, Word)> {
    let mut scored: Vec<(f64, Word)> = word_list
        .par_iter()
        .map(|next| {
            let score = scorer.score(starting_words.iter().chain(iter::once(next)));
            (score, next.clone())
        })
        .collect();
    scored.sort_by(|a, b| a.0.total_cmp(&b.0));
    scored
}
