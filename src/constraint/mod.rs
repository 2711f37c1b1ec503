//! Positional and count constraints derived from guesses
//!
//! A `Constraint` records, per position, the characters still possible there,
//! and per character, the minimum number of occurrences the hidden word must
//! contain. Construction never empties a position, so every constraint stays
//! compilable into a `CandidateFilter` even when the guesses contradict
//! each other.

mod builder;
mod filter;
mod merge;

pub use builder::ConstraintBuilder;
pub use filter::CandidateFilter;

use crate::core::{Alphabet, CharSet, ParsedGuess};
use crate::error::Result;
use std::collections::BTreeMap;

/// What is known about the hidden word
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constraint {
    allowed: Vec<CharSet>,
    min_counts: BTreeMap<u8, usize>,
}

impl Constraint {
    /// No knowledge: every alphabet character allowed everywhere
    #[must_use]
    pub fn unconstrained(alphabet: Alphabet, word_length: usize) -> Self {
        Self {
            allowed: vec![alphabet.chars(); word_length],
            min_counts: BTreeMap::new(),
        }
    }

    /// The tightest constraint implied by a set of guesses
    ///
    /// Builds one constraint per guess, merges them, applies the exhaustive
    /// letter closure and narrows to a fixed point. With no guesses the result
    /// is unconstrained.
    ///
    /// # Errors
    /// Returns an error if any guess has the wrong length or uses characters
    /// outside `alphabet`.
    ///
    /// # Examples
    /// ```
    /// use wordle_elimination::constraint::Constraint;
    /// use wordle_elimination::core::{Alphabet, CharSet, parse};
    ///
    /// let guesses = [parse("S(ES)an").unwrap(), parse("S(LO)wS").unwrap()];
    /// let constraint = Constraint::from_guesses(&guesses, Alphabet::latin(), 5).unwrap();
    /// assert_eq!(constraint.allowed(1), CharSet::from_bytes(b"so"));
    /// assert_eq!(constraint.allowed(4), CharSet::single(b's'));
    /// ```
    pub fn from_guesses(
        guesses: &[ParsedGuess],
        alphabet: Alphabet,
        word_length: usize,
    ) -> Result<Self> {
        if guesses.is_empty() {
            return Ok(Self::unconstrained(alphabet, word_length));
        }
        let builder = ConstraintBuilder::new(alphabet, word_length);
        let singles = guesses
            .iter()
            .map(|guess| builder.build(guess))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::merge(&singles)?.resolve())
    }

    /// Apply the exhaustive closure and positional narrowing
    #[must_use]
    pub fn resolve(mut self) -> Self {
        self.close_exhaustive();
        self.narrow();
        self
    }

    #[inline]
    #[must_use]
    pub fn word_length(&self) -> usize {
        self.allowed.len()
    }

    /// Characters still possible at `position`
    ///
    /// # Panics
    /// Panics if `position >= self.word_length()`
    #[inline]
    #[must_use]
    pub fn allowed(&self, position: usize) -> CharSet {
        self.allowed[position]
    }

    /// All positions' allowed sets
    #[inline]
    #[must_use]
    pub fn positions(&self) -> &[CharSet] {
        &self.allowed
    }

    /// Known minimum occurrences of `ch`; zero when nothing is known
    #[inline]
    #[must_use]
    pub fn min_count(&self, ch: u8) -> usize {
        self.min_counts.get(&ch).copied().unwrap_or(0)
    }

    /// Characters with a known minimum, in ascending order
    #[inline]
    #[must_use]
    pub fn min_counts(&self) -> &BTreeMap<u8, usize> {
        &self.min_counts
    }

    /// Union of all allowed sets
    #[must_use]
    pub fn letters(&self) -> CharSet {
        self.allowed
            .iter()
            .fold(CharSet::EMPTY, |acc, &set| acc.union(set))
    }

    /// Remove `ch` from `position` unless it is the last allowed character
    pub(crate) fn eliminate(&mut self, position: usize, ch: u8) {
        let current = self.allowed[position];
        if current.len() > 1 {
            self.allowed[position] = current.without(ch);
        }
    }

    /// Restrict `position` to `ch` only
    pub(crate) fn require(&mut self, position: usize, ch: u8) {
        self.allowed[position] = CharSet::single(ch);
    }

    pub(crate) fn bump_min(&mut self, ch: u8) {
        *self.min_counts.entry(ch).or_insert(0) += 1;
    }
}
