//! Positional frequency tables

use crate::config::round_to;
use crate::core::{CharSet, Word};
use crate::error::{Error, Result};
use rustc_hash::FxHashMap;

/// Fraction of candidates having each character at each position
///
/// Each position's entries are ordered by (score, character) ascending. Values
/// are rounded when the table is built, so scores derived from it are stable.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionScores {
    positions: Vec<Vec<(u8, f64)>>,
}

impl PositionScores {
    /// Build the table from a candidate set
    ///
    /// # Errors
    /// Returns `Error::EmptyCandidateSet` if `candidates` is empty.
    ///
    /// # Examples
    /// ```
    /// use wordle_elimination::core::Word;
    /// use wordle_elimination::scoring::PositionScores;
    ///
    /// let words: Vec<Word> = ["crane", "crate", "grate", "trace"]
    ///     .iter()
    ///     .map(|w| Word::new(*w).unwrap())
    ///     .collect();
    /// let scores = PositionScores::from_candidates(&words, 5).unwrap();
    /// assert_eq!(scores.get(0, b'c'), Some(0.5));
    /// assert_eq!(scores.get(4, b'e'), Some(1.0));
    /// assert_eq!(scores.get(0, b'z'), None);
    /// ```
    pub fn from_candidates(candidates: &[Word], decimals: u32) -> Result<Self> {
        if candidates.is_empty() {
            return Err(Error::EmptyCandidateSet);
        }

        let width = candidates.iter().map(Word::len).max().unwrap_or(0);
        let mut counts: Vec<FxHashMap<u8, usize>> = vec![FxHashMap::default(); width];
        for word in candidates {
            for (position, &ch) in word.bytes().iter().enumerate() {
                *counts[position].entry(ch).or_insert(0) += 1;
            }
        }

        let total = candidates.len() as f64;
        let positions = counts
            .into_iter()
            .map(|position| {
                let mut entries: Vec<(u8, f64)> = position
                    .into_iter()
                    .map(|(ch, count)| (ch, round_to(count as f64 / total, decimals)))
                    .collect();
                sort_entries(&mut entries);
                entries
            })
            .collect();

        Ok(Self { positions })
    }

    /// Number of positions in the table
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Score of `ch` at `position`, if any candidate has it there
    #[must_use]
    pub fn get(&self, position: usize, ch: u8) -> Option<f64> {
        self.positions
            .get(position)?
            .iter()
            .find(|&&(c, _)| c == ch)
            .map(|&(_, score)| score)
    }

    /// Entries at `position`, ordered by (score, character)
    #[must_use]
    pub fn position(&self, position: usize) -> &[(u8, f64)] {
        self.positions.get(position).map_or(&[], Vec::as_slice)
    }

    /// Empty every position that only one character can occupy
    #[must_use]
    pub fn without_solved(&self) -> Self {
        let positions = self
            .positions
            .iter()
            .map(|entries| {
                if entries.len() > 1 {
                    entries.clone()
                } else {
                    Vec::new()
                }
            })
            .collect();
        Self { positions }
    }

    /// Replace solved positions with the average score of unsolved letters
    ///
    /// A letter's average is its summed score over the unsolved positions
    /// divided by the word length. Letters already fixed at some position are
    /// left out, so guessing a known letter again earns nothing extra.
    #[must_use]
    pub fn with_solved_as_average(&self) -> Self {
        let solved: CharSet = self
            .positions
            .iter()
            .filter(|entries| entries.len() == 1)
            .map(|entries| entries[0].0)
            .collect();

        let width = self.positions.len() as f64;
        let mut average: FxHashMap<u8, f64> = FxHashMap::default();
        for entries in self.positions.iter().filter(|entries| entries.len() > 1) {
            for &(ch, score) in entries {
                if !solved.contains(ch) {
                    *average.entry(ch).or_insert(0.0) += score / width;
                }
            }
        }
        let mut average: Vec<(u8, f64)> = average.into_iter().collect();
        sort_entries(&mut average);

        let positions = self
            .positions
            .iter()
            .map(|entries| {
                if entries.len() == 1 {
                    average.clone()
                } else {
                    entries.clone()
                }
            })
            .collect();
        Self { positions }
    }
}

fn sort_entries(entries: &mut [(u8, f64)]) {
    entries.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|w| Word::new(*w).unwrap()).collect()
    }

    #[test]
    fn frequencies_are_fractions_of_the_candidate_count() {
        let scores =
            PositionScores::from_candidates(&words(&["crane", "crate", "grate"]), 5).unwrap();
        assert_eq!(scores.len(), 5);
        assert_eq!(scores.get(0, b'c'), Some(0.66667));
        assert_eq!(scores.get(0, b'g'), Some(0.33333));
        assert_eq!(scores.get(1, b'r'), Some(1.0));
        assert_eq!(scores.get(3, b'n'), Some(0.33333));
        assert_eq!(scores.get(3, b'q'), None);
        assert_eq!(scores.get(9, b'c'), None);
    }

    #[test]
    fn entries_are_ordered_by_score_then_character() {
        let scores =
            PositionScores::from_candidates(&words(&["bat", "cat", "hat", "hot"]), 5).unwrap();
        assert_eq!(
            scores.position(0),
            &[(b'b', 0.25), (b'c', 0.25), (b'h', 0.5)]
        );
    }

    #[test]
    fn empty_candidates_is_an_error() {
        assert!(matches!(
            PositionScores::from_candidates(&[], 5),
            Err(Error::EmptyCandidateSet)
        ));
    }

    #[test]
    fn without_solved_empties_single_character_positions() {
        let scores = PositionScores::from_candidates(&words(&["bat", "cat", "hat"]), 5)
            .unwrap()
            .without_solved();
        assert_eq!(scores.position(0).len(), 3);
        assert!(scores.position(1).is_empty());
        assert!(scores.position(2).is_empty());
    }

    #[test]
    fn solved_positions_get_the_unsolved_average() {
        // position 1 is solved as 'a'; positions 0 and 2 are open
        let scores = PositionScores::from_candidates(&words(&["bat", "cab"]), 5)
            .unwrap()
            .with_solved_as_average();
        // b: (0.5 at 0 + 0.5 at 2) / 3, c: 0.5 / 3, t: 0.5 / 3
        let expected_b = 0.5 / 3.0 + 0.5 / 3.0;
        let b = scores.get(1, b'b').unwrap();
        assert!((b - expected_b).abs() < 1e-12);
        assert!((scores.get(1, b'c').unwrap() - 0.5 / 3.0).abs() < 1e-12);
        assert_eq!(scores.get(1, b'a'), None);
        // open positions are untouched
        assert_eq!(scores.get(0, b'b'), Some(0.5));
    }

    #[test]
    fn solved_letters_are_left_out_of_the_average() {
        // 'a' is solved at 1 and also appears at 2 in one word
        let scores = PositionScores::from_candidates(&words(&["bat", "caa"]), 5)
            .unwrap()
            .with_solved_as_average();
        assert_eq!(scores.get(1, b'a'), None);
        assert!(scores.get(1, b't').is_some());
    }
}
