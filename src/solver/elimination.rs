//! Expected elimination of a hypothetical guess
//!
//! Every remaining candidate is treated as an equally likely solution. For
//! each one, the feedback the guess would receive is synthesized with
//! `answer`, merged with the guesses already made, and the remaining set is
//! filtered again. The score is the average number of candidates ruled out.

use crate::cache::{CacheKey, MemoCache};
use crate::config::{SolverConfig, round_to};
use crate::constraint::{Constraint, ConstraintBuilder};
use crate::core::{Alphabet, ParsedGuess, Word, answer};
use crate::error::{Error, Result};
use rayon::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const SCORER_ID: &str = "elimination";

/// Scores guesses by how many remaining candidates they are expected to rule out
#[derive(Debug)]
pub struct EliminationScorer {
    remaining: Vec<Word>,
    builder: ConstraintBuilder,
    /// One unresolved constraint per existing guess
    history: Vec<Constraint>,
    decimals: u32,
    key: CacheKey,
    bypass_cache: bool,
    cache: Option<Arc<MemoCache>>,
}

impl EliminationScorer {
    /// Prepare scoring against `remaining`, given the guesses made so far
    ///
    /// # Errors
    /// Returns `Error::EmptyCandidateSet` if `remaining` is empty, and the
    /// constraint errors of any guess that does not fit the word length or
    /// alphabet.
    pub fn new(
        remaining: &[Word],
        alphabet: Alphabet,
        guesses: &[ParsedGuess],
        config: &SolverConfig,
    ) -> Result<Self> {
        let word_length = remaining.first().ok_or(Error::EmptyCandidateSet)?.len();
        let builder = ConstraintBuilder::new(alphabet, word_length);

        let history = guesses
            .iter()
            .map(|guess| builder.build(guess))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            key: CacheKey::new(SCORER_ID, word_length, alphabet, guesses, remaining, "")
                .with_decimals(config.score_decimals),
            remaining: remaining.to_vec(),
            builder,
            history,
            decimals: config.score_decimals,
            bypass_cache: remaining.len() <= config.cache_bypass_threshold,
            cache: None,
        })
    }

    /// Memoize scores in `cache`
    ///
    /// Small remaining sets are cheaper to recompute than to look up, so the
    /// cache is not consulted for them.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<MemoCache>) -> Self {
        if self.bypass_cache {
            log::debug!(
                "Bypassing memo cache for {} remaining options",
                self.remaining.len()
            );
        } else {
            self.cache = Some(cache);
        }
        self
    }

    #[must_use]
    pub fn remaining(&self) -> &[Word] {
        &self.remaining
    }

    /// Average number of remaining candidates that guessing `word` rules out
    ///
    /// Guessing the solution itself rules out everything. The result lies in
    /// `[0, |R|]`.
    ///
    /// # Errors
    /// Returns an error if `word` does not fit the word length or alphabet.
    ///
    /// # Examples
    /// ```
    /// use wordle_elimination::config::SolverConfig;
    /// use wordle_elimination::core::{Alphabet, Word};
    /// use wordle_elimination::solver::EliminationScorer;
    ///
    /// let remaining: Vec<Word> = ["crane", "crate", "grate"]
    ///     .iter()
    ///     .map(|w| Word::new(*w).unwrap())
    ///     .collect();
    /// let scorer =
    ///     EliminationScorer::new(&remaining, Alphabet::latin(), &[], &SolverConfig::default())
    ///         .unwrap();
    /// let score = scorer.score(&Word::new("crate").unwrap()).unwrap();
    /// assert!(score > 0.0 && score <= 3.0);
    /// ```
    pub fn score(&self, word: &Word) -> Result<f64> {
        match &self.cache {
            Some(cache) => {
                cache.get_or_compute(&self.key.with_argument(word.text()), || self.compute(word))
            }
            None => self.compute(word),
        }
    }

    /// `score` divided by the number of remaining candidates, in `[0, 1]`
    ///
    /// # Errors
    /// Same as `score`.
    pub fn fraction(&self, word: &Word) -> Result<f64> {
        let score = self.score(word)?;
        Ok(round_to(score / self.remaining.len() as f64, self.decimals))
    }

    /// Candidates left if `solution` were the hidden word and `word` were guessed
    ///
    /// # Errors
    /// Returns an error if `word` does not fit the word length or alphabet.
    pub fn left_after(&self, solution: &Word, word: &Word) -> Result<usize> {
        if solution == word {
            return Ok(0);
        }
        let feedback = answer(solution, word)?;
        let mut all = Vec::with_capacity(self.history.len() + 1);
        all.extend(self.history.iter().cloned());
        all.push(self.builder.build(&feedback)?);
        let constraint = Constraint::merge(&all)?.resolve();
        Ok(constraint.compile()?.count(&self.remaining))
    }

    fn compute(&self, word: &Word) -> Result<f64> {
        let total = self.remaining.len();
        let mut eliminated = 0;
        for solution in &self.remaining {
            eliminated += total - self.left_after(solution, word)?;
        }
        Ok(round_to(eliminated as f64 / total as f64, self.decimals))
    }

    /// Score every word, in parallel
    ///
    /// Returns (score, word) pairs sorted ascending by score; ties keep the
    /// order of `words`, so the output does not depend on scheduling.
    ///
    /// # Errors
    /// Returns the first scoring error encountered.
    pub fn rank(&self, words: &[Word]) -> Result<Vec<(f64, Word)>> {
        log::debug!(
            "Ranking {} words against {} options",
            words.len(),
            self.remaining.len()
        );
        let done = AtomicUsize::new(0);
        let mut scored = words
            .par_iter()
            .map(|word| {
                let score = self.score(word)?;
                let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                if finished % 1000 == 0 {
                    log::debug!(
                        "{} words left against {} options",
                        words.len() - finished,
                        self.remaining.len()
                    );
                }
                Ok((score, word.clone()))
            })
            .collect::<Result<Vec<_>>>()?;
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));
        log::debug!("Finished with {} options", self.remaining.len());
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|w| Word::new(*w).unwrap()).collect()
    }

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    fn scorer(remaining: &[&str], guesses: &[&str]) -> EliminationScorer {
        let parsed: Vec<_> = guesses.iter().map(|g| parse(g).unwrap()).collect();
        EliminationScorer::new(
            &words(remaining),
            Alphabet::latin(),
            &parsed,
            &SolverConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn trace_against_three_candidates() {
        let s = scorer(&["crane", "crate", "grate"], &[]);
        let trace = word("trace");
        // each hypothetical solution leaves only itself
        assert_eq!(s.left_after(&word("crane"), &trace).unwrap(), 1);
        assert_eq!(s.left_after(&word("crate"), &trace).unwrap(), 1);
        assert_eq!(s.left_after(&word("grate"), &trace).unwrap(), 1);
        assert_eq!(s.score(&trace).unwrap(), 2.0);
        assert_eq!(s.fraction(&trace).unwrap(), 0.667);
    }

    #[test]
    fn guessing_a_candidate_counts_it_as_fully_eliminated() {
        let s = scorer(&["crane", "crate", "grate"], &[]);
        assert_eq!(s.left_after(&word("crate"), &word("crate")).unwrap(), 0);
        // crate: crane -> 1 left, crate -> 0, grate -> 1
        assert_eq!(s.score(&word("crate")).unwrap(), 2.333);
    }

    #[test]
    fn uninformative_guess_scores_zero() {
        let s = scorer(&["crane", "crate", "grate"], &[]);
        // every letter of xylyl is absent everywhere: nothing is ruled out
        assert_eq!(s.score(&word("xylyl")).unwrap(), 0.0);
    }

    #[test]
    fn existing_guesses_are_merged_into_each_hypothesis() {
        let s = scorer(&["crate", "grate", "irate"], &["xxATE"]);
        // c rules g and i in or out together with the guess history
        let score = s.score(&word("cigar")).unwrap();
        assert!(score > 0.0);
        assert!(s.fraction(&word("cigar")).unwrap() <= 1.0);
    }

    #[test]
    fn fraction_of_candidates_stays_in_unit_interval() {
        let remaining = ["crane", "crate", "grate", "trace", "slate", "plate"];
        let s = scorer(&remaining, &[]);
        for candidate in words(&remaining) {
            let fraction = s.fraction(&candidate).unwrap();
            assert!((0.0..=1.0).contains(&fraction), "{candidate}: {fraction}");
        }
    }

    #[test]
    fn rank_is_sorted_and_complete() {
        let s = scorer(&["crane", "crate", "grate"], &[]);
        let pool = words(&["xylyl", "trace", "crate", "grate"]);
        let ranked = s.rank(&pool).unwrap();
        assert_eq!(ranked.len(), 4);
        assert_eq!(ranked[0].1.text(), "xylyl");
        assert!(ranked.windows(2).all(|w| w[0].0 <= w[1].0));
    }

    #[test]
    fn empty_remaining_is_an_error() {
        let result = EliminationScorer::new(&[], Alphabet::latin(), &[], &SolverConfig::default());
        assert!(matches!(result, Err(Error::EmptyCandidateSet)));
    }

    #[test]
    fn wrong_length_word_is_an_error() {
        let s = scorer(&["crane", "crate"], &[]);
        assert!(s.score(&word("cranes")).is_err());
    }

    #[test]
    fn cache_is_used_above_the_bypass_threshold() {
        let remaining = words(&["crane", "crate", "grate"]);
        let config = SolverConfig {
            cache_bypass_threshold: 2,
            ..SolverConfig::default()
        };
        let cache = Arc::new(MemoCache::in_memory());
        let s = EliminationScorer::new(&remaining, Alphabet::latin(), &[], &config)
            .unwrap()
            .with_cache(Arc::clone(&cache));

        let first = s.score(&word("trace")).unwrap();
        let second = s.score(&word("trace")).unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.lookups(), 2);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn rounding_is_part_of_the_cache_key() {
        let remaining = words(&["crane", "crate", "grate"]);
        let cache = Arc::new(MemoCache::in_memory());
        let scorer_with = |score_decimals| {
            let config = SolverConfig {
                cache_bypass_threshold: 2,
                score_decimals,
                ..SolverConfig::default()
            };
            EliminationScorer::new(&remaining, Alphabet::latin(), &[], &config)
                .unwrap()
                .with_cache(Arc::clone(&cache))
        };

        assert_eq!(scorer_with(3).score(&word("crate")).unwrap(), 2.333);
        assert_eq!(scorer_with(1).score(&word("crate")).unwrap(), 2.3);
        assert_eq!(cache.hits(), 0);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn hypotheses_merge_with_contradictory_history_in_any_order() {
        let remaining = ["crate", "grate", "irate"];
        let forward = scorer(&remaining, &["Cxxxx", "Gxxxx", "Cyyyy"]);
        let backward = scorer(&remaining, &["Cyyyy", "Gxxxx", "Cxxxx"]);
        for candidate in words(&["trace", "cigar", "irate"]) {
            assert_eq!(
                forward.score(&candidate).unwrap(),
                backward.score(&candidate).unwrap(),
                "{candidate}"
            );
        }
    }

    #[test]
    fn small_sets_bypass_the_cache() {
        let cache = Arc::new(MemoCache::in_memory());
        let s = scorer(&["crane", "crate", "grate"], &[]).with_cache(Arc::clone(&cache));
        s.score(&word("trace")).unwrap();
        assert_eq!(cache.lookups(), 0);
    }
}
