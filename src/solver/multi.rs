//! Cross-elimination over several simultaneous games
//!
//! Each game is scored independently on its own worker. Results for the same
//! candidate word are then combined: elimination ratios multiply, so a good
//! scouting guess has to eliminate well in every game, and the sets of games
//! the word would solve or is still an option in are unioned.

use super::game::Game;
use crate::cache::MemoCache;
use crate::core::Word;
use crate::error::{Error, Result};
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeSet;
use std::sync::Arc;

/// One candidate word scored against one game
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossElim {
    /// `(eliminated + 1) / options`, or 1.0 when a single option is left
    pub elimination_ratio: f64,
    /// Guessing the word leaves at most one option
    pub solved: bool,
    /// The word is itself an option
    pub option: bool,
}

/// One candidate word scored against several games
#[derive(Debug, Clone, PartialEq)]
pub struct CrossGameElimination<K> {
    pub elimination_ratio: f64,
    pub solved: BTreeSet<K>,
    pub option: BTreeSet<K>,
}

impl<K: Ord> CrossGameElimination<K> {
    fn neutral() -> Self {
        Self {
            elimination_ratio: 1.0,
            solved: BTreeSet::new(),
            option: BTreeSet::new(),
        }
    }

    fn absorb(&mut self, key: K, elim: CrossElim)
    where
        K: Clone,
    {
        self.elimination_ratio *= elim.elimination_ratio;
        if elim.solved {
            self.solved.insert(key.clone());
        }
        if elim.option {
            self.option.insert(key);
        }
    }
}

/// Score `candidates` against one game, in candidate order
///
/// # Errors
/// Returns `Error::EmptyCandidateSet` if the game has no options left, and
/// scoring errors for candidates that do not fit the game.
pub fn eliminate_for_game(
    game: &Game,
    candidates: &[Word],
    cache: Option<Arc<MemoCache>>,
) -> Result<Vec<(Word, CrossElim)>> {
    let options: FxHashSet<Word> = game.options()?.into_iter().collect();
    let mut scorer = game.elimination_scorer()?;
    if let Some(cache) = cache {
        scorer = scorer.with_cache(cache);
    }
    let count = options.len() as f64;

    let scored = candidates
        .par_iter()
        .map(|word| {
            let eliminated = scorer.score(word)?;
            let elimination_ratio = if options.len() == 1 {
                1.0
            } else {
                (eliminated + 1.0) / count
            };
            Ok((
                word.clone(),
                CrossElim {
                    elimination_ratio,
                    solved: eliminated >= count - 1.0,
                    option: options.contains(word),
                },
            ))
        })
        .collect::<Result<Vec<_>>>()?;
    log::debug!("Finished with {} options", options.len());
    Ok(scored)
}

/// Score `words` against every game and combine the results
///
/// Games are evaluated in parallel and combined in key order, so the result
/// depends on neither scheduling nor the order of `games`. Sorted ascending by
/// the number of games the word is an option in, then the number it would
/// solve, then the combined ratio, then the word; the safest strong scouting
/// guesses come last.
///
/// # Errors
/// Returns `Error::WordLengthMismatch` if the games differ in word length, and
/// the errors of `eliminate_for_game`.
pub fn eliminate_across_games<K>(
    games: &[(K, &Game)],
    words: &[Word],
    cache: Option<Arc<MemoCache>>,
) -> Result<Vec<(Word, CrossGameElimination<K>)>>
where
    K: Ord + Clone + Send + Sync,
{
    check_word_lengths(games.iter().map(|(_, game)| *game))?;

    let mut seen = FxHashSet::default();
    let candidates: Vec<Word> = words
        .iter()
        .filter(|w| seen.insert(*w))
        .cloned()
        .collect();

    let mut per_game = games
        .par_iter()
        .map(|(key, game)| {
            eliminate_for_game(game, &candidates, cache.clone()).map(|scored| (key, scored))
        })
        .collect::<Result<Vec<_>>>()?;
    // Float products depend on operand order; combine by game key
    per_game.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut combined: FxHashMap<Word, CrossGameElimination<K>> = candidates
        .iter()
        .map(|w| (w.clone(), CrossGameElimination::neutral()))
        .collect();
    for (key, scored) in per_game {
        for (word, elim) in scored {
            if let Some(entry) = combined.get_mut(&word) {
                entry.absorb(key.clone(), elim);
            }
        }
    }

    let mut ranked: Vec<(Word, CrossGameElimination<K>)> = combined.into_iter().collect();
    ranked.sort_by(|(wa, a), (wb, b)| {
        a.option
            .len()
            .cmp(&b.option.len())
            .then(a.solved.len().cmp(&b.solved.len()))
            .then(a.elimination_ratio.total_cmp(&b.elimination_ratio))
            .then(wa.cmp(wb))
    });
    Ok(ranked)
}

fn check_word_lengths<'a>(games: impl IntoIterator<Item = &'a Game>) -> Result<()> {
    let mut games = games.into_iter();
    let Some(first) = games.next() else {
        return Ok(());
    };
    let expected = first.word_length();
    match games.find(|g| g.word_length() != expected) {
        Some(odd) => Err(Error::WordLengthMismatch {
            expected,
            found: odd.word_length(),
        }),
        None => Ok(()),
    }
}

/// Union of every game's options
///
/// # Errors
/// Returns the errors of `Game::options`.
pub fn all_options(games: &[&Game]) -> Result<BTreeSet<Word>> {
    let mut words = BTreeSet::new();
    for game in games {
        words.extend(game.options()?);
    }
    Ok(words)
}

/// Union of every game's most novel words and leading options
///
/// # Errors
/// Returns the errors of `Game::novel_or_option`.
pub fn all_novel(games: &[&Game], limit: usize) -> Result<BTreeSet<Word>> {
    let mut words = BTreeSet::new();
    for game in games {
        words.extend(game.novel_or_option(limit)?);
    }
    Ok(words)
}

/// The `limit` words with the highest novelty summed over all games
///
/// Ties keep the order of `words`.
///
/// # Errors
/// Returns `Error::EmptyCandidateSet` if any game has no options left.
pub fn best_novelty_across_games<'a>(
    games: &[&Game],
    limit: usize,
    words: impl IntoIterator<Item = &'a Word>,
) -> Result<Vec<Word>> {
    let words: Vec<Word> = words.into_iter().cloned().collect();
    let mut totals = vec![0.0; words.len()];
    for game in games {
        for (total, (_, score)) in totals.iter_mut().zip(game.novelty(&words)?) {
            *total += score;
        }
    }

    let mut scored: Vec<(f64, Word)> = totals.into_iter().zip(words).collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    Ok(scored.into_iter().take(limit).map(|(_, w)| w).collect())
}

/// Where cross-elimination candidates come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidatePool {
    /// The whole word list, or its most novel words when limited
    Universe,
    /// Each game's most novel words and options, ranked by novelty
    Solutions,
    /// Each game's options, ranked by novelty
    Options,
}

impl CandidatePool {
    /// Build the candidate list for `games`
    ///
    /// The universe is the first game's word list. Without a limit, `Universe`
    /// is returned whole and the other pools use the configured default.
    ///
    /// # Errors
    /// Returns `Error::EmptyCandidateSet` if any game has no options left.
    pub fn candidates(self, games: &[&Game], limit: Option<usize>) -> Result<Vec<Word>> {
        let Some(first) = games.first() else {
            return Ok(Vec::new());
        };
        let default_limit = first.config().wordlist_limit;

        match self {
            Self::Universe => match limit {
                None | Some(0) => Ok(first.word_list().words().to_vec()),
                Some(limit) => {
                    best_novelty_across_games(games, limit, first.word_list().words())
                }
            },
            Self::Solutions => {
                let limit = limit.unwrap_or(default_limit);
                best_novelty_across_games(games, limit, &all_novel(games, limit)?)
            }
            Self::Options => {
                let limit = limit.unwrap_or(default_limit);
                best_novelty_across_games(games, limit, &all_options(games)?)
            }
        }
    }
}
