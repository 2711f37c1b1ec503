//! One puzzle session
//!
//! A `Game` owns the guesses made so far and re-derives everything else from
//! them on every query: the constraint, the remaining options, and all the
//! rankings. Nothing derived is stored, so a query always reflects the
//! current guesses.

use super::elimination::EliminationScorer;
use crate::cache::MemoCache;
use crate::config::SolverConfig;
use crate::constraint::{Constraint, ConstraintBuilder};
use crate::core::{Alphabet, ParsedGuess, Word, WordList, answer, guess_to_word, parse};
use crate::error::{Error, Result};
use crate::scoring::{
    NoveltyScorer, PositionScores, PositionalScorer, Scorer, best_next_score,
};
use rand::Rng;
use rand::prelude::IndexedRandom;
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Progress of a game, derived from its guesses and options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// No guesses yet
    Empty,
    /// Guesses made, more than one option left
    InProgress,
    /// One option left, or a full-length all-green guess recorded
    Solved,
}

/// A candidate guess ranked by expected elimination
#[derive(Debug, Clone, PartialEq)]
pub struct WordElimination {
    pub elimination_score: f64,
    pub novelty_score: f64,
    pub is_possible_solution: bool,
    pub word: Word,
}

/// Session state for one puzzle
#[derive(Debug, Clone)]
pub struct Game {
    word_length: usize,
    alphabet: Alphabet,
    word_list: WordList,
    guesses: Vec<ParsedGuess>,
    ignored: FxHashSet<Word>,
    possibilities: Vec<Word>,
    solution: Option<Word>,
    config: SolverConfig,
}

impl Game {
    /// Start a game over `word_list`, taking the word length from its words
    ///
    /// # Errors
    /// Returns `Error::EmptyWordList` for a list without words and
    /// `Error::WordLengthMismatch` if the words differ in length, and
    /// `Error::UnknownCharacter` for a word using characters outside `alphabet`.
    pub fn new(alphabet: Alphabet, word_list: WordList) -> Result<Self> {
        let word_length = word_list.word_length().ok_or(Error::EmptyWordList)?;
        if let Some(odd) = word_list.words().iter().find(|w| w.len() != word_length) {
            return Err(Error::WordLengthMismatch {
                expected: word_length,
                found: odd.len(),
            });
        }
        if let Some(foreign) = word_list.words().iter().find(|w| !w.is_in(alphabet)) {
            let ch = foreign
                .bytes()
                .iter()
                .find(|&&b| !alphabet.contains(b))
                .map_or('?', |&b| char::from(b));
            return Err(Error::unknown_char(ch, foreign.text()));
        }
        Ok(Self {
            word_length,
            alphabet,
            word_list,
            guesses: Vec::new(),
            ignored: FxHashSet::default(),
            possibilities: Vec::new(),
            solution: None,
            config: SolverConfig::default(),
        })
    }

    #[must_use]
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    #[must_use]
    pub fn word_length(&self) -> usize {
        self.word_length
    }

    #[inline]
    #[must_use]
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    #[inline]
    #[must_use]
    pub fn word_list(&self) -> &WordList {
        &self.word_list
    }

    #[inline]
    #[must_use]
    pub fn guesses(&self) -> &[ParsedGuess] {
        &self.guesses
    }

    #[inline]
    #[must_use]
    pub fn solution(&self) -> Option<&Word> {
        self.solution.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    #[must_use]
    pub fn is_ignored(&self, word: &Word) -> bool {
        self.ignored.contains(word)
    }

    /// Record a guess
    ///
    /// With a known solution the input is a plain word and its feedback is
    /// computed; otherwise it is annotated notation. Submitting a guess that is
    /// already recorded changes nothing. An all-green guess is also confirmed
    /// as a possibility.
    ///
    /// Returns the guess as recorded.
    ///
    /// # Errors
    /// Returns parse, length and alphabet errors. The game is unchanged on error.
    ///
    /// # Examples
    /// ```
    /// use wordle_elimination::core::{Alphabet, Word, WordList};
    /// use wordle_elimination::solver::{Game, GameState};
    ///
    /// let list: WordList = ["crane", "crate", "grate"]
    ///     .iter()
    ///     .map(|w| Word::new(*w).unwrap())
    ///     .collect();
    /// let mut game = Game::new(Alphabet::latin(), list).unwrap();
    /// game.submit_guess("cRATE").unwrap();
    /// assert_eq!(game.options().unwrap().len(), 1);
    /// assert_eq!(game.state().unwrap(), GameState::Solved);
    /// ```
    pub fn submit_guess(&mut self, input: &str) -> Result<ParsedGuess> {
        let guess = match &self.solution {
            Some(solution) => {
                let word = Word::new(guess_to_word(input))?;
                if word.len() != self.word_length {
                    return Err(Error::length(self.word_length, word.len(), input));
                }
                answer(solution, &word)?
            }
            None => parse(input)?,
        };
        ConstraintBuilder::new(self.alphabet, self.word_length).build(&guess)?;

        if self.guesses.contains(&guess) {
            log::debug!("Guess {guess} already recorded");
            return Ok(guess);
        }
        self.guesses.push(guess.clone());

        if guess.is_all_green() {
            let word = Word::new(guess.word_text())?;
            if !self.possibilities.contains(&word) {
                self.possibilities.push(word);
            }
            log::info!("Solved with {}", guess.word_text());
        }
        Ok(guess)
    }

    /// Remove up to `count` of the most recent guesses, returning them
    pub fn pop_guesses(&mut self, count: usize) -> Vec<ParsedGuess> {
        let keep = self.guesses.len().saturating_sub(count);
        self.guesses.split_off(keep)
    }

    /// Exclude words from the options
    pub fn ignore(&mut self, words: impl IntoIterator<Item = Word>) {
        self.ignored.extend(words);
    }

    /// Mark a current option as a word the player has considered
    ///
    /// # Errors
    /// Returns `Error::NotAnOption` if `word` is not a current option.
    pub fn confirm_possibility(&mut self, word: Word) -> Result<()> {
        if !self.options()?.contains(&word) {
            return Err(Error::NotAnOption(word.text().to_string()));
        }
        if !self.possibilities.contains(&word) {
            self.possibilities.push(word);
        }
        Ok(())
    }

    /// Confirmed possibilities that are still options
    ///
    /// # Errors
    /// Returns the errors of `options`.
    pub fn possibilities(&self) -> Result<Vec<Word>> {
        let options: FxHashSet<Word> = self.options()?.into_iter().collect();
        Ok(self
            .possibilities
            .iter()
            .filter(|w| options.contains(*w))
            .cloned()
            .collect())
    }

    /// Forget guesses, ignored words, possibilities and the solution
    ///
    /// Word list, alphabet and word length are kept.
    pub fn reset(&mut self) {
        self.guesses.clear();
        self.ignored.clear();
        self.possibilities.clear();
        self.solution = None;
    }

    /// Fix the hidden word, switching submission to plain words
    ///
    /// # Errors
    /// Returns `Error::LengthMismatch` if the word has the wrong length.
    pub fn set_solution(&mut self, solution: Word) -> Result<()> {
        if solution.len() != self.word_length {
            return Err(Error::length(
                self.word_length,
                solution.len(),
                solution.text(),
            ));
        }
        self.solution = Some(solution);
        Ok(())
    }

    /// Pick a random hidden word for practice
    ///
    /// Chooses from `solutions` when given, otherwise from the word list.
    ///
    /// # Errors
    /// Returns `Error::EmptyWordList` if there is no word of the right length
    /// to choose from.
    pub fn start_practice<R: Rng + ?Sized>(
        &mut self,
        solutions: &[Word],
        rng: &mut R,
    ) -> Result<&Word> {
        let pool: Vec<&Word> = if solutions.is_empty() {
            self.word_list.words().iter().collect()
        } else {
            solutions
                .iter()
                .filter(|w| w.len() == self.word_length)
                .collect()
        };
        let chosen = (*pool.choose(rng).ok_or(Error::EmptyWordList)?).clone();
        Ok(self.solution.insert(chosen))
    }

    /// Constraint implied by the guesses so far
    ///
    /// # Errors
    /// Returns constraint construction errors; guesses are validated on
    /// submission, so this only fails on a bug.
    pub fn constraint(&self) -> Result<Constraint> {
        Constraint::from_guesses(&self.guesses, self.alphabet, self.word_length)
    }

    /// Words of the list consistent with the guesses, minus ignored words
    ///
    /// # Errors
    /// Returns the errors of `constraint` and of compiling it.
    pub fn options(&self) -> Result<Vec<Word>> {
        let filter = self.constraint()?.compile()?;
        Ok(self
            .word_list
            .words()
            .iter()
            .filter(|w| !self.ignored.contains(*w) && filter.matches(w))
            .cloned()
            .collect())
    }

    /// Current progress
    ///
    /// # Errors
    /// Returns the errors of `options`.
    pub fn state(&self) -> Result<GameState> {
        if self.guesses.is_empty() {
            return Ok(GameState::Empty);
        }
        let full_green = self
            .guesses
            .iter()
            .any(|g| g.is_all_green() && g.len() == self.word_length);
        if full_green || self.options()?.len() == 1 {
            Ok(GameState::Solved)
        } else {
            Ok(GameState::InProgress)
        }
    }

    /// # Errors
    /// Returns the errors of `options`.
    pub fn is_solved(&self) -> Result<bool> {
        Ok(self.state()? == GameState::Solved)
    }

    /// Guesses in canonical notation, once the game is solved
    ///
    /// The caller appends this to its played-game log.
    ///
    /// # Errors
    /// Returns the errors of `options`.
    pub fn solved_log(&self) -> Result<Option<Vec<String>>> {
        if !self.is_solved()? {
            return Ok(None);
        }
        Ok(Some(self.guesses.iter().map(ToString::to_string).collect()))
    }

    /// Letters still possible somewhere, uppercase and sorted
    ///
    /// # Errors
    /// Returns the errors of `constraint`.
    pub fn letters(&self) -> Result<String> {
        Ok(self
            .constraint()?
            .letters()
            .iter()
            .map(|ch| char::from(ch).to_ascii_uppercase())
            .collect())
    }

    /// Plain words of the guesses so far
    fn guess_words(&self) -> Result<Vec<Word>> {
        self.guesses
            .iter()
            .map(|g| Word::new(g.word_text()).map_err(Error::from))
            .collect()
    }

    /// Positional frequency table of the current options
    ///
    /// # Errors
    /// Returns `Error::EmptyCandidateSet` when no option is left.
    pub fn position_scores(&self) -> Result<PositionScores> {
        PositionScores::from_candidates(&self.options()?, self.config.frequency_decimals)
    }

    /// Options ranked by positional score together with the guesses so far
    ///
    /// # Errors
    /// Returns `Error::EmptyCandidateSet` when no option is left.
    pub fn best_options(&self) -> Result<Vec<(f64, Word)>> {
        let options = self.options()?;
        let scorer = PositionalScorer::new(
            PositionScores::from_candidates(&options, self.config.frequency_decimals)?,
            self.config.score_decimals,
        );
        Ok(best_next_score(&options, &self.guess_words()?, &scorer))
    }

    fn novelty_scorer(&self) -> Result<NoveltyScorer> {
        Ok(NoveltyScorer::new(
            self.position_scores()?.with_solved_as_average(),
            self.config.score_decimals,
        ))
    }

    /// Novelty of each word after the guesses so far
    ///
    /// # Errors
    /// Returns `Error::EmptyCandidateSet` when no option is left.
    pub fn novelty(&self, words: &[Word]) -> Result<Vec<(Word, f64)>> {
        let scorer = self.novelty_scorer()?;
        let guessed = self.guess_words()?;
        Ok(words
            .iter()
            .map(|w| (w.clone(), scorer.score(guessed.iter().chain([w]))))
            .collect())
    }

    /// Words ranked ascending by novelty after the guesses so far
    ///
    /// Ranks `words`, or the whole word list when empty; ignored words are
    /// skipped either way.
    ///
    /// # Errors
    /// Returns `Error::EmptyCandidateSet` when no option is left.
    pub fn best_novelty(&self, words: &[Word]) -> Result<Vec<(f64, Word)>> {
        let source = if words.is_empty() {
            self.word_list.words()
        } else {
            words
        };
        let pool: Vec<Word> = source
            .iter()
            .filter(|w| !self.ignored.contains(*w))
            .cloned()
            .collect();
        Ok(best_next_score(
            &pool,
            &self.guess_words()?,
            &self.novelty_scorer()?,
        ))
    }

    /// The `limit` most novel words plus the first `limit` options
    ///
    /// # Errors
    /// Returns `Error::EmptyCandidateSet` when no option is left.
    pub fn novel_or_option(&self, limit: usize) -> Result<BTreeSet<Word>> {
        let ranked = self.best_novelty(&[])?;
        let novel = ranked
            .into_iter()
            .rev()
            .take(limit)
            .map(|(_, word)| word);
        Ok(novel.chain(self.options()?.into_iter().take(limit)).collect())
    }

    /// Elimination scorer over the current options
    ///
    /// # Errors
    /// Returns `Error::EmptyCandidateSet` when no option is left.
    pub fn elimination_scorer(&self) -> Result<EliminationScorer> {
        EliminationScorer::new(&self.options()?, self.alphabet, &self.guesses, &self.config)
    }

    /// Rank `words` by expected elimination over the current options
    ///
    /// Sorted ascending by elimination score, then by whether the word is
    /// still an option, then by novelty; the strongest choices come last.
    ///
    /// # Errors
    /// Returns `Error::EmptyCandidateSet` when no option is left, and scoring
    /// errors for words that do not fit the game.
    pub fn best_elimination(
        &self,
        words: &[Word],
        cache: Option<Arc<MemoCache>>,
    ) -> Result<Vec<WordElimination>> {
        let options: FxHashSet<Word> = self.options()?.into_iter().collect();
        let mut scorer = self.elimination_scorer()?;
        if let Some(cache) = cache {
            scorer = scorer.with_cache(cache);
        }
        let novelty = self.novelty_scorer()?;
        let guessed = self.guess_words()?;

        let mut ranked: Vec<WordElimination> = scorer
            .rank(words)?
            .into_iter()
            .map(|(elimination_score, word)| WordElimination {
                elimination_score,
                novelty_score: novelty.score(guessed.iter().chain([&word])),
                is_possible_solution: options.contains(&word),
                word,
            })
            .collect();
        ranked.sort_by(|a, b| {
            a.elimination_score
                .total_cmp(&b.elimination_score)
                .then(a.is_possible_solution.cmp(&b.is_possible_solution))
                .then(a.novelty_score.total_cmp(&b.novelty_score))
        });
        Ok(ranked)
    }

    /// Explore a partial pattern over the current options
    ///
    /// Options already confirmed as possibilities are shown in full. If the
    /// result is a single option shown in full, it is confirmed.
    ///
    /// # Errors
    /// Returns the errors of `options`.
    pub fn explore(&mut self, idea: &str, reveal: bool) -> Result<Vec<String>> {
        let options = self.options()?;
        let found = explore(&options, idea, &self.possibilities, reveal);
        if let [only] = found.as_slice()
            && let Some(word) = options.iter().find(|w| w.text() == only)
            && !self.possibilities.contains(word)
        {
            log::info!("Exploring {idea} found {only}");
            self.possibilities.push(word.clone());
        }
        Ok(found)
    }

    /// True when `idea` contains every letter the guesses proved present
    ///
    /// # Errors
    /// Returns the errors of `constraint`.
    pub fn passes_known_letters(&self, idea: &str) -> Result<bool> {
        let idea = idea.to_ascii_lowercase();
        Ok(self
            .constraint()?
            .min_counts()
            .iter()
            .filter(|&(_, &count)| count > 0)
            .all(|(&ch, _)| idea.as_bytes().contains(&ch)))
    }
}

/// Match a partial pattern against `options`
///
/// `idea` is padded with `.` to the word length; a `.` matches any character.
/// Each matching option yields its full text if it is in `already_explored`
/// or `reveal` is set, and the padded pattern otherwise.
///
/// # Examples
/// ```
/// use wordle_elimination::core::Word;
/// use wordle_elimination::solver::explore;
///
/// let options: Vec<Word> = ["crane", "crate", "grate"]
///     .iter()
///     .map(|w| Word::new(*w).unwrap())
///     .collect();
/// assert_eq!(explore(&options, "cr", &[], false), vec!["cr...", "cr..."]);
/// assert_eq!(explore(&options, "g", &[], true), vec!["grate"]);
/// ```
#[must_use]
pub fn explore(
    options: &[Word],
    idea: &str,
    already_explored: &[Word],
    reveal: bool,
) -> Vec<String> {
    let Some(first) = options.first() else {
        return Vec::new();
    };
    let mut pattern: Vec<u8> = idea.to_ascii_lowercase().into_bytes();
    if pattern.len() < first.len() {
        pattern.resize(first.len(), b'.');
    }

    options
        .iter()
        .filter_map(|word| {
            let mut matched = String::with_capacity(word.len());
            for (&ch, &want) in word.bytes().iter().zip(&pattern) {
                if want != b'.' && want != ch {
                    return None;
                }
                matched.push(char::from(want));
            }
            if matched.is_empty() {
                None
            } else if reveal || already_explored.contains(word) {
                Some(word.text().to_string())
            } else {
                Some(matched)
            }
        })
        .collect()
}
