//! Wordle Elimination
//!
//! Constraint derivation and candidate scoring for fixed-length word guessing
//! games. Annotated guesses become an exact positional and count constraint,
//! the constraint filters a word list to the candidates still possible, and
//! next guesses are ranked by positional frequency, letter novelty, and the
//! number of candidates they are expected to eliminate, including across
//! several games played at once.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_elimination::core::{Alphabet, Word, WordList};
//! use wordle_elimination::solver::Game;
//!
//! let list: WordList = ["crane", "crate", "grate", "trace"]
//!     .iter()
//!     .map(|w| Word::new(*w).unwrap())
//!     .collect();
//! let mut game = Game::new(Alphabet::latin(), list).unwrap();
//!
//! // CRANE against a hidden TRACE: C misplaced, N absent, the rest placed
//! game.submit_guess("(C)RAnE").unwrap();
//! let options = game.options().unwrap();
//! assert_eq!(options.len(), 1);
//! assert_eq!(options[0].text(), "trace");
//! ```

// Tuning knobs
pub mod config;

// Error types
pub mod error;

// Core domain types
pub mod core;

// Constraints and candidate filtering
pub mod constraint;

// Frequency and novelty scoring
pub mod scoring;

// Elimination ranking, games and cross-game aggregation
pub mod solver;

// Memoization of expensive scores
pub mod cache;

// Word lists
pub mod wordlists;

// Terminal output formatting
pub mod output;

pub use error::{Error, Result};
