//! Error types for the constraint and scoring engine

use crate::core::WordError;
use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by parsing, constraint construction, filtering and scoring
///
/// None of these are retried internally. Malformed input is reported before any
/// game state is touched; the invariant variants indicate a bug upstream.
#[derive(Error, Debug)]
pub enum Error {
    /// Unbalanced or nested yellow markers in an annotated guess
    #[error("malformed guess '{guess}': {reason}")]
    MalformedGuess { guess: String, reason: &'static str },

    /// Guess or word length differs from the configured word length
    #[error("expected {expected} characters, got {found} in '{text}'")]
    LengthMismatch {
        expected: usize,
        found: usize,
        text: String,
    },

    /// Character that is not part of the working alphabet
    #[error("character '{ch}' in '{text}' is not in the alphabet")]
    UnknownCharacter { ch: char, text: String },

    /// Invalid word text
    #[error("invalid word: {0}")]
    InvalidWord(#[from] WordError),

    /// Invalid alphabet definition
    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),

    /// `merge` was called without any constraint
    #[error("cannot merge zero constraints")]
    EmptyMerge,

    /// Constraints describing words of different lengths were merged
    #[error("cannot merge constraints of length {left} and {right}")]
    ConstraintLengthMismatch { left: usize, right: usize },

    /// A position lost every allowed character
    #[error("no characters are left for position {position}")]
    EmptyPosition { position: usize },

    /// Frequency or elimination scoring over zero candidates
    #[error("cannot score against an empty candidate set")]
    EmptyCandidateSet,

    /// Games with different word lengths passed to the aggregator
    #[error("games must share a word length, found {expected} and {found}")]
    WordLengthMismatch { expected: usize, found: usize },

    /// A word list with no words
    #[error("word list is empty")]
    EmptyWordList,

    /// Confirmed possibility that is not a current candidate
    #[error("'{0}' is not an option")]
    NotAnOption(String),

    /// Word list or memo store I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Memo store (de)serialization failure
    #[error("cache serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl Error {
    /// Create a malformed guess error
    pub fn malformed(guess: impl Into<String>, reason: &'static str) -> Self {
        Self::MalformedGuess {
            guess: guess.into(),
            reason,
        }
    }

    /// Create a length mismatch error
    pub fn length(expected: usize, found: usize, text: impl Into<String>) -> Self {
        Self::LengthMismatch {
            expected,
            found,
            text: text.into(),
        }
    }

    /// Create an unknown character error
    pub fn unknown_char(ch: char, text: impl Into<String>) -> Self {
        Self::UnknownCharacter {
            ch,
            text: text.into(),
        }
    }
}
