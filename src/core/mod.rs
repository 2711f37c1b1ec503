//! Core domain types
//!
//! Words, alphabets, character sets and per-character feedback. Everything here
//! is pure and independent of any particular game.

mod charset;
mod feedback;
mod notation;
mod word;

pub use charset::{Alphabet, CharSet};
pub use feedback::{Classification, ParsedGuess, Token, answer};
pub use notation::{guess_to_word, parse};
pub use word::{Word, WordError, WordList};
