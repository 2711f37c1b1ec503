//! Word representation
//!
//! A Word stores lowercase ASCII text along with its bytes for fast comparison.
//! Length is not fixed here; each game fixes its own word length.

use super::charset::{Alphabet, is_marker};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// A lowercase ASCII word
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word {
    text: Box<str>,
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("word must not be empty")]
    Empty,
    #[error("word must contain only ASCII characters")]
    NonAscii,
    #[error("word contains invalid character '{0}'")]
    InvalidCharacter(char),
}

impl Word {
    /// Create a new Word from a string
    ///
    /// Text is lowercased. Whitespace and notation markers are rejected.
    ///
    /// # Errors
    /// Returns `WordError` if the text is empty, non-ASCII, or contains a
    /// whitespace, control or marker character.
    ///
    /// # Examples
    /// ```
    /// use wordle_elimination::core::Word;
    ///
    /// let word = Word::new("Crane").unwrap();
    /// assert_eq!(word.text(), "crane");
    ///
    /// assert!(Word::new("cr(a)ne").is_err());
    /// assert!(Word::new("").is_err());
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self, WordError> {
        let text: String = text.into().to_lowercase();

        if text.is_empty() {
            return Err(WordError::Empty);
        }

        if !text.is_ascii() {
            return Err(WordError::NonAscii);
        }

        if let Some(bad) = text
            .chars()
            .find(|&c| !c.is_ascii_graphic() || is_marker(c))
        {
            return Err(WordError::InvalidCharacter(bad));
        }

        Ok(Self {
            text: text.into_boxed_str(),
        })
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the word as bytes
    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Number of characters
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Always false; words are never empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Get the character at a specific position
    ///
    /// # Panics
    /// Panics if `position >= self.len()`
    #[inline]
    #[must_use]
    pub fn char_at(&self, position: usize) -> u8 {
        self.bytes()[position]
    }

    /// Count occurrences of `letter`
    #[inline]
    #[must_use]
    pub fn count_of(&self, letter: u8) -> usize {
        self.bytes().iter().filter(|&&b| b == letter).count()
    }

    /// True when every character belongs to `alphabet`
    #[must_use]
    pub fn is_in(&self, alphabet: Alphabet) -> bool {
        self.bytes().iter().all(|&b| alphabet.contains(b))
    }

    /// Get the count of each letter in the word
    ///
    /// Used for feedback calculation with duplicate letters.
    #[inline]
    pub(crate) fn char_counts(&self) -> FxHashMap<u8, usize> {
        let mut counts = FxHashMap::default();
        for &ch in self.bytes() {
            *counts.entry(ch).or_insert(0) += 1;
        }
        counts
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Immutable, shared reference word list
///
/// Built once and shared by every game and worker; cloning is a pointer copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    words: Arc<[Word]>,
}

impl WordList {
    /// Wrap an ordered list of words
    ///
    /// Duplicates are dropped, keeping the first occurrence.
    #[must_use]
    pub fn new(words: impl IntoIterator<Item = Word>) -> Self {
        let mut seen = rustc_hash::FxHashSet::default();
        let words: Vec<Word> = words
            .into_iter()
            .filter(|w| seen.insert(w.clone()))
            .collect();
        Self {
            words: words.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Length of the first word, if any
    #[must_use]
    pub fn word_length(&self) -> Option<usize> {
        self.words.first().map(Word::len)
    }

    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.words.contains(word)
    }
}

impl FromIterator<Word> for WordList {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        Self::new(iter)
    }
}
