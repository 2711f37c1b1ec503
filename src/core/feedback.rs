//! Per-character guess feedback
//!
//! A `ParsedGuess` is the ordered list of (classification, character) pairs for
//! one guess. It is produced either by parsing annotated notation typed by a
//! player or by `answer`, which computes the feedback a hidden solution gives.

use super::Word;
use crate::error::{Error, Result};
use std::fmt;

/// Feedback for one guessed character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Classification {
    /// Character is at this exact position
    Green,
    /// Character is in the word, but not here
    Yellow,
    /// No further occurrences beyond those already accounted for
    Gray,
}

/// One classified character of a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub class: Classification,
    pub ch: u8,
}

impl Token {
    #[must_use]
    pub const fn new(class: Classification, ch: u8) -> Self {
        Self { class, ch }
    }
}

/// A guess with its feedback, one token per position
///
/// `Display` renders the canonical annotated notation: greens uppercase,
/// runs of yellows inside parentheses, grays lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedGuess {
    tokens: Vec<Token>,
}

impl ParsedGuess {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    #[inline]
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The guessed text without feedback
    #[must_use]
    pub fn word_text(&self) -> String {
        self.tokens.iter().map(|t| char::from(t.ch)).collect()
    }

    /// True when every position is green
    #[must_use]
    pub fn is_all_green(&self) -> bool {
        !self.tokens.is_empty()
            && self
                .tokens
                .iter()
                .all(|t| t.class == Classification::Green)
    }

    /// Count tokens with the given classification
    #[must_use]
    pub fn count(&self, class: Classification) -> usize {
        self.tokens.iter().filter(|t| t.class == class).count()
    }
}

impl fmt::Display for ParsedGuess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut in_yellow = false;
        for token in &self.tokens {
            let ch = char::from(token.ch);
            match token.class {
                Classification::Yellow => {
                    if !in_yellow {
                        write!(f, "(")?;
                        in_yellow = true;
                    }
                    write!(f, "{}", ch.to_ascii_uppercase())?;
                }
                class => {
                    if in_yellow {
                        write!(f, ")")?;
                        in_yellow = false;
                    }
                    if class == Classification::Green {
                        write!(f, "{}", ch.to_ascii_uppercase())?;
                    } else {
                        write!(f, "{ch}")?;
                    }
                }
            }
        }
        if in_yellow {
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// Feedback produced by guessing `guess` when the hidden word is `solution`
///
/// Greens are marked first and removed from the solution's letter budget;
/// remaining guess characters are then yellow, left to right, while the
/// budget for that letter lasts, and gray afterwards.
///
/// # Errors
/// Returns `Error::LengthMismatch` if the words differ in length.
///
/// # Examples
/// ```
/// use wordle_elimination::core::{Word, answer};
///
/// let solution = Word::new("abide").unwrap();
/// let guess = Word::new("probe").unwrap();
/// assert_eq!(answer(&solution, &guess).unwrap().to_string(), "pro(B)E");
/// ```
pub fn answer(solution: &Word, guess: &Word) -> Result<ParsedGuess> {
    if solution.len() != guess.len() {
        return Err(Error::length(solution.len(), guess.len(), guess.text()));
    }

    let mut available = solution.char_counts();
    let mut classes = vec![Classification::Gray; guess.len()];

    // First pass: greens consume budget regardless of position order
    for (i, (&g, &s)) in guess.bytes().iter().zip(solution.bytes()).enumerate() {
        if g == s {
            classes[i] = Classification::Green;
            if let Some(count) = available.get_mut(&g) {
                *count = count.saturating_sub(1);
            }
        }
    }

    // Second pass: yellows from what is left, left to right
    for (i, &g) in guess.bytes().iter().enumerate() {
        if classes[i] == Classification::Green {
            continue;
        }
        if let Some(count) = available.get_mut(&g)
            && *count > 0
        {
            classes[i] = Classification::Yellow;
            *count -= 1;
        }
    }

    Ok(ParsedGuess::new(
        classes
            .into_iter()
            .zip(guess.bytes())
            .map(|(class, &ch)| Token::new(class, ch))
            .collect(),
    ))
}
