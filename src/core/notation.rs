//! Annotated guess notation
//!
//! - uppercase letter: green
//! - characters between `(` and `)`: yellow, case-insensitive
//! - each `.` marks one following character yellow, so `..ab` makes both yellow
//! - anything else: gray
//!
//! If the hidden word is BROWN, `B(OR)oN` is the annotation for guessing BORON.

use super::feedback::{Classification, ParsedGuess, Token};
use crate::error::{Error, Result};

/// Parse an annotated guess into classified tokens
///
/// Validates marker structure only; length and alphabet are checked when the
/// guess is turned into a constraint.
///
/// # Errors
/// Returns `Error::MalformedGuess` if a `(` opens inside another, a `)` has no
/// opener, a `(` is never closed, or the `.` markers outnumber the characters
/// that follow them, or a `.` appears inside parentheses. Non-ASCII
/// characters are `Error::UnknownCharacter`.
///
/// # Examples
/// ```
/// use wordle_elimination::core::{Classification, parse};
///
/// let parsed = parse("S(ES)an").unwrap();
/// assert_eq!(parsed.tokens()[0].class, Classification::Green);
/// assert_eq!(parsed.tokens()[1].class, Classification::Yellow);
/// assert_eq!(parsed.tokens()[4].class, Classification::Gray);
/// ```
pub fn parse(guess: &str) -> Result<ParsedGuess> {
    let mut tokens = Vec::with_capacity(guess.len());
    let mut in_parens = false;
    let mut dots_pending = 0usize;

    for ch in guess.chars() {
        match ch {
            '(' => {
                if in_parens || dots_pending > 0 {
                    return Err(Error::malformed(guess, "yellow marker opened twice"));
                }
                in_parens = true;
            }
            ')' => {
                if !in_parens {
                    return Err(Error::malformed(guess, "yellow marker closed without opening"));
                }
                in_parens = false;
            }
            '.' => {
                if in_parens {
                    return Err(Error::malformed(guess, "dot marker inside parentheses"));
                }
                dots_pending += 1;
            }
            c if !c.is_ascii() => return Err(Error::unknown_char(c, guess)),
            c => {
                let class = if in_parens || dots_pending > 0 {
                    Classification::Yellow
                } else if c.is_ascii_uppercase() {
                    Classification::Green
                } else {
                    Classification::Gray
                };
                dots_pending = dots_pending.saturating_sub(1);
                tokens.push(Token::new(class, c.to_ascii_lowercase() as u8));
            }
        }
    }

    if in_parens || dots_pending > 0 {
        return Err(Error::malformed(guess, "yellow marker left open"));
    }

    Ok(ParsedGuess::new(tokens))
}

/// Strip markers and case, leaving the plain guessed text
///
/// # Examples
/// ```
/// use wordle_elimination::core::guess_to_word;
///
/// assert_eq!(guess_to_word("B(OR)oN"), "boron");
/// ```
#[must_use]
pub fn guess_to_word(guess: &str) -> String {
    guess
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '.'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
