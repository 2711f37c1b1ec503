//! Single-guess constraint construction

use super::Constraint;
use crate::core::{Alphabet, CharSet, Classification, ParsedGuess};
use crate::error::{Error, Result};

/// Turns one guess's feedback into a `Constraint`
///
/// Tokens are processed left to right. A gray character is ambiguous on its
/// own: it means "no occurrences beyond those already counted". If the same
/// character was yellow earlier in this guess the known occurrences are all
/// somewhere else, so only this position is ruled out. Otherwise the count is
/// exactly what greens recorded (usually zero) and the character is ruled out
/// everywhere it is not required.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintBuilder {
    alphabet: Alphabet,
    word_length: usize,
}

impl ConstraintBuilder {
    #[must_use]
    pub const fn new(alphabet: Alphabet, word_length: usize) -> Self {
        Self {
            alphabet,
            word_length,
        }
    }

    /// Build the constraint for a single guess
    ///
    /// # Errors
    /// Returns `Error::LengthMismatch` if the guess is not `word_length` long,
    /// and `Error::UnknownCharacter` for characters outside the alphabet.
    pub fn build(&self, guess: &ParsedGuess) -> Result<Constraint> {
        if guess.len() != self.word_length {
            return Err(Error::length(self.word_length, guess.len(), guess.to_string()));
        }
        if let Some(token) = guess
            .tokens()
            .iter()
            .find(|t| !self.alphabet.contains(t.ch))
        {
            return Err(Error::unknown_char(char::from(token.ch), guess.to_string()));
        }

        let mut constraint = Constraint::unconstrained(self.alphabet, self.word_length);
        let mut seen_yellow = CharSet::EMPTY;

        for (i, token) in guess.tokens().iter().enumerate() {
            match token.class {
                Classification::Yellow => {
                    constraint.eliminate(i, token.ch);
                    constraint.bump_min(token.ch);
                    seen_yellow = seen_yellow.with(token.ch);
                }
                Classification::Green => {
                    constraint.require(i, token.ch);
                    constraint.bump_min(token.ch);
                }
                Classification::Gray if seen_yellow.contains(token.ch) => {
                    constraint.eliminate(i, token.ch);
                }
                Classification::Gray => {
                    for position in 0..self.word_length {
                        constraint.eliminate(position, token.ch);
                    }
                }
            }
        }

        Ok(constraint)
    }

    /// Parse annotated notation and build its constraint
    ///
    /// # Errors
    /// Returns parse errors as well as the errors of `build`.
    pub fn build_annotated(&self, guess: &str) -> Result<Constraint> {
        self.build(&crate::core::parse(guess)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(guess: &str) -> Constraint {
        let n = crate::core::guess_to_word(guess).len();
        ConstraintBuilder::new(Alphabet::latin(), n)
            .build_annotated(guess)
            .unwrap()
    }

    fn set(chars: &str) -> CharSet {
        CharSet::from_bytes(chars.as_bytes())
    }

    /// Characters ruled out at `position`
    fn eliminated(constraint: &Constraint, position: usize) -> CharSet {
        Alphabet::latin()
            .chars()
            .difference(constraint.allowed(position))
    }

    #[test]
    fn yellow_then_repeated_yellow() {
        let c = build("S(ES)an");
        assert_eq!(c.word_length(), 5);
        assert_eq!(c.min_count(b's'), 2);
        assert_eq!(c.min_count(b'e'), 1);
        assert_eq!(c.allowed(0), set("s"));
        assert_eq!(eliminated(&c, 1), set("aen"));
        assert_eq!(eliminated(&c, 2), set("asn"));
    }

    #[test]
    fn two_greens_around_yellows() {
        let c = build("S(LO)wS");
        assert_eq!(c.min_count(b's'), 2);
        assert_eq!(c.min_count(b'l'), 1);
        assert_eq!(c.min_count(b'o'), 1);
        assert_eq!(c.allowed(0), set("s"));
        assert_eq!(c.allowed(4), set("s"));
        assert_eq!(eliminated(&c, 1), set("lw"));
        assert_eq!(eliminated(&c, 2), set("ow"));
    }

    #[test]
    fn gray_after_yellow_of_same_letter_is_local() {
        let c = build("S(S)bsd");
        assert_eq!(c.min_count(b's'), 2);
        assert_eq!(eliminated(&c, 1), set("sbd"));
        assert_eq!(eliminated(&c, 2), set("bd"));
        assert_eq!(eliminated(&c, 3), set("sbd"));
        assert_eq!(eliminated(&c, 4), set("bd"));
    }

    #[test]
    fn gray_after_yellow() {
        let c = build("(P)pd");
        assert_eq!(eliminated(&c, 0), set("pd"));
        assert_eq!(eliminated(&c, 1), set("pd"));
        assert_eq!(eliminated(&c, 2), set("d"));
    }

    #[test]
    fn gray_after_green_is_global_except_required() {
        let c = build("Ppd");
        assert_eq!(c.allowed(0), set("p"));
        assert_eq!(eliminated(&c, 1), set("pd"));
        assert_eq!(eliminated(&c, 2), set("pd"));
    }

    #[test]
    fn gray_before_green() {
        let c = build("pPd");
        assert_eq!(eliminated(&c, 0), set("pd"));
        assert_eq!(c.allowed(1), set("p"));
        assert_eq!(eliminated(&c, 2), set("pd"));
    }

    #[test]
    fn yellow_before_green_before_gray() {
        let c = build("(B)Btb");
        assert_eq!(eliminated(&c, 0), set("bt"));
        assert_eq!(c.allowed(1), set("b"));
        assert_eq!(eliminated(&c, 2), set("t"));
        assert_eq!(eliminated(&c, 3), set("bt"));
        assert_eq!(c.min_count(b'b'), 2);
    }

    #[test]
    fn grays_are_not_given_a_minimum() {
        let c = build("S(ES)an");
        assert_eq!(c.min_counts().len(), 2);
        assert!(!c.min_counts().contains_key(&b'a'));
    }

    #[test]
    fn never_eliminates_last_character() {
        let alphabet = Alphabet::new("ab").unwrap();
        let builder = ConstraintBuilder::new(alphabet, 2);
        let c = builder.build_annotated("ab").unwrap();
        // a removes 'a' everywhere, b would then empty both positions
        assert_eq!(c.allowed(0), CharSet::single(b'b'));
        assert_eq!(c.allowed(1), CharSet::single(b'b'));
        for position in 0..2 {
            assert!(!c.allowed(position).is_empty());
        }
    }

    #[test]
    fn every_guess_shape_keeps_positions_non_empty() {
        let alphabet = Alphabet::new("ab").unwrap();
        let builder = ConstraintBuilder::new(alphabet, 3);
        for guess in ["aaa", "AAA", "(aaa)", "(a)Ab", "bAb", "(ab)a", "ab(b)"] {
            let c = builder.build_annotated(guess).unwrap();
            assert!(c.positions().iter().all(|set| !set.is_empty()), "{guess}");
        }
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let builder = ConstraintBuilder::new(Alphabet::latin(), 5);
        assert!(matches!(
            builder.build_annotated("cran"),
            Err(Error::LengthMismatch {
                expected: 5,
                found: 4,
                ..
            })
        ));
    }

    #[test]
    fn unknown_character_is_rejected() {
        let builder = ConstraintBuilder::new(Alphabet::latin(), 5);
        assert!(matches!(
            builder.build_annotated("cr4ne"),
            Err(Error::UnknownCharacter { ch: '4', .. })
        ));
    }
}
