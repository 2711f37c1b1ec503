//! Character sets over ASCII
//!
//! A `CharSet` is a 128-bit mask, one bit per ASCII code point. Allowed sets per
//! position and the working alphabet are both `CharSet`s, so intersection,
//! union and membership are single instructions.

use crate::error::{Error, Result};
use std::fmt;

/// Set of ASCII characters
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharSet(u128);

impl CharSet {
    /// The empty set
    pub const EMPTY: Self = Self(0);

    /// Set containing exactly `ch`
    #[inline]
    #[must_use]
    pub const fn single(ch: u8) -> Self {
        debug_assert!(ch < 128, "CharSet only holds ASCII");
        Self(1 << ch)
    }

    /// Build a set from bytes; non-ASCII bytes are ignored
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        bytes
            .iter()
            .filter(|b| b.is_ascii())
            .fold(Self::EMPTY, |set, &b| set.with(b))
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, ch: u8) -> bool {
        ch < 128 && self.0 & (1 << ch) != 0
    }

    #[inline]
    #[must_use]
    pub const fn with(self, ch: u8) -> Self {
        Self(self.0 | (1 << ch))
    }

    #[inline]
    #[must_use]
    pub const fn without(self, ch: u8) -> Self {
        Self(self.0 & !(1 << ch))
    }

    #[inline]
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The only member, if the set has exactly one
    #[must_use]
    pub const fn only(self) -> Option<u8> {
        if self.len() == 1 {
            Some(self.0.trailing_zeros() as u8)
        } else {
            None
        }
    }

    /// Members in ascending byte order
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0u8..128).filter(move |&ch| self.contains(ch))
    }
}

impl fmt::Debug for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for ch in self.iter() {
            write!(f, "{}", ch as char)?;
        }
        write!(f, "}}")
    }
}

impl FromIterator<u8> for CharSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        iter.into_iter()
            .filter(u8::is_ascii)
            .fold(Self::EMPTY, Self::with)
    }
}

/// The characters a game's words are drawn from
///
/// Members are lowercase ASCII. Uppercase marks green feedback and the
/// notation markers delimit yellows, so neither may be part of an alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alphabet(CharSet);

impl Alphabet {
    /// Build an alphabet from its characters
    ///
    /// # Errors
    /// Returns `Error::InvalidAlphabet` if `chars` is empty or contains a
    /// non-ASCII, uppercase, whitespace or marker character.
    pub fn new(chars: &str) -> Result<Self> {
        let mut set = CharSet::EMPTY;
        for ch in chars.chars() {
            if !ch.is_ascii_graphic() || ch.is_ascii_uppercase() || is_marker(ch) {
                return Err(Error::InvalidAlphabet(format!(
                    "'{ch}' cannot be an alphabet character"
                )));
            }
            set = set.with(ch as u8);
        }
        if set.is_empty() {
            return Err(Error::InvalidAlphabet("alphabet is empty".to_string()));
        }
        Ok(Self(set))
    }

    /// The 26 lowercase Latin letters
    #[must_use]
    pub fn latin() -> Self {
        Self((b'a'..=b'z').collect())
    }

    #[inline]
    #[must_use]
    pub const fn chars(self) -> CharSet {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, ch: u8) -> bool {
        self.0.contains(ch)
    }

    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.len()
    }

    /// Alphabet characters as a string, in ascending order
    #[must_use]
    pub fn as_string(self) -> String {
        self.0.iter().map(char::from).collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::latin()
    }
}

pub(crate) const fn is_marker(ch: char) -> bool {
    matches!(ch, '(' | ')' | '.')
}
