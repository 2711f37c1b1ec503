//! Canonical memo keys

use crate::core::{Alphabet, ParsedGuess, Word};
use blake3::Hasher;

/// Logical inputs of one memoized scorer call
///
/// Guesses are stored sorted because the constraint they produce does not
/// depend on their order. The candidate set is reduced to a digest of its
/// words in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    scorer: &'static str,
    word_length: usize,
    alphabet: String,
    guesses: Vec<String>,
    candidates: String,
    argument: String,
    decimals: u32,
}

impl CacheKey {
    #[must_use]
    pub fn new(
        scorer: &'static str,
        word_length: usize,
        alphabet: Alphabet,
        guesses: &[ParsedGuess],
        candidates: &[Word],
        argument: &str,
    ) -> Self {
        let mut guesses: Vec<String> = guesses.iter().map(ToString::to_string).collect();
        guesses.sort_unstable();
        Self {
            scorer,
            word_length,
            alphabet: alphabet.as_string(),
            guesses,
            candidates: candidate_set_id(candidates),
            argument: argument.to_string(),
            decimals: 0,
        }
    }

    /// Same key for results rounded to `decimals` digits
    #[must_use]
    pub fn with_decimals(self, decimals: u32) -> Self {
        Self { decimals, ..self }
    }

    /// Same key with a different argument
    #[must_use]
    pub fn with_argument(&self, argument: &str) -> Self {
        Self {
            argument: argument.to_string(),
            ..self.clone()
        }
    }

    /// Stable hex digest, used as the persisted key
    #[must_use]
    pub fn digest(&self) -> String {
        let mut hasher = Hasher::new();
        hasher.update(self.scorer.as_bytes());
        hasher.update(format!("|{}|{}", self.word_length, self.alphabet).as_bytes());
        for guess in &self.guesses {
            hasher.update(b"|g:");
            hasher.update(guess.as_bytes());
        }
        hasher.update(b"|c:");
        hasher.update(self.candidates.as_bytes());
        hasher.update(b"|a:");
        hasher.update(self.argument.as_bytes());
        hasher.update(format!("|d:{}", self.decimals).as_bytes());
        hasher.finalize().to_hex().to_string()
    }
}

/// Digest identifying an ordered candidate set
#[must_use]
pub fn candidate_set_id(candidates: &[Word]) -> String {
    let mut hasher = Hasher::new();
    for word in candidates {
        hasher.update(word.text().as_bytes());
        hasher.update(b"\n");
    }
    hasher.finalize().to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|w| Word::new(*w).unwrap()).collect()
    }

    fn key(guesses: &[&str], candidates: &[&str], argument: &str) -> CacheKey {
        let parsed: Vec<_> = guesses.iter().map(|g| parse(g).unwrap()).collect();
        CacheKey::new(
            "elimination",
            5,
            Alphabet::latin(),
            &parsed,
            &words(candidates),
            argument,
        )
    }

    #[test]
    fn guess_order_does_not_matter() {
        let a = key(&["cr(A)ne", "sLATE"], &["slate", "plate"], "trace");
        let b = key(&["sLATE", "cr(A)ne"], &["slate", "plate"], "trace");
        assert_eq!(a, b);
        assert_eq!(a.digest(), b.digest());
    }

    #[test]
    fn equivalent_notation_gives_the_same_key() {
        let parens = key(&["(C)rane"], &["slate"], "trace");
        let dot = key(&[".crane"], &["slate"], "trace");
        assert_eq!(parens, dot);
    }

    #[test]
    fn every_field_changes_the_digest() {
        let base = key(&["crane"], &["slate", "plate"], "trace");
        assert_ne!(base.digest(), key(&["crAne"], &["slate", "plate"], "trace").digest());
        assert_ne!(base.digest(), key(&["crane"], &["plate", "slate"], "trace").digest());
        assert_ne!(base.digest(), base.with_argument("grate").digest());
        assert_ne!(base.digest(), base.clone().with_decimals(1).digest());
    }

    #[test]
    fn digest_is_stable_hex() {
        let digest = key(&[], &["slate"], "trace").digest();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(digest, key(&[], &["slate"], "trace").digest());
    }
}
