//! Word list loading utilities
//!
//! Lists are plain text, one word per line. Blank lines and lines starting
//! with `#` are skipped, as are entries that are not valid words.

use crate::core::{Alphabet, Word, WordList};
use rustc_hash::FxHashMap;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Load a word list from a file
///
/// Words are kept in file order, without duplicates. With `word_length`
/// set, words of any other length are dropped.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read.
///
/// # Examples
/// ```no_run
/// use wordle_elimination::wordlists::load_from_file;
///
/// let words = load_from_file("data/words.txt", Some(5)).unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P, word_length: Option<usize>) -> Result<WordList> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let words = parse_lines(&content, word_length);
    log::debug!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

fn parse_lines(content: &str, word_length: Option<usize>) -> WordList {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| Word::new(line).ok())
        .filter(|word| word_length.is_none_or(|n| word.len() == n))
        .collect()
}

/// Convert a string slice to a word list, skipping invalid entries
///
/// # Examples
/// ```
/// use wordle_elimination::wordlists::words_from_slice;
///
/// let words = words_from_slice(&["crane", "slate", "crane"]);
/// assert_eq!(words.len(), 2);
/// ```
#[must_use]
pub fn words_from_slice(slice: &[&str]) -> WordList {
    slice.iter().filter_map(|&s| Word::new(s).ok()).collect()
}

/// The word length shared by the most words; ties go to the shorter length
#[must_use]
pub fn most_common_length(words: &WordList) -> Option<usize> {
    let mut counts: FxHashMap<usize, usize> = FxHashMap::default();
    for word in words.words() {
        *counts.entry(word.len()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by(|(la, ca), (lb, cb)| ca.cmp(cb).then(lb.cmp(la)))
        .map(|(length, _)| length)
}

/// Words of `length` spelled entirely from `alphabet`, in list order
#[must_use]
pub fn playable(words: &WordList, length: usize, alphabet: Alphabet) -> WordList {
    let kept: WordList = words
        .words()
        .iter()
        .filter(|w| w.len() == length && w.is_in(alphabet))
        .cloned()
        .collect();
    log::debug!(
        "Kept {} of {} words of length {length}",
        kept.len(),
        words.len()
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn words_from_slice_converts_valid_words() {
        let words = words_from_slice(&["crane", "slate", "irate"]);

        assert_eq!(words.len(), 3);
        assert_eq!(words.words()[0].text(), "crane");
        assert_eq!(words.words()[2].text(), "irate");
    }

    #[test]
    fn words_from_slice_skips_invalid() {
        let words = words_from_slice(&["crane", "cr(a)ne", "", "slate"]);
        assert_eq!(words.len(), 2);
        assert_eq!(words.words()[1].text(), "slate");
    }

    #[test]
    fn words_from_slice_empty() {
        let input: &[&str] = &[];
        assert!(words_from_slice(input).is_empty());
    }

    #[test]
    fn lines_are_trimmed_filtered_and_deduplicated() {
        let content = "# five letters\ncrane\n  Slate \n\ntoolong\ncrane\nabc\n";
        let words = parse_lines(content, Some(5));
        let texts: Vec<&str> = words.words().iter().map(Word::text).collect();
        assert_eq!(texts, vec!["crane", "slate"]);
    }

    #[test]
    fn any_length_without_a_filter() {
        let words = parse_lines("crane\nabc\n", None);
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn load_from_file_reads_the_list() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "crane\nslate\n").unwrap();
        let words = load_from_file(&path, Some(5)).unwrap();
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn most_common_length_picks_the_majority() {
        let words = words_from_slice(&["crane", "slate", "abc", "lame", "fame", "tame"]);
        assert_eq!(most_common_length(&words), Some(4));
        let tied = words_from_slice(&["crane", "lame"]);
        assert_eq!(most_common_length(&tied), Some(4));
        assert_eq!(most_common_length(&words_from_slice(&[])), None);
    }

    #[test]
    fn playable_drops_other_lengths_and_foreign_characters() {
        let words = words_from_slice(&["crane", "ain't", "abc", "slate", "x-ray"]);
        let kept = playable(&words, 5, Alphabet::latin());
        let texts: Vec<&str> = kept.words().iter().map(Word::text).collect();
        assert_eq!(texts, vec!["crane", "slate"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(load_from_file(dir.path().join("nope.txt"), None).is_err());
    }
}
