//! Formatting utilities for terminal output

use crate::core::{Classification, ParsedGuess};
use colored::Colorize;
use std::collections::BTreeSet;

/// Format feedback as an emoji row
#[must_use]
pub fn feedback_to_emoji(guess: &ParsedGuess) -> String {
    guess
        .tokens()
        .iter()
        .map(|t| match t.class {
            Classification::Green => '🟩',
            Classification::Yellow => '🟨',
            Classification::Gray => '⬛',
        })
        .collect()
}

/// Render a guess with each letter colored by its feedback
#[must_use]
pub fn colorize_guess(guess: &ParsedGuess) -> String {
    guess
        .tokens()
        .iter()
        .map(|t| {
            let letter = char::from(t.ch).to_ascii_uppercase().to_string();
            match t.class {
                Classification::Green => letter.black().on_green().to_string(),
                Classification::Yellow => letter.black().on_yellow().to_string(),
                Classification::Gray => letter.dimmed().to_string(),
            }
        })
        .collect()
}

/// One mark per game: `hit` if the game is in `set`, `miss` otherwise
#[must_use]
pub fn game_marks<K: Ord>(keys: &[K], set: &BTreeSet<K>, hit: char, miss: char) -> String {
    keys.iter()
        .map(|k| if set.contains(k) { hit } else { miss })
        .collect()
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max).max(0.0) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse;

    #[test]
    fn emoji_row_follows_feedback() {
        let guess = parse("pro(B)E").unwrap();
        assert_eq!(feedback_to_emoji(&guess), "⬛⬛⬛🟨🟩");
    }

    #[test]
    fn colorized_guess_keeps_letters() {
        colored::control::set_override(false);
        let guess = parse("pro(B)E").unwrap();
        assert_eq!(colorize_guess(&guess), "PROBE");
    }

    #[test]
    fn game_marks_per_key() {
        let set = BTreeSet::from([1, 3]);
        assert_eq!(game_marks(&[1, 2, 3], &set, '🟩', '⬛'), "🟩⬛🟩");
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(1.0, 0.0, 4), "░░░░");
    }
}
