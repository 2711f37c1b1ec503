//! Display functions for command results

use super::formatters::{colorize_guess, create_progress_bar, feedback_to_emoji, game_marks};
use crate::core::{ParsedGuess, Word};
use crate::solver::{CrossGameElimination, WordElimination};
use colored::Colorize;
use std::fmt::Display;

/// Print the guesses so far and the remaining options
pub fn print_game_summary(guesses: &[ParsedGuess], options: &[Word], possibilities: &[Word]) {
    println!("\n{}", "─".repeat(60).cyan());
    for guess in guesses {
        println!("  {}  {}", colorize_guess(guess), feedback_to_emoji(guess));
    }
    println!("{}", "─".repeat(60).cyan());

    let shown: Vec<String> = options
        .iter()
        .take(40)
        .map(|w| {
            if possibilities.contains(w) {
                w.text().bright_green().bold().to_string()
            } else {
                w.text().to_string()
            }
        })
        .collect();
    println!(
        "{} options: {}{}",
        options.len().to_string().bright_yellow().bold(),
        shown.join(" "),
        if options.len() > shown.len() { " …" } else { "" }
    );
}

/// Print one computed feedback
pub fn print_feedback(guess: &ParsedGuess) {
    println!(
        "{}  {}  {}",
        colorize_guess(guess),
        feedback_to_emoji(guess),
        guess.to_string().bright_white()
    );
}

/// Print (score, word) pairs, strongest last
pub fn print_scores(scores: &[(f64, Word)], limit: usize) {
    let start = scores.len().saturating_sub(limit);
    for (score, word) in &scores[start..] {
        println!("{score:>8.3}  {}", word.text().bright_white());
    }
}

/// Print an elimination ranking, strongest last
pub fn print_eliminations(ranked: &[WordElimination], options: usize, limit: usize) {
    println!(
        "\n{} against {} options",
        "ELIMINATION".bright_cyan().bold(),
        options
    );
    let start = ranked.len().saturating_sub(limit);
    for elim in &ranked[start..] {
        let bar = create_progress_bar(elim.elimination_score, options as f64, 20);
        let marker = if elim.is_possible_solution {
            "●".bright_green().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "{:>8.3} {:>7.3}  {} {} {}",
            elim.elimination_score,
            elim.novelty_score,
            bar.cyan(),
            marker,
            elim.word.text().bright_white().bold()
        );
    }
}

/// Print a cross-game ranking, strongest last
///
/// Each row shows the combined ratio, the games the word solves, and the games
/// it is still an option in.
pub fn print_cross<K: Ord + Display>(
    ranked: &[(Word, CrossGameElimination<K>)],
    keys: &[K],
    limit: usize,
) {
    let header: Vec<String> = keys.iter().map(ToString::to_string).collect();
    println!(
        "\n{} over games {}",
        "CROSS ELIMINATION".bright_cyan().bold(),
        header.join(", ")
    );
    let start = ranked.len().saturating_sub(limit);
    for (word, cross) in &ranked[start..] {
        println!(
            "{:>8.3}  {}  {}  {}",
            cross.elimination_ratio,
            game_marks(keys, &cross.solved, '🟩', '⬛'),
            game_marks(keys, &cross.option, '🟨', '⬛'),
            word.text().bright_white().bold()
        );
    }
}
