//! Terminal output formatting
//!
//! Display utilities for the command-line harness.

pub mod display;
pub mod formatters;

pub use display::{
    print_cross, print_eliminations, print_feedback, print_game_summary, print_scores,
};
