//! Positional-frequency and novelty scoring
//!
//! A `PositionScores` table is built from the current candidates; the scorers
//! read it to rank guesses without simulating any feedback.

mod frequency;
mod scorers;

pub use frequency::PositionScores;
pub use scorers::{
    NoveltyCredit, NoveltyScorer, PositionCredit, PositionalScorer, Scorer, best_next_score,
};
