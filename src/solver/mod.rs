//! Game sessions and elimination ranking
//!
//! `EliminationScorer` simulates feedback against every remaining candidate,
//! `Game` holds one session's guesses, and `multi` combines elimination
//! across several games played at once.

mod elimination;
mod game;
pub mod multi;

pub use elimination::EliminationScorer;
pub use game::{Game, GameState, WordElimination, explore};
pub use multi::{
    CandidatePool, CrossElim, CrossGameElimination, eliminate_across_games, eliminate_for_game,
};
