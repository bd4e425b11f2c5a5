//! Aggregate scoring over a finished game.
//!
//! Pure functions; the per-answer predicate lives on
//! [`Answer::correct`](crate::model::Answer::correct).

use serde::{Deserialize, Serialize};

use crate::model::{Game, EXPECTED_CONFIDENCE};

/// Aggregate result of one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Total answers in the game.
    pub answered: usize,
    /// Answers whose interval captured the true range.
    pub correct: usize,
    /// `correct / answered`, 0.0 for an empty game.
    pub hit_rate: f64,
    /// `hit_rate - EXPECTED_CONFIDENCE`. Positive means the player's
    /// intervals are wider than a 50% calibration target would need,
    /// negative means overconfident.
    pub calibration_gap: f64,
}

/// Score a finished game.
pub fn summarize(game: &Game) -> GameSummary {
    let answered = game.answers.len();
    let correct = game.answers.iter().filter(|a| a.correct()).count();
    let hit_rate = if answered == 0 {
        0.0
    } else {
        correct as f64 / answered as f64
    };

    GameSummary {
        answered,
        correct,
        hit_rate,
        calibration_gap: hit_rate - EXPECTED_CONFIDENCE,
    }
}
