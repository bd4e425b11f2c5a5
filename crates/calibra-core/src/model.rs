//! Core data model types for calibra.
//!
//! These are the fundamental types the game is built on: the question a
//! player is shown, the interval they answer with, and the record of a
//! completed round.

use serde::{Deserialize, Serialize};

/// Number of questions in a single round.
pub const NUM_QUESTIONS: usize = 12;

/// The confidence players are asked to calibrate their intervals to.
///
/// Informational only: a well-calibrated player should capture the true
/// range about half the time. The evaluator never enforces this.
pub const EXPECTED_CONFIDENCE: f64 = 0.5;

/// A single trivia question with a numeric true-value range.
///
/// Immutable reference data: once loaded from a bank the question is never
/// mutated. The invariant `bound_low <= bound_high` (both finite) is
/// established at bank-load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Stable unique identifier within a bank.
    pub id: String,
    /// The prompt shown to the player.
    pub text: String,
    /// Lower end of the true-value range.
    pub bound_low: f64,
    /// Upper end of the true-value range.
    pub bound_high: f64,
}

/// A player's answer to one question: a submitted `[lower, upper]` interval.
///
/// Owns a snapshot of the question it responds to, so a persisted game
/// reflects the question as it was presented even if the bank changes
/// later. The submitted bounds are taken as given; nothing here sorts or
/// rejects an inverted interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// The question this answer responds to, by value.
    pub question: Question,
    /// Submitted lower bound.
    #[serde(rename = "lower")]
    pub lower_bound: f64,
    /// Submitted upper bound.
    #[serde(rename = "upper")]
    pub upper_bound: f64,
}

impl Answer {
    /// Returns `true` if the submitted interval counts as correct.
    ///
    /// Deliberately lenient overlap policy rather than strict containment:
    /// for a well-formed submission this is true exactly when the closed
    /// intervals `[lower, upper]` and `[bound_low, bound_high]` intersect,
    /// including touching at a single endpoint. Inverted submissions
    /// (`lower > upper`) are evaluated literally by the same formula.
    pub fn correct(&self) -> bool {
        let q_low = self.question.bound_low;
        let q_high = self.question.bound_high;
        let a_low = self.lower_bound;
        let a_high = self.upper_bound;

        (a_low >= q_low && a_high <= q_high)
            || (a_low <= q_low && a_high >= q_low)
            || (a_low <= q_high && a_high >= q_high)
    }
}

/// The persisted record of one completed round.
///
/// Both identifiers are opaque and caller-supplied; the core never mints
/// ids. Answers are kept in submission order. Matching the answer count to
/// the round size is the caller's responsibility, not the store's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Unique game identifier.
    pub id: String,
    /// Opaque identifier of the player.
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Answers in submission order, one per question.
    pub answers: Vec<Answer>,
}
