//! Error types for the game core.
//!
//! Every failure is returned to the caller as a typed outcome; the core
//! never logs-and-swallows. `StoreError` keeps "no such record" distinct
//! from backend faults so callers can branch without string matching.

use thiserror::Error;

/// Errors from a [`GameStore`](crate::traits::GameStore) implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No game exists under the requested id.
    #[error("game not found: {game_id}")]
    NotFound { game_id: String },

    /// The backing store is unreachable or returned a fault.
    #[error("storage backend error: {message}")]
    Backend { message: String },
}

impl StoreError {
    /// Returns `true` for the legitimate "no such record" outcome, as
    /// opposed to a storage fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Errors from loading a question bank.
#[derive(Debug, Error)]
pub enum BankError {
    /// The TOML could not be read or parsed.
    #[error("failed to parse bank {path}: {message}")]
    Parse { path: String, message: String },

    /// A question violates `bound_low <= bound_high` or has a non-finite
    /// bound.
    #[error("question '{question_id}' has invalid bounds [{bound_low}, {bound_high}]")]
    InvalidBounds {
        question_id: String,
        bound_low: f64,
        bound_high: f64,
    },

    /// Two questions in one bank share an id.
    #[error("duplicate question id: {question_id}")]
    DuplicateId { question_id: String },
}

/// Errors from the round lifecycle.
#[derive(Debug, Error)]
pub enum RoundError {
    /// The question source could not supply a full round.
    #[error("question source returned {got} questions, wanted {wanted}")]
    NotEnoughQuestions { wanted: usize, got: usize },

    /// An answer was submitted after every question was answered.
    #[error("round already complete")]
    RoundComplete,

    /// `finish` was called before every question was answered.
    #[error("round incomplete: {answered} of {expected} questions answered")]
    Incomplete { answered: usize, expected: usize },

    /// Persisting the finished game failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
