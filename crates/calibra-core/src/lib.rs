//! calibra-core — Game model, answer scoring, and storage contracts.
//!
//! The core of a confidence-interval trivia game: players answer numeric
//! questions with `[lower, upper]` intervals and are scored on whether the
//! interval captures any part of the question's true range. Transport and
//! concrete storage live outside this crate and meet it through the traits
//! in [`traits`].

pub mod bank;
pub mod error;
pub mod model;
pub mod round;
pub mod scoring;
pub mod traits;

pub use error::{BankError, RoundError, StoreError};
pub use model::{Answer, Game, Question, EXPECTED_CONFIDENCE, NUM_QUESTIONS};
pub use traits::{GameStore, QuestionSource};
