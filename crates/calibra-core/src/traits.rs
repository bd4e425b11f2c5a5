//! Contract definitions for question selection and game persistence.
//!
//! The transport layer and concrete storage backends live outside this
//! crate; they meet the core through these traits. An in-memory
//! implementation good enough for tests and single-process deployments is
//! provided by `calibra-store`.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{Answer, Game, Question};

// ---------------------------------------------------------------------------
// Question source
// ---------------------------------------------------------------------------

/// Supplies the questions for a round.
pub trait QuestionSource: Send + Sync {
    /// Draw `n` questions at random.
    ///
    /// Returns exactly `n` questions when the corpus holds at least `n`,
    /// otherwise the whole corpus. No question appears twice in one draw;
    /// draws are independent across calls, so repeats between rounds are
    /// possible. The result order is the presentation order.
    fn select_random(&self, n: usize) -> Vec<Question>;
}

// ---------------------------------------------------------------------------
// Game store
// ---------------------------------------------------------------------------

/// Durable storage and retrieval of game records, keyed by game id and by
/// user.
///
/// The record crossing this boundary is [`Game`] itself: `id`, `user_id`,
/// and the answers in submission order. Implementations must keep
/// "not found" / "no history" outcomes distinct from backend faults (see
/// [`StoreError`]) and must tolerate concurrent `save` calls from
/// unrelated sessions. Callers apply their own request-scoped deadlines.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Store a completed round for `user_id` under `game_id`.
    ///
    /// Saving twice under the same `game_id` overwrites the earlier
    /// record.
    async fn save(
        &self,
        user_id: &str,
        game_id: &str,
        answers: Vec<Answer>,
    ) -> Result<(), StoreError>;

    /// Fetch a single game by id.
    ///
    /// Fails with [`StoreError::NotFound`] when no such game exists.
    async fn get(&self, game_id: &str) -> Result<Game, StoreError>;

    /// All games saved for `user_id`, oldest first.
    ///
    /// A user with no history gets an empty list, not an error.
    async fn list(&self, user_id: &str) -> Result<Vec<Game>, StoreError>;

    /// The most recently saved game for `user_id`, or `Ok(None)` when the
    /// user has never played. "No history" is a normal outcome here, never
    /// an error.
    async fn last(&self, user_id: &str) -> Result<Option<Game>, StoreError>;
}
