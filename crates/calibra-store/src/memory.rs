//! In-memory game store.
//!
//! Backs tests and single-process deployments. Policies (documented on the
//! `GameStore` trait and pinned by the integration tests): duplicate game
//! ids overwrite, `list` is chronological oldest-first, `last` is the
//! highest save sequence.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use calibra_core::error::StoreError;
use calibra_core::model::{Answer, Game};
use calibra_core::traits::GameStore;

/// A stored game plus the bookkeeping that backs deterministic ordering.
#[derive(Debug, Clone)]
struct StoredGame {
    game: Game,
    saved_at: DateTime<Utc>,
    /// Monotonic save sequence; tie-break when two saves land within one
    /// clock tick.
    seq: u64,
}

/// In-memory [`GameStore`] keyed by game id.
///
/// Safe for concurrent saves from unrelated sessions. Instrumented with a
/// save counter and an unavailability toggle so callers can exercise the
/// backend-failure path without a real backend.
pub struct MemoryStore {
    games: RwLock<HashMap<String, StoredGame>>,
    next_seq: AtomicU64,
    save_count: AtomicU64,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            games: RwLock::new(HashMap::new()),
            next_seq: AtomicU64::new(0),
            save_count: AtomicU64::new(0),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Number of `save` calls accepted so far.
    pub fn save_count(&self) -> u64 {
        self.save_count.load(Ordering::Relaxed)
    }

    /// When set, every operation fails with [`StoreError::Backend`], as an
    /// unreachable backend would.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }

    /// Timestamp a game was saved at, if present. Test/inspection helper.
    pub async fn saved_at(&self, game_id: &str) -> Option<DateTime<Utc>> {
        self.games.read().await.get(game_id).map(|s| s.saved_at)
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::Relaxed) {
            return Err(StoreError::Backend {
                message: "store unavailable".into(),
            });
        }
        Ok(())
    }

    /// A user's stored games, oldest save first.
    async fn user_games(&self, user_id: &str) -> Vec<StoredGame> {
        let games = self.games.read().await;
        let mut owned: Vec<StoredGame> = games
            .values()
            .filter(|s| s.game.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by_key(|s| s.seq);
        owned
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn save(
        &self,
        user_id: &str,
        game_id: &str,
        answers: Vec<Answer>,
    ) -> Result<(), StoreError> {
        self.check_available()?;

        let stored = StoredGame {
            game: Game {
                id: game_id.to_string(),
                user_id: user_id.to_string(),
                answers,
            },
            saved_at: Utc::now(),
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
        };

        let mut games = self.games.write().await;
        if games.insert(game_id.to_string(), stored).is_some() {
            tracing::debug!(game_id, "overwriting existing game record");
        }
        self.save_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn get(&self, game_id: &str) -> Result<Game, StoreError> {
        self.check_available()?;

        self.games
            .read()
            .await
            .get(game_id)
            .map(|s| s.game.clone())
            .ok_or_else(|| StoreError::NotFound {
                game_id: game_id.to_string(),
            })
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Game>, StoreError> {
        self.check_available()?;

        Ok(self
            .user_games(user_id)
            .await
            .into_iter()
            .map(|s| s.game)
            .collect())
    }

    async fn last(&self, user_id: &str) -> Result<Option<Game>, StoreError> {
        self.check_available()?;

        Ok(self
            .user_games(user_id)
            .await
            .into_iter()
            .next_back()
            .map(|s| s.game))
    }
}
