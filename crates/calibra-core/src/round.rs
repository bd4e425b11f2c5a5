//! Round lifecycle: draw questions, collect answers, persist the game.
//!
//! A `Round` is single-session state owned by its caller. The transport
//! layer drives it: begin a round with ids minted upstream, feed in one
//! submitted interval per question in presentation order, then finish to
//! persist the record through a [`GameStore`].

use crate::error::RoundError;
use crate::model::{Answer, Game, Question, NUM_QUESTIONS};
use crate::traits::{GameStore, QuestionSource};

/// One play session in progress.
#[derive(Debug)]
pub struct Round {
    game_id: String,
    user_id: String,
    questions: Vec<Question>,
    answers: Vec<Answer>,
}

impl Round {
    /// Start a round of [`NUM_QUESTIONS`] questions.
    ///
    /// Both ids are opaque and caller-supplied; the core never generates
    /// identifiers.
    pub fn begin(
        source: &dyn QuestionSource,
        game_id: &str,
        user_id: &str,
    ) -> Result<Self, RoundError> {
        Self::begin_with_size(source, game_id, user_id, NUM_QUESTIONS)
    }

    /// Start a round of `num_questions` questions.
    ///
    /// Fails if the source cannot supply a full round, which also covers
    /// the empty-corpus case.
    pub fn begin_with_size(
        source: &dyn QuestionSource,
        game_id: &str,
        user_id: &str,
        num_questions: usize,
    ) -> Result<Self, RoundError> {
        let questions = source.select_random(num_questions);
        if questions.len() < num_questions {
            return Err(RoundError::NotEnoughQuestions {
                wanted: num_questions,
                got: questions.len(),
            });
        }

        Ok(Self {
            game_id: game_id.to_string(),
            user_id: user_id.to_string(),
            questions,
            answers: Vec::with_capacity(num_questions),
        })
    }

    /// The question the next submission will answer, or `None` once the
    /// round is complete.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.answers.len())
    }

    /// Record a submitted interval against the current question.
    ///
    /// The bounds are taken as given; an inverted interval is recorded and
    /// later scored literally. The question is snapshotted into the answer
    /// by value.
    pub fn submit(&mut self, lower_bound: f64, upper_bound: f64) -> Result<(), RoundError> {
        let Some(question) = self.current_question().cloned() else {
            return Err(RoundError::RoundComplete);
        };

        self.answers.push(Answer {
            question,
            lower_bound,
            upper_bound,
        });
        Ok(())
    }

    /// Questions presented this round, in presentation order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Answers recorded so far, in submission order.
    pub fn answered(&self) -> &[Answer] {
        &self.answers
    }

    /// Returns `true` once every question has an answer.
    pub fn is_complete(&self) -> bool {
        self.answers.len() == self.questions.len()
    }

    /// Persist the completed round and return the stored record.
    ///
    /// Requires every question to be answered. Store failures propagate
    /// untouched.
    pub async fn finish(self, store: &dyn GameStore) -> Result<Game, RoundError> {
        if !self.is_complete() {
            return Err(RoundError::Incomplete {
                answered: self.answers.len(),
                expected: self.questions.len(),
            });
        }

        tracing::debug!(
            game_id = %self.game_id,
            user_id = %self.user_id,
            answers = self.answers.len(),
            "saving finished round"
        );

        store
            .save(&self.user_id, &self.game_id, self.answers.clone())
            .await?;

        Ok(Game {
            id: self.game_id,
            user_id: self.user_id,
            answers: self.answers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedSource {
        questions: Vec<Question>,
    }

    impl FixedSource {
        fn with_len(n: usize) -> Self {
            let questions = (0..n)
                .map(|i| Question {
                    id: format!("q{i}"),
                    text: format!("question {i}"),
                    bound_low: 0.0,
                    bound_high: 10.0,
                })
                .collect();
            Self { questions }
        }
    }

    impl QuestionSource for FixedSource {
        fn select_random(&self, n: usize) -> Vec<Question> {
            self.questions.iter().take(n).cloned().collect()
        }
    }

    /// Store fake capturing the save call, optionally failing.
    struct RecordingStore {
        saved: Mutex<Option<Game>>,
        fail: bool,
    }

    impl RecordingStore {
        fn new() -> Self {
            Self {
                saved: Mutex::new(None),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                saved: Mutex::new(None),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl GameStore for RecordingStore {
        async fn save(
            &self,
            user_id: &str,
            game_id: &str,
            answers: Vec<Answer>,
        ) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::Backend {
                    message: "store offline".into(),
                });
            }
            *self.saved.lock().unwrap() = Some(Game {
                id: game_id.to_string(),
                user_id: user_id.to_string(),
                answers,
            });
            Ok(())
        }

        async fn get(&self, game_id: &str) -> Result<Game, StoreError> {
            Err(StoreError::NotFound {
                game_id: game_id.to_string(),
            })
        }

        async fn list(&self, _user_id: &str) -> Result<Vec<Game>, StoreError> {
            Ok(vec![])
        }

        async fn last(&self, _user_id: &str) -> Result<Option<Game>, StoreError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn full_round_lifecycle() {
        let source = FixedSource::with_len(20);
        let store = RecordingStore::new();

        let mut round = Round::begin_with_size(&source, "g1", "alice", 3).unwrap();
        assert_eq!(round.questions().len(), 3);

        while !round.is_complete() {
            let q = round.current_question().unwrap();
            let mid = (q.bound_low + q.bound_high) / 2.0;
            round.submit(mid - 1.0, mid + 1.0).unwrap();
        }
        assert!(round.current_question().is_none());

        let game = round.finish(&store).await.unwrap();
        assert_eq!(game.id, "g1");
        assert_eq!(game.user_id, "alice");
        assert_eq!(game.answers.len(), 3);
        assert!(game.answers.iter().all(|a| a.correct()));

        let stored = store.saved.lock().unwrap().clone().unwrap();
        assert_eq!(stored, game);
    }

    #[test]
    fn answers_pair_with_questions_in_presentation_order() {
        let source = FixedSource::with_len(4);
        let mut round = Round::begin_with_size(&source, "g1", "alice", 4).unwrap();

        for _ in 0..4 {
            round.submit(1.0, 2.0).unwrap();
        }

        let presented: Vec<_> = round.questions().iter().map(|q| q.id.clone()).collect();
        let answered: Vec<_> = round
            .answered()
            .iter()
            .map(|a| a.question.id.clone())
            .collect();
        assert_eq!(presented, answered);
    }

    #[test]
    fn begin_fails_on_short_source() {
        let source = FixedSource::with_len(5);
        let err = Round::begin(&source, "g1", "alice").unwrap_err();
        assert!(matches!(
            err,
            RoundError::NotEnoughQuestions { wanted: 12, got: 5 }
        ));
    }

    #[test]
    fn submit_after_completion_fails() {
        let source = FixedSource::with_len(1);
        let mut round = Round::begin_with_size(&source, "g1", "alice", 1).unwrap();
        round.submit(0.0, 1.0).unwrap();
        assert!(matches!(
            round.submit(0.0, 1.0),
            Err(RoundError::RoundComplete)
        ));
    }

    #[tokio::test]
    async fn finish_requires_complete_round() {
        let source = FixedSource::with_len(2);
        let store = RecordingStore::new();
        let round = Round::begin_with_size(&source, "g1", "alice", 2).unwrap();

        let err = round.finish(&store).await.unwrap_err();
        assert!(matches!(
            err,
            RoundError::Incomplete {
                answered: 0,
                expected: 2
            }
        ));
        assert!(store.saved.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn finish_propagates_store_failure() {
        let source = FixedSource::with_len(1);
        let store = RecordingStore::failing();
        let mut round = Round::begin_with_size(&source, "g1", "alice", 1).unwrap();
        round.submit(0.0, 1.0).unwrap();

        let err = round.finish(&store).await.unwrap_err();
        match err {
            RoundError::Store(e) => assert!(!e.is_not_found()),
            other => panic!("expected store error, got {other:?}"),
        }
    }
}
