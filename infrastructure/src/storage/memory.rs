//! In-memory quiz gateway.

use super::{commit, first_version};
use async_trait::async_trait;
use quizpatch_application::{GatewayError, QuizGateway, VersionedQuiz};
use quizpatch_domain::{PatchLimits, Quiz, QuizId};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Quiz gateway backed by a process-local map.
///
/// The lock is held for the whole compare-and-swap in `save`, which
/// serializes writes to the same quiz.
#[derive(Default)]
pub struct InMemoryQuizGateway {
    quizzes: Mutex<HashMap<QuizId, VersionedQuiz>>,
    limits: PatchLimits,
}

impl InMemoryQuizGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text limits a new quiz must satisfy in [`insert`](Self::insert).
    pub fn with_limits(mut self, limits: PatchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Store a quiz that does not exist yet, at version 1.
    ///
    /// Fails with [`GatewayError::InvalidQuiz`] when the quiz breaks the text
    /// rules, with nothing stored.
    pub fn insert(&self, quiz: Quiz) -> Result<VersionedQuiz, GatewayError> {
        let mut quizzes = self.lock()?;
        if let Some(existing) = quizzes.get(&quiz.id) {
            return Err(GatewayError::Conflict {
                quiz_id: quiz.id,
                expected: 0,
                actual: existing.version,
            });
        }
        let stored = first_version(quiz, &self.limits)?;
        quizzes.insert(stored.quiz.id.clone(), stored.clone());
        Ok(stored)
    }

    pub fn len(&self) -> usize {
        self.lock().map(|q| q.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<QuizId, VersionedQuiz>>, GatewayError> {
        self.quizzes
            .lock()
            .map_err(|_| GatewayError::Storage("quiz store lock poisoned".to_string()))
    }
}

#[async_trait]
impl QuizGateway for InMemoryQuizGateway {
    async fn load(&self, id: &QuizId) -> Result<VersionedQuiz, GatewayError> {
        self.lock()?
            .get(id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(id.clone()))
    }

    async fn save(&self, quiz: Quiz, expected_version: u64) -> Result<VersionedQuiz, GatewayError> {
        let mut quizzes = self.lock()?;
        let stored = commit(quizzes.get(&quiz.id), quiz, expected_version)?;
        debug!(
            "Stored quiz {} in memory at version {}",
            stored.quiz.id, stored.version
        );
        quizzes.insert(stored.quiz.id.clone(), stored.clone());
        Ok(stored)
    }
}
