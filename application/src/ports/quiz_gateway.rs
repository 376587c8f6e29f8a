//! Quiz gateway port
//!
//! Defines how the application layer loads and saves whole quiz aggregates.

use async_trait::async_trait;
use quizpatch_domain::{Quiz, QuizId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Quiz not found: {0}")]
    NotFound(QuizId),

    #[error("Version conflict on quiz {quiz_id}: expected version {expected}, found {actual}")]
    Conflict {
        quiz_id: QuizId,
        expected: u64,
        actual: u64,
    },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A new quiz was refused because its content breaks the aggregate rules.
    #[error("Invalid quiz: {0}")]
    InvalidQuiz(String),
}

/// A quiz aggregate together with the version it was stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedQuiz {
    pub version: u64,
    pub quiz: Quiz,
}

impl VersionedQuiz {
    pub fn new(quiz: Quiz, version: u64) -> Self {
        Self { version, quiz }
    }
}

/// Gateway for quiz aggregate persistence
///
/// Implementations (adapters) live in the infrastructure layer. They must:
/// - return the full tree (questions and their answers) from `load`
/// - persist the entire tree atomically in `save`, never partially
/// - assign ids to every node that lacks one during `save`
/// - reject `save` with [`GatewayError::Conflict`] when the stored version
///   differs from `expected_version`, and bump the version otherwise
#[async_trait]
pub trait QuizGateway: Send + Sync {
    /// Load a quiz with all nested questions and answers
    async fn load(&self, id: &QuizId) -> Result<VersionedQuiz, GatewayError>;

    /// Replace the stored quiz, returning it with ids assigned and the new version
    async fn save(&self, quiz: Quiz, expected_version: u64) -> Result<VersionedQuiz, GatewayError>;
}
