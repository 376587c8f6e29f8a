//! Read model returned by the quiz use cases.

use crate::ports::quiz_gateway::VersionedQuiz;
use quizpatch_domain::Quiz;
use serde::{Deserialize, Serialize};

/// A quiz as reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizView {
    #[serde(flatten)]
    pub quiz: Quiz,
    /// Stored version; for a dry run, the version the result was computed from.
    pub version: u64,
    /// `false` when the result was computed but not saved.
    pub persisted: bool,
}

impl QuizView {
    pub fn persisted(stored: VersionedQuiz) -> Self {
        Self {
            quiz: stored.quiz,
            version: stored.version,
            persisted: true,
        }
    }

    pub fn unsaved(quiz: Quiz, base_version: u64) -> Self {
        Self {
            quiz,
            version: base_version,
            persisted: false,
        }
    }
}
