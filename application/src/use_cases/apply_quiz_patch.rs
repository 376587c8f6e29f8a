//! Apply Quiz Patch use case.
//!
//! Loads a quiz aggregate, reconciles it against a patch in memory and saves
//! the whole aggregate back in one gateway call. Any failure before the save
//! leaves the stored aggregate untouched because `save` is never reached.

use crate::config::PatchParams;
use crate::ports::audit_logger::{AuditEvent, NoPatchAuditLogger, PatchAuditLogger};
use crate::ports::quiz_gateway::{GatewayError, QuizGateway};
use crate::use_cases::quiz_view::QuizView;
use quizpatch_domain::{DomainError, EntityKind, QuizId, QuizPatch, QuizPatchApplier};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced by [`ApplyQuizPatchUseCase`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplyQuizPatchError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("Invalid patch: {0}")]
    InvalidPatch(String),

    #[error("Version conflict on quiz {quiz_id}: expected version {expected}, found {actual}")]
    Conflict {
        quiz_id: QuizId,
        expected: u64,
        actual: u64,
    },

    #[error("Corrupt aggregate: {0}")]
    CorruptAggregate(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Flat classification of [`ApplyQuizPatchError`] for mapping to exit codes
/// or transport statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    InvalidPatch,
    Conflict,
    Storage,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidPatch => "invalid_patch",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Storage => "storage",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ApplyQuizPatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplyQuizPatchError::NotFound { .. } => ErrorKind::NotFound,
            ApplyQuizPatchError::InvalidPatch(_) => ErrorKind::InvalidPatch,
            ApplyQuizPatchError::Conflict { .. } => ErrorKind::Conflict,
            // Corrupt stored data is reported as a storage fault.
            ApplyQuizPatchError::CorruptAggregate(_) | ApplyQuizPatchError::Storage(_) => {
                ErrorKind::Storage
            }
        }
    }
}

impl From<DomainError> for ApplyQuizPatchError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::NotFound { kind, id } => ApplyQuizPatchError::NotFound { kind, id },
            DomainError::InvalidPatch(reason) => ApplyQuizPatchError::InvalidPatch(reason),
            DomainError::CorruptAggregate(reason) => ApplyQuizPatchError::CorruptAggregate(reason),
        }
    }
}

impl From<GatewayError> for ApplyQuizPatchError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::NotFound(id) => ApplyQuizPatchError::NotFound {
                kind: EntityKind::Quiz,
                id: id.to_string(),
            },
            GatewayError::Conflict {
                quiz_id,
                expected,
                actual,
            } => ApplyQuizPatchError::Conflict {
                quiz_id,
                expected,
                actual,
            },
            GatewayError::Storage(msg) | GatewayError::Serialization(msg) => {
                ApplyQuizPatchError::Storage(msg)
            }
            GatewayError::InvalidQuiz(reason) => ApplyQuizPatchError::InvalidPatch(reason),
        }
    }
}

/// Input for the [`ApplyQuizPatchUseCase`].
#[derive(Debug, Clone)]
pub struct ApplyQuizPatchInput {
    pub quiz_id: QuizId,
    pub patch: QuizPatch,
}

impl ApplyQuizPatchInput {
    pub fn new(quiz_id: impl Into<QuizId>, patch: QuizPatch) -> Self {
        Self {
            quiz_id: quiz_id.into(),
            patch,
        }
    }
}

/// Use case for applying a patch to a stored quiz.
///
/// Flow:
/// 1. Load the aggregate (`NotFound` for an unknown quiz id)
/// 2. Reconcile it against the patch with [`QuizPatchApplier`]
/// 3. Save the whole aggregate with the version it was loaded at
/// 4. Return the stored result as a [`QuizView`]
///
/// Every outcome is recorded through the [`PatchAuditLogger`] port.
#[derive(Clone)]
pub struct ApplyQuizPatchUseCase {
    gateway: Arc<dyn QuizGateway>,
    params: PatchParams,
    audit_logger: Arc<dyn PatchAuditLogger>,
}

impl ApplyQuizPatchUseCase {
    pub fn new(gateway: Arc<dyn QuizGateway>) -> Self {
        Self {
            gateway,
            params: PatchParams::default(),
            audit_logger: Arc::new(NoPatchAuditLogger),
        }
    }

    pub fn with_params(mut self, params: PatchParams) -> Self {
        self.params = params;
        self
    }

    /// Create with an audit logger.
    pub fn with_audit_logger(mut self, logger: Arc<dyn PatchAuditLogger>) -> Self {
        self.audit_logger = logger;
        self
    }

    pub async fn execute(
        &self,
        input: ApplyQuizPatchInput,
    ) -> Result<QuizView, ApplyQuizPatchError> {
        let quiz_id = input.quiz_id;
        let (removed, updated, inserted) = input.patch.question_counts();
        info!(
            "Applying patch to quiz {}: {} removed, {} updated, {} inserted questions",
            quiz_id, removed, updated, inserted
        );

        match self.apply(&quiz_id, input.patch).await {
            Ok(view) => {
                self.audit_logger.log(AuditEvent::PatchApplied {
                    quiz_id,
                    version: view.version,
                    persisted: view.persisted,
                    questions_removed: removed,
                    questions_updated: updated,
                    questions_inserted: inserted,
                });
                Ok(view)
            }
            Err(e) => {
                warn!("Patch to quiz {} rejected: {}", quiz_id, e);
                self.audit_logger.log(AuditEvent::PatchRejected {
                    quiz_id,
                    kind: e.kind().as_str(),
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    async fn apply(
        &self,
        quiz_id: &QuizId,
        patch: QuizPatch,
    ) -> Result<QuizView, ApplyQuizPatchError> {
        let loaded = self.gateway.load(quiz_id).await?;
        debug!(
            "Loaded quiz {} at version {} ({} questions, {} answers)",
            quiz_id,
            loaded.version,
            loaded.quiz.questions.len(),
            loaded.quiz.answer_count()
        );

        let applier = QuizPatchApplier::new(self.params.limits);
        let updated = applier.apply(&loaded.quiz, patch)?;

        if self.params.dry_run {
            info!("Dry run: quiz {} not saved", quiz_id);
            return Ok(QuizView::unsaved(updated, loaded.version));
        }

        let stored = self.gateway.save(updated, loaded.version).await?;
        info!("Saved quiz {} at version {}", quiz_id, stored.version);
        Ok(QuizView::persisted(stored))
    }
}
