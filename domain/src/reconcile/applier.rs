//! Top-level patch application for the quiz aggregate.

use super::limits::PatchLimits;
use super::question::reconcile_questions;
use crate::core::error::DomainError;
use crate::patch::entities::QuizPatch;
use crate::patch::field_update::FieldUpdate;
use crate::quiz::entities::Quiz;

/// Applies a [`QuizPatch`] to a quiz aggregate (Domain Service)
///
/// Steps, short-circuiting on the first failure:
/// 1. title (non-blank, within `max_title_len`; cannot be cleared)
/// 2. due date (set or cleared, no temporal validation)
/// 3. question reconciliation, recursing into answers
/// 4. identity invariants of the result
///
/// The input quiz is never mutated. All work happens on a private copy that
/// is returned only when every step succeeded.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuizPatchApplier {
    limits: PatchLimits,
}

impl QuizPatchApplier {
    pub fn new(limits: PatchLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &PatchLimits {
        &self.limits
    }

    pub fn apply(&self, quiz: &Quiz, patch: QuizPatch) -> Result<Quiz, DomainError> {
        let mut next = quiz.clone();

        match patch.title {
            FieldUpdate::Unchanged => {}
            FieldUpdate::Clear => return Err(DomainError::invalid("title cannot be cleared")),
            FieldUpdate::Set(title) => {
                self.limits.check_title(&title)?;
                next.title = title;
            }
        }

        next.due_date = patch.due_date.resolve(next.due_date);

        next.questions = reconcile_questions(
            std::mem::take(&mut next.questions),
            &patch.remove_question_ids,
            patch.questions,
            &self.limits,
        )?;

        next.check_invariants()?;
        Ok(next)
    }
}
