//! Question-level reconciliation.
//!
//! Updating a question recurses into its answers; inserting a question
//! builds its answers with the answer reconciler in create-only mode.

use super::answer::reconcile_answers;
use super::limits::PatchLimits;
use super::{Reconcilable, reconcile};
use crate::core::error::{DomainError, EntityKind};
use crate::core::ids::QuestionId;
use crate::patch::entities::{QuestionFields, QuestionPatch};
use crate::quiz::entities::Question;

impl Reconcilable for Question {
    type Id = QuestionId;
    type Fields = QuestionFields;

    const KIND: EntityKind = EntityKind::Question;

    fn id(&self) -> Option<&QuestionId> {
        self.id.as_ref()
    }

    fn apply_update(
        &mut self,
        fields: QuestionFields,
        limits: &PatchLimits,
    ) -> Result<(), DomainError> {
        if let Some(text) = &fields.text {
            limits.check_question_text(text)?;
        }
        let answers = reconcile_answers(
            self.answers.clone(),
            &fields.remove_answer_ids,
            fields.answers,
            limits,
        )?;

        if let Some(text) = fields.text {
            self.text = text;
        }
        self.answers = answers;
        Ok(())
    }

    fn create(fields: QuestionFields, limits: &PatchLimits) -> Result<Self, DomainError> {
        let text = fields
            .text
            .ok_or_else(|| DomainError::invalid("text is required"))?;
        limits.check_question_text(&text)?;
        if !fields.remove_answer_ids.is_empty() {
            return Err(DomainError::invalid(
                "a new question has no answers to remove",
            ));
        }

        let answers = reconcile_answers(Vec::new(), &[], fields.answers, limits)?;
        Ok(Question::new(text).with_answers(answers))
    }
}

/// Reconcile a quiz's questions: drop `remove_ids`, update by id (recursing
/// into answers), append inserts.
pub fn reconcile_questions(
    existing: Vec<Question>,
    remove_ids: &[QuestionId],
    patches: Vec<QuestionPatch>,
    limits: &PatchLimits,
) -> Result<Vec<Question>, DomainError> {
    reconcile(existing, remove_ids, patches, limits)
}
