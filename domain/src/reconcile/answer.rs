//! Answer-level reconciliation.

use super::limits::PatchLimits;
use super::{Reconcilable, reconcile};
use crate::core::error::{DomainError, EntityKind};
use crate::core::ids::AnswerId;
use crate::patch::entities::{AnswerFields, AnswerPatch};
use crate::quiz::entities::Answer;

impl Reconcilable for Answer {
    type Id = AnswerId;
    type Fields = AnswerFields;

    const KIND: EntityKind = EntityKind::Answer;

    fn id(&self) -> Option<&AnswerId> {
        self.id.as_ref()
    }

    fn apply_update(
        &mut self,
        fields: AnswerFields,
        limits: &PatchLimits,
    ) -> Result<(), DomainError> {
        if let Some(text) = fields.text {
            limits.check_answer_text(&text)?;
            self.text = text;
        }
        if let Some(correct) = fields.correct {
            self.correct = correct;
        }
        Ok(())
    }

    /// `correct` defaults to `false`, including for the first answer of a
    /// new question. Only the quiz creation flow marks a first answer correct.
    fn create(fields: AnswerFields, limits: &PatchLimits) -> Result<Self, DomainError> {
        let text = fields
            .text
            .ok_or_else(|| DomainError::invalid("text is required"))?;
        limits.check_answer_text(&text)?;
        Ok(Answer::new(text, fields.correct.unwrap_or(false)))
    }
}

/// Reconcile one question's answers: drop `remove_ids`, update by id, append inserts.
pub fn reconcile_answers(
    existing: Vec<Answer>,
    remove_ids: &[AnswerId],
    patches: Vec<AnswerPatch>,
    limits: &PatchLimits,
) -> Result<Vec<Answer>, DomainError> {
    reconcile(existing, remove_ids, patches, limits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers() -> Vec<Answer> {
        vec![
            Answer::with_id("a1", "4", true),
            Answer::with_id("a2", "5", false),
        ]
    }

    fn ids(answers: &[Answer]) -> Vec<Option<&str>> {
        answers
            .iter()
            .map(|a| a.id.as_ref().map(|id| id.as_str()))
            .collect()
    }

    #[test]
    fn test_update_only_touches_present_fields() {
        let result = reconcile_answers(
            answers(),
            &[],
            vec![AnswerPatch::update(
                "a2",
                AnswerFields::new().with_correct(true),
            )],
            &PatchLimits::default(),
        )
        .unwrap();

        assert_eq!(result[1], Answer::with_id("a2", "5", true));
        assert_eq!(result[0], Answer::with_id("a1", "4", true));
    }

    #[test]
    fn test_remove_then_insert() {
        let result = reconcile_answers(
            answers(),
            &[AnswerId::from("a2")],
            vec![AnswerPatch::insert(
                AnswerFields::new().with_text("22").with_correct(false),
            )],
            &PatchLimits::default(),
        )
        .unwrap();

        assert_eq!(ids(&result), vec![Some("a1"), None]);
        assert_eq!(result[1].text, "22");
    }

    #[test]
    fn test_insert_defaults_correct_to_false() {
        let result = reconcile_answers(
            Vec::new(),
            &[],
            vec![AnswerPatch::insert(AnswerFields::new().with_text("only"))],
            &PatchLimits::default(),
        )
        .unwrap();
        assert!(!result[0].correct);
    }

    #[test]
    fn test_insert_without_text_is_invalid() {
        let err = reconcile_answers(
            answers(),
            &[],
            vec![AnswerPatch::insert(AnswerFields::new().with_correct(true))],
            &PatchLimits::default(),
        )
        .unwrap_err();
        assert_eq!(err, DomainError::invalid("new answer #1: text is required"));
    }

    #[test]
    fn test_insert_with_blank_text_is_invalid() {
        let err = reconcile_answers(
            answers(),
            &[],
            vec![AnswerPatch::insert(AnswerFields::new().with_text("  "))],
            &PatchLimits::default(),
        )
        .unwrap_err();
        assert!(err.is_invalid_patch());
    }

    #[test]
    fn test_update_with_blank_text_names_answer() {
        let err = reconcile_answers(
            answers(),
            &[],
            vec![AnswerPatch::update("a1", AnswerFields::new().with_text(""))],
            &PatchLimits::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid("answer a1: text must not be blank")
        );
    }

    #[test]
    fn test_update_of_removed_answer_is_invalid() {
        let err = reconcile_answers(
            answers(),
            &[AnswerId::from("a2")],
            vec![AnswerPatch::update("a2", AnswerFields::new().with_text("5b"))],
            &PatchLimits::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid("answer a2 is both removed and updated")
        );
    }

    #[test]
    fn test_unknown_answer_is_not_found() {
        let err = reconcile_answers(
            answers(),
            &[],
            vec![AnswerPatch::update("a9", AnswerFields::new())],
            &PatchLimits::default(),
        )
        .unwrap_err();
        assert_eq!(err, DomainError::not_found(EntityKind::Answer, "a9"));
    }
}
