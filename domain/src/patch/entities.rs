//! Patch value objects
//!
//! A patch describes, for one quiz, which nodes to remove, which to update in
//! place and which to insert. Update and insert entries are kept apart by
//! [`NodePatch`] so the reconciler never has to inspect nullable ids.

use super::field_update::FieldUpdate;
use super::wire::QuizPatchDocument;
use crate::core::ids::{AnswerId, QuestionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of a child patch list: either target an existing node or create a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodePatch<Id, F> {
    /// Apply `fields` to the existing node with `id`.
    Update { id: Id, fields: F },
    /// Create a new node from `fields`, appended after existing nodes.
    Insert { fields: F },
}

impl<Id, F> NodePatch<Id, F> {
    pub fn update(id: impl Into<Id>, fields: F) -> Self {
        NodePatch::Update {
            id: id.into(),
            fields,
        }
    }

    pub fn insert(fields: F) -> Self {
        NodePatch::Insert { fields }
    }

    /// The id this entry targets, if it is an update.
    pub fn target_id(&self) -> Option<&Id> {
        match self {
            NodePatch::Update { id, .. } => Some(id),
            NodePatch::Insert { .. } => None,
        }
    }

    pub fn fields(&self) -> &F {
        match self {
            NodePatch::Update { fields, .. } | NodePatch::Insert { fields } => fields,
        }
    }
}

/// Present fields of an answer patch; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerFields {
    pub text: Option<String>,
    pub correct: Option<bool>,
}

impl AnswerFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_correct(mut self, correct: bool) -> Self {
        self.correct = Some(correct);
        self
    }
}

/// Present fields of a question patch plus its nested answer changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFields {
    pub text: Option<String>,
    pub remove_answer_ids: Vec<AnswerId>,
    pub answers: Vec<AnswerPatch>,
}

impl QuestionFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn removing_answer(mut self, id: impl Into<AnswerId>) -> Self {
        self.remove_answer_ids.push(id.into());
        self
    }

    pub fn with_answer(mut self, answer: AnswerPatch) -> Self {
        self.answers.push(answer);
        self
    }
}

pub type AnswerPatch = NodePatch<AnswerId, AnswerFields>;
pub type QuestionPatch = NodePatch<QuestionId, QuestionFields>;

/// A partial update of one quiz aggregate (Value Object)
///
/// Deserializes from the camelCase wire document; see
/// [`QuizPatchDocument`](super::wire::QuizPatchDocument).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "QuizPatchDocument", into = "QuizPatchDocument")]
pub struct QuizPatch {
    pub title: FieldUpdate<String>,
    pub due_date: FieldUpdate<DateTime<Utc>>,
    pub remove_question_ids: Vec<QuestionId>,
    pub questions: Vec<QuestionPatch>,
}

impl QuizPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = FieldUpdate::Set(title.into());
        self
    }

    pub fn with_due_date(mut self, due_date: FieldUpdate<DateTime<Utc>>) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn removing_question(mut self, id: impl Into<QuestionId>) -> Self {
        self.remove_question_ids.push(id.into());
        self
    }

    pub fn with_question(mut self, question: QuestionPatch) -> Self {
        self.questions.push(question);
        self
    }

    /// Whether applying this patch cannot change anything.
    pub fn is_empty(&self) -> bool {
        self.title.is_unchanged()
            && self.due_date.is_unchanged()
            && self.remove_question_ids.is_empty()
            && self.questions.is_empty()
    }

    /// Counts used for logging: (removed, updated, inserted) questions.
    pub fn question_counts(&self) -> (usize, usize, usize) {
        let updated = self
            .questions
            .iter()
            .filter(|q| q.target_id().is_some())
            .count();
        (
            self.remove_question_ids.len(),
            updated,
            self.questions.len() - updated,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patch() {
        assert!(QuizPatch::new().is_empty());
        assert!(!QuizPatch::new().with_title("t").is_empty());
        assert!(!QuizPatch::new().removing_question("A1").is_empty());
    }

    #[test]
    fn test_question_counts() {
        let patch = QuizPatch::new()
            .removing_question("A9")
            .with_question(QuestionPatch::update("A1", QuestionFields::new()))
            .with_question(QuestionPatch::insert(QuestionFields::new().with_text("new")))
            .with_question(QuestionPatch::insert(QuestionFields::new().with_text("new 2")));
        assert_eq!(patch.question_counts(), (1, 1, 2));
    }

    #[test]
    fn test_target_id() {
        let update = AnswerPatch::update("a1", AnswerFields::new());
        let insert = AnswerPatch::insert(AnswerFields::new().with_text("x"));
        assert_eq!(update.target_id(), Some(&AnswerId::from("a1")));
        assert_eq!(insert.target_id(), None);
        assert_eq!(insert.fields().text.as_deref(), Some("x"));
    }
}
