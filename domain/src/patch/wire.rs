//! JSON wire form of a quiz patch.
//!
//! On the wire an entry with an `id` targets an existing node and an entry
//! without one creates a new node. The conversion into [`QuizPatch`] turns
//! that convention into explicit [`NodePatch`] variants.

use super::entities::{
    AnswerFields, AnswerPatch, NodePatch, QuestionFields, QuestionPatch, QuizPatch,
};
use super::field_update::FieldUpdate;
use crate::core::ids::{AnswerId, QuestionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QuizPatchDocument {
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub title: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub due_date: FieldUpdate<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove_question_ids: Vec<QuestionId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub questions: Vec<QuestionPatchDocument>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QuestionPatchDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<QuestionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove_answer_ids: Vec<AnswerId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<AnswerPatchDocument>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnswerPatchDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AnswerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
}

fn node_patch<Id, F>(id: Option<Id>, fields: F) -> NodePatch<Id, F> {
    match id {
        Some(id) => NodePatch::Update { id, fields },
        None => NodePatch::Insert { fields },
    }
}

fn split_node_patch<Id, F>(patch: NodePatch<Id, F>) -> (Option<Id>, F) {
    match patch {
        NodePatch::Update { id, fields } => (Some(id), fields),
        NodePatch::Insert { fields } => (None, fields),
    }
}

impl From<AnswerPatchDocument> for AnswerPatch {
    fn from(doc: AnswerPatchDocument) -> Self {
        node_patch(
            doc.id,
            AnswerFields {
                text: doc.text,
                correct: doc.correct,
            },
        )
    }
}

impl From<QuestionPatchDocument> for QuestionPatch {
    fn from(doc: QuestionPatchDocument) -> Self {
        node_patch(
            doc.id,
            QuestionFields {
                text: doc.text,
                remove_answer_ids: doc.remove_answer_ids,
                answers: doc.answers.into_iter().map(AnswerPatch::from).collect(),
            },
        )
    }
}

impl From<QuizPatchDocument> for QuizPatch {
    fn from(doc: QuizPatchDocument) -> Self {
        Self {
            title: doc.title,
            due_date: doc.due_date,
            remove_question_ids: doc.remove_question_ids,
            questions: doc.questions.into_iter().map(QuestionPatch::from).collect(),
        }
    }
}

impl From<AnswerPatch> for AnswerPatchDocument {
    fn from(patch: AnswerPatch) -> Self {
        let (id, fields) = split_node_patch(patch);
        Self {
            id,
            text: fields.text,
            correct: fields.correct,
        }
    }
}

impl From<QuestionPatch> for QuestionPatchDocument {
    fn from(patch: QuestionPatch) -> Self {
        let (id, fields) = split_node_patch(patch);
        Self {
            id,
            text: fields.text,
            remove_answer_ids: fields.remove_answer_ids,
            answers: fields.answers.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<QuizPatch> for QuizPatchDocument {
    fn from(patch: QuizPatch) -> Self {
        Self {
            title: patch.title,
            due_date: patch.due_date,
            remove_question_ids: patch.remove_question_ids,
            questions: patch.questions.into_iter().map(Into::into).collect(),
        }
    }
}
