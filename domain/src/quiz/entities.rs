//! Quiz aggregate entities

use crate::core::error::{DomainError, EntityKind};
use crate::core::ids::{AnswerId, QuestionId, QuizId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single answer option of a question (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// `None` until the gateway persists the answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AnswerId>,
    pub text: String,
    #[serde(default)]
    pub correct: bool,
}

impl Answer {
    /// A not-yet-persisted answer.
    pub fn new(text: impl Into<String>, correct: bool) -> Self {
        Self {
            id: None,
            text: text.into(),
            correct,
        }
    }

    pub fn with_id(id: impl Into<AnswerId>, text: impl Into<String>, correct: bool) -> Self {
        Self {
            id: Some(id.into()),
            text: text.into(),
            correct,
        }
    }
}

/// A question owned by exactly one quiz (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// `None` until the gateway persists the question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<QuestionId>,
    pub text: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl Question {
    /// A not-yet-persisted question without answers.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            answers: Vec::new(),
        }
    }

    pub fn with_id(id: impl Into<QuestionId>, text: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            text: text.into(),
            answers: Vec::new(),
        }
    }

    pub fn with_answers(mut self, answers: Vec<Answer>) -> Self {
        self.answers = answers;
        self
    }

    pub fn answer(&self, id: &AnswerId) -> Option<&Answer> {
        self.answers.iter().find(|a| a.id.as_ref() == Some(id))
    }
}

/// The quiz aggregate root.
///
/// A quiz owns its questions, and each question owns its answers. The whole
/// tree is loaded and saved as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: QuizId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn new(id: impl Into<QuizId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            due_date: None,
            questions: Vec::new(),
        }
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_questions(mut self, questions: Vec<Question>) -> Self {
        self.questions = questions;
        self
    }

    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id.as_ref() == Some(id))
    }

    pub fn answer_count(&self) -> usize {
        self.questions.iter().map(|q| q.answers.len()).sum()
    }

    /// Whether any node in the tree still lacks an id.
    pub fn has_unsaved_nodes(&self) -> bool {
        self.questions
            .iter()
            .any(|q| q.id.is_none() || q.answers.iter().any(|a| a.id.is_none()))
    }

    /// Verify the identity invariants of the tree.
    ///
    /// Question ids are unique within the quiz and answer ids are unique
    /// within their question. Missing ids are allowed.
    pub fn check_invariants(&self) -> Result<(), DomainError> {
        let mut question_ids = HashSet::new();
        for question in &self.questions {
            if let Some(id) = &question.id
                && !question_ids.insert(id)
            {
                return Err(DomainError::CorruptAggregate(format!(
                    "duplicate {} id {} in quiz {}",
                    EntityKind::Question,
                    id,
                    self.id
                )));
            }
            let mut answer_ids = HashSet::new();
            for answer in &question.answers {
                if let Some(id) = &answer.id
                    && !answer_ids.insert(id)
                {
                    return Err(DomainError::CorruptAggregate(format!(
                        "duplicate {} id {} in question {}",
                        EntityKind::Answer,
                        id,
                        question.id.as_ref().map(|q| q.as_str()).unwrap_or("<new>")
                    )));
                }
            }
        }
        Ok(())
    }

    /// Give every id-less node an id produced by `next_id`.
    ///
    /// Used by gateways at save time; existing ids are never replaced.
    pub fn assign_missing_ids(&mut self, mut next_id: impl FnMut(EntityKind) -> String) {
        for question in &mut self.questions {
            if question.id.is_none() {
                question.id = Some(QuestionId::new(next_id(EntityKind::Question)));
            }
            for answer in &mut question.answers {
                if answer.id.is_none() {
                    answer.id = Some(AnswerId::new(next_id(EntityKind::Answer)));
                }
            }
        }
    }
}
