//! Text limits enforced while applying a patch.

use crate::core::error::DomainError;
use crate::core::string::{char_len, is_blank};
use crate::quiz::entities::Quiz;
use serde::{Deserialize, Serialize};

/// Maximum text lengths, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchLimits {
    pub max_title_len: usize,
    pub max_question_text_len: usize,
    pub max_answer_text_len: usize,
}

impl Default for PatchLimits {
    fn default() -> Self {
        Self {
            max_title_len: 200,
            max_question_text_len: 1000,
            max_answer_text_len: 500,
        }
    }
}

impl PatchLimits {
    pub fn with_max_title_len(mut self, max: usize) -> Self {
        self.max_title_len = max;
        self
    }

    pub fn with_max_question_text_len(mut self, max: usize) -> Self {
        self.max_question_text_len = max;
        self
    }

    pub fn with_max_answer_text_len(mut self, max: usize) -> Self {
        self.max_answer_text_len = max;
        self
    }

    pub fn check_title(&self, title: &str) -> Result<(), DomainError> {
        check_text("title", title, self.max_title_len)
    }

    pub fn check_question_text(&self, text: &str) -> Result<(), DomainError> {
        check_text("text", text, self.max_question_text_len)
    }

    pub fn check_answer_text(&self, text: &str) -> Result<(), DomainError> {
        check_text("text", text, self.max_answer_text_len)
    }

    /// Check a whole quiz entering storage from outside a patch.
    ///
    /// Every text must pass the same rules a patch is held to, and duplicate
    /// ids are reported as an invalid document rather than corrupt storage.
    pub fn check_quiz(&self, quiz: &Quiz) -> Result<(), DomainError> {
        self.check_title(&quiz.title)?;
        for (q, question) in quiz.questions.iter().enumerate() {
            self.check_question_text(&question.text)
                .map_err(|e| e.within(format!("question #{}", q + 1)))?;
            for (a, answer) in question.answers.iter().enumerate() {
                self.check_answer_text(&answer.text)
                    .map_err(|e| e.within(format!("question #{}: answer #{}", q + 1, a + 1)))?;
            }
        }
        quiz.check_invariants().map_err(|e| match e {
            DomainError::CorruptAggregate(reason) => DomainError::InvalidPatch(reason),
            other => other,
        })
    }
}

fn check_text(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if is_blank(value) {
        return Err(DomainError::invalid(format!("{} must not be blank", field)));
    }
    let len = char_len(value);
    if len > max {
        return Err(DomainError::invalid(format!(
            "{} is {} characters, maximum is {}",
            field, len, max
        )));
    }
    Ok(())
}
