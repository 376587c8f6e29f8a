//! Text limits from TOML (`[limits]` section)

use quizpatch_domain::PatchLimits;
use serde::{Deserialize, Serialize};

/// Raw limits configuration from TOML
///
/// # Example
///
/// ```toml
/// [limits]
/// max_title_len = 200
/// max_question_text_len = 1000
/// max_answer_text_len = 500
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLimitsConfig {
    pub max_title_len: usize,
    pub max_question_text_len: usize,
    pub max_answer_text_len: usize,
}

impl Default for FileLimitsConfig {
    fn default() -> Self {
        let limits = PatchLimits::default();
        Self {
            max_title_len: limits.max_title_len,
            max_question_text_len: limits.max_question_text_len,
            max_answer_text_len: limits.max_answer_text_len,
        }
    }
}

impl FileLimitsConfig {
    pub fn to_limits(&self) -> PatchLimits {
        PatchLimits::default()
            .with_max_title_len(self.max_title_len)
            .with_max_question_text_len(self.max_question_text_len)
            .with_max_answer_text_len(self.max_answer_text_len)
    }

    /// Name of the first limit set to zero, if any.
    pub(super) fn zero_field(&self) -> Option<&'static str> {
        [
            ("limits.max_title_len", self.max_title_len),
            ("limits.max_question_text_len", self.max_question_text_len),
            ("limits.max_answer_text_len", self.max_answer_text_len),
        ]
        .into_iter()
        .find(|(_, value)| *value == 0)
        .map(|(name, _)| name)
    }
}
