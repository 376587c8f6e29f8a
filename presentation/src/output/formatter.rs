//! Output formatter trait

use quizpatch_application::{ApplyQuizPatchError, QuizView};

/// Trait for formatting command results
pub trait OutputFormatter {
    /// Format a quiz for a terminal
    fn format(&self, view: &QuizView) -> String;

    /// Format as JSON
    fn format_json(&self, view: &QuizView) -> String;

    /// Format a failed command
    fn format_error(&self, error: &ApplyQuizPatchError) -> String;
}
