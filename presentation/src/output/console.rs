//! Console output formatter for quiz views

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use quizpatch_application::{ApplyQuizPatchError, QuizView};
use quizpatch_domain::{Answer, Question};
use serde_json::json;

/// Formats quiz views and errors for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Force colored output off; otherwise `colored` decides from the terminal.
    pub fn set_color(enabled: bool) {
        if !enabled {
            colored::control::set_override(false);
        }
    }

    /// Format the quiz as an indented tree
    pub fn format(view: &QuizView) -> String {
        let quiz = &view.quiz;
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Quiz {}", quiz.id)));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Title:".cyan().bold(), quiz.title));
        let due = quiz
            .due_date
            .map(|d| d.to_rfc3339())
            .unwrap_or_else(|| "none".to_string());
        output.push_str(&format!("{} {}\n", "Due:".cyan().bold(), due));

        let state = if view.persisted {
            format!("version {}", view.version).normal()
        } else {
            format!("dry run from version {}, not saved", view.version).yellow()
        };
        output.push_str(&format!("{} {}\n", "State:".cyan().bold(), state));

        output.push_str(&Self::section_header(&format!(
            "Questions ({})",
            quiz.questions.len()
        )));
        if quiz.questions.is_empty() {
            output.push_str(&format!("  {}\n", "(none)".dimmed()));
        }
        for (index, question) in quiz.questions.iter().enumerate() {
            output.push_str(&Self::question(index + 1, question));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(view: &QuizView) -> String {
        serde_json::to_string_pretty(view).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format an error for stderr
    pub fn format_error(error: &ApplyQuizPatchError) -> String {
        format!("{} [{}] {}", "error:".red().bold(), error.kind(), error)
    }

    /// Format an error as a JSON object with `kind` and `message`
    pub fn format_error_json(error: &ApplyQuizPatchError) -> String {
        let value = json!({
            "error": {
                "kind": error.kind(),
                "message": error.to_string(),
            }
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn question(position: usize, question: &Question) -> String {
        let mut output = format!(
            "\n{} {}\n",
            format!("{}. [{}]", position, Self::id_label(question.id.as_ref())).yellow(),
            question.text
        );
        for answer in &question.answers {
            output.push_str(&Self::answer(answer));
        }
        output
    }

    fn answer(answer: &Answer) -> String {
        let mark = if answer.correct {
            "[x]".green().bold()
        } else {
            "[ ]".normal()
        };
        format!(
            "   {} {} {}\n",
            mark,
            answer.text,
            format!("({})", Self::id_label(answer.id.as_ref())).dimmed()
        )
    }

    fn id_label(id: Option<&impl std::fmt::Display>) -> String {
        id.map(|id| id.to_string())
            .unwrap_or_else(|| "new".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, view: &QuizView) -> String {
        Self::format(view)
    }

    fn format_json(&self, view: &QuizView) -> String {
        Self::format_json(view)
    }

    fn format_error(&self, error: &ApplyQuizPatchError) -> String {
        Self::format_error(error)
    }
}
