//! Presentation layer for quizpatch
//!
//! This crate contains CLI definitions and output formatters.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat, is_stdin};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
