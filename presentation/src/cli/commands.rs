//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tree of the quiz
    Text,
    /// Pretty-printed JSON
    Json,
}

/// CLI arguments for quizpatch
#[derive(Parser, Debug)]
#[command(name = "quizpatch")]
#[command(author, version, about = "Apply nested partial updates to stored quizzes")]
#[command(long_about = r#"
quizpatch applies a single JSON patch to a stored quiz. The patch can remove,
update and insert questions, and the answers inside each question, in one
request. Either the whole patch is saved or nothing is.

Configuration files are loaded from (in priority order):
1. QUIZPATCH_<SECTION>__<KEY> environment variables
2. --config <path>     Explicit config file
3. ./quizpatch.toml    Project-level config
4. ~/.config/quizpatch/config.toml   Global config

Example:
  quizpatch import quiz.json
  quizpatch apply Q1 --patch patch.json
  cat patch.json | quizpatch apply Q1 --patch - --dry-run -o json
  quizpatch show Q1
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory holding the stored quizzes (overrides storage.dir)
    #[arg(long, value_name = "DIR", global = true)]
    pub store: Option<PathBuf>,

    /// Output format (overrides output.format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Apply a patch document to a stored quiz
    Apply {
        /// Id of the quiz to patch
        quiz_id: String,

        /// Patch document, or `-` to read it from stdin
        #[arg(short, long, value_name = "FILE")]
        patch: PathBuf,

        /// Validate and reconcile without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Print a stored quiz
    Show {
        /// Id of the quiz to print
        quiz_id: String,
    },

    /// Store a new quiz from a JSON file
    Import {
        /// Quiz document, or `-` to read it from stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Returns `true` when `path` means "read from stdin".
pub fn is_stdin(path: &std::path::Path) -> bool {
    path.as_os_str() == "-"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_apply() {
        let cli = Cli::parse_from([
            "quizpatch", "apply", "Q1", "--patch", "patch.json", "--dry-run", "-o", "json",
        ]);
        assert_eq!(
            cli.command,
            Some(Command::Apply {
                quiz_id: "Q1".to_string(),
                patch: PathBuf::from("patch.json"),
                dry_run: true,
            })
        );
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_parse_global_flags_before_subcommand() {
        let cli = Cli::parse_from(["quizpatch", "-vv", "--store", "/tmp/q", "show", "Q1"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/q")));
        assert!(matches!(cli.command, Some(Command::Show { .. })));
    }

    #[test]
    fn test_apply_requires_patch() {
        assert!(Cli::try_parse_from(["quizpatch", "apply", "Q1"]).is_err());
    }

    #[test]
    fn test_is_stdin() {
        assert!(is_stdin(std::path::Path::new("-")));
        assert!(!is_stdin(std::path::Path::new("patch.json")));
    }
}
