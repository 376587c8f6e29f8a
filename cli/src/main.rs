//! CLI entrypoint for quizpatch
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use quizpatch_application::{
    ApplyQuizPatchError, ApplyQuizPatchInput, ApplyQuizPatchUseCase, PatchParams, QuizView,
    ShowQuizUseCase,
};
use quizpatch_domain::{Quiz, QuizId, QuizPatch};
use quizpatch_infrastructure::{
    ConfigLoader, FileConfig, FileOutputFormat, JsonFileQuizGateway, JsonlPatchAuditLogger,
};
use quizpatch_presentation::{Cli, Command, ConsoleFormatter, OutputFormat, is_stdin};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match (cli.quiet, cli.verbose) {
        (true, _) => EnvFilter::new("error"),
        (false, 0) => EnvFilter::new("warn"),
        (false, 1) => EnvFilter::new("info"),
        (false, 2) => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;

    ConsoleFormatter::set_color(config.output.color);
    let format = cli.output.unwrap_or(match config.output.format {
        Some(FileOutputFormat::Json) => OutputFormat::Json,
        Some(FileOutputFormat::Text) | None => OutputFormat::Text,
    });

    let Some(command) = cli.command else {
        bail!("No command given. Run `quizpatch --help` for usage.");
    };

    // === Dependency Injection ===
    let store = cli
        .store
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.storage.dir));
    info!("Using quiz store {}", store.display());
    let limits = config.limits.to_limits();
    let gateway = Arc::new(JsonFileQuizGateway::new(store).with_limits(limits));

    let result: Result<QuizView, ApplyQuizPatchError> = match command {
        Command::Apply {
            quiz_id,
            patch,
            dry_run,
        } => {
            let text = read_input(&patch).await?;
            match parse_patch(&text) {
                Ok(patch) => {
                    let params = PatchParams::default()
                        .with_limits(limits)
                        .with_dry_run(dry_run);
                    let mut use_case = ApplyQuizPatchUseCase::new(gateway).with_params(params);
                    if let Some(logger) = audit_logger(&config) {
                        use_case = use_case.with_audit_logger(logger);
                    }
                    use_case
                        .execute(ApplyQuizPatchInput::new(quiz_id, patch))
                        .await
                }
                Err(e) => Err(e),
            }
        }
        Command::Show { quiz_id } => ShowQuizUseCase::new(gateway)
            .execute(&QuizId::new(quiz_id))
            .await
            .map_err(ApplyQuizPatchError::from),
        Command::Import { file } => {
            let text = read_input(&file).await?;
            let quiz: Quiz = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse quiz document {}", file.display()))?;
            gateway
                .insert(quiz)
                .await
                .map(QuizView::persisted)
                .map_err(ApplyQuizPatchError::from)
        }
    };

    // Output results
    match result {
        Ok(view) => {
            if !cli.quiet {
                let output = match format {
                    OutputFormat::Text => ConsoleFormatter::format(&view),
                    OutputFormat::Json => ConsoleFormatter::format_json(&view),
                };
                println!("{}", output);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            match format {
                OutputFormat::Text => eprintln!("{}", ConsoleFormatter::format_error(&error)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_error_json(&error)),
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Read a whole document from a file, or from stdin for `-`.
async fn read_input(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read from stdin")?;
        return Ok(text);
    }

    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// A patch that does not match the wire format is an invalid patch, not a usage error.
fn parse_patch(text: &str) -> Result<QuizPatch, ApplyQuizPatchError> {
    serde_json::from_str(text).map_err(|e| ApplyQuizPatchError::InvalidPatch(e.to_string()))
}

fn audit_logger(config: &FileConfig) -> Option<Arc<JsonlPatchAuditLogger>> {
    let path = config.logging.audit_log.as_ref()?;
    match JsonlPatchAuditLogger::new(path) {
        Some(logger) => Some(Arc::new(logger)),
        None => {
            warn!("Audit logging disabled");
            None
        }
    }
}
