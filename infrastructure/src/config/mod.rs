//! Configuration file loading for quizpatch
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `QUIZPATCH_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./quizpatch.toml` or `./.quizpatch.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/quizpatch/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileLimitsConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FileStorageConfig,
};
pub use loader::ConfigLoader;
