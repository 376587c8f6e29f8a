//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to domain types where needed.

mod limits;
mod logging;
mod output;
mod storage;

pub use limits::FileLimitsConfig;
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use storage::FileStorageConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors detected by [`FileConfig::validate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("{0} cannot be 0")]
    ZeroLimit(&'static str),

    #[error("storage.dir cannot be empty")]
    EmptyStorageDir,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Text limits for patch validation
    pub limits: FileLimitsConfig,
    /// Quiz storage location
    pub storage: FileStorageConfig,
    /// Audit logging
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if let Some(field) = self.limits.zero_field() {
            return Err(ConfigValidationError::ZeroLimit(field));
        }

        if self.storage.dir.trim().is_empty() {
            return Err(ConfigValidationError::EmptyStorageDir);
        }

        Ok(())
    }
}
