//! Infrastructure layer for quizpatch
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLimitsConfig, FileLoggingConfig,
    FileOutputConfig, FileOutputFormat, FileStorageConfig,
};
pub use logging::JsonlPatchAuditLogger;
pub use storage::{InMemoryQuizGateway, JsonFileQuizGateway};
