//! Storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};

/// Raw storage configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Directory holding one `<quiz_id>.json` file per quiz
    pub dir: String,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            dir: "quizzes".to_string(),
        }
    }
}
