//! Domain error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of node an id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Quiz,
    Question,
    Answer,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Quiz => "quiz",
            EntityKind::Question => "question",
            EntityKind::Answer => "answer",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An id referenced by the patch does not exist in the current aggregate.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// The patch is structurally malformed.
    #[error("Invalid patch: {0}")]
    InvalidPatch(String),

    /// The loaded aggregate already violates an identity invariant.
    #[error("Corrupt aggregate: {0}")]
    CorruptAggregate(String),
}

impl DomainError {
    pub fn not_found(kind: EntityKind, id: impl std::fmt::Display) -> Self {
        DomainError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        DomainError::InvalidPatch(reason.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }

    pub fn is_invalid_patch(&self) -> bool {
        matches!(self, DomainError::InvalidPatch(_))
    }

    /// Prefix an `InvalidPatch` reason with the patch entry it came from.
    pub fn within(self, context: impl std::fmt::Display) -> Self {
        match self {
            DomainError::InvalidPatch(reason) => {
                DomainError::InvalidPatch(format!("{}: {}", context, reason))
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let error = DomainError::not_found(EntityKind::Answer, "a2");
        assert_eq!(error.to_string(), "answer not found: a2");
    }

    #[test]
    fn test_kind_checks() {
        assert!(DomainError::not_found(EntityKind::Quiz, "q").is_not_found());
        assert!(!DomainError::invalid("blank").is_not_found());
        assert!(DomainError::invalid("blank").is_invalid_patch());
        assert!(!DomainError::CorruptAggregate("dup".into()).is_invalid_patch());
    }
}
