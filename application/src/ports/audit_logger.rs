//! Port for structured patch audit logging.
//!
//! Defines the [`PatchAuditLogger`] trait for recording the outcome of every
//! patch request to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures one
//! machine-readable record per request.

use quizpatch_domain::QuizId;
use serde::Serialize;

/// Outcome of one patch request.
///
/// Serializes with a `type` tag (`patch_applied` / `patch_rejected`) next to
/// the event fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuditEvent {
    PatchApplied {
        quiz_id: QuizId,
        /// Stored version after the save, or the base version of a dry run.
        version: u64,
        persisted: bool,
        questions_removed: usize,
        questions_updated: usize,
        questions_inserted: usize,
    },
    PatchRejected {
        quiz_id: QuizId,
        /// Flat error kind, e.g. `not_found`.
        kind: &'static str,
        error: String,
    },
}

impl AuditEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            AuditEvent::PatchApplied { .. } => "patch_applied",
            AuditEvent::PatchRejected { .. } => "patch_rejected",
        }
    }

    pub fn quiz_id(&self) -> &QuizId {
        match self {
            AuditEvent::PatchApplied { quiz_id, .. } | AuditEvent::PatchRejected { quiz_id, .. } => {
                quiz_id
            }
        }
    }
}

/// Port for logging audit events.
///
/// The `log` method is synchronous and non-fallible; write failures are
/// swallowed by implementations so they never change a request's outcome.
pub trait PatchAuditLogger: Send + Sync {
    fn log(&self, event: AuditEvent);
}

/// No-op implementation for tests and when auditing is disabled.
pub struct NoPatchAuditLogger;

impl PatchAuditLogger for NoPatchAuditLogger {
    fn log(&self, _event: AuditEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = AuditEvent::PatchRejected {
            quiz_id: QuizId::from("Q1"),
            kind: "conflict",
            error: "stale".to_string(),
        };
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(event.event_type(), "patch_rejected");
        assert_eq!(value["type"], "patch_rejected");
        assert_eq!(value["quiz_id"], "Q1");
        assert_eq!(value["kind"], "conflict");
    }
}
