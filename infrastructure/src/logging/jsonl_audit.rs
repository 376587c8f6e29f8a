//! JSONL audit trail for patch requests.
//!
//! Each [`AuditEvent`] becomes one line: `{"timestamp": .., "type": .., ..}`.
//! A line is written with a single `write_all` on a file opened in append
//! mode, so concurrent CLI runs sharing one log never interleave records.

use quizpatch_application::ports::audit_logger::{AuditEvent, PatchAuditLogger};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// One line of the audit log.
#[derive(Serialize)]
struct AuditRecord<'a> {
    timestamp: String,
    #[serde(flatten)]
    event: &'a AuditEvent,
}

/// Audit logger that appends one JSON object per line.
pub struct JsonlPatchAuditLogger {
    file: Mutex<File>,
    path: PathBuf,
}

impl JsonlPatchAuditLogger {
    /// Open (or create) the audit log at the given path in append mode.
    ///
    /// Creates parent directories if needed. Returns `None` if the file
    /// cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create audit log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(Self {
                file: Mutex::new(file),
                path: path.to_path_buf(),
            }),
            Err(e) => {
                warn!("Could not open audit log {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn encode(event: &AuditEvent) -> Option<Vec<u8>> {
        let record = AuditRecord {
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            event,
        };
        let mut line = serde_json::to_vec(&record).ok()?;
        line.push(b'\n');
        Some(line)
    }
}

impl PatchAuditLogger for JsonlPatchAuditLogger {
    fn log(&self, event: AuditEvent) {
        let Some(line) = Self::encode(&event) else {
            warn!("Could not encode {} audit event", event.event_type());
            return;
        };
        let Ok(mut file) = self.file.lock() else {
            return;
        };
        if let Err(e) = file.write_all(&line) {
            warn!(
                "Dropped {} audit event for quiz {}: {}",
                event.event_type(),
                event.quiz_id(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizpatch_domain::QuizId;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    fn applied(version: u64) -> AuditEvent {
        AuditEvent::PatchApplied {
            quiz_id: QuizId::from("Q1"),
            version,
            persisted: true,
            questions_removed: 1,
            questions_updated: 1,
            questions_inserted: 0,
        }
    }

    #[test]
    fn test_writes_one_record_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let logger = JsonlPatchAuditLogger::new(&path).unwrap();

        logger.log(applied(2));
        logger.log(AuditEvent::PatchRejected {
            quiz_id: QuizId::from("Q1"),
            kind: "not_found",
            error: "answer not found: B9".to_string(),
        });

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "patch_applied");
        assert_eq!(records[0]["quiz_id"], "Q1");
        assert_eq!(records[0]["version"], 2);
        assert_eq!(records[0]["questions_removed"], 1);
        assert!(records[0]["timestamp"].is_string());
        assert_eq!(records[1]["type"], "patch_rejected");
        assert_eq!(records[1]["kind"], "not_found");
        assert_eq!(records[1]["error"], "answer not found: B9");
    }

    #[test]
    fn test_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("audit.jsonl");

        for version in 2..4 {
            let logger = JsonlPatchAuditLogger::new(&path).unwrap();
            logger.log(applied(version));
        }

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["version"], 3);
    }

    #[test]
    fn test_unwritable_location_disables_logging() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        assert!(JsonlPatchAuditLogger::new(blocker.join("audit.jsonl")).is_none());
    }
}
