//! Logging infrastructure - structured patch audit logging.
//!
//! Provides [`JsonlPatchAuditLogger`], a JSONL file writer that implements
//! the [`PatchAuditLogger`](quizpatch_application::PatchAuditLogger) port.

mod jsonl_audit;

pub use jsonl_audit::JsonlPatchAuditLogger;
