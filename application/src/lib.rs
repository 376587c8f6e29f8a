//! Application layer for quizpatch
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::PatchParams;
pub use ports::{
    audit_logger::{AuditEvent, NoPatchAuditLogger, PatchAuditLogger},
    quiz_gateway::{GatewayError, QuizGateway, VersionedQuiz},
};
pub use use_cases::apply_quiz_patch::{
    ApplyQuizPatchError, ApplyQuizPatchInput, ApplyQuizPatchUseCase, ErrorKind,
};
pub use use_cases::quiz_view::QuizView;
pub use use_cases::show_quiz::ShowQuizUseCase;
