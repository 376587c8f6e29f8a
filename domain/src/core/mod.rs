//! Core domain concepts shared across all subdomains.
//!
//! - [`ids`] - identifier value objects (`QuizId`, `QuestionId`, `AnswerId`)
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod ids;
pub mod string;
