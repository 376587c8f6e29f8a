//! Domain layer for quizpatch
//!
//! This crate contains the quiz aggregate, the patch model and the
//! reconciliation engine. It has no dependencies on infrastructure or
//! presentation concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Aggregate
//!
//! A [`Quiz`] owns an ordered list of [`Question`]s, each owning an ordered
//! list of [`Answer`]s. The quiz is the unit of atomic load and save.
//!
//! ## Patch
//!
//! A [`QuizPatch`] removes, updates and inserts nodes at both levels in one
//! request. Child entries are [`NodePatch::Update`] (by id) or
//! [`NodePatch::Insert`] (new node).
//!
//! ## Reconciliation
//!
//! [`QuizPatchApplier`] applies a patch to a private copy of the aggregate
//! and returns the result only if every step succeeded.

pub mod core;
pub mod patch;
pub mod quiz;
pub mod reconcile;

// Re-export commonly used types
pub use core::{
    error::{DomainError, EntityKind},
    ids::{AnswerId, QuestionId, QuizId},
};
pub use patch::{
    entities::{
        AnswerFields, AnswerPatch, NodePatch, QuestionFields, QuestionPatch, QuizPatch,
    },
    field_update::FieldUpdate,
    wire::{AnswerPatchDocument, QuestionPatchDocument, QuizPatchDocument},
};
pub use quiz::entities::{Answer, Question, Quiz};
pub use reconcile::{
    Reconcilable, answer::reconcile_answers, applier::QuizPatchApplier, limits::PatchLimits,
    question::reconcile_questions, reconcile,
};
