//! Patch input describing create/update/delete operations on a quiz.
//!
//! - [`entities::QuizPatch`] - the top-level patch
//! - [`entities::NodePatch`] - update-by-id vs. insert for child nodes
//! - [`field_update::FieldUpdate`] - absent / null / value for scalar fields
//! - [`wire`] - the camelCase JSON document form

pub mod entities;
pub mod field_update;
pub mod wire;
