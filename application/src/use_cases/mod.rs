//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod apply_quiz_patch;
pub mod quiz_view;
pub mod show_quiz;
