//! Quiz aggregate.
//!
//! - [`entities::Quiz`] - the aggregate root, unit of atomic load/save
//! - [`entities::Question`] - owned by exactly one quiz
//! - [`entities::Answer`] - owned by exactly one question

pub mod entities;
