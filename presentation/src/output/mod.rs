//! Output formatting for quiz views and errors

pub mod console;
pub mod formatter;
