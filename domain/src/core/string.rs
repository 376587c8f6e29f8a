//! String utilities for the domain layer.

/// Whether the text is empty or whitespace only.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Length in characters, which is what text limits are expressed in.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}
