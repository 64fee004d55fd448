//! Session text buffer
//!
//! Append and remove-last only; no random-access edits. Only the emitter
//! mutates it, and only in response to a qualifying gesture or click.

use serde::{Deserialize, Serialize};

/// The accumulated typed text for one session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text verbatim.
    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    /// Append a single space.
    pub fn push_space(&mut self) {
        self.text.push(' ');
    }

    /// Remove the last character. A no-op, not an error, on an empty buffer.
    pub fn pop(&mut self) {
        self.text.pop();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of characters (not bytes).
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl std::fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
