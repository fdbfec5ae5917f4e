//! Expression buffer: the raw accumulated text of a pending calculation.
//!
//! The buffer is a plain character accumulator. It never fails and imposes
//! no grammar; validation happens when the expression is parsed.

use serde::{Deserialize, Serialize};

/// Glyph shown by views when the buffer is empty. Never stored.
pub const EMPTY_DISPLAY: &str = "0";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionBuffer {
    text: String,
}

impl ExpressionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token verbatim.
    pub fn append(&mut self, token: &str) {
        self.text.push_str(token);
    }

    /// Remove the last character. No-op on an empty buffer.
    pub fn delete_last(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Current contents, for parsing and display.
    pub fn current(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Contents as a view should render them (`"0"` when empty).
    pub fn display(&self) -> &str {
        if self.text.is_empty() {
            EMPTY_DISPLAY
        } else {
            &self.text
        }
    }
}
