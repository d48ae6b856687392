//! Accumulated text: The append-only reply buffer.

use super::spacing::SpacingReconstructor;

/// The full reply text received so far.
///
/// Grows by whole fragments only; it is never truncated or reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccumulatedText {
    text: String,
    fragments: usize,
}

impl AccumulatedText {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self {
            text: String::new(),
            fragments: 0,
        }
    }

    /// Append a fragment through the spacing reconstructor.
    ///
    /// Returns the number of bytes appended (separator included).
    /// Empty fragments append nothing and are not counted.
    pub fn push_fragment(&mut self, spacing: &SpacingReconstructor, fragment: &str) -> usize {
        let splice = spacing.reconstruct(self.last_char(), fragment);
        if splice.is_empty() {
            return 0;
        }
        self.text.reserve(splice.len());
        self.text.push_str(splice.separator);
        self.text.push_str(splice.fragment);
        self.fragments += 1;
        splice.len()
    }

    /// The last character, if any.
    #[inline]
    pub fn last_char(&self) -> Option<char> {
        self.text.chars().next_back()
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if nothing has been appended.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of non-empty fragments appended.
    pub const fn fragment_count(&self) -> usize {
        self.fragments
    }

    /// The whole text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The first `end` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `end` is past the end or not on a character boundary.
    #[inline]
    pub fn prefix(&self, end: usize) -> &str {
        &self.text[..end]
    }

    /// The text after byte offset `start`.
    ///
    /// # Panics
    ///
    /// Panics if `start` is past the end or not on a character boundary.
    #[inline]
    pub fn suffix(&self, start: usize) -> &str {
        &self.text[start..]
    }
}
