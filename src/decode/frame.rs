//! Frame types produced by the decoder.

use std::fmt;

/// Marker that opens a data line.
pub const DATA_PREFIX: &str = "data: ";

/// Payload that signals explicit end of stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// One piece of reply text, in arrival order.
///
/// Fragments have no structure beyond their text and may be any
/// granularity: a token, a word, or several words.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Fragment(String);

impl Fragment {
    /// Wrap a piece of text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Borrow the text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the fragment carries no text.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unwrap into the owned text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Fragment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// A classified data line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Reply content.
    Data(Fragment),
    /// The end-of-stream sentinel.
    Done,
}

/// Classify one complete, terminator-free line.
///
/// Returns `None` for lines that are not data lines (blank event
/// separators, comments, other fields).
pub fn classify_line(line: &str) -> Option<Frame> {
    let payload = line.strip_prefix(DATA_PREFIX)?;
    if payload.trim() == DONE_SENTINEL {
        return Some(Frame::Done);
    }
    Some(Frame::Data(Fragment::new(payload)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_data_line() {
        assert_eq!(
            classify_line("data: Hello"),
            Some(Frame::Data(Fragment::new("Hello")))
        );
    }

    #[test]
    fn test_classify_keeps_leading_space_of_payload() {
        assert_eq!(
            classify_line("data:  world"),
            Some(Frame::Data(Fragment::new(" world")))
        );
    }

    #[test]
    fn test_classify_sentinel() {
        assert_eq!(classify_line("data: [DONE]"), Some(Frame::Done));
        assert_eq!(classify_line("data: [DONE] "), Some(Frame::Done));
    }

    #[test]
    fn test_classify_ignores_other_lines() {
        assert_eq!(classify_line(""), None);
        assert_eq!(classify_line(": keep-alive"), None);
        assert_eq!(classify_line("event: message"), None);
        assert_eq!(classify_line("data:no-space"), None);
    }

    #[test]
    fn test_classify_empty_payload() {
        assert_eq!(classify_line("data: "), Some(Frame::Data(Fragment::default())));
    }
}
