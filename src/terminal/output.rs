//! `OutputBuffer`: Single-syscall output buffer for ANSI sequences.

use crossterm::{
    cursor::{RestorePosition, SavePosition},
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::Write;

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// All output is accumulated here, then flushed in a single `write()` syscall
/// so a redrawn reply never shows half-cleared.
///
/// Queuing into a `Vec<u8>` cannot fail, so the builder methods discard the
/// `io::Result` crossterm returns.
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical reply (4KB).
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write text as is.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        let _ = queue!(self.data, Print(s));
    }

    /// Remember the cursor position.
    #[inline]
    pub fn save_position(&mut self) {
        let _ = queue!(self.data, SavePosition);
    }

    /// Return to the remembered cursor position.
    #[inline]
    pub fn restore_position(&mut self) {
        let _ = queue!(self.data, RestorePosition);
    }

    /// Erase from the cursor to the end of the screen.
    #[inline]
    pub fn clear_below(&mut self) {
        let _ = queue!(self.data, Clear(ClearType::FromCursorDown));
    }

    /// Start bold text.
    #[inline]
    pub fn bold(&mut self) {
        let _ = queue!(self.data, SetAttribute(Attribute::Bold));
    }

    /// End bold text.
    #[inline]
    pub fn normal_intensity(&mut self) {
        let _ = queue!(self.data, SetAttribute(Attribute::NormalIntensity));
    }

    /// Start dimmed text.
    #[inline]
    pub fn dim(&mut self) {
        let _ = queue!(self.data, SetAttribute(Attribute::Dim));
    }

    /// Set the foreground color.
    #[inline]
    pub fn set_fg(&mut self, color: Color) {
        let _ = queue!(self.data, SetForegroundColor(color));
    }

    /// Reset colors and attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        let _ = queue!(self.data, ResetColor, SetAttribute(Attribute::Reset));
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flush_writes_everything_once() {
        let mut buffer = OutputBuffer::new();
        buffer.bold();
        buffer.write_str("hi");
        buffer.normal_intensity();
        let mut out = Vec::new();
        buffer.flush_to(&mut out).unwrap();
        assert_eq!(out, buffer.as_bytes());
        assert_eq!(out, b"\x1b[1mhi\x1b[22m");
    }

    #[test]
    fn test_clear_reuses_buffer() {
        let mut buffer = OutputBuffer::new();
        buffer.write_str("abc");
        assert_eq!(buffer.len(), 3);
        buffer.clear();
        assert!(buffer.is_empty());
    }
}
