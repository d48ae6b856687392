//! Line framer: Splits a chunked byte stream into complete lines.
//!
//! Reads from the network arrive at arbitrary boundaries, often in the
//! middle of a line and sometimes in the middle of a multi-byte UTF-8
//! character. The framer buffers raw bytes and only hands out lines once
//! their terminator has been seen.

/// Incremental splitter for `\n` / `\r\n` terminated lines.
#[derive(Debug, Default)]
pub struct LineFramer {
    /// Bytes of the current, not yet terminated line.
    pending: Vec<u8>,
}

impl LineFramer {
    /// Create an empty framer.
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Feed a chunk of bytes and collect every line it completes.
    ///
    /// Returned lines have their terminator (`\n` or `\r\n`) stripped.
    /// Bytes after the last terminator stay buffered for the next call.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<Vec<u8>> {
        let mut lines = Vec::new();
        let mut rest = bytes;

        while let Some(pos) = rest.iter().position(|&b| b == b'\n') {
            self.pending.extend_from_slice(&rest[..pos]);
            let mut line = std::mem::take(&mut self.pending);
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(line);
            rest = &rest[pos + 1..];
        }

        self.pending.extend_from_slice(rest);
        lines
    }

    /// Number of bytes waiting for a terminator.
    #[inline]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// End of input: discard the unterminated tail.
    ///
    /// Returns the number of bytes dropped. By framing contract a line
    /// without a terminator is incomplete and never becomes a frame.
    pub fn finish(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }
}
