//! Frame decoder: Lazy iterator of frames over any byte reader.

use super::frame::{classify_line, Frame};
use super::framer::LineFramer;
use crate::{Error, Result};
use std::collections::VecDeque;
use std::io::{ErrorKind, Read};
use tracing::{debug, trace, warn};

/// Size of a single read from the underlying reader.
const READ_CHUNK: usize = 8 * 1024;

/// Counters kept while decoding, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Data frames and sentinels yielded.
    pub frames: u64,
    /// Complete lines that were not data lines.
    pub ignored_lines: u64,
    /// Complete lines dropped because they were not valid UTF-8.
    pub malformed_lines: u64,
    /// Bytes of the unterminated tail discarded at end of input.
    pub discarded_bytes: usize,
}

/// Decodes a line-framed byte stream into [`Frame`]s.
///
/// The iterator is finite and cannot be restarted. It ends when the reader
/// reports end of input, or right after yielding a read error.
/// The end-of-stream sentinel is yielded as [`Frame::Done`]; deciding what
/// to do with it is up to the caller.
pub struct FrameDecoder<R> {
    reader: R,
    framer: LineFramer,
    ready: VecDeque<Vec<u8>>,
    read_buf: Box<[u8]>,
    finished: bool,
    stats: DecodeStats,
}

impl<R: Read> FrameDecoder<R> {
    /// Wrap a reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            framer: LineFramer::new(),
            ready: VecDeque::new(),
            read_buf: vec![0; READ_CHUNK].into_boxed_slice(),
            finished: false,
            stats: DecodeStats::default(),
        }
    }

    /// Counters collected so far.
    pub const fn stats(&self) -> DecodeStats {
        self.stats
    }

    /// Turn a complete line into a frame, dropping malformed lines.
    fn classify(&mut self, line: &[u8]) -> Option<Frame> {
        let Ok(line) = std::str::from_utf8(line) else {
            self.stats.malformed_lines += 1;
            warn!(len = line.len(), "dropping line that is not valid UTF-8");
            return None;
        };

        if let Some(frame) = classify_line(line) {
            self.stats.frames += 1;
            Some(frame)
        } else {
            self.stats.ignored_lines += 1;
            trace!(line, "ignoring non-data line");
            None
        }
    }
}

impl<R: Read> Iterator for FrameDecoder<R> {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            while let Some(line) = self.ready.pop_front() {
                if let Some(frame) = self.classify(&line) {
                    return Some(Ok(frame));
                }
            }

            if self.finished {
                return None;
            }

            match self.reader.read(&mut self.read_buf) {
                Ok(0) => {
                    self.finished = true;
                    let dropped = self.framer.finish();
                    if dropped > 0 {
                        self.stats.discarded_bytes = dropped;
                        debug!(bytes = dropped, "discarding unterminated trailing line");
                    }
                }
                Ok(n) => {
                    let lines = self.framer.push(&self.read_buf[..n]);
                    self.ready.extend(lines);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    self.finished = true;
                    return Some(Err(Error::io(e)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::Fragment;
    use std::io::Cursor;

    /// Reader that hands out its data in fixed-size pieces.
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        step: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let end = (self.pos + self.step).min(self.data.len()).min(self.pos + buf.len());
            let n = end - self.pos;
            buf[..n].copy_from_slice(&self.data[self.pos..end]);
            self.pos = end;
            Ok(n)
        }
    }

    /// Reader that fails after its data is exhausted.
    struct Broken(Cursor<Vec<u8>>);

    impl Read for Broken {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match self.0.read(buf)? {
                0 => Err(std::io::Error::new(ErrorKind::ConnectionReset, "reset")),
                n => Ok(n),
            }
        }
    }

    fn data(texts: &[&str]) -> Vec<Frame> {
        texts.iter().map(|t| Frame::Data(Fragment::new(*t))).collect()
    }

    #[test]
    fn test_decoder_basic_stream() {
        let body = "data: Hel\n\ndata: lo\n\ndata: !\n\ndata: [DONE]\n\n";
        let frames: Vec<Frame> = FrameDecoder::new(Cursor::new(body))
            .collect::<Result<_>>()
            .unwrap();
        let mut expected = data(&["Hel", "lo", "!"]);
        expected.push(Frame::Done);
        assert_eq!(frames, expected);
    }

    #[test]
    fn test_decoder_one_byte_reads() {
        let body = "data: Привет\n\ndata:  мир\n\n".as_bytes().to_vec();
        let reader = Trickle { data: body, pos: 0, step: 1 };
        let frames: Vec<Frame> = FrameDecoder::new(reader).collect::<Result<_>>().unwrap();
        assert_eq!(frames, data(&["Привет", " мир"]));
    }

    #[test]
    fn test_decoder_discards_unterminated_tail() {
        let body = "data: whole\ndata: half";
        let mut decoder = FrameDecoder::new(Cursor::new(body));
        let frames: Vec<Frame> = decoder.by_ref().collect::<Result<_>>().unwrap();
        assert_eq!(frames, data(&["whole"]));
        assert_eq!(decoder.stats().discarded_bytes, "data: half".len());
    }

    #[test]
    fn test_decoder_drops_malformed_line_and_continues() {
        let mut body = b"data: ok\n".to_vec();
        body.extend_from_slice(b"data: \xFF\xFE\n");
        body.extend_from_slice(b"data: still ok\n");
        let mut decoder = FrameDecoder::new(Cursor::new(body));
        let frames: Vec<Frame> = decoder.by_ref().collect::<Result<_>>().unwrap();
        assert_eq!(frames, data(&["ok", "still ok"]));
        assert_eq!(decoder.stats().malformed_lines, 1);
    }

    #[test]
    fn test_decoder_ignores_non_data_lines() {
        let body = ": ping\nevent: message\nid: 7\ndata: x\n\n";
        let mut decoder = FrameDecoder::new(Cursor::new(body));
        let frames: Vec<Frame> = decoder.by_ref().collect::<Result<_>>().unwrap();
        assert_eq!(frames, data(&["x"]));
        assert_eq!(decoder.stats().ignored_lines, 4);
    }

    #[test]
    fn test_decoder_surfaces_read_error_then_ends() {
        let reader = Broken(Cursor::new(b"data: a\n".to_vec()));
        let mut decoder = FrameDecoder::new(reader);
        assert_eq!(decoder.next().unwrap().unwrap(), Frame::Data(Fragment::new("a")));
        assert!(matches!(decoder.next(), Some(Err(Error::Io(_)))));
        assert!(decoder.next().is_none());
    }
}
