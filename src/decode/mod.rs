//! Stream decoding: Server-sent lines to reply fragments.
//!
//! The chat endpoint answers with a line-oriented body:
//!
//! ```text
//! data: Hel
//!
//! data: lo
//!
//! data: [DONE]
//! ```
//!
//! - [`LineFramer`] turns arbitrary read chunks into complete lines
//! - [`classify_line`] turns a line into a [`Frame`]
//! - [`FrameDecoder`] ties both to a [`std::io::Read`] as a lazy iterator

mod decoder;
mod frame;
mod framer;

pub use decoder::{DecodeStats, FrameDecoder};
pub use frame::{classify_line, Fragment, Frame, DATA_PREFIX, DONE_SENTINEL};
pub use framer::LineFramer;
