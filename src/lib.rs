//! # Tickertape
//!
//! Incremental renderer for streamed chat replies.
//!
//! A chat server answers with a line-framed stream of text fragments. This
//! crate turns that stream into a steadily "typed" reply on a display
//! surface: fragments are decoded, joined with reconstructed word spacing,
//! revealed at a fixed cadence and formatted into safe markup on every
//! reveal.
//!
//! ## Core Concepts
//!
//! - **Frame decoding**: `data: ` lines carry fragments, `data: [DONE]` ends the reply
//! - **Spacing reconstruction**: a space goes between two fragments that both touch a word
//! - **Pacing**: a ticker reveals a few grapheme clusters at a time, never out of order
//! - **Safe formatting**: everything is escaped; `**bold**` is the only markup produced
//! - **Actor model**: reader and ticker threads feed one session loop through channels
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tickertape::{
//!     HttpConfig, HttpTransport, SendGate, SessionConfig, SessionIdentity, StreamSession,
//!     TerminalConfig, TerminalSurface,
//! };
//!
//! # fn main() -> tickertape::Result<()> {
//! let transport = Arc::new(HttpTransport::new(HttpConfig::default())?);
//! let session = StreamSession::new(
//!     SessionIdentity::generate(),
//!     SessionConfig::default(),
//!     transport,
//!     SendGate::new(),
//! );
//! let mut surface = TerminalSurface::stdout(TerminalConfig::default());
//! let report = session.send("hi", &mut surface);
//! println!("{}", report.revealed_text());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod decode;
pub mod error;
pub mod locale;
pub mod pacer;
pub mod session;
pub mod terminal;
pub mod text;
pub mod transport;

// Re-exports for convenience
pub use decode::{Frame, FrameDecoder, Fragment};
pub use error::{Error, Result};
pub use locale::Messages;
pub use pacer::{PacerConfig, RenderPacer, Tick};
pub use session::{
    CancelHandle, ChatSurface, Failure, InputRejection, SendGate, SessionConfig, SessionIdentity,
    SessionReport, SessionState, StreamSession,
};
pub use terminal::{TerminalConfig, TerminalSurface};
pub use text::{FormatConfig, InlineMarkupFormatter, SafeMarkup, SpacingReconstructor, WordChars};
pub use transport::{ChatRequest, HttpConfig, HttpTransport, Reply, Transport};
