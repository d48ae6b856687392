//! Actor Model: Message-passing producers for the session loop.
//!
//! Two independent producers feed one session, each on its own thread:
//! - **Reader Actor**: issues the request, decodes the body, posts events
//! - **Ticker Actor**: posts reveal ticks at a fixed cadence
//!
//! The session loop owns the reply buffer and the reveal cursor and is the
//! only place they change. Producers never share state with it; they only
//! send messages.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    SessionEvent     ┌──────────────┐
//! │ Reader Thread│ ─────────────────▶  │              │
//! └──────────────┘                     │ Session Loop │ ──▶ ChatSurface
//! ┌──────────────┐     TickEvent       │              │
//! │ Ticker Thread│ ─────────────────▶  │              │
//! └──────────────┘                     └──────────────┘
//! ```

mod messages;
mod reader;
mod ticker;

pub use messages::SessionEvent;
pub use reader::ReaderActor;
pub use ticker::{TickEvent, TickerActor};
