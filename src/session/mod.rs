//! Session: The request/response lifecycle and its collaborators.
//!
//! A [`StreamSession`] runs exactly one exchange. It is created `Idle`,
//! consumed by [`StreamSession::send`], and returns a [`SessionReport`]
//! once it reaches `Completed`, `Failed` or `Cancelled`. Sessions sharing
//! a [`SendGate`] never overlap.

mod gate;
mod identity;
mod report;
mod state;
mod stream_session;
mod surface;

pub use gate::{SendGate, SendPermit};
pub use identity::{SessionIdentity, MAX_ID_CHARS};
pub use report::{Failure, InputRejection, SessionReport};
pub use state::SessionState;
pub use stream_session::{CancelHandle, SessionConfig, StreamSession};
pub use surface::ChatSurface;
