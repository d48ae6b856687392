//! Message types for actor communication.
//!
//! Everything the reader learns about the exchange arrives as one of these,
//! on one channel, so the session loop handles them strictly one at a time.

use crate::decode::Fragment;
use crate::transport::Rejection;
use crate::Error;

/// Events posted to a session's loop.
#[derive(Debug)]
pub enum SessionEvent {
    /// The server accepted the request; the body is streaming.
    Accepted,

    /// A decoded reply fragment, in stream order.
    Fragment(Fragment),

    /// The reply ended.
    End {
        /// `true` for the explicit sentinel, `false` for transport end of stream.
        sentinel: bool,
    },

    /// The server answered with a non-success status.
    Rejected(Rejection),

    /// The transport failed (connection, timeout, body read).
    Failed(Error),
}

impl SessionEvent {
    /// Short name for logging.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Fragment(_) => "fragment",
            Self::End { .. } => "end",
            Self::Rejected(_) => "rejected",
            Self::Failed(_) => "failed",
        }
    }
}
