//! Session outcomes.

use super::SessionState;
use crate::text::AccumulatedText;
use crate::Error;

/// Why an input never left the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRejection {
    /// Nothing left after trimming.
    Empty,
    /// Longer than the configured limit.
    TooLong {
        /// Length of the trimmed input, in characters.
        len: usize,
        /// Configured limit.
        max: usize,
    },
    /// Another exchange holds the send gate.
    Busy,
}

/// Why an exchange ended in [`SessionState::Failed`].
#[derive(Debug)]
pub enum Failure {
    /// The server refused the input with its validation status.
    ///
    /// Unlike [`InputRejection::TooLong`] the request was sent: the session
    /// goes from `Thinking` to `Failed` and the reply placeholder is
    /// discarded rather than replaced with a failure line.
    InputTooLong {
        /// Status code received.
        status: u16,
    },
    /// Any other non-success status.
    Server {
        /// Status code received.
        status: u16,
        /// Message shown to the user.
        message: String,
    },
    /// No usable response.
    Transport(Error),
}

impl Failure {
    /// HTTP status, if the server answered at all.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::InputTooLong { status } | Self::Server { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }
}

/// Terminal outcome of a session.
///
/// The accumulated text stays available after a failure or cancellation.
#[derive(Debug)]
pub struct SessionReport {
    /// Final state. `Idle` when the input was rejected before sending;
    /// `Failed` with [`Failure::InputTooLong`] when the server rejected it.
    pub state: SessionState,
    /// Everything received.
    pub text: AccumulatedText,
    /// Bytes of `text` that were revealed.
    pub revealed: usize,
    /// Set when the input never left the client.
    pub rejection: Option<InputRejection>,
    /// Set when the state is `Failed`.
    pub failure: Option<Failure>,
    /// Pacer ticks handled.
    pub ticks: u64,
}

impl SessionReport {
    /// Check if the reply arrived and was fully revealed.
    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }

    /// The revealed prefix of the reply.
    pub fn revealed_text(&self) -> &str {
        self.text.prefix(self.revealed)
    }
}
