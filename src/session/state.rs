//! Session state machine.

use std::fmt;

/// Lifecycle of one request/response exchange.
///
/// ```text
/// Idle ─▶ Sending ─▶ Thinking ─▶ Streaming ─▶ Completed
///   │        │          │   └───────────────▶ Completed (empty reply)
///   └────────┴──────────┴──────────┴────────▶ Failed | Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// Nothing sent yet.
    #[default]
    Idle,
    /// Input accepted; the request is being issued.
    Sending,
    /// Request issued; waiting for the first fragment.
    Thinking,
    /// Fragments are arriving.
    Streaming,
    /// The reply arrived and was fully revealed.
    Completed,
    /// The exchange failed.
    Failed,
    /// The exchange was cancelled.
    Cancelled,
}

impl SessionState {
    /// Check if this state ends the exchange.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// Check if moving to `next` is a legal transition.
    pub const fn can_transition_to(self, next: Self) -> bool {
        use SessionState::{Cancelled, Completed, Failed, Idle, Sending, Streaming, Thinking};

        !self.is_terminal()
            && matches!(
                (self, next),
                (_, Failed | Cancelled)
                    | (Idle, Sending)
                    | (Sending, Thinking)
                    | (Thinking, Streaming | Completed)
                    | (Streaming, Streaming | Completed)
            )
    }

    /// Lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Sending => "sending",
            Self::Thinking => "thinking",
            Self::Streaming => "streaming",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
