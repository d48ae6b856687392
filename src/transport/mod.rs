//! Transport: How a chat message reaches the server and the reply comes back.
//!
//! The session never talks HTTP directly. It hands a [`ChatRequest`] to a
//! [`Transport`] and gets back either a readable body to decode or a
//! [`Rejection`] carrying the server's status and error payload.

mod http;
mod payload;

pub use http::{HttpConfig, HttpTransport};
pub use payload::{Rejection, RejectionKind};

use crate::session::SessionIdentity;
use crate::Result;
use serde::Serialize;
use std::fmt;
use std::io::Read;

/// Body posted to the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    /// Caller identity.
    pub user_id: String,
    /// The user's message, already trimmed.
    pub message: String,
    /// Conversation identity.
    pub dialog_id: String,
}

impl ChatRequest {
    /// Build a request for `identity`.
    pub fn new(identity: &SessionIdentity, message: impl Into<String>) -> Self {
        Self {
            user_id: identity.user_id().to_owned(),
            message: message.into(),
            dialog_id: identity.dialog_id().to_owned(),
        }
    }
}

/// What the server answered.
pub enum Reply {
    /// Success status; the body streams line-framed fragments.
    Stream(Box<dyn Read + Send>),
    /// Non-success status.
    Rejected(Rejection),
}

impl fmt::Debug for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stream(_) => f.write_str("Reply::Stream(..)"),
            Self::Rejected(rejection) => f.debug_tuple("Reply::Rejected").field(rejection).finish(),
        }
    }
}

/// Sends one chat request and returns the reply.
///
/// Implementations block until the response head has arrived. They are
/// called from the reader actor's thread, never from the session loop.
pub trait Transport: Send + Sync {
    /// Issue the request.
    ///
    /// # Errors
    ///
    /// Returns an error when no response could be obtained at all
    /// (connection failure, timeout). A response with an error status is
    /// not an error: it is [`Reply::Rejected`].
    fn open(&self, request: &ChatRequest) -> Result<Reply>;
}
