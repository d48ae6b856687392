//! Error: Failure taxonomy for the streaming renderer.
//!
//! Only transport-level problems are errors here. Malformed frames are
//! dropped inside the decoder and rejected input is a session outcome
//! ([`InputRejection`](crate::session::InputRejection)), not an error.

use std::time::Duration;

/// Errors that can occur while exchanging a chat message.
///
/// Errors are organized by category:
/// - Configuration errors: detected when building a transport or identity
/// - Transport errors: the request could not be made, the body could not be
///   read, or the reader stopped without finishing the exchange
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    // -------------------------------------------------------------------------
    // Configuration errors
    // -------------------------------------------------------------------------
    /// Invalid configuration provided to a constructor.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An identity value is empty or longer than the server accepts.
    #[error("invalid {field}: must be 1..={max} characters, got {len}")]
    InvalidIdentity {
        /// Which identity field was rejected.
        field: &'static str,
        /// Length of the offending value, in characters.
        len: usize,
        /// Maximum accepted length.
        max: usize,
    },

    // -------------------------------------------------------------------------
    // Transport errors
    // -------------------------------------------------------------------------
    /// The HTTP request failed before a response was received.
    #[error("request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// IO error while reading the response body.
    #[error("IO error: {0}")]
    Io(#[source] std::io::Error),

    /// Request exceeded the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The reader stopped before the exchange reached a terminal state.
    #[error("stream closed unexpectedly")]
    StreamClosed,
}

/// A specialized Result type for tickertape operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error.
    pub fn io(source: std::io::Error) -> Self {
        Self::Io(source)
    }

    /// Check if this error came from the transport (network or body read).
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Io(_) | Self::Timeout(_) | Self::StreamClosed
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }

    #[test]
    fn test_transport_classification() {
        assert!(Error::StreamClosed.is_transport());
        assert!(Error::Timeout(Duration::from_secs(60)).is_transport());
        assert!(!Error::InvalidConfig("x".into()).is_transport());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.is_transport());
    }

    #[test]
    fn test_identity_message() {
        let err = Error::InvalidIdentity {
            field: "user_id",
            len: 0,
            max: 255,
        };
        assert_eq!(
            err.to_string(),
            "invalid user_id: must be 1..=255 characters, got 0"
        );
    }
}
