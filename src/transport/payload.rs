//! Error payloads: Turning a non-success response into a user message.
//!
//! The server answers failures with `{"detail": ...}`. The detail is either
//! a string or a list of field errors shaped like `{"msg": "..."}`; only
//! the first entry is surfaced. A body that is not JSON falls back to the
//! reason phrase; a `detail` of any other shape is not guessed at.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    detail: Value,
}

/// A non-success response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// HTTP status code.
    pub status: u16,
    /// Canonical reason phrase for the status, if known.
    pub reason: Option<String>,
    /// Raw response body.
    pub body: String,
}

/// How the session should present a rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionKind {
    /// The server refused the input as oversized. Presented with the fixed
    /// "too long" message whatever the payload says.
    InputTooLong,
    /// Any other failure, with the best message we could extract.
    Server {
        /// Detail from the payload, else the reason phrase for non-JSON
        /// bodies. `None` means the fixed fallback message.
        message: Option<String>,
    },
}

impl Rejection {
    /// Create a rejection.
    pub fn new(status: u16, reason: Option<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            reason,
            body: body.into(),
        }
    }

    /// Classify against the server's validation status.
    pub fn kind(&self, validation_status: u16) -> RejectionKind {
        if self.status == validation_status {
            return RejectionKind::InputTooLong;
        }
        let message = match parse_detail(&self.body) {
            Detail::Text(text) => Some(text),
            Detail::Missing => self.reason.clone(),
            Detail::Unrecognized => None,
        };
        RejectionKind::Server { message }
    }
}

/// What an error body says.
enum Detail {
    /// A usable message.
    Text(String),
    /// Not JSON, or no (or an empty) `detail`.
    Missing,
    /// A `detail` of a shape we do not read.
    Unrecognized,
}

fn parse_detail(body: &str) -> Detail {
    let Ok(payload) = serde_json::from_str::<ErrorPayload>(body) else {
        return Detail::Missing;
    };
    let text = match payload.detail {
        Value::Null => return Detail::Missing,
        Value::String(text) => text,
        Value::Array(items) => match items.into_iter().next() {
            Some(Value::String(text)) => text,
            Some(Value::Object(mut entry)) => match entry.remove("msg") {
                Some(Value::String(text)) => text,
                _ => return Detail::Unrecognized,
            },
            _ => return Detail::Unrecognized,
        },
        _ => return Detail::Unrecognized,
    };
    if text.is_empty() {
        Detail::Missing
    } else {
        Detail::Text(text)
    }
}
