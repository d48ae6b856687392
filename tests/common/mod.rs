//! Test utilities for tickertape integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{self, Read};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use tickertape::transport::{ChatRequest, Rejection, Reply, Transport};
use tickertape::{
    ChatSurface, Error, PacerConfig, Result, SafeMarkup, SendGate, SessionConfig, SessionIdentity,
    StreamSession,
};

/// A response body that hands out pre-defined chunks, one per read.
pub struct ChunkedBody {
    chunks: VecDeque<Vec<u8>>,
    delay: Duration,
    /// Block this long at end of body instead of returning EOF at once.
    hold_open: Option<Duration>,
    /// Fail with this error kind at end of body.
    fail_with: Option<io::ErrorKind>,
    /// Panic at end of body.
    panic_at_end: bool,
}

impl Read for ChunkedBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        let Some(mut chunk) = self.chunks.pop_front() else {
            assert!(!self.panic_at_end, "body reader panicked");
            if let Some(kind) = self.fail_with {
                return Err(io::Error::new(kind, "scripted failure"));
            }
            if let Some(hold) = self.hold_open.take() {
                thread::sleep(hold);
            }
            return Ok(0);
        };
        if chunk.len() > buf.len() {
            let rest = chunk.split_off(buf.len());
            self.chunks.push_front(rest);
        }
        buf[..chunk.len()].copy_from_slice(&chunk);
        Ok(chunk.len())
    }
}

#[derive(Debug, Clone)]
enum Script {
    Stream {
        chunks: Vec<Vec<u8>>,
        delay: Duration,
        hold_open: Option<Duration>,
        fail_with: Option<io::ErrorKind>,
        panic_at_end: bool,
    },
    Reject {
        status: u16,
        reason: Option<String>,
        body: String,
    },
    Refuse,
    Panic,
}

/// An in-memory transport that replays a script for every request.
pub struct ScriptedTransport {
    script: Script,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedTransport {
    fn with_script(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    fn open(&self, request: &ChatRequest) -> Result<Reply> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.script {
            Script::Stream {
                chunks,
                delay,
                hold_open,
                fail_with,
                panic_at_end,
            } => Ok(Reply::Stream(Box::new(ChunkedBody {
                chunks: chunks.iter().cloned().collect(),
                delay: *delay,
                hold_open: *hold_open,
                fail_with: *fail_with,
                panic_at_end: *panic_at_end,
            }))),
            Script::Reject {
                status,
                reason,
                body,
            } => Ok(Reply::Rejected(Rejection::new(
                *status,
                reason.clone(),
                body.clone(),
            ))),
            Script::Refuse => Err(Error::io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
            Script::Panic => panic!("transport panicked"),
        }
    }
}

/// Builder for streamed reply bodies.
pub struct ScenarioBuilder {
    chunks: Vec<Vec<u8>>,
    delay: Duration,
    hold_open: Option<Duration>,
    fail_with: Option<io::ErrorKind>,
    panic_at_end: bool,
}

impl ScenarioBuilder {
    /// Create an empty body.
    pub fn new() -> Self {
        Self {
            chunks: Vec::new(),
            delay: Duration::ZERO,
            hold_open: None,
            fail_with: None,
            panic_at_end: false,
        }
    }

    /// Add one `data:` frame as its own chunk.
    pub fn fragment(mut self, text: &str) -> Self {
        self.chunks.push(format!("data: {text}\n\n").into_bytes());
        self
    }

    /// Add several fragments.
    pub fn fragments(self, texts: &[&str]) -> Self {
        texts.iter().fold(self, |builder, text| builder.fragment(text))
    }

    /// Add raw bytes as a chunk.
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.chunks.push(bytes.to_vec());
        self
    }

    /// Add the end sentinel.
    pub fn done(self) -> Self {
        self.fragment("[DONE]")
    }

    /// Sleep before every read.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Keep the body open after the last chunk.
    pub fn hold_open(mut self, hold: Duration) -> Self {
        self.hold_open = Some(hold);
        self
    }

    /// Fail the read after the last chunk.
    pub fn fail_with(mut self, kind: io::ErrorKind) -> Self {
        self.fail_with = Some(kind);
        self
    }

    /// Panic in the reader after the last chunk.
    pub fn panic_at_end(mut self) -> Self {
        self.panic_at_end = true;
        self
    }

    /// Build the transport.
    pub fn build(self) -> Arc<ScriptedTransport> {
        ScriptedTransport::with_script(Script::Stream {
            chunks: self.chunks,
            delay: self.delay,
            hold_open: self.hold_open,
            fail_with: self.fail_with,
            panic_at_end: self.panic_at_end,
        })
    }
}

/// A transport that answers every request with a non-success status.
pub fn rejecting(status: u16, reason: Option<&str>, body: &str) -> Arc<ScriptedTransport> {
    ScriptedTransport::with_script(Script::Reject {
        status,
        reason: reason.map(str::to_owned),
        body: body.to_owned(),
    })
}

/// A transport that cannot connect.
pub fn refusing() -> Arc<ScriptedTransport> {
    ScriptedTransport::with_script(Script::Refuse)
}

/// A transport whose `open` panics.
pub fn panicking() -> Arc<ScriptedTransport> {
    ScriptedTransport::with_script(Script::Panic)
}

/// One call made on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SendEnabled(bool),
    Thinking(bool),
    Render(String),
    Fail(String),
    Discard,
    Partial(String),
    ShowError(String),
    ClearError,
}

/// A surface that records every call and the visible result.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// Every call, in order.
    pub calls: Vec<Call>,
    /// Current reply slot content; `None` when there is no bot message.
    pub reply: Option<String>,
    /// Current error sink content.
    pub error: Option<String>,
    /// Partial notice, if the reply was cut short.
    pub partial: Option<String>,
}

impl RecordingSurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `set_send_enabled` argument, in order.
    pub fn send_toggles(&self) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::SendEnabled(enabled) => Some(*enabled),
                _ => None,
            })
            .collect()
    }

    /// Every rendered markup, in order.
    pub fn renders(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Render(markup) => Some(markup.clone()),
                _ => None,
            })
            .collect()
    }
}

impl ChatSurface for RecordingSurface {
    fn set_send_enabled(&mut self, enabled: bool) {
        self.calls.push(Call::SendEnabled(enabled));
    }

    fn set_thinking(&mut self, thinking: bool) {
        self.calls.push(Call::Thinking(thinking));
        if thinking {
            self.reply = Some(String::new());
        }
    }

    fn render_reply(&mut self, markup: &SafeMarkup) {
        self.calls.push(Call::Render(markup.to_string()));
        self.reply = Some(markup.to_string());
    }

    fn fail_reply(&mut self, message: &str) {
        self.calls.push(Call::Fail(message.to_owned()));
        self.reply = Some(message.to_owned());
    }

    fn discard_reply(&mut self) {
        self.calls.push(Call::Discard);
        self.reply = None;
    }

    fn mark_partial(&mut self, notice: &str) {
        self.calls.push(Call::Partial(notice.to_owned()));
        self.partial = Some(notice.to_owned());
    }

    fn show_error(&mut self, message: &str) {
        self.calls.push(Call::ShowError(message.to_owned()));
        self.error = Some(message.to_owned());
    }

    fn clear_error(&mut self) {
        self.calls.push(Call::ClearError);
        self.error = None;
    }
}

/// A fast paced configuration for tests.
pub fn paced(per_tick: usize) -> SessionConfig {
    SessionConfig {
        pacer: PacerConfig {
            tick: Duration::from_millis(1),
            graphemes_per_tick: per_tick,
        },
        ..SessionConfig::default()
    }
}

/// Build a session with a fixed identity and a fresh gate.
pub fn session(config: SessionConfig, transport: Arc<ScriptedTransport>) -> StreamSession {
    session_with_gate(config, transport, SendGate::new())
}

/// Build a session sharing `gate`.
pub fn session_with_gate(
    config: SessionConfig,
    transport: Arc<ScriptedTransport>,
    gate: SendGate,
) -> StreamSession {
    StreamSession::new(
        SessionIdentity::new("user-test", "dialog-test").unwrap(),
        config,
        transport,
        gate,
    )
}
