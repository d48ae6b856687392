//! Stream session: One request/response exchange, end to end.
//!
//! The session owns the reply buffer, the reveal cursor and the surface. It
//! spawns a [`ReaderActor`] for the network side and, once the reply starts
//! streaming, a [`TickerActor`] for the reveal cadence, then runs a
//! `select!` loop over both channels on the caller's thread until a
//! terminal state.

use super::gate::{SendGate, SendPermit};
use super::report::{Failure, InputRejection, SessionReport};
use super::{ChatSurface, SessionIdentity, SessionState};
use crate::actor::{ReaderActor, SessionEvent, TickerActor};
use crate::locale::Messages;
use crate::pacer::{PacerConfig, RenderPacer, Tick};
use crate::text::{AccumulatedText, FormatConfig, InlineMarkupFormatter, SpacingReconstructor, WordChars};
use crate::transport::{ChatRequest, Rejection, RejectionKind, Transport};
use crate::Error;
use crossbeam_channel::{never, select, unbounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, info_span, warn};

/// Configuration for a stream session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Reveal cadence.
    pub pacer: PacerConfig,
    /// Formatting of the revealed text.
    pub format: FormatConfig,
    /// Whether to insert spaces between word fragments.
    pub spacing: bool,
    /// Characters that count as word characters for spacing.
    pub word_chars: WordChars,
    /// Longest input sent, in characters after trimming.
    pub max_input_chars: usize,
    /// Status the server uses to refuse oversized input.
    pub validation_status: u16,
    /// User-facing strings.
    pub messages: Messages,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pacer: PacerConfig::default(),
            format: FormatConfig::default(),
            spacing: true,
            word_chars: WordChars::default(),
            max_input_chars: 4000,
            validation_status: 422,
            messages: Messages::default(),
        }
    }
}

/// Cancels a session from another thread.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    cancel: Sender<()>,
    abort: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Request cancellation.
    ///
    /// The reader stops posting immediately; the session loop handles the
    /// request as its next event. Cancelling a finished session does nothing.
    pub fn cancel(&self) {
        self.abort.store(true, Ordering::Release);
        let _ = self.cancel.send(());
    }
}

/// One request/response exchange.
pub struct StreamSession {
    identity: SessionIdentity,
    config: SessionConfig,
    transport: Arc<dyn Transport>,
    gate: SendGate,

    /// Created at send; the reader holds the only sender. A disconnected
    /// channel before the reply ends means the reader died.
    events_rx: Receiver<SessionEvent>,
    cancel_tx: Sender<()>,
    cancel_rx: Receiver<()>,
    abort: Arc<AtomicBool>,

    state: SessionState,
    text: AccumulatedText,
    pacer: RenderPacer,
    spacing: SpacingReconstructor,
    formatter: InlineMarkupFormatter,

    permit: Option<SendPermit>,
    reader: Option<ReaderActor>,
    ticker: Option<TickerActor>,
    /// The busy indicator is on.
    thinking: bool,
    failure: Option<Failure>,
}

impl StreamSession {
    /// Create an idle session.
    pub fn new(
        identity: SessionIdentity,
        config: SessionConfig,
        transport: Arc<dyn Transport>,
        gate: SendGate,
    ) -> Self {
        let (cancel_tx, cancel_rx) = unbounded();
        let spacing = if config.spacing {
            SpacingReconstructor::with_word_chars(config.word_chars.clone())
        } else {
            SpacingReconstructor::disabled()
        };

        Self {
            pacer: RenderPacer::new(config.pacer),
            formatter: InlineMarkupFormatter::new(config.format),
            spacing,
            identity,
            config,
            transport,
            gate,
            events_rx: never(),
            cancel_tx,
            cancel_rx,
            abort: Arc::new(AtomicBool::new(false)),
            state: SessionState::Idle,
            text: AccumulatedText::new(),
            permit: None,
            reader: None,
            ticker: None,
            thinking: false,
            failure: None,
        }
    }

    /// The identity requests are sent under.
    pub const fn identity(&self) -> &SessionIdentity {
        &self.identity
    }

    /// The active configuration.
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current state.
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// A handle that cancels this session from another thread.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            cancel: self.cancel_tx.clone(),
            abort: Arc::clone(&self.abort),
        }
    }

    /// Send `input` and drive the exchange to a terminal state.
    ///
    /// Blocks the calling thread until the reply is complete, has failed or
    /// was cancelled. Rejected input leaves the session `Idle` and is
    /// reported in [`SessionReport::rejection`].
    pub fn send(mut self, input: &str, surface: &mut dyn ChatSurface) -> SessionReport {
        let span = info_span!("session", dialog_id = %self.identity.dialog_id());
        let _enter = span.enter();

        let message = input.trim();
        if let Some(rejection) = self.check_input(message, surface) {
            debug!(?rejection, "input not sent");
            return self.into_report(Some(rejection));
        }

        if self.abort.load(Ordering::Acquire) {
            self.transition(SessionState::Cancelled);
            return self.into_report(None);
        }

        let Some(permit) = self.gate.try_acquire() else {
            debug!("send gate held by another exchange");
            return self.into_report(Some(InputRejection::Busy));
        };
        self.permit = Some(permit);
        self.transition(SessionState::Sending);
        surface.clear_error();
        surface.set_send_enabled(false);

        let request = ChatRequest::new(&self.identity, message);
        let (events_tx, events_rx) = unbounded();
        self.events_rx = events_rx;
        match ReaderActor::spawn(
            Arc::clone(&self.transport),
            request,
            events_tx,
            Arc::clone(&self.abort),
        ) {
            Ok(reader) => self.reader = Some(reader),
            Err(e) => {
                self.fail_transport(Error::io(e), surface);
                return self.into_report(None);
            }
        }

        self.transition(SessionState::Thinking);
        self.thinking = true;
        surface.set_thinking(true);

        self.run(surface);
        self.into_report(None)
    }

    fn check_input(&self, message: &str, surface: &mut dyn ChatSurface) -> Option<InputRejection> {
        if message.is_empty() {
            return Some(InputRejection::Empty);
        }
        let len = message.chars().count();
        let max = self.config.max_input_chars;
        if len > max {
            surface.show_error(&self.config.messages.input_too_long);
            return Some(InputRejection::TooLong { len, max });
        }
        None
    }

    /// Main loop: one event at a time until a terminal state.
    fn run(&mut self, surface: &mut dyn ChatSurface) {
        let cancel = self.cancel_rx.clone();

        while !self.state.is_terminal() {
            // The reader is done once the reply has ended; only ticks matter then.
            let events = if self.pacer.has_ended() {
                never()
            } else {
                self.events_rx.clone()
            };
            let ticks = self
                .ticker
                .as_ref()
                .map_or_else(never, |ticker| ticker.receiver().clone());

            select! {
                recv(events) -> event => match event {
                    Ok(event) => self.handle_event(event, surface),
                    Err(_) => {
                        warn!(state = %self.state, "reader stopped without ending the reply");
                        self.fail_transport(Error::StreamClosed, surface);
                    }
                },
                recv(cancel) -> _ => self.cancel(surface),
                recv(ticks) -> tick => match tick {
                    Ok(_) => self.handle_tick(surface),
                    Err(_) => {
                        warn!("ticker stopped, revealing without pacing");
                        self.ticker = None;
                        self.reveal_now(surface);
                    }
                },
            }
        }
    }

    fn handle_event(&mut self, event: SessionEvent, surface: &mut dyn ChatSurface) {
        match event {
            SessionEvent::Accepted => debug!("reply accepted"),
            SessionEvent::Fragment(fragment) => {
                if self.state == SessionState::Thinking {
                    self.start_streaming(surface);
                } else {
                    self.transition(SessionState::Streaming);
                }
                let appended = self.text.push_fragment(&self.spacing, fragment.as_str());
                debug!(appended, total = self.text.len(), "fragment");
                if self.ticker.is_none() {
                    self.reveal_now(surface);
                }
            }
            SessionEvent::End { sentinel } => {
                debug!(sentinel, fragments = self.text.fragment_count(), "reply ended");
                self.pacer.finish();
                if self.ticker.is_none() {
                    self.reveal_now(surface);
                }
            }
            SessionEvent::Rejected(rejection) => self.fail_rejected(&rejection, surface),
            SessionEvent::Failed(e) => self.fail_transport(e, surface),
        }
    }

    fn handle_tick(&mut self, surface: &mut dyn ChatSurface) {
        match self.pacer.tick(&self.text) {
            Tick::Idle => {}
            Tick::Revealed { .. } => self.render(surface),
            Tick::Stopped => self.complete(surface),
        }
    }

    fn start_streaming(&mut self, surface: &mut dyn ChatSurface) {
        self.transition(SessionState::Streaming);
        self.thinking = false;
        surface.set_thinking(false);

        if self.config.pacer.is_instant() {
            return;
        }
        match TickerActor::spawn(self.config.pacer.tick) {
            Ok(ticker) => self.ticker = Some(ticker),
            Err(e) => warn!(error = %e, "failed to start ticker, revealing without pacing"),
        }
    }

    /// Reveal everything pending without waiting for ticks.
    fn reveal_now(&mut self, surface: &mut dyn ChatSurface) {
        match self.pacer.reveal_all(&self.text) {
            Tick::Idle => {}
            Tick::Revealed { .. } => {
                self.render(surface);
                if self.pacer.has_ended() && self.pacer.reveal_all(&self.text) == Tick::Stopped {
                    self.complete(surface);
                }
            }
            Tick::Stopped => self.complete(surface),
        }
    }

    /// Show the formatted revealed prefix.
    fn render(&self, surface: &mut dyn ChatSurface) {
        let markup = self.formatter.format(self.text.prefix(self.pacer.cursor()));
        surface.render_reply(&markup);
    }

    fn complete(&mut self, surface: &mut dyn ChatSurface) {
        if self.thinking {
            // Empty reply: replace the indicator with an empty message.
            self.thinking = false;
            surface.set_thinking(false);
            self.render(surface);
        }
        self.finish(SessionState::Completed, surface);
    }

    fn fail_rejected(&mut self, rejection: &Rejection, surface: &mut dyn ChatSurface) {
        let status = rejection.status;
        match rejection.kind(self.config.validation_status) {
            RejectionKind::InputTooLong => {
                warn!(status, "server refused input as too long");
                surface.discard_reply();
                surface.show_error(&self.config.messages.input_too_long);
                self.failure = Some(Failure::InputTooLong { status });
            }
            RejectionKind::Server { message } => {
                let message = message.unwrap_or_else(|| self.config.messages.fallback_error.clone());
                warn!(status, %message, "server rejected request");
                surface.fail_reply(&self.config.messages.failure_line(&message));
                surface.show_error(&message);
                self.failure = Some(Failure::Server { status, message });
            }
        }
        self.thinking = false;
        self.finish(SessionState::Failed, surface);
    }

    fn fail_transport(&mut self, error: Error, surface: &mut dyn ChatSurface) {
        warn!(error = %error, transport = error.is_transport(), "exchange failed");
        let network = &self.config.messages.network_error;
        surface.fail_reply(&self.config.messages.failure_line(network));
        surface.show_error(network);
        self.thinking = false;
        self.failure = Some(Failure::Transport(error));
        self.finish(SessionState::Failed, surface);
    }

    fn cancel(&mut self, surface: &mut dyn ChatSurface) {
        info!(revealed = self.pacer.cursor(), received = self.text.len(), "cancelled");
        if self.thinking {
            self.thinking = false;
            surface.set_thinking(false);
        }
        self.render(surface);
        surface.mark_partial(&self.config.messages.cancelled);
        self.finish(SessionState::Cancelled, surface);
    }

    /// Enter a terminal state: stop the producers and reopen the gate.
    fn finish(&mut self, state: SessionState, surface: &mut dyn ChatSurface) {
        self.transition(state);
        self.stop_actors();
        if self.permit.take().is_some() {
            surface.set_send_enabled(true);
        }
    }

    fn stop_actors(&mut self) {
        self.abort.store(true, Ordering::Release);
        if let Some(ticker) = self.ticker.take() {
            ticker.join();
        }
        if let Some(reader) = self.reader.take() {
            // After a completed reply the reader has already returned. Any
            // other reader may be blocked on the network; leave it behind.
            if self.state == SessionState::Completed {
                reader.join();
            } else {
                reader.shutdown();
            }
        }
    }

    fn transition(&mut self, next: SessionState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {} -> {next}",
            self.state
        );
        if next == self.state {
            return;
        }
        info!(from = %self.state, to = %next, "state");
        self.state = next;
    }

    fn into_report(self, rejection: Option<InputRejection>) -> SessionReport {
        SessionReport {
            state: self.state,
            revealed: self.pacer.cursor(),
            ticks: self.pacer.ticks(),
            text: self.text,
            rejection,
            failure: self.failure,
        }
    }
}
