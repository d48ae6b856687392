//! Reader Actor: Dedicated thread for the network exchange.
//!
//! This actor issues the request, decodes the streamed body and forwards
//! every frame to the session loop. It never touches session state; it
//! only posts [`SessionEvent`]s.

use super::messages::SessionEvent;
use crate::decode::{Frame, FrameDecoder};
use crate::transport::{ChatRequest, Reply, Transport};
use crossbeam_channel::Sender;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, trace};

/// Reader actor that runs one request/response exchange.
pub struct ReaderActor {
    /// Handle to the reader thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to stop posting events.
    abort: Arc<AtomicBool>,
}

impl ReaderActor {
    /// Spawn the reader thread.
    ///
    /// # Arguments
    ///
    /// * `transport` - Issues the request.
    /// * `request` - The chat request to send.
    /// * `sender` - Channel to the session loop.
    /// * `abort` - Shared abort flag; once set, nothing more is posted.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn(
        transport: Arc<dyn Transport>,
        request: ChatRequest,
        sender: Sender<SessionEvent>,
        abort: Arc<AtomicBool>,
    ) -> io::Result<Self> {
        let abort_clone = Arc::clone(&abort);

        let handle = thread::Builder::new()
            .name("tickertape-reader".to_string())
            .spawn(move || {
                Self::run(transport.as_ref(), &request, &sender, &abort_clone);
            })?;

        Ok(Self {
            handle: Some(handle),
            abort,
        })
    }

    /// Signal the reader to stop.
    ///
    /// A blocking read in progress is not interrupted, but its result is
    /// discarded and the read loop does not resume.
    pub fn shutdown(&self) {
        self.abort.store(true, Ordering::Release);
    }

    /// Wait for the reader thread to finish.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Post an event unless aborted. Returns `false` when the reader must stop.
    fn post(sender: &Sender<SessionEvent>, abort: &AtomicBool, event: SessionEvent) -> bool {
        if abort.load(Ordering::Acquire) {
            debug!(event = event.kind(), "reader aborted, dropping event");
            return false;
        }
        sender.send(event).is_ok()
    }

    /// The exchange itself.
    fn run(
        transport: &dyn Transport,
        request: &ChatRequest,
        sender: &Sender<SessionEvent>,
        abort: &AtomicBool,
    ) {
        let body = match transport.open(request) {
            Ok(Reply::Stream(body)) => body,
            Ok(Reply::Rejected(rejection)) => {
                Self::post(sender, abort, SessionEvent::Rejected(rejection));
                return;
            }
            Err(e) => {
                Self::post(sender, abort, SessionEvent::Failed(e));
                return;
            }
        };

        if !Self::post(sender, abort, SessionEvent::Accepted) {
            return;
        }

        let mut decoder = FrameDecoder::new(body);
        for item in decoder.by_ref() {
            let event = match item {
                Ok(Frame::Data(fragment)) => {
                    trace!(len = fragment.as_str().len(), "fragment");
                    SessionEvent::Fragment(fragment)
                }
                Ok(Frame::Done) => {
                    Self::post(sender, abort, SessionEvent::End { sentinel: true });
                    return;
                }
                Err(e) => {
                    Self::post(sender, abort, SessionEvent::Failed(e));
                    return;
                }
            };
            if !Self::post(sender, abort, event) {
                return;
            }
        }

        debug!(stats = ?decoder.stats(), "body ended without sentinel");
        Self::post(sender, abort, SessionEvent::End { sentinel: false });
    }
}

impl Drop for ReaderActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
