//! Send gate: The one flag shared across sessions.
//!
//! While an exchange is live the user cannot submit another message. The
//! gate is that rule; a [`SendPermit`] is proof of holding it and releases
//! it when dropped, so every terminal path (including panics) reopens it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "an exchange is in flight" flag.
#[derive(Debug, Clone, Default)]
pub struct SendGate {
    busy: Arc<AtomicBool>,
}

impl SendGate {
    /// Create an open gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a new exchange may start.
    pub fn is_open(&self) -> bool {
        !self.busy.load(Ordering::Acquire)
    }

    /// Take the gate, or `None` if another exchange holds it.
    pub fn try_acquire(&self) -> Option<SendPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SendPermit {
                busy: Arc::clone(&self.busy),
            })
    }
}

/// Held by the live exchange; dropping it reopens the gate.
#[derive(Debug)]
pub struct SendPermit {
    busy: Arc<AtomicBool>,
}

impl Drop for SendPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_is_exclusive() {
        let gate = SendGate::new();
        let permit = gate.try_acquire().expect("gate starts open");
        assert!(!gate.is_open());
        assert!(gate.clone().try_acquire().is_none());
        drop(permit);
        assert!(gate.is_open());
        assert!(gate.try_acquire().is_some());
    }
}
