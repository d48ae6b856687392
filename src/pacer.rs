//! Render pacer: Reveals accumulated text at a fixed cadence.
//!
//! Network arrival is bursty; the pacer turns it into a steady "typing"
//! reveal. Each tick shows at most a fixed number of the oldest pending
//! grapheme clusters. The pacer does not own a timer: the session feeds it
//! ticks from a [`TickerActor`](crate::actor::TickerActor).

use crate::text::AccumulatedText;
use std::time::Duration;
use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;

/// Configuration for the render pacer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacerConfig {
    /// Interval between ticks. Zero means instant reveal.
    pub tick: Duration,
    /// Grapheme clusters revealed per tick. Zero means no limit.
    pub graphemes_per_tick: usize,
}

impl PacerConfig {
    /// Reveal everything as soon as it arrives.
    pub const INSTANT: Self = Self {
        tick: Duration::ZERO,
        graphemes_per_tick: 0,
    };

    /// Check if pacing is switched off.
    #[inline]
    pub const fn is_instant(&self) -> bool {
        self.tick.is_zero()
    }
}

impl Default for PacerConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(30),
            graphemes_per_tick: 3,
        }
    }
}

/// Result of one pacer step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Nothing pending, stream still live. Keep ticking.
    Idle,
    /// The cursor moved from `from` to `to` (byte offsets).
    Revealed {
        /// Cursor before the step.
        from: usize,
        /// Cursor after the step.
        to: usize,
    },
    /// Stream ended and everything is revealed. Stop ticking.
    Stopped,
}

/// Tracks the reveal cursor over an [`AccumulatedText`].
#[derive(Debug, Clone)]
pub struct RenderPacer {
    config: PacerConfig,
    /// Byte offset of the revealed prefix; always on a char boundary.
    cursor: usize,
    ended: bool,
    stopped: bool,
    ticks: u64,
}

impl RenderPacer {
    /// Create a pacer with its cursor at zero.
    pub const fn new(config: PacerConfig) -> Self {
        Self {
            config,
            cursor: 0,
            ended: false,
            stopped: false,
            ticks: 0,
        }
    }

    /// The active configuration.
    pub const fn config(&self) -> PacerConfig {
        self.config
    }

    /// Bytes revealed so far.
    #[inline]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Bytes not yet revealed.
    #[inline]
    pub fn pending(&self, text: &AccumulatedText) -> usize {
        text.len() - self.cursor
    }

    /// Ticks handled so far.
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Check if the stream has been marked as ended.
    pub const fn has_ended(&self) -> bool {
        self.ended
    }

    /// Check if the pacer has drained after stream end.
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Mark the stream as ended. Pending text keeps draining on later ticks.
    pub fn finish(&mut self) {
        self.ended = true;
    }

    /// Handle one tick: reveal up to the quota of the oldest pending text.
    pub fn tick(&mut self, text: &AccumulatedText) -> Tick {
        self.ticks += 1;
        self.advance(text, self.config.graphemes_per_tick)
    }

    /// Reveal everything pending in one step.
    pub fn reveal_all(&mut self, text: &AccumulatedText) -> Tick {
        self.advance(text, 0)
    }

    fn advance(&mut self, text: &AccumulatedText, quota: usize) -> Tick {
        if self.stopped {
            return Tick::Stopped;
        }

        let pending = text.suffix(self.cursor);
        if pending.is_empty() {
            if self.ended {
                self.stopped = true;
                return Tick::Stopped;
            }
            return Tick::Idle;
        }

        let step = if quota == 0 {
            pending.len()
        } else {
            pending
                .grapheme_indices(true)
                .nth(quota)
                .map_or(pending.len(), |(offset, _)| offset)
        };

        let from = self.cursor;
        self.cursor += step;
        trace!(from, to = self.cursor, pending = text.len() - self.cursor, "revealed");
        Tick::Revealed {
            from,
            to: self.cursor,
        }
    }
}
