//! Terminal surface: A [`ChatSurface`] over a line-oriented terminal.
//!
//! The reply slot is everything after the bot label on the current line.
//! Each redraw returns to the slot origin, clears below it and prints the
//! whole revealed reply again, in one write.

use super::output::OutputBuffer;
use crate::session::ChatSurface;
use crate::text::SafeMarkup;
use crossterm::style::Color;
use std::io::{self, Write};
use tracing::warn;

/// Labels and indicator text for the terminal surface.
#[derive(Debug, Clone)]
pub struct TerminalConfig {
    /// Label in front of the reply.
    pub bot_label: String,
    /// Shown while waiting for the first fragment.
    pub thinking: String,
    /// Printed when the user may type.
    pub prompt: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            bot_label: "bot: ".into(),
            thinking: "…".into(),
            prompt: "> ".into(),
        }
    }
}

/// Renders a session onto a terminal writer.
pub struct TerminalSurface<W: Write> {
    out: W,
    buffer: OutputBuffer,
    config: TerminalConfig,
    /// A reply slot is on screen and its origin is saved.
    slot_open: bool,
    send_enabled: bool,
}

impl TerminalSurface<io::Stdout> {
    /// Surface on standard output.
    pub fn stdout(config: TerminalConfig) -> Self {
        Self::new(io::stdout(), config)
    }
}

impl<W: Write> TerminalSurface<W> {
    /// Surface on any writer.
    pub fn new(out: W, config: TerminalConfig) -> Self {
        Self {
            out,
            buffer: OutputBuffer::new(),
            config,
            slot_open: false,
            send_enabled: true,
        }
    }

    /// Check if the user may send.
    pub const fn is_send_enabled(&self) -> bool {
        self.send_enabled
    }

    /// Print a plain line, outside any reply slot.
    pub fn line(&mut self, text: &str) {
        self.buffer.write_str(text);
        self.buffer.write_str("\n");
        self.flush();
    }

    /// Print the input prompt.
    pub fn prompt(&mut self) {
        self.buffer.write_str(&self.config.prompt);
        self.flush();
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn open_slot(&mut self) {
        if !self.slot_open {
            self.buffer.save_position();
            self.slot_open = true;
        }
    }

    /// Return to the slot origin and draw the label.
    fn redraw_slot(&mut self) {
        self.open_slot();
        self.buffer.restore_position();
        self.buffer.clear_below();
        self.buffer.bold();
        self.buffer.write_str(&self.config.bot_label);
        self.buffer.normal_intensity();
    }

    fn close_slot(&mut self) {
        if self.slot_open {
            self.buffer.write_str("\n");
            self.slot_open = false;
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.buffer.flush_to(&mut self.out) {
            warn!(error = %e, "terminal write failed");
        }
        self.buffer.clear();
    }
}

impl<W: Write> ChatSurface for TerminalSurface<W> {
    fn set_send_enabled(&mut self, enabled: bool) {
        self.send_enabled = enabled;
        if enabled {
            self.close_slot();
            self.flush();
        }
    }

    fn set_thinking(&mut self, thinking: bool) {
        self.redraw_slot();
        if thinking {
            self.buffer.dim();
            self.buffer.write_str(&self.config.thinking);
            self.buffer.reset_attrs();
        }
        self.flush();
    }

    fn render_reply(&mut self, markup: &SafeMarkup) {
        self.redraw_slot();
        for span in markup.spans() {
            if span.strong {
                self.buffer.bold();
                self.buffer.write_str(&span.text);
                self.buffer.normal_intensity();
            } else {
                self.buffer.write_str(&span.text);
            }
        }
        self.flush();
    }

    fn fail_reply(&mut self, message: &str) {
        self.redraw_slot();
        self.buffer.set_fg(Color::Red);
        self.buffer.write_str(message);
        self.buffer.reset_attrs();
        self.flush();
    }

    fn discard_reply(&mut self) {
        if self.slot_open {
            self.buffer.restore_position();
            self.buffer.clear_below();
            self.slot_open = false;
            self.flush();
        }
    }

    fn mark_partial(&mut self, notice: &str) {
        self.buffer.write_str(" ");
        self.buffer.dim();
        self.buffer.write_str(notice);
        self.buffer.reset_attrs();
        self.flush();
    }

    fn show_error(&mut self, message: &str) {
        self.close_slot();
        self.buffer.set_fg(Color::Yellow);
        self.buffer.write_str("! ");
        self.buffer.write_str(message);
        self.buffer.reset_attrs();
        self.buffer.write_str("\n");
        self.flush();
    }

    // Errors are printed lines in the scrollback; there is nothing to erase.
    fn clear_error(&mut self) {}
}
