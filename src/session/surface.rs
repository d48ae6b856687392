//! Chat surface: The UI collaborator a session drives.

use crate::text::SafeMarkup;

/// Where a session shows its progress.
///
/// The session calls these from its loop thread, one at a time. It never
/// formats turn boundaries, timestamps or avatars; that is the surface's
/// business.
pub trait ChatSurface {
    /// Enable or disable submitting another message.
    fn set_send_enabled(&mut self, enabled: bool);

    /// Show or hide the busy indicator in the reply slot.
    fn set_thinking(&mut self, thinking: bool);

    /// Replace the reply slot's content with `markup`.
    ///
    /// Called with the whole revealed reply every time, not a delta.
    fn render_reply(&mut self, markup: &SafeMarkup);

    /// Replace the reply slot with an error line.
    fn fail_reply(&mut self, message: &str);

    /// Remove the reply slot entirely; no bot message for this turn.
    fn discard_reply(&mut self);

    /// Mark the reply slot as a cut-short partial.
    fn mark_partial(&mut self, notice: &str);

    /// Show a message in the error sink.
    fn show_error(&mut self, message: &str);

    /// Empty the error sink.
    fn clear_error(&mut self);
}
