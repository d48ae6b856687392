//! Terminal: Rendering sessions onto a terminal.

mod output;
mod surface;

pub use output::OutputBuffer;
pub use surface::{TerminalConfig, TerminalSurface};
