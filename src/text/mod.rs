//! Text pipeline: Spacing, accumulation and formatting of reply text.
//!
//! - [`SpacingReconstructor`]: decides the separator at each fragment boundary
//! - [`AccumulatedText`]: the append-only reply buffer
//! - [`InlineMarkupFormatter`]: escaping and `**bold**` emphasis into [`SafeMarkup`]

mod accumulated;
pub mod markup;
mod spacing;

pub use accumulated::AccumulatedText;
pub use markup::{escape_html, FormatConfig, InlineMarkupFormatter, SafeMarkup, Span};
pub use spacing::{SpacingReconstructor, Splice, WordChars};
