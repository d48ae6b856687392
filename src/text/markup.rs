//! Inline markup: Escaping plus a single emphasis construct.
//!
//! Reply text is untrusted. Every HTML-significant character is escaped
//! first; only then are `**...**` spans turned into `<strong>` elements,
//! so the only structural markup in the output is the formatter's own.
//!
//! Formatting is not incremental-safe: a closing `**` that arrives later
//! changes how already-shown text renders. Callers format the whole
//! revealed prefix every time, never a previous output.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Opening emphasis tag.
pub const STRONG_OPEN: &str = "<strong>";
/// Closing emphasis tag.
pub const STRONG_CLOSE: &str = "</strong>";

/// Non-greedy, single-line, non-empty `**...**` span.
static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(.+?)\*\*").expect("emphasis pattern is valid")
});

/// Entities produced by [`escape_html`], for decoding in [`SafeMarkup::spans`].
const ENTITIES: [(&str, char); 5] = [
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#39;", '\''),
];

/// Configuration for the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatConfig {
    /// Whether `**...**` spans become emphasis. Escaping always happens.
    pub emphasis: bool,
    /// Whether `'` is escaped too.
    pub escape_apostrophe: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            emphasis: true,
            escape_apostrophe: true,
        }
    }
}

/// Markup that is safe to hand to a display surface.
///
/// Only [`InlineMarkupFormatter::format`] builds values of this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SafeMarkup(String);

/// A run of plain text with its style, decoded from [`SafeMarkup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Unescaped text.
    pub text: String,
    /// Whether the run is emphasized.
    pub strong: bool,
}

impl SafeMarkup {
    /// Borrow the markup.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if there is no markup at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unwrap into the markup string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Decode back into styled plain-text runs.
    ///
    /// Used by surfaces that cannot display HTML, such as a terminal.
    pub fn spans(&self) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut current = String::new();
        let mut strong = false;
        let mut rest = self.0.as_str();

        while let Some(ch) = rest.chars().next() {
            if let Some(after) = rest.strip_prefix(STRONG_OPEN) {
                flush(&mut spans, &mut current, strong);
                strong = true;
                rest = after;
            } else if let Some(after) = rest.strip_prefix(STRONG_CLOSE) {
                flush(&mut spans, &mut current, strong);
                strong = false;
                rest = after;
            } else if let Some((entity, decoded)) =
                ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity))
            {
                current.push(*decoded);
                rest = &rest[entity.len()..];
            } else {
                current.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
        flush(&mut spans, &mut current, strong);
        spans
    }
}

fn flush(spans: &mut Vec<Span>, current: &mut String, strong: bool) {
    if !current.is_empty() {
        spans.push(Span {
            text: std::mem::take(current),
            strong,
        });
    }
}

impl fmt::Display for SafeMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SafeMarkup {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Escape `&`, `<`, `>`, `"` and optionally `'`.
pub fn escape_html(text: &str, apostrophe: bool) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' if apostrophe => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Turns raw reply text into [`SafeMarkup`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineMarkupFormatter {
    config: FormatConfig,
}

impl InlineMarkupFormatter {
    /// Formatter with the given configuration.
    pub const fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub const fn config(&self) -> FormatConfig {
        self.config
    }

    /// Format raw text. Pure: same input, same output.
    pub fn format(&self, text: &str) -> SafeMarkup {
        let escaped = escape_html(text, self.config.escape_apostrophe);
        if !self.config.emphasis {
            return SafeMarkup(escaped);
        }
        let replaced = EMPHASIS.replace_all(&escaped, "<strong>$1</strong>");
        SafeMarkup(replaced.into_owned())
    }
}
