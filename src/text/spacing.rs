//! Token spacing: Keeps fragment boundaries from fusing words.
//!
//! Upstream tokenizers may split a reply anywhere. When one fragment ends
//! inside a word run and the next starts with a word character, plain
//! concatenation would glue two words together. The reconstructor inserts
//! exactly one space at such a boundary and never touches the inside of a
//! fragment.

use std::ops::RangeInclusive;

/// The set of characters that count as "word" characters.
///
/// Stored as inclusive ranges so further scripts can be added with
/// [`WordChars::with_range`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordChars {
    ranges: Vec<RangeInclusive<char>>,
}

impl WordChars {
    /// ASCII digits.
    pub const DIGITS: RangeInclusive<char> = '0'..='9';
    /// ASCII uppercase letters.
    pub const UPPER: RangeInclusive<char> = 'A'..='Z';
    /// ASCII lowercase letters.
    pub const LOWER: RangeInclusive<char> = 'a'..='z';
    /// Underscore.
    pub const UNDERSCORE: RangeInclusive<char> = '_'..='_';
    /// The Cyrillic block (U+0400–U+04FF).
    pub const CYRILLIC: RangeInclusive<char> = '\u{0400}'..='\u{04FF}';

    /// An empty set; nothing is a word character.
    pub const fn empty() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Add a range of characters to the set.
    #[must_use]
    pub fn with_range(mut self, range: RangeInclusive<char>) -> Self {
        self.ranges.push(range);
        self
    }

    /// Check if `ch` is a word character.
    #[inline]
    pub fn contains(&self, ch: char) -> bool {
        self.ranges.iter().any(|range| range.contains(&ch))
    }
}

impl Default for WordChars {
    /// ASCII letters, digits, underscore and Cyrillic.
    fn default() -> Self {
        Self::empty()
            .with_range(Self::DIGITS)
            .with_range(Self::UPPER)
            .with_range(Self::LOWER)
            .with_range(Self::UNDERSCORE)
            .with_range(Self::CYRILLIC)
    }
}

/// What to append at a fragment boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Splice<'a> {
    /// Either `""` or `" "`.
    pub separator: &'static str,
    /// The fragment, unchanged.
    pub fragment: &'a str,
}

impl Splice<'_> {
    /// Total bytes this splice appends.
    #[inline]
    pub const fn len(&self) -> usize {
        self.separator.len() + self.fragment.len()
    }

    /// Check if the splice appends nothing.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decides whether a separating space goes between two fragments.
#[derive(Debug, Clone)]
pub struct SpacingReconstructor {
    word_chars: WordChars,
    enabled: bool,
}

impl SpacingReconstructor {
    /// Reconstructor with the default word set.
    pub fn new() -> Self {
        Self::with_word_chars(WordChars::default())
    }

    /// Reconstructor with a custom word set.
    pub const fn with_word_chars(word_chars: WordChars) -> Self {
        Self {
            word_chars,
            enabled: true,
        }
    }

    /// Reconstructor that never inserts anything (plain concatenation).
    pub const fn disabled() -> Self {
        Self {
            word_chars: WordChars::empty(),
            enabled: false,
        }
    }

    /// Check if spacing reconstruction is active.
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The word set in use.
    pub const fn word_chars(&self) -> &WordChars {
        &self.word_chars
    }

    /// Decide how `next` joins text whose last character is `last_char`.
    ///
    /// An empty fragment yields an empty splice.
    pub fn reconstruct<'a>(&self, last_char: Option<char>, next: &'a str) -> Splice<'a> {
        let separator = match (last_char, next.chars().next()) {
            (Some(last), Some(first))
                if self.enabled
                    && self.word_chars.contains(last)
                    && self.word_chars.contains(first) =>
            {
                " "
            }
            _ => "",
        };

        Splice {
            separator,
            fragment: next,
        }
    }
}

impl Default for SpacingReconstructor {
    fn default() -> Self {
        Self::new()
    }
}
