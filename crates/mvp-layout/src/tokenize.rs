#![forbid(unsafe_code)]

//! Word tokenizer shared by both layout strategies.
//!
//! Words are maximal runs of non-whitespace characters. Each word keeps its
//! byte offset into the source text so a run of words can be mapped back to
//! the original string (see [`LineSpan`]).
//!
//! # Example
//! ```
//! use mvp_layout::tokenize::tokenize;
//!
//! let words: Vec<&str> = tokenize("  grace  to you\tand peace ")
//!     .iter()
//!     .map(|w| w.as_str())
//!     .collect();
//! assert_eq!(words, vec!["grace", "to", "you", "and", "peace"]);
//! ```

use serde::Serialize;

/// A whitespace-free slice of the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a> {
    text: &'a str,
    start: usize,
}

impl<'a> Word<'a> {
    /// The word text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Byte offset of the first character in the source text.
    #[inline]
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset one past the last character in the source text.
    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// Width in characters.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }
}

/// Split `text` into words on runs of whitespace.
///
/// Leading and trailing whitespace is ignored; empty or whitespace-only
/// input yields an empty vector.
#[must_use]
pub fn tokenize(text: &str) -> Vec<Word<'_>> {
    let mut words = Vec::new();
    let mut word_start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        match (ch.is_whitespace(), word_start) {
            (true, Some(start)) => {
                words.push(Word {
                    text: &text[start..idx],
                    start,
                });
                word_start = None;
            }
            (false, None) => word_start = Some(idx),
            _ => {}
        }
    }

    if let Some(start) = word_start {
        words.push(Word {
            text: &text[start..],
            start,
        });
    }

    words
}

/// Join words with single spaces.
#[must_use]
pub fn join_words(words: &[Word<'_>]) -> String {
    let capacity = words.iter().map(|w| w.text.len() + 1).sum::<usize>();
    let mut out = String::with_capacity(capacity);
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(word.text);
    }
    out
}

/// Byte range of a laid-out line within the source text.
///
/// Unlike the line strings returned by [`crate::LineLayout::layout`], a span
/// preserves the original inter-word whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineSpan {
    /// Byte offset of the first word.
    pub start: usize,
    /// Byte offset one past the last word.
    pub end: usize,
}

impl LineSpan {
    /// Span from the start of the first word to the end of the last one.
    ///
    /// Returns `None` for an empty slice.
    #[must_use]
    pub fn covering(words: &[Word<'_>]) -> Option<Self> {
        let first = words.first()?;
        let last = words.last()?;
        Some(Self {
            start: first.start(),
            end: last.end(),
        })
    }

    /// Length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The spanned slice of `text`, or `None` if out of bounds.
    #[must_use]
    pub fn slice<'t>(&self, text: &'t str) -> Option<&'t str> {
        text.get(self.start..self.end)
    }
}
