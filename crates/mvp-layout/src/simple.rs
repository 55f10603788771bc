#![forbid(unsafe_code)]

//! Greedy word wrap.
//!
//! Works on the raw text rather than on tokens: each line is the longest
//! prefix of the remaining text shorter than `line_width`, cut at whitespace.
//! A single word that is itself too wide becomes a line of its own.
//!
//! # Example
//! ```
//! use mvp_layout::{LineLayout, SimpleLayout};
//!
//! let layout = SimpleLayout::default();
//! let lines = layout.layout("Paul and Timothy, bondservants of Jesus Christ,");
//! assert_eq!(lines, vec!["Paul and Timothy, bondservants of", "Jesus Christ,"]);
//! ```

use crate::LineLayout;
use crate::config::{ConfigError, ensure_positive};

/// Default greedy wrap width in characters.
pub const DEFAULT_LINE_WIDTH: usize = 35;

/// Greedy layout that breaks at the last space before `line_width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleLayout {
    line_width: usize,
}

impl Default for SimpleLayout {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

impl SimpleLayout {
    /// Layout with the given width. Lines stay strictly shorter than the
    /// width unless they hold a single oversized word.
    pub fn new(line_width: usize) -> Result<Self, ConfigError> {
        ensure_positive("line_width", line_width)?;
        Ok(Self { line_width })
    }

    #[must_use]
    pub fn line_width(&self) -> usize {
        self.line_width
    }

    pub fn set_line_width(&mut self, line_width: usize) -> Result<(), ConfigError> {
        ensure_positive("line_width", line_width)?;
        self.line_width = line_width;
        Ok(())
    }

    /// Longest prefix of `rest` narrower than the line width, or the first
    /// word when even that is too wide.
    fn take_line<'a>(&self, rest: &'a str) -> &'a str {
        let mut candidate = rest;
        let mut last_removed = rest;

        while candidate.chars().count() >= self.line_width {
            match candidate.char_indices().rfind(|(_, ch)| ch.is_whitespace()) {
                Some((idx, ch)) => {
                    last_removed = &candidate[idx + ch.len_utf8()..];
                    candidate = &candidate[..idx];
                }
                None => {
                    last_removed = candidate;
                    candidate = "";
                }
            }
        }

        if candidate.is_empty() {
            last_removed
        } else {
            candidate
        }
    }
}

impl LineLayout for SimpleLayout {
    fn layout(&self, text: &str) -> Vec<String> {
        let _span = tracing::debug_span!(
            "simple_layout",
            line_width = self.line_width,
            len = text.len()
        )
        .entered();

        let mut lines = Vec::new();
        let mut rest = text.trim();

        while !rest.is_empty() {
            let line = self.take_line(rest);
            debug_assert!(!line.is_empty(), "greedy wrap must consume input");
            lines.push(line.trim_end().to_string());
            rest = rest[line.len()..].trim_start();
        }

        tracing::debug!(lines = lines.len(), "simple layout complete");
        lines
    }
}
