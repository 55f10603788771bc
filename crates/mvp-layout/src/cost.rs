#![forbid(unsafe_code)]

//! Line cost model for graph layout.
//!
//! A candidate line's cost is the sum of independent, non-negative
//! [`CostTerm`]s evaluated on its text. Two built-in variants exist:
//!
//! | Variant      | Terms                                                   |
//! |--------------|---------------------------------------------------------|
//! | `Plain`      | length deviation                                        |
//! | `Linguistic` | length deviation + comma ending + trailing article, preposition, possessive |
//!
//! ## Length deviation
//!
//! `0.01 * (chars(line) - optimal_width)^2`. Quadratic in either direction and
//! zero at exactly `optimal_width`.
//!
//! ## Linguistic penalties
//!
//! | Line ends with                     | Penalty |
//! |------------------------------------|---------|
//! | anything but `,`                   | 1.5     |
//! | `the`                              | 1.0     |
//! | a preposition (`of`, `unto`, ...)  | 0.4     |
//! | a possessive (`my`, `their`, ...)  | 0.2     |
//!
//! Trailing words are matched exactly (case-sensitive) against the last
//! space-separated word of the line.

use core::fmt;
use std::sync::Arc;

use crate::config::{ConfigError, ensure_positive_width};

/// Line width the length term aims for by default.
pub const DEFAULT_OPTIMAL_WIDTH: f64 = 35.0;

const LENGTH_DEVIATION_SCALE: f64 = 0.01;
const PENALTY_NO_COMMA: f64 = 1.5;
const PENALTY_DEFINITE_ARTICLE: f64 = 1.0;
const PENALTY_PREPOSITION: f64 = 0.4;
const PENALTY_POSSESSIVE: f64 = 0.2;

const DEFINITE_ARTICLES: &[&str] = &["the"];
const PREPOSITIONS: &[&str] = &[
    "after", "before", "for", "to", "by", "in", "on", "unto", "with", "without", "till", "from",
    "of",
];
const POSSESSIVES: &[&str] = &["your", "my", "their", "our", "his", "her"];

/// One additive contribution to a line's cost.
pub trait CostTerm: fmt::Debug + Send + Sync {
    /// Short identifier used in breakdowns.
    fn name(&self) -> &'static str;

    /// Cost of using `line` as a single line. Must be non-negative.
    fn cost(&self, line: &str) -> f64;
}

/// Quadratic penalty on the distance from the optimal width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthDeviation {
    pub optimal_width: f64,
}

impl CostTerm for LengthDeviation {
    fn name(&self) -> &'static str {
        "length"
    }

    fn cost(&self, line: &str) -> f64 {
        let deviation = line.chars().count() as f64 - self.optimal_width;
        LENGTH_DEVIATION_SCALE * deviation.powi(2)
    }
}

/// Penalizes every line that does not end at a comma.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommaEnding;

impl CostTerm for CommaEnding {
    fn name(&self) -> &'static str {
        "comma"
    }

    fn cost(&self, line: &str) -> f64 {
        if line.ends_with(',') {
            0.0
        } else {
            PENALTY_NO_COMMA
        }
    }
}

/// Fixed penalty when the line's last word belongs to a closed word list.
#[derive(Debug, Clone, Copy)]
pub struct TrailingWord {
    name: &'static str,
    words: &'static [&'static str],
    penalty: f64,
}

impl TrailingWord {
    #[must_use]
    pub const fn new(name: &'static str, words: &'static [&'static str], penalty: f64) -> Self {
        Self {
            name,
            words,
            penalty,
        }
    }

    #[must_use]
    pub const fn definite_article() -> Self {
        Self::new("article", DEFINITE_ARTICLES, PENALTY_DEFINITE_ARTICLE)
    }

    #[must_use]
    pub const fn preposition() -> Self {
        Self::new("preposition", PREPOSITIONS, PENALTY_PREPOSITION)
    }

    #[must_use]
    pub const fn possessive() -> Self {
        Self::new("possessive", POSSESSIVES, PENALTY_POSSESSIVE)
    }
}

impl CostTerm for TrailingWord {
    fn name(&self) -> &'static str {
        self.name
    }

    fn cost(&self, line: &str) -> f64 {
        let last = line.rsplit(' ').next().unwrap_or(line);
        if self.words.contains(&last) {
            self.penalty
        } else {
            0.0
        }
    }
}

/// Built-in cost model variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CostVariant {
    /// Length deviation only.
    Plain,
    /// Length deviation plus punctuation and stopword heuristics.
    #[default]
    Linguistic,
}

impl CostVariant {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "plain" | "length" => Some(Self::Plain),
            "linguistic" | "full" => Some(Self::Linguistic),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Linguistic => "linguistic",
        }
    }
}

impl fmt::Display for CostVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sum of cost terms applied to candidate lines.
#[derive(Debug, Clone)]
pub struct CostModel {
    optimal_width: f64,
    variant: Option<CostVariant>,
    terms: Vec<Arc<dyn CostTerm>>,
}

impl Default for CostModel {
    fn default() -> Self {
        Self::build(CostVariant::default(), DEFAULT_OPTIMAL_WIDTH)
    }
}

impl CostModel {
    /// Length deviation only.
    pub fn plain(optimal_width: f64) -> Result<Self, ConfigError> {
        Self::for_variant(CostVariant::Plain, optimal_width)
    }

    /// Length deviation plus the linguistic heuristics.
    pub fn linguistic(optimal_width: f64) -> Result<Self, ConfigError> {
        Self::for_variant(CostVariant::Linguistic, optimal_width)
    }

    pub fn for_variant(variant: CostVariant, optimal_width: f64) -> Result<Self, ConfigError> {
        ensure_positive_width("optimal_width", optimal_width)?;
        Ok(Self::build(variant, optimal_width))
    }

    fn build(variant: CostVariant, optimal_width: f64) -> Self {
        let mut terms: Vec<Arc<dyn CostTerm>> = vec![Arc::new(LengthDeviation { optimal_width })];
        if variant == CostVariant::Linguistic {
            terms.push(Arc::new(CommaEnding));
            terms.push(Arc::new(TrailingWord::definite_article()));
            terms.push(Arc::new(TrailingWord::preposition()));
            terms.push(Arc::new(TrailingWord::possessive()));
        }
        Self {
            optimal_width,
            variant: Some(variant),
            terms,
        }
    }

    /// Append a custom term. The model no longer reports a built-in variant.
    #[must_use]
    pub fn with_term(mut self, term: Arc<dyn CostTerm>) -> Self {
        self.terms.push(term);
        self.variant = None;
        self
    }

    #[must_use]
    pub fn optimal_width(&self) -> f64 {
        self.optimal_width
    }

    /// The built-in variant, or `None` once custom terms were added.
    #[must_use]
    pub fn variant(&self) -> Option<CostVariant> {
        self.variant
    }

    #[must_use]
    pub fn terms(&self) -> &[Arc<dyn CostTerm>] {
        &self.terms
    }

    /// Total cost of `line`.
    #[must_use]
    pub fn line_cost(&self, line: &str) -> f64 {
        self.terms.iter().map(|term| term.cost(line)).sum()
    }

    /// Per-term contributions, in term order.
    #[must_use]
    pub fn breakdown(&self, line: &str) -> Vec<(&'static str, f64)> {
        self.terms
            .iter()
            .map(|term| (term.name(), term.cost(line)))
            .collect()
    }

    /// Total cost of a sequence of lines.
    #[must_use]
    pub fn lines_cost<S: AsRef<str>>(&self, lines: &[S]) -> f64 {
        lines.iter().map(|line| self.line_cost(line.as_ref())).sum()
    }
}
