#![forbid(unsafe_code)]

//! Layout configuration and validation.
//!
//! Configuration is an explicit value handed to engine constructors; there is
//! no process-wide layout state. [`LayoutConfig::from_env`] reads overrides
//! from the environment:
//!
//! - `MVP_LAYOUT_LINE_WIDTH` (positive integer, greedy wrap width)
//! - `MVP_LAYOUT_OPTIMAL_WIDTH` (positive number, graph cost target)
//! - `MVP_LAYOUT_COST_MODEL` = plain|linguistic
//! - `MVP_LAYOUT_MAX_WORDS_PER_LINE` (positive integer)
//! - `MVP_LAYOUT_CACHE_CAPACITY` (positive integer)
//!
//! Invalid values keep the default and are reported as diagnostics.

use core::fmt;
use std::env;

use crate::cache::CachedLayout;
use crate::cost::{CostModel, CostVariant, DEFAULT_OPTIMAL_WIDTH};
use crate::graph::DEFAULT_MAX_WORDS_PER_LINE;
use crate::graph_layout::GraphLayout;
use crate::simple::{DEFAULT_LINE_WIDTH, SimpleLayout};

const ENV_LINE_WIDTH: &str = "MVP_LAYOUT_LINE_WIDTH";
const ENV_OPTIMAL_WIDTH: &str = "MVP_LAYOUT_OPTIMAL_WIDTH";
const ENV_COST_MODEL: &str = "MVP_LAYOUT_COST_MODEL";
const ENV_MAX_WORDS_PER_LINE: &str = "MVP_LAYOUT_MAX_WORDS_PER_LINE";
const ENV_CACHE_CAPACITY: &str = "MVP_LAYOUT_CACHE_CAPACITY";

/// Default number of distinct texts kept by [`CachedLayout`].
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Invalid configuration value with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    pub(crate) fn new(
        field: &'static str,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

pub(crate) fn ensure_positive(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::new(field, value.to_string(), "must be >= 1"))
    } else {
        Ok(())
    }
}

pub(crate) fn ensure_positive_width(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::new(
            field,
            value.to_string(),
            "must be a finite number > 0",
        ))
    }
}

/// Settings for both layout strategies.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Greedy wrap width in characters.
    pub line_width: usize,
    /// Line length the graph cost model aims for.
    pub optimal_width: f64,
    pub cost_variant: CostVariant,
    /// Longest run of words a single graph line may hold.
    pub max_words_per_line: usize,
    pub cache_capacity: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
            optimal_width: DEFAULT_OPTIMAL_WIDTH,
            cost_variant: CostVariant::default(),
            max_words_per_line: DEFAULT_MAX_WORDS_PER_LINE,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Configuration parse diagnostics (env + validation).
#[derive(Debug, Clone)]
pub struct LayoutConfigParse {
    pub config: LayoutConfig,
    pub errors: Vec<ConfigError>,
}

impl LayoutConfig {
    /// Parse config from environment variables, logging any diagnostics.
    #[must_use]
    pub fn from_env() -> LayoutConfig {
        let parsed = Self::from_env_with_diagnostics();
        for error in &parsed.errors {
            tracing::warn!(
                field = error.field,
                value = error.value.as_str(),
                "ignoring invalid layout setting: {}",
                error.message
            );
        }
        parsed.config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> LayoutConfigParse {
        from_env_with(|key| env::var(key).ok())
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let errors: Vec<ConfigError> = [
            ensure_positive("line_width", self.line_width),
            ensure_positive_width("optimal_width", self.optimal_width),
            ensure_positive("max_words_per_line", self.max_words_per_line),
            ensure_positive("cache_capacity", self.cache_capacity),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn simple_layout(&self) -> Result<SimpleLayout, ConfigError> {
        SimpleLayout::new(self.line_width)
    }

    pub fn cost_model(&self) -> Result<CostModel, ConfigError> {
        CostModel::for_variant(self.cost_variant, self.optimal_width)
    }

    pub fn graph_layout(&self) -> Result<GraphLayout, ConfigError> {
        GraphLayout::new(self.cost_model()?).with_max_words_per_line(self.max_words_per_line)
    }

    /// Graph layout memoized per input text.
    pub fn cached_graph_layout(&self) -> Result<CachedLayout<GraphLayout>, ConfigError> {
        CachedLayout::new(self.graph_layout()?, self.cache_capacity)
    }
}

fn from_env_with<F>(mut get: F) -> LayoutConfigParse
where
    F: FnMut(&str) -> Option<String>,
{
    let mut config = LayoutConfig::default();
    let mut errors = Vec::new();

    if let Some(value) = get(ENV_LINE_WIDTH) {
        match parse_positive_usize(&value) {
            Some(parsed) => config.line_width = parsed,
            None => errors.push(ConfigError::new(
                "line_width",
                value,
                "expected positive integer",
            )),
        }
    }

    if let Some(value) = get(ENV_OPTIMAL_WIDTH) {
        match parse_positive_f64(&value) {
            Some(parsed) => config.optimal_width = parsed,
            None => errors.push(ConfigError::new(
                "optimal_width",
                value,
                "expected positive number",
            )),
        }
    }

    if let Some(value) = get(ENV_COST_MODEL) {
        match CostVariant::parse(&value) {
            Some(parsed) => config.cost_variant = parsed,
            None => errors.push(ConfigError::new(
                "cost_variant",
                value,
                "expected plain|linguistic",
            )),
        }
    }

    if let Some(value) = get(ENV_MAX_WORDS_PER_LINE) {
        match parse_positive_usize(&value) {
            Some(parsed) => config.max_words_per_line = parsed,
            None => errors.push(ConfigError::new(
                "max_words_per_line",
                value,
                "expected positive integer",
            )),
        }
    }

    if let Some(value) = get(ENV_CACHE_CAPACITY) {
        match parse_positive_usize(&value) {
            Some(parsed) => config.cache_capacity = parsed,
            None => errors.push(ConfigError::new(
                "cache_capacity",
                value,
                "expected positive integer",
            )),
        }
    }

    LayoutConfigParse { config, errors }
}

#[inline]
fn parse_positive_usize(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|v| *v > 0)
}

#[inline]
fn parse_positive_f64(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}
