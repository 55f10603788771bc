#![forbid(unsafe_code)]

//! Line layout engines for short display texts such as verse flash cards.
//!
//! This crate provides:
//! - [`LineLayout`], the contract every engine implements
//! - [`SimpleLayout`] for greedy wrapping at a fixed width
//! - [`GraphLayout`] for optimal breaking by shortest path over candidate lines
//! - [`CostModel`] with composable [`CostTerm`]s scoring each line
//! - [`GraphSnapshot`] for inspecting (and exporting as DOT or JSON) the graph
//!   behind a layout
//! - [`CachedLayout`] for memoizing repeated texts
//! - [`LayoutConfig`] for env-driven configuration
//!
//! # Example
//! ```
//! use mvp_layout::{GraphLayout, LineLayout, SimpleLayout};
//!
//! let text = "Paul and Timothy, bondservants of Jesus Christ, To all the saints";
//! let greedy = SimpleLayout::default().layout(text);
//! let optimal = GraphLayout::default().layout(text);
//! assert_eq!(greedy.join(" "), optimal.join(" "));
//! ```

/// Memoizing layout wrapper.
pub mod cache;
/// Configuration and validation errors.
pub mod config;
/// Per-line cost terms and models.
pub mod cost;
/// Candidate-line DAG construction.
pub mod graph;
/// Graph-based optimal layout.
pub mod graph_layout;
/// Snapshot, traversal and DOT export of layout graphs.
pub mod inspect;
/// Shortest path over the layout DAG.
pub mod path;
/// Greedy word wrap.
pub mod simple;
/// Whitespace tokenization with byte offsets.
pub mod tokenize;

pub use cache::CachedLayout;
pub use config::{ConfigError, DEFAULT_CACHE_CAPACITY, LayoutConfig, LayoutConfigParse};
pub use cost::{
    CommaEnding, CostModel, CostTerm, CostVariant, DEFAULT_OPTIMAL_WIDTH, LengthDeviation,
    TrailingWord,
};
pub use graph::{
    DEFAULT_MAX_WORDS_PER_LINE, LayoutEdge, LayoutGraph, LayoutNode, NodeId, NodeKind,
    build_graph,
};
pub use graph_layout::{GraphLayout, LayoutPlan};
pub use inspect::{GraphSnapshot, Successors};
pub use path::{ShortestPath, shortest_path};
pub use simple::{DEFAULT_LINE_WIDTH, SimpleLayout};
pub use tokenize::{LineSpan, Word, join_words, tokenize};

/// Splits text into display lines.
///
/// Engines never alter, drop or reorder words: the whitespace-separated
/// words of the returned lines are the input's words in order. Empty or
/// whitespace-only input yields no lines.
pub trait LineLayout {
    fn layout(&self, text: &str) -> Vec<String>;

    /// Lay out `text` and return the graph behind the lines, if the engine
    /// builds one.
    fn layout_with_graph(&self, text: &str) -> (Vec<String>, Option<GraphSnapshot>) {
        (self.layout(text), None)
    }

    /// Graph of the most recent `layout` call, for engines that record one.
    fn debug_graph(&self) -> Option<GraphSnapshot> {
        None
    }
}

impl<L: LineLayout + ?Sized> LineLayout for &L {
    fn layout(&self, text: &str) -> Vec<String> {
        (**self).layout(text)
    }

    fn layout_with_graph(&self, text: &str) -> (Vec<String>, Option<GraphSnapshot>) {
        (**self).layout_with_graph(text)
    }

    fn debug_graph(&self) -> Option<GraphSnapshot> {
        (**self).debug_graph()
    }
}

impl<L: LineLayout + ?Sized> LineLayout for Box<L> {
    fn layout(&self, text: &str) -> Vec<String> {
        (**self).layout(text)
    }

    fn layout_with_graph(&self, text: &str) -> (Vec<String>, Option<GraphSnapshot>) {
        (**self).layout_with_graph(text)
    }

    fn debug_graph(&self) -> Option<GraphSnapshot> {
        (**self).debug_graph()
    }
}
