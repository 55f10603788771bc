#![forbid(unsafe_code)]

//! Optimal line breaking by shortest path over candidate lines.
//!
//! [`GraphLayout::plan`] tokenizes the text, builds the candidate-line DAG
//! ([`crate::graph`]), scores every candidate with the [`CostModel`], and
//! returns the minimum-cost START→END path as lines. Because every partition
//! of the words is a path, the result is never worse than greedy wrapping
//! under the same cost model.
//!
//! # Example
//! ```
//! use mvp_layout::{CostModel, GraphLayout, LineLayout};
//!
//! let layout = GraphLayout::new(CostModel::plain(35.0).unwrap());
//! let lines = layout.layout("Grace to you and peace from God our Father");
//! assert_eq!(lines, vec!["Grace to you and peace from God our Father"]);
//!
//! let snapshot = layout.debug_graph().unwrap();
//! assert_eq!(snapshot.path_lines(), lines);
//! ```

use std::sync::{Mutex, PoisonError};

use crate::LineLayout;
use crate::config::{ConfigError, ensure_positive};
use crate::cost::CostModel;
use crate::graph::{DEFAULT_MAX_WORDS_PER_LINE, LayoutGraph, NodeId, build_graph};
use crate::inspect::GraphSnapshot;
use crate::path::shortest_path;
use crate::tokenize::{LineSpan, tokenize};

/// Result of one graph layout: lines plus the graph that produced them.
#[derive(Debug, Clone, Default)]
pub struct LayoutPlan {
    lines: Vec<String>,
    spans: Vec<LineSpan>,
    total_cost: f64,
    path: Vec<NodeId>,
    graph: LayoutGraph,
}

impl LayoutPlan {
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Byte range of each line in the input text.
    #[must_use]
    pub fn spans(&self) -> &[LineSpan] {
        &self.spans
    }

    /// Summed cost of the chosen lines.
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Chosen node ids, START and END included. Empty for empty input.
    #[must_use]
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    #[must_use]
    pub fn graph(&self) -> &LayoutGraph {
        &self.graph
    }

    #[must_use]
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::from_graph(self.graph.clone(), self.path.clone())
    }

    #[must_use]
    pub fn into_snapshot(self) -> GraphSnapshot {
        GraphSnapshot::from_graph(self.graph, self.path)
    }
}

/// Graph-based layout engine.
///
/// `plan` is pure and may be called concurrently. `layout` additionally
/// records the call's graph for [`GraphLayout::debug_graph`].
#[derive(Debug)]
pub struct GraphLayout {
    model: CostModel,
    max_words_per_line: usize,
    last: Mutex<Option<GraphSnapshot>>,
}

impl Default for GraphLayout {
    fn default() -> Self {
        Self::new(CostModel::default())
    }
}

impl Clone for GraphLayout {
    fn clone(&self) -> Self {
        Self {
            model: self.model.clone(),
            max_words_per_line: self.max_words_per_line,
            last: Mutex::new(None),
        }
    }
}

impl GraphLayout {
    #[must_use]
    pub fn new(model: CostModel) -> Self {
        Self {
            model,
            max_words_per_line: DEFAULT_MAX_WORDS_PER_LINE,
            last: Mutex::new(None),
        }
    }

    /// Bound the number of words a single line may hold.
    pub fn with_max_words_per_line(mut self, max_words: usize) -> Result<Self, ConfigError> {
        ensure_positive("max_words_per_line", max_words)?;
        self.max_words_per_line = max_words;
        Ok(self)
    }

    #[must_use]
    pub fn cost_model(&self) -> &CostModel {
        &self.model
    }

    #[must_use]
    pub fn max_words_per_line(&self) -> usize {
        self.max_words_per_line
    }

    /// Lay out `text` and return the full plan.
    #[must_use]
    pub fn plan(&self, text: &str) -> LayoutPlan {
        let words = tokenize(text);
        let _span = tracing::debug_span!("graph_layout", words = words.len()).entered();

        if words.is_empty() {
            return LayoutPlan::default();
        }

        let graph = build_graph(&words, &self.model, self.max_words_per_line);
        // Only inputs beyond the node id range come back without sentinels.
        let (Some(start), Some(end)) = (graph.start(), graph.end()) else {
            return LayoutPlan::default();
        };

        let Some(best) = shortest_path(&graph, start, end) else {
            tracing::error!(
                nodes = graph.node_count(),
                "no path from START to END in layout graph"
            );
            debug_assert!(false, "layout graph always connects START to END");
            return LayoutPlan {
                graph,
                ..LayoutPlan::default()
            };
        };

        let mut lines = Vec::with_capacity(best.nodes.len().saturating_sub(2));
        let mut spans = Vec::with_capacity(lines.capacity());
        for node in best.nodes.iter().filter_map(|&id| graph.node(id)) {
            let Some(range) = node.word_range() else {
                continue;
            };
            lines.push(node.text.clone());
            if let Some(span) = LineSpan::covering(&words[range]) {
                spans.push(span);
            }
        }

        tracing::debug!(
            lines = lines.len(),
            cost = best.cost,
            nodes = graph.node_count(),
            "graph layout complete"
        );

        LayoutPlan {
            lines,
            spans,
            total_cost: best.cost,
            path: best.nodes,
            graph,
        }
    }

    /// Graph, costs and chosen path of the most recent `layout` call.
    ///
    /// `None` until `layout` has been called once.
    #[must_use]
    pub fn debug_graph(&self) -> Option<GraphSnapshot> {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LineLayout for GraphLayout {
    fn layout(&self, text: &str) -> Vec<String> {
        self.layout_with_graph(text).0
    }

    fn layout_with_graph(&self, text: &str) -> (Vec<String>, Option<GraphSnapshot>) {
        let plan = self.plan(text);
        let lines = plan.lines.clone();
        let snapshot = plan.into_snapshot();
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.clone());
        (lines, Some(snapshot))
    }

    fn debug_graph(&self) -> Option<GraphSnapshot> {
        GraphLayout::debug_graph(self)
    }
}
