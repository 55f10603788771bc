#![forbid(unsafe_code)]

//! Debug view of a layout graph.
//!
//! A [`GraphSnapshot`] is the complete record of one graph layout call: every
//! node with its level and cost, every edge, and the chosen path. Graph
//! viewers consume it as JSON (it derives `Serialize`) or as Graphviz DOT
//! via [`GraphSnapshot::to_dot`].

use core::fmt::Write as _;

use serde::Serialize;

use crate::LineLayout;
use crate::graph::{LayoutEdge, LayoutGraph, LayoutNode, NodeId};
use crate::simple::SimpleLayout;

/// Optimal width the proportional label formula is scaled to.
const LABEL_OPTIMAL_WIDTH: f64 = 35.0;
/// Lines per node label the proportional formula aims for.
const LABEL_TARGET_LINES: f64 = 3.0;

/// Nodes, edges and chosen path of one layout call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    /// Node ids from START to END, inclusive.
    pub path: Vec<NodeId>,
}

/// Successors of a node, split by distance in levels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Successors {
    /// Successors exactly one level further.
    pub near: Vec<NodeId>,
    /// Successors more than one level further.
    pub far: Vec<NodeId>,
}

impl GraphSnapshot {
    pub(crate) fn from_graph(graph: LayoutGraph, path: Vec<NodeId>) -> Self {
        let (nodes, edges) = graph.into_parts();
        Self { nodes, edges, path }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&LayoutNode> {
        self.nodes.get(id.index())
    }

    /// Highest node level (the END sentinel), or 0 when empty.
    #[must_use]
    pub fn max_level(&self) -> usize {
        self.nodes.iter().map(|node| node.level).max().unwrap_or(0)
    }

    /// Nodes grouped by level, in creation order within each lane.
    #[must_use]
    pub fn lanes(&self) -> Vec<Vec<&LayoutNode>> {
        if self.nodes.is_empty() {
            return Vec::new();
        }
        let mut lanes: Vec<Vec<&LayoutNode>> = vec![Vec::new(); self.max_level() + 1];
        for node in &self.nodes {
            lanes[node.level].push(node);
        }
        lanes
    }

    #[must_use]
    pub fn on_path(&self, id: NodeId) -> bool {
        self.path.contains(&id)
    }

    fn edge_on_path(&self, edge: &LayoutEdge) -> bool {
        self.path
            .windows(2)
            .any(|pair| pair[0] == edge.from && pair[1] == edge.to)
    }

    #[must_use]
    pub fn successors(&self, id: NodeId) -> Successors {
        let mut successors = Successors::default();
        let Some(level) = self.node(id).map(|node| node.level) else {
            return successors;
        };
        for edge in self.edges.iter().filter(|edge| edge.from == id) {
            let Some(target) = self.node(edge.to) else {
                continue;
            };
            if target.level == level + 1 {
                successors.near.push(edge.to);
            } else {
                successors.far.push(edge.to);
            }
        }
        successors
    }

    /// Summed edge cost along the chosen path.
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.path
            .windows(2)
            .filter_map(|pair| {
                self.edges
                    .iter()
                    .find(|edge| edge.from == pair[0] && edge.to == pair[1])
            })
            .map(|edge| edge.cost)
            .sum()
    }

    /// Texts of the chosen lines, sentinels excluded.
    #[must_use]
    pub fn path_lines(&self) -> Vec<&str> {
        self.path
            .iter()
            .filter_map(|&id| self.node(id))
            .filter(|node| !node.is_sentinel())
            .map(|node| node.text.as_str())
            .collect()
    }

    /// Export as Graphviz DOT, ranked left to right by level.
    ///
    /// Sentinels are drawn red, the chosen path bold. Node labels are wrapped
    /// to a width proportional to the square root of their length.
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph LayoutGraph {\n  rankdir=LR;\n  node [shape=box, style=rounded];\n");

        for lane in self.lanes() {
            if lane.is_empty() {
                continue;
            }
            out.push_str("  { rank=same;");
            for node in &lane {
                let _ = write!(out, " n{};", node.id.raw());
            }
            out.push_str(" }\n");
        }

        for node in &self.nodes {
            let label = label_lines(&node.text)
                .iter()
                .map(|line| line.replace('\\', "\\\\").replace('"', "'"))
                .collect::<Vec<_>>()
                .join("\\n");
            let _ = write!(
                out,
                "  n{} [label=\"{}\\ncost={:.2}\"",
                node.id.raw(),
                label,
                node.cost
            );
            if node.is_sentinel() {
                out.push_str(", color=red");
            }
            if self.on_path(node.id) {
                out.push_str(", penwidth=2");
            }
            out.push_str("];\n");
        }

        for edge in &self.edges {
            let _ = write!(out, "  n{} -> n{}", edge.from.raw(), edge.to.raw());
            if self.edge_on_path(edge) {
                out.push_str(" [penwidth=2]");
            }
            out.push_str(";\n");
        }

        out.push_str("}\n");
        out
    }
}

/// Wrap a node label so long runs render roughly square.
fn label_lines(text: &str) -> Vec<String> {
    let len = text.chars().count() as f64;
    let width = (LABEL_OPTIMAL_WIDTH / LABEL_TARGET_LINES * len).sqrt() as usize;
    match SimpleLayout::new(width.max(1)) {
        Ok(layout) => layout.layout(text),
        Err(_) => vec![text.to_string()],
    }
}
