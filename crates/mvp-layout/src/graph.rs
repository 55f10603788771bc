#![forbid(unsafe_code)]

//! Candidate-line graph for optimal layout.
//!
//! Every node is a candidate line: a contiguous run of words. Its `level` is
//! the 1-based index of the run's last word. Two sentinels bracket the graph:
//! START at level 0 and END at level `n + 1`. A path from START to END reads
//! as a partition of the words into consecutive lines.
//!
//! # Construction
//!
//! For each word `k` (level `k`):
//!
//! 1. Add a single-word node for word `k`.
//! 2. For each node `p` at level `k - 1`:
//!    - unless `p` is START, add a merged node `p.text + " " + word_k` and link
//!      it from every predecessor of `p`, so the merged line replaces `p`
//!      instead of following it;
//!    - link `p` to the single-word node ("break after `p`").
//!
//! Finally END is linked from every level-`n` node.
//!
//! # Invariants
//!
//! 1. Node ids are arena indices assigned in creation order.
//! 2. Every edge goes from a lower id to a higher id, so ascending id order
//!    is a topological order.
//! 3. An edge's cost is the cost of the node it enters (0 into END).
//! 4. Without a word bound, level `k` holds exactly `k` nodes, so the graph
//!    has `n(n+1)/2 + 2` nodes.
//!
//! Identity is the id, never the text: distinct nodes may carry equal text.

use serde::Serialize;
use smallvec::SmallVec;

use crate::cost::CostModel;
use crate::tokenize::Word;

/// Default bound on the words a single candidate line may hold.
///
/// Keeps the graph at O(n * bound) nodes for long inputs; single verses never
/// come close.
pub const DEFAULT_MAX_WORDS_PER_LINE: usize = 64;

/// Most nodes a graph may hold while every id fits in a `NodeId`.
pub const MAX_NODES: usize = u32::MAX as usize;

pub const START_TEXT: &str = "START";
pub const END_TEXT: &str = "END";

/// Arena index of a layout node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Callers keep `index` below [`MAX_NODES`]; anything larger saturates.
    #[inline]
    fn from_index(index: usize) -> Self {
        debug_assert!(index < MAX_NODES, "layout graph too large");
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }
}

/// What a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    Start,
    /// A line covering words `first_word..level` (0-based start, exclusive end).
    Line { first_word: usize },
    End,
}

/// A candidate line (or sentinel) in the layout graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    pub id: NodeId,
    #[serde(flatten)]
    pub kind: NodeKind,
    /// Space-joined words, or `START` / `END`.
    pub text: String,
    pub level: usize,
    pub cost: f64,
}

impl LayoutNode {
    #[inline]
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        !matches!(self.kind, NodeKind::Line { .. })
    }

    /// Word index range covered by a line node.
    #[must_use]
    pub fn word_range(&self) -> Option<std::ops::Range<usize>> {
        match self.kind {
            NodeKind::Line { first_word } => Some(first_word..self.level),
            NodeKind::Start | NodeKind::End => None,
        }
    }

    /// Number of words on the line (0 for sentinels).
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.word_range().map_or(0, |range| range.len())
    }
}

/// Directed edge carrying the cost of entering `to`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub cost: f64,
}

/// Arena-backed layout DAG for a single layout call.
#[derive(Debug, Clone, Default)]
pub struct LayoutGraph {
    nodes: Vec<LayoutNode>,
    edges: Vec<LayoutEdge>,
    /// Outgoing edge indices per node.
    outgoing: Vec<SmallVec<[usize; 4]>>,
    /// Predecessor ids per node.
    incoming: Vec<SmallVec<[NodeId; 4]>>,
    start: Option<NodeId>,
    end: Option<NodeId>,
}

impl LayoutGraph {
    fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(nodes * 2),
            outgoing: Vec::with_capacity(nodes),
            incoming: Vec::with_capacity(nodes),
            start: None,
            end: None,
        }
    }

    fn add_node(&mut self, kind: NodeKind, text: String, level: usize, cost: f64) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(LayoutNode {
            id,
            kind,
            text,
            level,
            cost,
        });
        self.outgoing.push(SmallVec::new());
        self.incoming.push(SmallVec::new());
        id
    }

    fn add_edge(&mut self, from: NodeId, to: NodeId) {
        debug_assert!(from < to, "edges must follow creation order");
        let cost = self.nodes[to.index()].cost;
        self.outgoing[from.index()].push(self.edges.len());
        self.incoming[to.index()].push(from);
        self.edges.push(LayoutEdge { from, to, cost });
    }

    /// The START sentinel, absent for an empty graph.
    #[must_use]
    pub fn start(&self) -> Option<NodeId> {
        self.start
    }

    /// The END sentinel, absent for an empty graph.
    #[must_use]
    pub fn end(&self) -> Option<NodeId> {
        self.end
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&LayoutNode> {
        self.nodes.get(id.index())
    }

    #[must_use]
    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    #[must_use]
    pub fn edges(&self) -> &[LayoutEdge] {
        &self.edges
    }

    /// Edges leaving `id`, in insertion order.
    pub fn outgoing(&self, id: NodeId) -> impl Iterator<Item = &LayoutEdge> + '_ {
        self.outgoing
            .get(id.index())
            .into_iter()
            .flatten()
            .map(|&edge| &self.edges[edge])
    }

    /// Nodes with an edge into `id`, in insertion order.
    #[must_use]
    pub fn predecessors(&self, id: NodeId) -> &[NodeId] {
        self.incoming
            .get(id.index())
            .map(|preds| preds.as_slice())
            .unwrap_or(&[])
    }

    pub fn nodes_at_level(&self, level: usize) -> impl Iterator<Item = &LayoutNode> + '_ {
        self.nodes.iter().filter(move |node| node.level == level)
    }

    /// Level of the END sentinel (`n + 1`), or 0 for an empty graph.
    #[must_use]
    pub fn max_level(&self) -> usize {
        self.end
            .and_then(|end| self.node(end))
            .map_or(0, |node| node.level)
    }

    pub(crate) fn into_parts(self) -> (Vec<LayoutNode>, Vec<LayoutEdge>) {
        (self.nodes, self.edges)
    }
}

/// Build the candidate-line graph for `words`.
///
/// Returns an empty graph (no sentinels) for an empty word list. Merges stop
/// once a line would exceed `max_words_per_line` words; a bound of 0 is
/// treated as 1. The bound is lowered further when `n * bound + 2` nodes
/// would not fit in [`MAX_NODES`], and an input too long even for one word
/// per line yields an empty graph.
#[must_use]
pub fn build_graph(words: &[Word<'_>], model: &CostModel, max_words_per_line: usize) -> LayoutGraph {
    build_graph_within(words, model, max_words_per_line, MAX_NODES)
}

/// Largest usable word bound for `n` words under `node_limit` nodes.
fn fit_word_bound(n: usize, max_words: usize, node_limit: usize) -> Option<usize> {
    let cap = node_limit.checked_sub(2)? / n.max(1);
    (cap > 0).then(|| max_words.max(1).min(cap))
}

fn build_graph_within(
    words: &[Word<'_>],
    model: &CostModel,
    max_words_per_line: usize,
    node_limit: usize,
) -> LayoutGraph {
    if words.is_empty() {
        return LayoutGraph::default();
    }

    let n = words.len();
    let Some(max_words) = fit_word_bound(n, max_words_per_line, node_limit) else {
        tracing::error!(words = n, node_limit, "input too long for layout graph");
        return LayoutGraph::default();
    };
    if max_words < max_words_per_line.max(1).min(n) {
        tracing::warn!(
            words = n,
            requested = max_words_per_line,
            bound = max_words,
            "word bound lowered to fit node id range"
        );
    }
    let per_level = n.min(max_words);
    let mut graph = LayoutGraph::with_capacity(n * per_level + 2);

    let start = graph.add_node(NodeKind::Start, START_TEXT.to_string(), 0, 0.0);
    graph.start = Some(start);

    let mut previous: Vec<NodeId> = vec![start];
    let mut current: Vec<NodeId> = Vec::with_capacity(per_level);

    for (index, word) in words.iter().enumerate() {
        let level = index + 1;
        let text = word.as_str();

        let single = graph.add_node(
            NodeKind::Line { first_word: index },
            text.to_string(),
            level,
            model.line_cost(text),
        );
        current.clear();
        current.push(single);

        for &prev in &previous {
            if prev != start {
                let node = &graph.nodes[prev.index()];
                if node.word_count() < max_words {
                    let first_word = match node.kind {
                        NodeKind::Line { first_word } => first_word,
                        NodeKind::Start | NodeKind::End => index,
                    };
                    let mut merged_text = String::with_capacity(node.text.len() + 1 + text.len());
                    merged_text.push_str(&node.text);
                    merged_text.push(' ');
                    merged_text.push_str(text);
                    let cost = model.line_cost(&merged_text);

                    let merged =
                        graph.add_node(NodeKind::Line { first_word }, merged_text, level, cost);
                    let preds = graph.incoming[prev.index()].clone();
                    for pred in preds {
                        graph.add_edge(pred, merged);
                    }
                    current.push(merged);
                }
            }
            graph.add_edge(prev, single);
        }

        std::mem::swap(&mut previous, &mut current);
    }

    let end = graph.add_node(NodeKind::End, END_TEXT.to_string(), n + 1, 0.0);
    graph.end = Some(end);
    for &prev in &previous {
        graph.add_edge(prev, end);
    }

    tracing::trace!(
        words = n,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "layout graph built"
    );
    graph
}
