#![forbid(unsafe_code)]

//! Minimum-cost path through the layout DAG.
//!
//! Node ids are a topological order (every edge points to a higher id), so a
//! single relaxation pass in id order finds the shortest path in O(V + E)
//! without a priority queue.
//!
//! ## Tie-Breaking
//!
//! A node's best predecessor only changes on a strictly lower cost. Nodes are
//! relaxed in ascending id order, so among equal-cost paths the one through
//! the earliest-created predecessor wins. Output is reproducible.

use crate::graph::{LayoutGraph, NodeId};

/// Path from START to END with its summed edge cost.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    /// Node ids in path order, including both endpoints.
    pub nodes: Vec<NodeId>,
    pub cost: f64,
}

/// Find the minimum-cost path from `start` to `end`.
///
/// Returns `None` if either id is out of range or `end` is unreachable.
#[must_use]
pub fn shortest_path(graph: &LayoutGraph, start: NodeId, end: NodeId) -> Option<ShortestPath> {
    let count = graph.node_count();
    if start.index() >= count || end.index() >= count {
        return None;
    }

    let mut dist = vec![f64::INFINITY; count];
    let mut prev: Vec<Option<NodeId>> = vec![None; count];
    dist[start.index()] = 0.0;

    for node in &graph.nodes()[start.index()..=end.index().max(start.index())] {
        let here = dist[node.id.index()];
        if here.is_infinite() {
            continue;
        }
        for edge in graph.outgoing(node.id) {
            let candidate = here + edge.cost;
            let slot = edge.to.index();
            if candidate < dist[slot] {
                dist[slot] = candidate;
                prev[slot] = Some(node.id);
            }
        }
    }

    let cost = dist[end.index()];
    if cost.is_infinite() {
        return None;
    }

    let mut nodes = vec![end];
    let mut cursor = end;
    while let Some(before) = prev[cursor.index()] {
        nodes.push(before);
        cursor = before;
    }
    nodes.reverse();
    debug_assert_eq!(nodes.first(), Some(&start));

    Some(ShortestPath { nodes, cost })
}
