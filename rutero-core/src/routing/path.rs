//! Shortest path results

use hashbrown::HashMap;
use petgraph::graph::NodeIndex;

use crate::{Cost, RouteGraph};

/// Simple path from a source to a target, both inclusive
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub nodes: Vec<NodeIndex>,
    pub cost: Cost,
}

impl Path {
    pub fn source(&self) -> Option<NodeIndex> {
        self.nodes.first().copied()
    }

    pub fn target(&self) -> Option<NodeIndex> {
        self.nodes.last().copied()
    }

    /// Number of edges traversed
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn labels<'g>(&self, graph: &'g RouteGraph) -> Vec<&'g str> {
        graph.labels(&self.nodes)
    }
}

/// Single-source distances and predecessors.
/// Only reached nodes are present; unreachable ones are absent, not infinite.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    source: NodeIndex,
    distances: HashMap<NodeIndex, Cost>,
    predecessors: HashMap<NodeIndex, NodeIndex>,
}

impl ShortestPathTree {
    pub(crate) fn new(
        source: NodeIndex,
        distances: HashMap<NodeIndex, Cost>,
        predecessors: HashMap<NodeIndex, NodeIndex>,
    ) -> Self {
        Self {
            source,
            distances,
            predecessors,
        }
    }

    pub fn source(&self) -> NodeIndex {
        self.source
    }

    pub fn distance(&self, node: NodeIndex) -> Option<Cost> {
        self.distances.get(&node).copied()
    }

    /// Node preceding `node` on its shortest path; `None` for the source
    pub fn predecessor(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.predecessors.get(&node).copied()
    }

    pub fn contains(&self, node: NodeIndex) -> bool {
        self.distances.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Reached nodes with their distance, in node insertion order
    pub fn reached(&self) -> Vec<(NodeIndex, Cost)> {
        let mut reached: Vec<_> = self
            .distances
            .iter()
            .map(|(&node, &cost)| (node, cost))
            .collect();
        reached.sort_unstable_by_key(|&(node, _)| node);
        reached
    }

    /// Follows predecessors back from `target`
    pub fn path_to(&self, target: NodeIndex) -> Option<Path> {
        let cost = self.distance(target)?;

        let mut nodes = vec![target];
        let mut current = target;
        while current != self.source {
            let prev = *self.predecessors.get(&current)?;
            nodes.push(prev);
            current = prev;
            // A predecessor chain longer than the tree means a cycle
            if nodes.len() > self.distances.len() {
                return None;
            }
        }
        nodes.reverse();

        Some(Path { nodes, cost })
    }
}
