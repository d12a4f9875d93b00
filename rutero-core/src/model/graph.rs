//! Weighted place graph

use hashbrown::HashMap;
use log::debug;
use petgraph::{
    algo::kosaraju_scc,
    graph::{DiGraph, EdgeIndex, NodeIndex},
    visit::EdgeRef,
};

use super::components::{Leg, MergePolicy, Place};
use crate::{Cost, Error, Result};

/// Weighted graph over labelled places.
///
/// Both flavours are stored as a directed petgraph; an undirected graph
/// mirrors every inserted edge so each lookup is a single arc probe.
/// Nodes and edges keep their insertion order, which every solver relies
/// on for reproducible tie-breaking.
#[derive(Debug, Clone)]
pub struct RouteGraph {
    pub(crate) graph: DiGraph<Place, Leg>,
    index: HashMap<String, NodeIndex>,
    directed: bool,
}

impl RouteGraph {
    pub fn new(directed: bool) -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
            directed,
        }
    }

    pub fn directed() -> Self {
        Self::new(true)
    }

    pub fn undirected() -> Self {
        Self::new(false)
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Inserts a place, returning the existing index if the label is known
    pub fn add_node(&mut self, label: &str) -> NodeIndex {
        if let Some(&node) = self.index.get(label) {
            return node;
        }
        let node = self.graph.add_node(Place {
            label: label.to_string(),
        });
        self.index.insert(label.to_string(), node);
        node
    }

    /// Inserts or overwrites the weight of `a -> b` (and `b -> a` when undirected).
    /// Both endpoints are added to the node set if missing.
    pub fn add_edge(&mut self, a: &str, b: &str, weight: Cost) -> EdgeIndex {
        let from = self.add_node(a);
        let to = self.add_node(b);
        self.connect(from, to, weight)
    }

    fn connect(&mut self, from: NodeIndex, to: NodeIndex, weight: Cost) -> EdgeIndex {
        let edge = self.graph.update_edge(from, to, Leg { weight });
        if !self.directed && from != to {
            self.graph.update_edge(to, from, Leg { weight });
        }
        edge
    }

    pub fn node_index(&self, label: &str) -> Option<NodeIndex> {
        self.index.get(label).copied()
    }

    /// Like [`node_index`](Self::node_index) but fails with `UnknownNode`
    pub fn require_node(&self, label: &str) -> Result<NodeIndex> {
        self.node_index(label)
            .ok_or_else(|| Error::UnknownNode(label.to_string()))
    }

    pub(crate) fn validate_node(&self, node: NodeIndex) -> Result<()> {
        if node.index() < self.graph.node_count() {
            Ok(())
        } else {
            Err(Error::UnknownNode(format!("#{}", node.index())))
        }
    }

    pub fn label(&self, node: NodeIndex) -> &str {
        self.graph
            .node_weight(node)
            .map_or("<unknown>", |place| place.label.as_str())
    }

    /// Labels of a node sequence, in order
    pub fn labels(&self, route: &[NodeIndex]) -> Vec<&str> {
        route.iter().map(|&node| self.label(node)).collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct connections: arcs for a directed graph,
    /// unordered pairs for an undirected one
    pub fn edge_count(&self) -> usize {
        if self.directed {
            self.graph.edge_count()
        } else {
            self.graph
                .edge_references()
                .filter(|edge| edge.source() <= edge.target())
                .count()
        }
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Every stored arc `(from, to, weight)` in insertion order.
    /// Undirected graphs yield both directions of each edge.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, Cost)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.source(), edge.target(), edge.weight().cost()))
    }

    pub fn has_edge(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.graph.find_edge(a, b).is_some()
    }

    pub fn weight(&self, a: NodeIndex, b: NodeIndex) -> Result<Cost> {
        self.edge_cost(a, b).ok_or_else(|| Error::EdgeNotFound {
            from: self.label(a).to_string(),
            to: self.label(b).to_string(),
        })
    }

    /// Weight lookup without building an error for the miss
    pub(crate) fn edge_cost(&self, a: NodeIndex, b: NodeIndex) -> Option<Cost> {
        self.graph
            .find_edge(a, b)
            .and_then(|edge| self.graph.edge_weight(edge))
            .map(Leg::cost)
    }

    /// Outgoing arcs of `node` as `(target, weight)`, in edge insertion order
    pub(crate) fn legs_from(&self, node: NodeIndex) -> Vec<(NodeIndex, Cost)> {
        let mut legs: Vec<_> = self
            .graph
            .edges(node)
            .map(|edge| (edge.id(), edge.target(), edge.weight().cost()))
            .collect();
        // petgraph walks the adjacency list newest first
        legs.sort_unstable_by_key(|&(edge, _, _)| edge);
        legs.into_iter().map(|(_, to, weight)| (to, weight)).collect()
    }

    /// Nodes reachable from `node` over one edge, in edge insertion order
    pub fn neighbors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.legs_from(node).into_iter().map(|(to, _)| to).collect()
    }

    pub fn has_negative_weights(&self) -> bool {
        self.graph.edge_weights().any(|leg| leg.weight < 0.0)
    }

    /// Sum of consecutive edge weights along `route`
    ///
    /// # Errors
    ///
    /// `EdgeNotFound` for the first consecutive pair without an edge
    pub fn route_cost(&self, route: &[NodeIndex]) -> Result<Cost> {
        route
            .windows(2)
            .map(|pair| self.weight(pair[0], pair[1]))
            .sum()
    }

    /// Every node reachable from every other one along edge directions.
    /// For an undirected graph this is plain connectivity.
    pub fn is_strongly_connected(&self) -> bool {
        self.node_count() > 0 && kosaraju_scc(&self.graph).len() == 1
    }

    /// Collapses a directed graph into an undirected one over the same nodes.
    ///
    /// A connection present in one direction keeps its weight; when both
    /// directions exist `policy` picks the weight. Node indices are preserved.
    pub fn to_undirected(&self, policy: MergePolicy) -> RouteGraph {
        if !self.directed {
            return self.clone();
        }

        let mut undirected = RouteGraph::undirected();
        for node in self.nodes() {
            undirected.add_node(self.label(node));
        }

        let mut merged = 0usize;
        for (from, to, weight) in self.edges() {
            let weight = match undirected.graph.find_edge(from, to) {
                Some(edge) => {
                    merged += 1;
                    policy.merge(undirected.graph[edge].weight, weight)
                }
                None => weight,
            };
            undirected.connect(from, to, weight);
        }

        debug!(
            "Collapsed directed graph: {} arcs into {} edges ({merged} merged, {policy:?})",
            self.graph.edge_count(),
            undirected.edge_count()
        );
        undirected
    }
}
