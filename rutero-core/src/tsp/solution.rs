use petgraph::graph::NodeIndex;

use crate::{Cost, RouteGraph};

/// Cheapest closed circuit found by exhaustive search
#[derive(Debug, Clone, PartialEq)]
pub struct TspSolution {
    /// `start`, every other node once, `start` again
    pub route: Vec<NodeIndex>,
    pub cost: Cost,
    /// Candidate circuits enumerated
    pub evaluated: usize,
    /// Candidates discarded because a consecutive pair had no edge
    pub skipped: usize,
}

impl TspSolution {
    pub fn start(&self) -> Option<NodeIndex> {
        self.route.first().copied()
    }

    pub fn labels<'g>(&self, graph: &'g RouteGraph) -> Vec<&'g str> {
        graph.labels(&self.route)
    }
}

/// Construction heuristic for the approximate solver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApproxMethod {
    /// Greedy: always move to the closest unvisited node
    #[default]
    NearestNeighbor,
    /// Preorder walk of a minimum spanning tree. Needs symmetric costs;
    /// directed graphs fall back to nearest neighbour.
    DoubleTree,
}

/// Heuristic circuit and the walk over real edges that realises it
#[derive(Debug, Clone, PartialEq)]
pub struct ApproxTour {
    /// Closed visiting order: `start`, every other node once, `start` again
    pub circuit: Vec<NodeIndex>,
    /// The circuit with each hop expanded into its shortest path; may pass
    /// through a node more than once when the graph is sparse
    pub route: Vec<NodeIndex>,
    /// Sum of edge weights along `route`
    pub cost: Cost,
    /// The directed input was collapsed to an undirected graph first
    pub degraded: bool,
    /// Construction actually used
    pub method: ApproxMethod,
}

impl ApproxTour {
    pub fn circuit_labels<'g>(&self, graph: &'g RouteGraph) -> Vec<&'g str> {
        graph.labels(&self.circuit)
    }

    pub fn route_labels<'g>(&self, graph: &'g RouteGraph) -> Vec<&'g str> {
        graph.labels(&self.route)
    }
}
