//! Metric closure: all-pairs shortest path costs over a route graph

use petgraph::graph::NodeIndex;

use crate::routing::{ShortestPathTree, dijkstra_tree};
use crate::{Cost, Result, RouteGraph};

/// Dense cost matrix between every pair of nodes plus the trees needed to
/// expand a closure hop back into real edges. Positions equal node indices.
pub(crate) struct MetricClosure {
    n: usize,
    distances: Vec<Cost>,
    trees: Vec<ShortestPathTree>,
}

impl MetricClosure {
    /// One Dijkstra run per node
    ///
    /// # Errors
    ///
    /// `NegativeWeight` if the graph has negative edges
    pub(crate) fn new(graph: &RouteGraph) -> Result<Self> {
        let n = graph.node_count();
        let mut distances = vec![Cost::INFINITY; n * n];
        let mut trees = Vec::with_capacity(n);

        for source in graph.nodes() {
            let tree = dijkstra_tree(graph, source, None)?;
            for (target, cost) in tree.reached() {
                distances[source.index() * n + target.index()] = cost;
            }
            trees.push(tree);
        }

        Ok(Self {
            n,
            distances,
            trees,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub(crate) fn get(&self, i: usize, j: usize) -> Cost {
        self.distances[i * self.n + j]
    }

    /// Positions unreachable from `i`
    pub(crate) fn unreachable_from(&self, i: usize) -> Vec<usize> {
        (0..self.n).filter(|&j| !self.get(i, j).is_finite()).collect()
    }

    /// Closed tour cost over `order`, returning to `order[0]`
    pub(crate) fn tour_cost(&self, order: &[usize]) -> Cost {
        let n = order.len();
        (0..n).map(|k| self.get(order[k], order[(k + 1) % n])).sum()
    }

    /// Real node sequence for the hop `i -> j`, both inclusive
    pub(crate) fn expand(&self, i: usize, j: usize) -> Option<Vec<NodeIndex>> {
        self.trees
            .get(i)?
            .path_to(NodeIndex::new(j))
            .map(|path| path.nodes)
    }
}
