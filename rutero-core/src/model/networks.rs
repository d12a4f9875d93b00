use log::info;

use super::adjacency::AdjacencyMap;
use super::components::Metric;
use super::graph::RouteGraph;
use crate::Result;

impl RouteGraph {
    /// Builds a graph weighted by one metric of the adjacency records.
    /// Every origin becomes a node even without outgoing connections.
    pub fn from_adjacency(adjacency: &AdjacencyMap, metric: Metric, directed: bool) -> Self {
        let mut graph = RouteGraph::new(directed);
        for origin in adjacency.origins() {
            graph.add_node(origin);
        }
        for (origin, destination, attributes) in adjacency.iter() {
            graph.add_edge(origin, destination, attributes.get(metric));
        }
        graph
    }
}

/// The two independently weighted graphs built from one adjacency table
#[derive(Debug, Clone)]
pub struct RouteNetworks {
    /// Weighted by `tiempo`
    pub time: RouteGraph,
    /// Weighted by `distancia`
    pub distance: RouteGraph,
}

impl RouteNetworks {
    /// # Errors
    ///
    /// Returns an error if any record carries a non-finite weight
    pub fn from_adjacency(adjacency: &AdjacencyMap, directed: bool) -> Result<Self> {
        adjacency.validate()?;

        let networks = Self {
            time: RouteGraph::from_adjacency(adjacency, Metric::Time, directed),
            distance: RouteGraph::from_adjacency(adjacency, Metric::Distance, directed),
        };
        info!(
            "Built {} route networks: {} places, {} connections",
            if directed { "directed" } else { "undirected" },
            networks.time.node_count(),
            networks.time.edge_count()
        );
        Ok(networks)
    }

    pub fn get(&self, metric: Metric) -> &RouteGraph {
        match metric {
            Metric::Time => &self.time,
            Metric::Distance => &self.distance,
        }
    }
}
