//! Single-source shortest paths tolerant of negative weights

use hashbrown::HashMap;
use log::debug;
use petgraph::graph::NodeIndex;

use super::ShortestPathTree;
use crate::{Cost, Error, Result, RouteGraph};

/// Bellman-Ford distances from `source` to every reachable node.
///
/// Arcs are relaxed in insertion order for at most `n - 1` passes,
/// stopping early once a pass changes nothing. An undirected edge with a
/// negative weight is a negative cycle by itself (there and back).
///
/// # Errors
///
/// - `UnknownNode` if `source` is not in the graph
/// - `NegativeCycleDetected` if a negative cycle is reachable from `source`;
///   no partial distances are returned in that case
pub fn shortest_paths_from(graph: &RouteGraph, source: NodeIndex) -> Result<ShortestPathTree> {
    graph.validate_node(source)?;

    let node_count = graph.node_count();
    let arcs: Vec<_> = graph.edges().collect();
    let mut distances: Vec<Option<Cost>> = vec![None; node_count];
    let mut predecessors: Vec<Option<NodeIndex>> = vec![None; node_count];
    distances[source.index()] = Some(0.0);

    let mut passes = 0;
    for _ in 1..node_count {
        passes += 1;
        let mut changed = false;
        for &(from, to, weight) in &arcs {
            let Some(base) = distances[from.index()] else {
                continue;
            };
            let candidate = base + weight;
            if distances[to.index()].is_none_or(|current| candidate < current) {
                distances[to.index()] = Some(candidate);
                predecessors[to.index()] = Some(from);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    // Any further improvement can only come from a negative cycle
    for &(from, to, weight) in &arcs {
        if let (Some(base), Some(current)) = (distances[from.index()], distances[to.index()])
            && base + weight < current
        {
            debug!(
                "Negative cycle through '{}' -> '{}' reachable from '{}'",
                graph.label(from),
                graph.label(to),
                graph.label(source)
            );
            return Err(Error::NegativeCycleDetected);
        }
    }

    let distance_map: HashMap<NodeIndex, Cost> = distances
        .iter()
        .enumerate()
        .filter_map(|(idx, distance)| distance.map(|d| (NodeIndex::new(idx), d)))
        .collect();
    let predecessor_map: HashMap<NodeIndex, NodeIndex> = predecessors
        .iter()
        .enumerate()
        .filter_map(|(idx, prev)| prev.map(|p| (NodeIndex::new(idx), p)))
        .filter(|&(node, _)| node != source)
        .collect();

    debug!(
        "Bellman-Ford from '{}': {} of {node_count} nodes reached after {passes} passes",
        graph.label(source),
        distance_map.len()
    );

    Ok(ShortestPathTree::new(source, distance_map, predecessor_map))
}
