use std::collections::BinaryHeap;

use hashbrown::HashMap;
use log::debug;
use petgraph::graph::NodeIndex;

use super::state::State;
use crate::routing::{Path, ShortestPathTree};
use crate::{Error, Result, RouteGraph};

/// Dijkstra's algorithm over non-negative weights, keeping predecessors.
///
/// Stops as soon as `target` is settled; without a target every reachable
/// node is settled. Neighbours are relaxed in edge insertion order and a
/// predecessor is only replaced on a strictly cheaper cost, so among equal
/// cost paths the first one discovered wins.
///
/// # Errors
///
/// `NegativeWeight` when an edge with a negative weight is relaxed
pub(crate) fn dijkstra_tree(
    graph: &RouteGraph,
    start: NodeIndex,
    target: Option<NodeIndex>,
) -> Result<ShortestPathTree> {
    let estimated_nodes = graph.node_count();
    let mut distances = HashMap::with_capacity(estimated_nodes);
    let mut predecessors = HashMap::with_capacity(estimated_nodes);
    let mut heap = BinaryHeap::with_capacity(estimated_nodes);
    let mut seq = 0u64;

    // Start node has distance 0
    heap.push(State {
        cost: 0.0,
        seq,
        node: start,
    });
    distances.insert(start, 0.0);

    while let Some(State { cost, node, .. }) = heap.pop() {
        // Check if we've reached the target
        if target == Some(node) {
            break;
        }

        // Skip if we've found a better path
        if let Some(&best) = distances.get(&node)
            && cost > best
        {
            continue;
        }

        // Examine neighbors
        for (next, weight) in graph.legs_from(node) {
            if weight < 0.0 {
                return Err(Error::NegativeWeight {
                    from: graph.label(node).to_string(),
                    to: graph.label(next).to_string(),
                    weight,
                });
            }
            let next_cost = cost + weight;

            let improved = match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    true
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        true
                    } else {
                        false
                    }
                }
            };

            if improved && next != start {
                seq += 1;
                heap.push(State {
                    cost: next_cost,
                    seq,
                    node: next,
                });
                predecessors.insert(next, node);
            }
        }
    }

    Ok(ShortestPathTree::new(start, distances, predecessors))
}

/// Cheapest path from `source` to `target` over non-negative weights
///
/// # Errors
///
/// - `UnknownNode` if either endpoint is not in the graph
/// - `NoPathExists` if `target` is unreachable
/// - `NegativeWeight` if the search meets a negative edge
pub fn shortest_path(graph: &RouteGraph, source: NodeIndex, target: NodeIndex) -> Result<Path> {
    graph.validate_node(source)?;
    graph.validate_node(target)?;

    let tree = dijkstra_tree(graph, source, Some(target))?;
    let path = tree.path_to(target).ok_or_else(|| Error::NoPathExists {
        from: graph.label(source).to_string(),
        to: graph.label(target).to_string(),
    })?;

    debug!(
        "Shortest path '{}' -> '{}': {} hops, cost {}",
        graph.label(source),
        graph.label(target),
        path.hops(),
        path.cost
    );
    Ok(path)
}
