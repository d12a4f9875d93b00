use petgraph::graph::NodeIndex;

use super::{Path, shortest_path, shortest_paths_from};
use crate::{Error, Result, RouteGraph};

/// Point-to-point query that picks the engine from the graph's weights:
/// Dijkstra when every weight is non-negative, Bellman-Ford otherwise.
///
/// # Errors
///
/// Everything [`shortest_path`] or [`shortest_paths_from`] can return
pub fn shortest_path_auto(
    graph: &RouteGraph,
    source: NodeIndex,
    target: NodeIndex,
) -> Result<Path> {
    if !graph.has_negative_weights() {
        return shortest_path(graph, source, target);
    }

    graph.validate_node(target)?;
    shortest_paths_from(graph, source)?
        .path_to(target)
        .ok_or_else(|| Error::NoPathExists {
            from: graph.label(source).to_string(),
            to: graph.label(target).to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_bellman_ford_for_negative_weights() {
        let mut g = RouteGraph::directed();
        g.add_edge("S", "A", 4.0);
        g.add_edge("S", "B", 5.0);
        g.add_edge("B", "A", -3.0);
        let s = g.require_node("S").unwrap();
        let a = g.require_node("A").unwrap();

        let path = shortest_path_auto(&g, s, a).unwrap();
        assert_eq!(path.labels(&g), ["S", "B", "A"]);
        assert_eq!(path.cost, 2.0);
    }

    #[test]
    fn negative_cycle_reaches_the_caller() {
        // A -> B -> A loops at cost -1
        let mut g = RouteGraph::directed();
        g.add_edge("S", "A", 1.0);
        g.add_edge("A", "B", 2.0);
        g.add_edge("B", "A", -3.0);
        g.add_edge("B", "T", 1.0);
        let s = g.require_node("S").unwrap();
        let t = g.require_node("T").unwrap();

        assert!(matches!(
            shortest_path_auto(&g, s, t),
            Err(Error::NegativeCycleDetected)
        ));
    }

    #[test]
    fn uses_dijkstra_otherwise() {
        let mut g = RouteGraph::directed();
        g.add_edge("S", "A", 4.0);
        g.add_node("Z");
        let s = g.require_node("S").unwrap();
        let a = g.require_node("A").unwrap();
        let z = g.require_node("Z").unwrap();

        assert_eq!(shortest_path_auto(&g, s, a).unwrap().cost, 4.0);
        assert!(matches!(
            shortest_path_auto(&g, s, z),
            Err(Error::NoPathExists { .. })
        ));
    }
}
