use std::borrow::Cow;

use fixedbitset::FixedBitSet;
use log::{debug, info, warn};
use petgraph::{
    algo::min_spanning_tree,
    data::FromElements,
    graph::{NodeIndex, UnGraph},
    visit::Dfs,
};

use super::closure::MetricClosure;
use super::two_opt::two_opt;
use super::{ApproxMethod, ApproxTour};
use crate::{Error, MergePolicy, Result, RouteGraph};

/// Knobs for [`solve_tsp_approx_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproxOptions {
    pub method: ApproxMethod,
    /// Weight chosen when a directed graph must be collapsed
    pub merge_policy: MergePolicy,
    /// Refine the constructed circuit with 2-opt
    pub refine: bool,
}

impl Default for ApproxOptions {
    fn default() -> Self {
        Self {
            method: ApproxMethod::default(),
            merge_policy: MergePolicy::default(),
            refine: true,
        }
    }
}

/// Heuristic circuit from `start` with default options
///
/// # Errors
///
/// See [`solve_tsp_approx_with`]
pub fn solve_tsp_approx(graph: &RouteGraph, start: NodeIndex) -> Result<ApproxTour> {
    solve_tsp_approx_with(graph, start, &ApproxOptions::default())
}

/// Heuristic circuit visiting every node once and returning to `start`.
///
/// A directed graph that is not strongly connected is first collapsed to
/// an undirected one using `options.merge_policy`. The circuit is built on
/// the metric closure of the resulting graph, so hops between nodes with no
/// direct edge are realised by their shortest path in `route`.
///
/// # Errors
///
/// - `UnknownNode` if `start` is not in the graph
/// - `TooFewNodes` for graphs with fewer than 2 nodes
/// - `Disconnected` if some node cannot be reached from `start`
/// - `NegativeWeight` if the graph has negative edges
pub fn solve_tsp_approx_with(
    graph: &RouteGraph,
    start: NodeIndex,
    options: &ApproxOptions,
) -> Result<ApproxTour> {
    graph.validate_node(start)?;
    if graph.node_count() < 2 {
        return Err(Error::TooFewNodes(graph.node_count()));
    }

    let degraded = graph.is_directed() && !graph.is_strongly_connected();
    let working = if degraded {
        warn!("Graph is not strongly connected, collapsing it to undirected");
        Cow::Owned(graph.to_undirected(options.merge_policy))
    } else {
        Cow::Borrowed(graph)
    };

    let closure = MetricClosure::new(&working)?;
    let origin = start.index();
    let unreachable = closure.unreachable_from(origin);
    if !unreachable.is_empty() {
        return Err(Error::Disconnected {
            start: graph.label(start).to_string(),
            unreachable: unreachable
                .into_iter()
                .map(|i| graph.label(NodeIndex::new(i)).to_string())
                .collect(),
        });
    }

    let (mut order, method) = match options.method {
        ApproxMethod::DoubleTree if !working.is_directed() => {
            (double_tree_order(&closure, origin), ApproxMethod::DoubleTree)
        }
        ApproxMethod::DoubleTree => {
            debug!("Double tree needs symmetric costs, using nearest neighbour");
            (
                nearest_neighbor_order(&closure, origin),
                ApproxMethod::NearestNeighbor,
            )
        }
        ApproxMethod::NearestNeighbor => (
            nearest_neighbor_order(&closure, origin),
            ApproxMethod::NearestNeighbor,
        ),
    };

    let constructed = closure.tour_cost(&order);
    if options.refine {
        let moves = two_opt(&mut order, &closure);
        debug!(
            "2-opt applied {moves} moves: {constructed} -> {}",
            closure.tour_cost(&order)
        );
    }

    order.push(origin);
    let route = expand_order(&closure, &order)?;
    let circuit = order.into_iter().map(NodeIndex::new).collect();
    let cost = working.route_cost(&route)?;

    info!(
        "Approximate circuit from '{}' ({method:?}): cost {cost}, {} legs",
        graph.label(start),
        route.len() - 1
    );

    Ok(ApproxTour {
        circuit,
        route,
        cost,
        degraded,
        method,
    })
}

/// Open visiting order starting at `origin`
fn nearest_neighbor_order(closure: &MetricClosure, origin: usize) -> Vec<usize> {
    let n = closure.len();
    let mut order = Vec::with_capacity(n + 1);
    let mut visited = FixedBitSet::with_capacity(n);

    let mut current = origin;
    order.push(current);
    visited.insert(current);

    for _ in 1..n {
        // Ties go to the lowest position
        let next = (0..n)
            .filter(|&j| !visited.contains(j))
            .min_by(|&a, &b| closure.get(current, a).total_cmp(&closure.get(current, b)));
        let Some(next) = next else { break };

        order.push(next);
        visited.insert(next);
        current = next;
    }

    order
}

/// Preorder walk of a minimum spanning tree of the closure rooted at `origin`
fn double_tree_order(closure: &MetricClosure, origin: usize) -> Vec<usize> {
    let n = closure.len();
    let mut complete = UnGraph::<(), f64>::with_capacity(n, n * (n - 1) / 2);
    for _ in 0..n {
        complete.add_node(());
    }
    for i in 0..n {
        for j in i + 1..n {
            complete.add_edge(NodeIndex::new(i), NodeIndex::new(j), closure.get(i, j));
        }
    }

    let tree = UnGraph::<(), f64>::from_elements(min_spanning_tree(&complete));

    let mut order = Vec::with_capacity(n + 1);
    let mut dfs = Dfs::new(&tree, NodeIndex::new(origin));
    while let Some(node) = dfs.next(&tree) {
        order.push(node.index());
    }
    order
}

fn expand_order(closure: &MetricClosure, order: &[usize]) -> Result<Vec<NodeIndex>> {
    let mut route = vec![NodeIndex::new(order[0])];
    for pair in order.windows(2) {
        let hop = closure.expand(pair[0], pair[1]).ok_or_else(|| {
            Error::InvalidData(format!("No closure path for hop {} -> {}", pair[0], pair[1]))
        })?;
        route.extend(hop.into_iter().skip(1));
    }
    Ok(route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solve_tsp_exact;

    fn node(g: &RouteGraph, label: &str) -> NodeIndex {
        g.require_node(label).unwrap()
    }

    fn assert_hamiltonian(g: &RouteGraph, tour: &ApproxTour, start: NodeIndex) {
        assert_eq!(tour.circuit.first(), Some(&start));
        assert_eq!(tour.circuit.last(), Some(&start));
        let mut interior: Vec<_> = tour.circuit[1..tour.circuit.len() - 1].to_vec();
        interior.sort_unstable();
        let mut others: Vec<_> = g.nodes().filter(|&n| n != start).collect();
        others.sort_unstable();
        assert_eq!(interior, others);
        assert_eq!(tour.route.first(), Some(&start));
        assert_eq!(tour.route.last(), Some(&start));
    }

    fn square() -> RouteGraph {
        let mut g = RouteGraph::undirected();
        g.add_edge("A", "B", 1.0);
        g.add_edge("B", "C", 1.0);
        g.add_edge("C", "D", 1.0);
        g.add_edge("D", "A", 1.0);
        g.add_edge("A", "C", 1.5);
        g.add_edge("B", "D", 1.5);
        g
    }

    #[test]
    fn matches_exact_on_square() {
        let g = square();
        let a = node(&g, "A");
        let tour = solve_tsp_approx(&g, a).unwrap();
        assert_hamiltonian(&g, &tour, a);
        assert_eq!(tour.cost, solve_tsp_exact(&g, a).unwrap().cost);
        assert!(!tour.degraded);
    }

    #[test]
    fn double_tree_is_hamiltonian() {
        let g = square();
        let c = node(&g, "C");
        let options = ApproxOptions {
            method: ApproxMethod::DoubleTree,
            ..ApproxOptions::default()
        };
        let tour = solve_tsp_approx_with(&g, c, &options).unwrap();
        assert_hamiltonian(&g, &tour, c);
        assert_eq!(tour.method, ApproxMethod::DoubleTree);
        assert_eq!(tour.cost, 4.0);
    }

    #[test]
    fn path_graph_reuses_edges() {
        // No Hamiltonian circuit exists, the walk doubles back
        let mut g = RouteGraph::undirected();
        g.add_edge("A", "B", 1.0);
        g.add_edge("B", "C", 2.0);
        let a = node(&g, "A");
        let tour = solve_tsp_approx(&g, a).unwrap();
        assert_hamiltonian(&g, &tour, a);
        assert_eq!(tour.route_labels(&g), ["A", "B", "C", "B", "A"]);
        assert_eq!(tour.cost, 6.0);
        assert_eq!(g.route_cost(&tour.route).unwrap(), tour.cost);
    }

    #[test]
    fn weakly_connected_directed_graph_is_degraded() {
        let mut g = RouteGraph::directed();
        g.add_edge("A", "B", 10.0);
        g.add_edge("B", "A", 4.0);
        g.add_edge("B", "C", 3.0);
        let a = node(&g, "A");
        let tour = solve_tsp_approx(&g, a).unwrap();
        assert!(tour.degraded);
        assert_hamiltonian(&g, &tour, a);
        // A-B collapses to min(10, 4)
        assert_eq!(tour.cost, 14.0);
    }

    #[test]
    fn merge_policy_changes_the_cost() {
        let mut g = RouteGraph::directed();
        g.add_edge("A", "B", 10.0);
        g.add_edge("B", "A", 4.0);
        g.add_edge("B", "C", 3.0);
        let options = ApproxOptions {
            merge_policy: MergePolicy::Maximum,
            ..ApproxOptions::default()
        };
        let tour = solve_tsp_approx_with(&g, node(&g, "A"), &options).unwrap();
        assert_eq!(tour.cost, 26.0);
    }

    #[test]
    fn strongly_connected_directed_graph_keeps_directions() {
        let mut g = RouteGraph::directed();
        g.add_edge("A", "B", 1.0);
        g.add_edge("B", "C", 1.0);
        g.add_edge("C", "A", 1.0);
        g.add_edge("A", "C", 5.0);
        let a = node(&g, "A");
        let tour = solve_tsp_approx(&g, a).unwrap();
        assert!(!tour.degraded);
        assert_eq!(tour.circuit_labels(&g), ["A", "B", "C", "A"]);
        assert_eq!(tour.cost, 3.0);
    }

    #[test]
    fn disconnected_graph_fails() {
        let mut g = RouteGraph::undirected();
        g.add_edge("A", "B", 1.0);
        g.add_edge("C", "D", 1.0);
        let result = solve_tsp_approx(&g, node(&g, "A"));
        match result {
            Err(Error::Disconnected { unreachable, .. }) => assert_eq!(unreachable, ["C", "D"]),
            other => panic!("expected Disconnected, got {other:?}"),
        }
    }

    #[test]
    fn single_node_is_too_few() {
        let mut g = RouteGraph::undirected();
        let only = g.add_node("Solo");
        assert!(matches!(
            solve_tsp_approx(&g, only),
            Err(Error::TooFewNodes(1))
        ));
    }
}
