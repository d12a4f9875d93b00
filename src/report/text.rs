//! Plain-text rendering of solver results

use rutero_core::{
    ApproxMethod, ApproxTour, Error, Metric, Path, RouteGraph, ShortestPathTree, TspSolution,
};

const ARROW: &str = " -> ";

pub fn tsp_solution(graph: &RouteGraph, solution: &TspSolution, metric: Metric) -> String {
    let start = solution.start().map_or("", |node| graph.label(node));
    format!(
        "Best circuit by {metric} from '{start}'\n  {}\n  Total: {} {}\n  Candidates: {} evaluated, {} skipped for missing connections\n",
        solution.labels(graph).join(ARROW),
        solution.cost,
        metric.unit(),
        solution.evaluated,
        solution.skipped,
    )
}

pub fn approx_tour(graph: &RouteGraph, tour: &ApproxTour, metric: Metric) -> String {
    let start = tour.circuit.first().map_or("", |&node| graph.label(node));
    let mut out = format!(
        "Approximate circuit by {metric} from '{start}' ({})\n  Circuit: {}\n",
        method_name(tour.method),
        tour.circuit_labels(graph).join(ARROW),
    );
    if tour.route != tour.circuit {
        out.push_str(&format!(
            "  Route:   {}\n",
            tour.route_labels(graph).join(ARROW)
        ));
    }
    out.push_str(&format!("  Total: {} {}\n", tour.cost, metric.unit()));
    if tour.degraded {
        out.push_str("  Note: one-way network is not strongly connected, solved as two-way\n");
    }
    out
}

pub fn path(graph: &RouteGraph, path: &Path, metric: Metric) -> String {
    let from = path.source().map_or("", |node| graph.label(node));
    let to = path.target().map_or("", |node| graph.label(node));
    format!(
        "Shortest path by {metric} from '{from}' to '{to}'\n  {}\n  Total: {} {} over {} legs\n",
        path.labels(graph).join(ARROW),
        path.cost,
        metric.unit(),
        path.hops(),
    )
}

/// One line per reached place, in file order
pub fn reach(graph: &RouteGraph, tree: &ShortestPathTree, metric: Metric) -> String {
    let mut out = format!(
        "Shortest distances by {metric} from '{}'\n",
        graph.label(tree.source())
    );
    for (node, cost) in tree.reached() {
        out.push_str(&format!(
            "  {}{ARROW}{cost} {}\n",
            graph.label(node),
            metric.unit()
        ));
    }
    let missing = graph.node_count() - tree.len();
    if missing > 0 {
        out.push_str(&format!("  ({missing} places unreachable)\n"));
    }
    out
}

/// Rendering for a solver that finished without an answer
pub fn failure(error: &Error) -> String {
    format!("No solution: {error}\n")
}

fn method_name(method: ApproxMethod) -> &'static str {
    match method {
        ApproxMethod::NearestNeighbor => "nearest neighbour",
        ApproxMethod::DoubleTree => "double tree",
    }
}

#[cfg(test)]
mod tests {
    use rutero_core::{
        NodeIndex, shortest_path, shortest_paths_from, solve_tsp_approx, solve_tsp_exact,
    };

    use super::*;

    fn square() -> RouteGraph {
        let mut g = RouteGraph::undirected();
        g.add_edge("A", "B", 1.0);
        g.add_edge("B", "C", 1.0);
        g.add_edge("C", "D", 1.0);
        g.add_edge("D", "A", 1.0);
        g
    }

    #[test]
    fn tour_lists_route_and_total() {
        let g = square();
        let solution = solve_tsp_exact(&g, NodeIndex::new(0)).unwrap();
        let text = tsp_solution(&g, &solution, Metric::Distance);

        assert!(text.starts_with("Best circuit by distance from 'A'\n"));
        assert!(text.contains("  A -> B -> C -> D -> A\n"));
        assert!(text.contains("Total: 4 km"));
        assert!(text.contains("6 evaluated, 4 skipped"));
    }

    #[test]
    fn approx_shows_expanded_route_only_when_different() {
        let g = square();
        let tour = solve_tsp_approx(&g, NodeIndex::new(0)).unwrap();
        let text = approx_tour(&g, &tour, Metric::Time);
        assert!(text.contains("(nearest neighbour)"));
        assert!(!text.contains("Route:"));
        assert!(!text.contains("Note:"));

        let mut line = RouteGraph::undirected();
        line.add_edge("A", "B", 1.0);
        line.add_edge("B", "C", 2.0);
        let tour = solve_tsp_approx(&line, NodeIndex::new(0)).unwrap();
        let text = approx_tour(&line, &tour, Metric::Time);
        assert!(text.contains("  Route:   A -> B -> C -> B -> A\n"));
        assert!(text.contains("Total: 6 min"));
    }

    #[test]
    fn path_counts_legs() {
        let g = square();
        let path = shortest_path(&g, NodeIndex::new(0), NodeIndex::new(2)).unwrap();
        let text = super::path(&g, &path, Metric::Time);
        assert!(text.contains("from 'A' to 'C'"));
        assert!(text.contains("Total: 2 min over 2 legs"));
    }

    #[test]
    fn reach_lists_places_and_unreachable_count() {
        let mut g = RouteGraph::directed();
        g.add_edge("A", "B", 40.0);
        g.add_node("C");
        let tree = shortest_paths_from(&g, NodeIndex::new(0)).unwrap();
        let text = reach(&g, &tree, Metric::Time);

        assert_eq!(
            text,
            "Shortest distances by time from 'A'\n  A -> 0 min\n  B -> 40 min\n  (1 places unreachable)\n"
        );
    }

    #[test]
    fn failure_names_the_reason() {
        let error = Error::NoHamiltonianCircuit {
            start: "A".to_string(),
        };
        assert_eq!(
            failure(&error),
            "No solution: No Hamiltonian circuit closes at 'A'\n"
        );
    }
}
