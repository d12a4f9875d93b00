use std::borrow::Cow;

use anyhow::{Context, Result, bail};
use rutero_core::{
    Error, NodeIndex, RouteGraph, RouteNetworks, create_route_networks, shortest_path_auto,
    shortest_paths_from, solve_tsp_approx_with, solve_tsp_exact,
};
use tracing::{debug, info};

use crate::{
    cli::{Command, QueryArgs, approx_options},
    config::Settings,
    report::{self, text},
};

/// What a command produced: the rendered report, and whether the solver
/// found an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub report: String,
    pub solved: bool,
}

impl Outcome {
    fn solved(report: String) -> Self {
        Self {
            report,
            solved: true,
        }
    }
}

/// Loads the networks named by `settings` and runs `command` on them
pub fn execute(command: &Command, settings: &Settings) -> Result<Outcome> {
    let path = &settings.network.adjacency_path;
    let networks = create_route_networks(&settings.network)
        .with_context(|| format!("Failed to load route networks from {}", path.display()))?;
    execute_on(&networks, command, settings)
}

pub fn execute_on(
    networks: &RouteNetworks,
    command: &Command,
    settings: &Settings,
) -> Result<Outcome> {
    let metric = settings.metric;
    let graph = networks.get(metric);
    let start = resolve_start(graph, settings.start.as_deref())?;
    debug!(
        "Running {command:?} by {metric} from '{}'",
        graph.label(start)
    );

    match command {
        Command::Tour(query) => {
            let solution = match solve_tsp_exact(graph, start) {
                Ok(solution) => solution,
                Err(e) => return unsolved(e),
            };
            export_route(query, settings, graph, &solution.route)?;
            Ok(Outcome::solved(text::tsp_solution(graph, &solution, metric)))
        }
        Command::Approx {
            query,
            method,
            merge,
            no_refine,
        } => {
            let options = approx_options(*method, *merge, *no_refine);
            let tour = match solve_tsp_approx_with(graph, start, &options) {
                Ok(tour) => tour,
                Err(e) => return unsolved(e),
            };
            // A collapsed tour may use connections only present in reverse
            let traversed = if tour.degraded {
                Cow::Owned(graph.to_undirected(options.merge_policy))
            } else {
                Cow::Borrowed(graph)
            };
            export_route(query, settings, &traversed, &tour.route)?;
            Ok(Outcome::solved(text::approx_tour(graph, &tour, metric)))
        }
        Command::Path { query, to } => {
            let target = graph.require_node(to)?;
            let path = match shortest_path_auto(graph, start, target) {
                Ok(path) => path,
                Err(e) => return unsolved(e),
            };
            export_route(query, settings, graph, &path.nodes)?;
            Ok(Outcome::solved(text::path(graph, &path, metric)))
        }
        Command::Reach(query) => {
            let tree = match shortest_paths_from(graph, start) {
                Ok(tree) => tree,
                Err(e) => return unsolved(e),
            };
            if let Some(file) = &query.geojson {
                let collection =
                    report::tree_to_geojson(graph, &tree, &settings.positions, metric)?;
                report::write_geojson(file, &collection)?;
                info!("Wrote {}", file.display());
            }
            Ok(Outcome::solved(text::reach(graph, &tree, metric)))
        }
    }
}

/// Named start, or the first place of the adjacency file
fn resolve_start(graph: &RouteGraph, label: Option<&str>) -> Result<NodeIndex> {
    match label {
        Some(label) => Ok(graph.require_node(label)?),
        None if graph.node_count() > 0 => Ok(NodeIndex::new(0)),
        None => bail!("The network has no places"),
    }
}

/// "No answer" errors become a report; anything else is a failure
fn unsolved(error: Error) -> Result<Outcome> {
    if error.is_no_solution() {
        Ok(Outcome {
            report: text::failure(&error),
            solved: false,
        })
    } else {
        Err(error.into())
    }
}

fn export_route(
    query: &QueryArgs,
    settings: &Settings,
    graph: &RouteGraph,
    route: &[NodeIndex],
) -> Result<()> {
    let Some(file) = &query.geojson else {
        return Ok(());
    };
    let collection = report::route_to_geojson(graph, route, &settings.positions, settings.metric)?;
    report::write_geojson(file, &collection)?;
    info!("Wrote {}", file.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use clap::Parser;
    use rutero_core::{Metric, NetworkConfig, load_route_networks_from_str};
    use tempfile::tempdir;

    use super::*;
    use crate::cli::Cli;

    const SQUARE: &str = r#"{
        "A": {"B": {"tiempo": 1, "distancia": 10}},
        "B": {"C": {"tiempo": 1, "distancia": 10}},
        "C": {"D": {"tiempo": 1, "distancia": 10}},
        "D": {"A": {"tiempo": 1, "distancia": 10}}
    }"#;

    const LINE: &str = r#"{
        "A": {"B": {"tiempo": 5, "distancia": 2}},
        "B": {"C": {"tiempo": 7, "distancia": 3}}
    }"#;

    fn settings(metric: Metric, start: Option<&str>) -> Settings {
        Settings {
            network: NetworkConfig::new("unused.json", false),
            start: start.map(str::to_string),
            metric,
            log_level: "info".to_string(),
            positions: HashMap::from([
                ("A".to_string(), [4.0, -74.0]),
                ("B".to_string(), [4.1, -74.0]),
                ("C".to_string(), [4.1, -73.9]),
            ]),
        }
    }

    fn run(json: &str, directed: bool, args: &[&str], settings: &Settings) -> Outcome {
        let networks = load_route_networks_from_str(json, directed).unwrap();
        let cli = Cli::parse_from(std::iter::once("rutero").chain(args.iter().copied()));
        execute_on(&networks, &cli.command, settings).unwrap()
    }

    #[test]
    fn tour_defaults_to_first_place() {
        let outcome = run(SQUARE, false, &["tour"], &settings(Metric::Distance, None));
        assert!(outcome.solved);
        assert!(outcome.report.contains("from 'A'"));
        assert!(outcome.report.contains("Total: 40 km"));
    }

    #[test]
    fn tour_without_circuit_is_reported_not_raised() {
        let outcome = run(LINE, false, &["tour"], &settings(Metric::Time, Some("B")));
        assert!(!outcome.solved);
        assert_eq!(
            outcome.report,
            "No solution: No Hamiltonian circuit closes at 'B'\n"
        );
    }

    #[test]
    fn approx_covers_line_by_backtracking() {
        let outcome = run(LINE, false, &["approx"], &settings(Metric::Time, None));
        assert!(outcome.solved);
        assert!(outcome.report.contains("Route:   A -> B -> C -> B -> A"));
        assert!(outcome.report.contains("Total: 24 min"));
    }

    #[test]
    fn degraded_approx_exports_collapsed_legs() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("tour.geojson");
        let args = ["approx", "--geojson", file.to_str().unwrap()];

        let outcome = run(LINE, true, &args, &settings(Metric::Time, None));
        assert!(outcome.report.contains("Note:"));

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&file).unwrap()).unwrap();
        // 3 places and 4 legs
        assert_eq!(written["features"].as_array().map(Vec::len), Some(7));
    }

    #[test]
    fn path_to_unreachable_place_is_reported() {
        let outcome = run(
            LINE,
            true,
            &["path", "--to", "A"],
            &settings(Metric::Time, Some("C")),
        );
        assert!(!outcome.solved);
        assert!(outcome.report.starts_with("No solution: No path exists"));
    }

    #[test]
    fn unknown_destination_is_an_error() {
        let networks = load_route_networks_from_str(SQUARE, false).unwrap();
        let cli = Cli::parse_from(["rutero", "path", "--to", "Z"]);
        let err = execute_on(&networks, &cli.command, &settings(Metric::Time, None)).unwrap_err();
        assert!(err.to_string().contains("Z"));
    }

    #[test]
    fn reach_lists_every_place() {
        let outcome = run(SQUARE, true, &["reach"], &settings(Metric::Time, Some("C")));
        assert!(outcome.solved);
        assert!(outcome.report.contains("  B -> 3 min\n"));
    }

    #[test]
    fn execute_reads_adjacency_file() {
        let dir = tempdir().unwrap();
        let adjacency = dir.path().join("square.json");
        std::fs::write(&adjacency, SQUARE).unwrap();

        let mut settings = settings(Metric::Time, None);
        settings.network = NetworkConfig::new(&adjacency, false);
        let cli = Cli::parse_from(["rutero", "tour"]);
        assert!(execute(&cli.command, &settings).unwrap().solved);

        settings.network = NetworkConfig::new(dir.path().join("missing.json"), false);
        let err = execute(&cli.command, &settings).unwrap_err();
        assert!(err.to_string().contains("Failed to load route networks"));
    }
}
