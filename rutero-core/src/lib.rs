//! Route optimisation over small weighted place graphs: exhaustive and
//! approximate travelling salesman circuits plus shortest path queries.

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod tsp;

pub use error::{Error, Result};
pub use loading::{NetworkConfig, create_route_networks, load_route_networks_from_str};
pub use model::{
    AdjacencyMap, Leg, LegAttributes, MergePolicy, Metric, Place, RouteGraph, RouteNetworks,
};
pub use routing::{
    Path, ShortestPathTree, shortest_path, shortest_path_auto, shortest_paths_from,
};
pub use tsp::{
    ApproxMethod, ApproxOptions, ApproxTour, TspSolution, solve_tsp_approx, solve_tsp_approx_with,
    solve_tsp_exact,
};

pub use petgraph::graph::NodeIndex;

/// Scalar route cost: minutes or kilometres depending on the graph's metric
pub type Cost = f64;

/// Node count above which exhaustive search is reported as impractical.
/// Exact search still runs to completion past this point.
pub const EXACT_TSP_SOFT_LIMIT: usize = 10;
