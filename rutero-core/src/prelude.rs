pub use crate::EXACT_TSP_SOFT_LIMIT;

// Re-export key components
pub use crate::loading::{NetworkConfig, create_route_networks, load_route_networks_from_str};
pub use crate::model::{
    AdjacencyMap, LegAttributes, MergePolicy, Metric, RouteGraph, RouteNetworks,
};
pub use crate::routing::{
    Path, ShortestPathTree, shortest_path, shortest_path_auto, shortest_paths_from,
};
pub use crate::tsp::{
    ApproxMethod, ApproxOptions, ApproxTour, TspSolution, solve_tsp_approx, solve_tsp_approx_with,
    solve_tsp_exact,
};

// Core types
pub use crate::Cost;
pub use crate::NodeIndex;
pub use crate::{Error, Result};
