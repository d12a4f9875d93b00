//! Data model for route optimisation
//!
//! Places and legs, the weighted graph built from them, and the adjacency
//! table the graphs are read from.

pub mod adjacency;
pub mod components;
pub mod graph;
pub mod networks;

pub use adjacency::{AdjacencyMap, LegAttributes};
pub use components::{Leg, MergePolicy, Metric, Place};
pub use graph::RouteGraph;
pub use networks::RouteNetworks;
