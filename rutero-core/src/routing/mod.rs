//! Shortest path engines: Dijkstra for non-negative weights, Bellman-Ford
//! when weights may be negative

pub mod bellman_ford;
pub mod dijkstra;
pub mod path;
mod select;

pub use bellman_ford::shortest_paths_from;
pub(crate) use dijkstra::dijkstra_tree;
pub use dijkstra::shortest_path;
pub use path::{Path, ShortestPathTree};
pub use select::shortest_path_auto;
