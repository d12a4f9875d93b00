mod state;
pub mod traced_dijkstra;

pub(crate) use traced_dijkstra::dijkstra_tree;
pub use traced_dijkstra::shortest_path;
