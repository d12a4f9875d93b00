use std::path::PathBuf;

/// Where the adjacency table lives and how to interpret it
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// JSON file: origin -> destination -> `{ "tiempo", "distancia" }`
    pub adjacency_path: PathBuf,
    /// Keep connections one-way instead of mirroring them
    pub directed: bool,
}

impl NetworkConfig {
    pub fn new(adjacency_path: impl Into<PathBuf>, directed: bool) -> Self {
        Self {
            adjacency_path: adjacency_path.into(),
            directed,
        }
    }
}
