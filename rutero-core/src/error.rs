use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown node: {0}")]
    UnknownNode(String),
    #[error("No edge from '{from}' to '{to}'")]
    EdgeNotFound { from: String, to: String },
    #[error("No path exists from '{from}' to '{to}'")]
    NoPathExists { from: String, to: String },
    #[error("Negative weight cycle reachable from the source")]
    NegativeCycleDetected,
    #[error("No Hamiltonian circuit closes at '{start}'")]
    NoHamiltonianCircuit { start: String },
    #[error("Negative weight {weight} on edge '{from}' -> '{to}' is not supported by Dijkstra")]
    NegativeWeight {
        from: String,
        to: String,
        weight: f64,
    },
    #[error("At least 2 nodes are required, graph has {0}")]
    TooFewNodes(usize),
    #[error("Nodes unreachable from '{start}': {}", unreachable.join(", "))]
    Disconnected {
        start: String,
        unreachable: Vec<String>,
    },
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for failures that mean "no answer exists" rather than bad input.
    pub fn is_no_solution(&self) -> bool {
        matches!(
            self,
            Error::NoPathExists { .. }
                | Error::NoHamiltonianCircuit { .. }
                | Error::NegativeCycleDetected
                | Error::Disconnected { .. }
        )
    }
}
