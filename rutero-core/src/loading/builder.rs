use std::fs::File;
use std::io::BufReader;

use log::info;

use super::config::NetworkConfig;
use crate::{AdjacencyMap, Error, Result, RouteNetworks};

/// Creates the time and distance networks described by the configuration
///
/// # Errors
///
/// Returns an error if the adjacency file is missing, is not valid JSON,
/// or carries non-finite weights
pub fn create_route_networks(config: &NetworkConfig) -> Result<RouteNetworks> {
    validate_config(config)?;

    info!(
        "Reading adjacency data: {}",
        config.adjacency_path.display()
    );

    let file = File::open(&config.adjacency_path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!(
                "Failed to open file '{}': {}",
                config.adjacency_path.display(),
                e
            ),
        )
    })?;
    let adjacency: AdjacencyMap = serde_json::from_reader(BufReader::new(file))?;

    build_networks(&adjacency, config.directed)
}

/// Builds both networks from an embedded JSON literal
///
/// # Errors
///
/// Returns an error if `json` is not a valid adjacency table
pub fn load_route_networks_from_str(json: &str, directed: bool) -> Result<RouteNetworks> {
    let adjacency: AdjacencyMap = serde_json::from_str(json)?;
    build_networks(&adjacency, directed)
}

fn build_networks(adjacency: &AdjacencyMap, directed: bool) -> Result<RouteNetworks> {
    if adjacency.origins().next().is_none() {
        return Err(Error::InvalidData(
            "Adjacency table has no origins".to_string(),
        ));
    }
    if adjacency.is_empty() {
        log::warn!("Adjacency table has no connections; every query will fail");
    }

    RouteNetworks::from_adjacency(adjacency, directed)
}

fn validate_config(config: &NetworkConfig) -> Result<()> {
    if !config.adjacency_path.exists() {
        return Err(Error::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!(
                "Adjacency file not found: {}",
                config.adjacency_path.display()
            ),
        )));
    }

    if config.adjacency_path.is_dir() {
        return Err(Error::InvalidData(format!(
            "Adjacency path is a directory: {}",
            config.adjacency_path.display()
        )));
    }

    Ok(())
}
