//! This module is responsible for reading adjacency data and building
//! the time and distance route networks from it.

mod builder;
mod config;

pub use builder::{create_route_networks, load_route_networks_from_str};
pub use config::NetworkConfig;
