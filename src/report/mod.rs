//! Presentation of solver results. The core only returns routes, costs and
//! typed errors; everything a user reads is produced here.

pub mod geojson;
pub mod text;

pub use geojson::{Positions, route_to_geojson, tree_to_geojson, write_geojson};
