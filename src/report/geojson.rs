//! GeoJSON rendering of routes over places with known coordinates

use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result};
use geo::{Coord, LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry, GeometryValue};
use rutero_core::{Metric, NodeIndex, RouteGraph, ShortestPathTree};
use serde_json::json;
use tracing::warn;

/// Node label to `[latitude, longitude]`
pub type Positions = HashMap<String, [f64; 2]>;

/// One `Point` per visited place, numbered in visit order, and one
/// `LineString` per traversed leg carrying its weight.
pub fn route_to_geojson(
    graph: &RouteGraph,
    route: &[NodeIndex],
    positions: &Positions,
    metric: Metric,
) -> Result<FeatureCollection> {
    let mut features = Vec::new();

    let mut seen = Vec::with_capacity(route.len());
    for &node in route {
        if seen.contains(&node) {
            continue;
        }
        seen.push(node);
        let Some(point) = locate(graph, node, positions) else {
            continue;
        };
        features.push(point_feature(
            point,
            json!({
                "label": graph.label(node),
                "visit_order": seen.len(),
            }),
        )?);
    }

    for (leg_index, pair) in route.windows(2).enumerate() {
        let (from, to) = (pair[0], pair[1]);
        let weight = graph.weight(from, to)?;
        if let Some(feature) = leg_feature(graph, from, to, positions, |properties| {
            properties["leg_index"] = json!(leg_index);
            properties["weight"] = json!(weight);
            properties["unit"] = json!(metric.unit());
        })? {
            features.push(feature);
        }
    }

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

/// One `Point` per reached place with its distance from the source, and the
/// tree edge leading to it.
pub fn tree_to_geojson(
    graph: &RouteGraph,
    tree: &ShortestPathTree,
    positions: &Positions,
    metric: Metric,
) -> Result<FeatureCollection> {
    let mut features = Vec::new();

    for (node, cost) in tree.reached() {
        if let Some(point) = locate(graph, node, positions) {
            features.push(point_feature(
                point,
                json!({
                    "label": graph.label(node),
                    "distance": cost,
                    "unit": metric.unit(),
                }),
            )?);
        }

        let Some(prev) = tree.predecessor(node) else {
            continue;
        };
        let weight = graph.weight(prev, node)?;
        if let Some(feature) = leg_feature(graph, prev, node, positions, |properties| {
            properties["weight"] = json!(weight);
            properties["unit"] = json!(metric.unit());
        })? {
            features.push(feature);
        }
    }

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

pub fn write_geojson(path: &Path, collection: &FeatureCollection) -> Result<()> {
    let text = serde_json::to_string_pretty(collection)?;
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}

fn locate(graph: &RouteGraph, node: NodeIndex, positions: &Positions) -> Option<Point<f64>> {
    let label = graph.label(node);
    match positions.get(label) {
        Some(&[lat, lon]) => Some(Point::new(lon, lat)),
        None => {
            warn!("No position for '{label}', leaving it out of the map");
            None
        }
    }
}

fn point_feature(point: Point<f64>, properties: serde_json::Value) -> Result<Feature> {
    let geometry = Geometry::new(GeometryValue::from(&point));
    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": properties,
    });
    Ok(serde_json::from_value::<Feature>(value)?)
}

/// `None` when either end has no position
fn leg_feature(
    graph: &RouteGraph,
    from: NodeIndex,
    to: NodeIndex,
    positions: &Positions,
    extra: impl FnOnce(&mut serde_json::Value),
) -> Result<Option<Feature>> {
    let (Some(a), Some(b)) = (
        positions.get(graph.label(from)),
        positions.get(graph.label(to)),
    ) else {
        return Ok(None);
    };

    let coords: Vec<Coord<f64>> = [a, b]
        .iter()
        .map(|&&[lat, lon]| Coord { x: lon, y: lat })
        .collect();
    let geometry = Geometry::new(GeometryValue::from(&LineString::new(coords)));

    let mut properties = json!({
        "from": graph.label(from),
        "to": graph.label(to),
    });
    extra(&mut properties);

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": properties,
    });
    Ok(Some(serde_json::from_value::<Feature>(value)?))
}
