//! Nested adjacency records: origin -> destination -> `{ tiempo, distancia }`

use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use super::components::Metric;
use crate::{Cost, Error};

/// Attributes of one origin -> destination connection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegAttributes {
    /// Travel time in minutes
    pub tiempo: Cost,
    /// Distance in kilometres
    pub distancia: Cost,
}

impl LegAttributes {
    pub fn get(&self, metric: Metric) -> Cost {
        match metric {
            Metric::Time => self.tiempo,
            Metric::Distance => self.distancia,
        }
    }
}

/// Insertion-ordered adjacency table.
///
/// The order of origins and destinations is kept exactly as read so graph
/// node order, and with it every tie-break, follows the input file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjacencyMap {
    origins: Vec<(String, Vec<(String, LegAttributes)>)>,
}

impl AdjacencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an origin without outgoing connections
    pub fn add_origin(&mut self, origin: &str) {
        self.destinations_mut(origin);
    }

    /// Inserts a connection, overwriting an earlier one for the same pair
    pub fn insert(&mut self, origin: &str, destination: &str, attributes: LegAttributes) {
        let destinations = self.destinations_mut(origin);
        match destinations.iter_mut().find(|(label, _)| label == destination) {
            Some((_, existing)) => *existing = attributes,
            None => destinations.push((destination.to_string(), attributes)),
        }
    }

    fn destinations_mut(&mut self, origin: &str) -> &mut Vec<(String, LegAttributes)> {
        let position = match self.origins.iter().position(|(label, _)| label == origin) {
            Some(position) => position,
            None => {
                self.origins.push((origin.to_string(), Vec::new()));
                self.origins.len() - 1
            }
        };
        &mut self.origins[position].1
    }

    pub fn get(&self, origin: &str, destination: &str) -> Option<LegAttributes> {
        self.origins
            .iter()
            .find(|(label, _)| label == origin)
            .and_then(|(_, destinations)| {
                destinations
                    .iter()
                    .find(|(label, _)| label == destination)
                    .map(|(_, attributes)| *attributes)
            })
    }

    /// Origins in input order
    pub fn origins(&self) -> impl Iterator<Item = &str> {
        self.origins.iter().map(|(label, _)| label.as_str())
    }

    /// Every connection `(origin, destination, attributes)` in input order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, LegAttributes)> {
        self.origins.iter().flat_map(|(origin, destinations)| {
            destinations
                .iter()
                .map(move |(destination, attributes)| {
                    (origin.as_str(), destination.as_str(), *attributes)
                })
        })
    }

    /// Number of connections
    pub fn len(&self) -> usize {
        self.origins.iter().map(|(_, d)| d.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rejects records that cannot weight a graph
    pub fn validate(&self) -> Result<(), Error> {
        for (origin, destination, attributes) in self.iter() {
            for metric in [Metric::Time, Metric::Distance] {
                let value = attributes.get(metric);
                if !value.is_finite() {
                    return Err(Error::InvalidData(format!(
                        "'{origin}' -> '{destination}': {} is not a finite number ({value})",
                        metric.field()
                    )));
                }
            }
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for AdjacencyMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AdjacencyVisitor;

        impl<'de> Visitor<'de> for AdjacencyVisitor {
            type Value = AdjacencyMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of origin to destination records")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut adjacency = AdjacencyMap::new();
                while let Some((origin, destinations)) =
                    access.next_entry::<String, Destinations>()?
                {
                    adjacency.add_origin(&origin);
                    for (destination, attributes) in destinations.0 {
                        adjacency.insert(&origin, &destination, attributes);
                    }
                }
                Ok(adjacency)
            }
        }

        deserializer.deserialize_map(AdjacencyVisitor)
    }
}

/// Destination records of one origin, order preserved
struct Destinations(Vec<(String, LegAttributes)>);

impl<'de> Deserialize<'de> for Destinations {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DestinationsVisitor;

        impl<'de> Visitor<'de> for DestinationsVisitor {
            type Value = Destinations;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of destination to {tiempo, distancia}")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut destinations = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, LegAttributes>()? {
                    destinations.push(entry);
                }
                Ok(Destinations(destinations))
            }
        }

        deserializer.deserialize_map(DestinationsVisitor)
    }
}
