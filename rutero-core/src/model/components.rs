//! Graph components - places, legs, and the weight metrics they carry

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Cost;

/// Graph node: a destination identified by its label
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Place {
    /// Human readable place name, unique within a graph
    pub label: String,
}

/// Graph edge: a direct connection between two places
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    /// Travel time in minutes or distance in kilometres
    pub weight: Cost,
}

impl Leg {
    pub fn cost(&self) -> Cost {
        self.weight
    }
}

/// Which attribute of the adjacency records weights a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// `tiempo`, minutes
    #[default]
    Time,
    /// `distancia`, kilometres
    Distance,
}

impl Metric {
    pub fn unit(self) -> &'static str {
        match self {
            Metric::Time => "min",
            Metric::Distance => "km",
        }
    }

    /// Field name in the adjacency records
    pub fn field(self) -> &'static str {
        match self {
            Metric::Time => "tiempo",
            Metric::Distance => "distancia",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Time => f.write_str("time"),
            Metric::Distance => f.write_str("distance"),
        }
    }
}

/// Weight chosen for an undirected edge when a directed graph is collapsed
/// and both directions carry a weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Smaller of the two directions
    #[default]
    Minimum,
    /// Larger of the two directions
    Maximum,
    /// Whichever direction was inserted first
    FirstInserted,
}

impl MergePolicy {
    pub(crate) fn merge(self, existing: Cost, incoming: Cost) -> Cost {
        match self {
            MergePolicy::Minimum => existing.min(incoming),
            MergePolicy::Maximum => existing.max(incoming),
            MergePolicy::FirstInserted => existing,
        }
    }
}
