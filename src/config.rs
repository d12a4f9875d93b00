use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use rutero_core::{Metric, NetworkConfig};
use serde::Deserialize;

use crate::cli::Cli;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Contents of a `rutero.toml` file. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub network: NetworkSection,
    pub query: QuerySection,
    pub logging: LoggingSection,
    /// Node label to `[latitude, longitude]`
    pub positions: HashMap<String, [f64; 2]>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkSection {
    pub adjacency: Option<PathBuf>,
    pub directed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuerySection {
    pub start: Option<String>,
    pub metric: Option<Metric>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub level: Option<String>,
}

impl AppConfig {
    /// Reads a TOML file. A relative `adjacency` path is taken relative to
    /// the directory holding the file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::parse(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        if let Some(adjacency) = &config.network.adjacency
            && adjacency.is_relative()
            && let Some(base) = path.parent()
        {
            config.network.adjacency = Some(base.join(adjacency));
        }
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        for (label, [lat, lon]) in &config.positions {
            if !(-90.0..=90.0).contains(lat) || !(-180.0..=180.0).contains(lon) {
                bail!("Position of '{label}' is out of range: [{lat}, {lon}]");
            }
        }
        Ok(config)
    }
}

/// Settings after command-line flags have been laid over the file
#[derive(Debug, Clone)]
pub struct Settings {
    pub network: NetworkConfig,
    pub start: Option<String>,
    pub metric: Metric,
    pub log_level: String,
    pub positions: HashMap<String, [f64; 2]>,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: AppConfig) -> Result<Self> {
        let Some(adjacency) = cli.adjacency.clone().or(config.network.adjacency) else {
            bail!("No adjacency file given: pass --adjacency or set [network] adjacency");
        };
        let directed = if cli.directed {
            true
        } else if cli.undirected {
            false
        } else {
            config.network.directed
        };

        let query = cli.command.query();
        Ok(Self {
            network: NetworkConfig::new(adjacency, directed),
            start: query.start.clone().or(config.query.start),
            metric: query
                .metric
                .map(Metric::from)
                .or(config.query.metric)
                .unwrap_or_default(),
            log_level: cli
                .log_level
                .clone()
                .or(config.logging.level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            positions: config.positions,
        })
    }
}
