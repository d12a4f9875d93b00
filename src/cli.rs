//! Command-line surface of the `rutero` binary

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rutero_core::{ApproxMethod, ApproxOptions, MergePolicy, Metric};

#[derive(Debug, Parser)]
#[command(name = "rutero", version)]
#[command(about = "Route optimisation over small weighted place graphs", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Adjacency JSON file, overrides `[network] adjacency`
    #[arg(short, long, global = true)]
    pub adjacency: Option<PathBuf>,

    /// Treat every connection as one-way
    #[arg(long, global = true, conflicts_with = "undirected")]
    pub directed: bool,

    /// Treat every connection as two-way
    #[arg(long, global = true)]
    pub undirected: bool,

    /// Log filter, e.g. `debug` or `rutero_core=trace`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Cheapest circuit through every place, by exhaustive search
    Tour(QueryArgs),

    /// Heuristic circuit through every place
    Approx {
        #[command(flatten)]
        query: QueryArgs,

        /// Construction heuristic
        #[arg(long, value_enum, default_value_t = MethodArg::NearestNeighbor)]
        method: MethodArg,

        /// Weight kept when a one-way network has to be collapsed
        #[arg(long, value_enum, default_value_t = MergeArg::Minimum)]
        merge: MergeArg,

        /// Skip 2-opt refinement
        #[arg(long)]
        no_refine: bool,
    },

    /// Shortest path between two places
    Path {
        #[command(flatten)]
        query: QueryArgs,

        /// Destination label
        #[arg(long)]
        to: String,
    },

    /// Distance from the start to every reachable place
    Reach(QueryArgs),
}

impl Command {
    pub fn query(&self) -> &QueryArgs {
        match self {
            Command::Tour(query) | Command::Reach(query) => query,
            Command::Approx { query, .. } | Command::Path { query, .. } => query,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// Start label, defaults to `[query] start` or the first place in the file
    #[arg(short, long)]
    pub start: Option<String>,

    /// Weight to optimise
    #[arg(short, long, value_enum)]
    pub metric: Option<MetricArg>,

    /// Also write the result as GeoJSON to this file
    #[arg(long)]
    pub geojson: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricArg {
    Time,
    Distance,
}

impl From<MetricArg> for Metric {
    fn from(value: MetricArg) -> Self {
        match value {
            MetricArg::Time => Metric::Time,
            MetricArg::Distance => Metric::Distance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    NearestNeighbor,
    DoubleTree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MergeArg {
    Minimum,
    Maximum,
    First,
}

/// Builds solver options from the `approx` flags
pub fn approx_options(method: MethodArg, merge: MergeArg, no_refine: bool) -> ApproxOptions {
    ApproxOptions {
        method: match method {
            MethodArg::NearestNeighbor => ApproxMethod::NearestNeighbor,
            MethodArg::DoubleTree => ApproxMethod::DoubleTree,
        },
        merge_policy: match merge {
            MergeArg::Minimum => MergePolicy::Minimum,
            MergeArg::Maximum => MergePolicy::Maximum,
            MergeArg::First => MergePolicy::FirstInserted,
        },
        refine: !no_refine,
    }
}
