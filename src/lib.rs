//! Command-line front end for `rutero_core`: configuration, logging and
//! reporting around the route solvers.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod report;

pub use cli::{Cli, Command};
pub use commands::{Outcome, execute};
pub use config::{AppConfig, Settings};
