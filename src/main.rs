use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use rutero::{AppConfig, Cli, Settings, execute, logging};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let settings = Settings::resolve(&cli, config)?;
    logging::init(&settings.log_level)?;

    let outcome = execute(&cli.command, &settings)?;
    print!("{}", outcome.report);

    Ok(if outcome.solved {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}
