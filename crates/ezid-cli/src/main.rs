#![doc = include_str!("../README.md")]

mod commands;
mod config;
mod telemetry;

use clap::Parser;
use config::{AppConfig, CliArgs};
use telemetry::init_telemetry;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = AppConfig::try_from(args)?;

    init_telemetry()?;
    tracing::debug!(?config, "starting");

    let stdout = std::io::stdout();
    commands::run(&config, &mut stdout.lock())
}
