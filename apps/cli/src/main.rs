//! `oom` - command-line unit conversion.
//!
//! Usage:
//!   oom convert "5 GHz" cm --assume light
//!   oom reduce "hp"
//!   oom constants --cgs --output json

use anyhow::Context;
use clap::Parser;

mod commands;
mod config;
mod logging;

use config::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(&cli.logging).context("Failed to initialize logging")?;

    commands::run(cli.command, cli.output)
}
