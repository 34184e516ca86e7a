//! Command-line configuration.

use clap::{Args, Parser, Subcommand, ValueEnum};
use oom_units::Assumption;

#[derive(Parser, Debug)]
#[command(name = "oom")]
#[command(version)]
#[command(about = "Convert, reduce and inspect physical quantities")]
pub struct Cli {
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Output format
    #[arg(long, global = true, env = "OOM_OUTPUT", value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for oom crates (overridden by RUST_LOG)
    #[arg(long = "log-level", global = true, env = "OOM_LOG_LEVEL", default_value = "warn")]
    pub level: String,

    /// Emit logs as JSON lines
    #[arg(long = "log-json", global = true, env = "OOM_LOG_JSON")]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a quantity (e.g. "5 GHz") into a target unit
    Convert {
        quantity: String,
        target: String,
        /// Physical assumption permitting cross-dimension conversion
        #[arg(long, value_parser = parse_assumption)]
        assume: Option<Assumption>,
    },
    /// Express a quantity in cgs units
    Cgs { quantity: String },
    /// Reduce a unit expression to base units
    Reduce { unit: String },
    /// Print the dimensional fingerprint of a unit expression
    BaseType { unit: String },
    /// List unit symbols and prefixes
    Units,
    /// List physical constants
    Constants {
        /// Project every constant onto cgs units
        #[arg(long)]
        cgs: bool,
    },
}

fn parse_assumption(s: &str) -> Result<Assumption, String> {
    s.parse().map_err(|e: oom_units::Error| e.to_string())
}
