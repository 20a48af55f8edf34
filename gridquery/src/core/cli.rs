use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::constants::{ENV_CONFIG, ENV_DIALECT, ENV_TABLE};
use crate::data::Backend;

#[derive(Parser)]
#[command(name = "gridquery")]
#[command(version, about = "Server-side data grid query compiler", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// SQL dialect (duckdb, postgres or sqlite)
    #[arg(long, short = 'd', global = true, env = ENV_DIALECT, value_parser = parse_dialect)]
    pub dialect: Option<Backend>,

    /// Table queried by the generated SQL
    #[arg(long, short = 't', global = true, env = ENV_TABLE)]
    pub table: Option<String>,
}

/// Parse SQL dialect from CLI/env string
fn parse_dialect(s: &str) -> Result<Backend, String> {
    s.parse::<Backend>()
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Compile a grid request into a parameterised SELECT
    Compile {
        /// Path to the request JSON
        request: PathBuf,
    },
    /// Run a grid request against rows from a JSON file
    Query {
        /// Path to the request JSON
        request: PathBuf,

        /// Path to a JSON array of row objects
        #[arg(long, short = 'r')]
        rows: PathBuf,
    },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
    pub dialect: Option<Backend>,
    pub table: Option<String>,
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Commands) {
    let cli = Cli::parse();
    let config = CliConfig {
        config: cli.config,
        dialect: cli.dialect,
        table: cli.table,
    };
    (config, cli.command)
}
