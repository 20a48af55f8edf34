//! Core application

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use crate::core::cli::{self, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::data::memory::parse_rows;
use crate::data::{MemoryBackend, SqlBackend};
use crate::domain::grid::{GetRowsRequest, GridQuery, TracingObserver, parse_request};

pub struct CoreApp {
    pub config: AppConfig,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        let app = Self::new(AppConfig::load(&cli_config)?);
        let output = match command {
            Commands::Compile { request } => {
                let request = read_file(&request, "request")?;
                app.compile(&request)?
            }
            Commands::Query { request, rows } => {
                let request = read_file(&request, "request")?;
                let rows = read_file(&rows, "rows")?;
                app.query(&request, &rows)?
            }
        };

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    fn parse_request(&self, request_json: &str) -> Result<GetRowsRequest> {
        parse_request(request_json, &self.config.limits).map_err(|e| {
            tracing::warn!(code = e.code(), error = %e, "Rejected grid request");
            anyhow::Error::new(e).context("Invalid grid request")
        })
    }

    /// Compile a request into a SELECT with its bound parameters
    pub fn compile(&self, request_json: &str) -> Result<serde_json::Value> {
        let request = self.parse_request(request_json)?;
        let backend = SqlBackend::new(self.config.sql.dialect, self.config.sql.table.clone())
            .with_columns(self.config.columns.clone());
        let query = GridQuery::build(&request, &backend, &TracingObserver);
        let statement = backend.select(&query);

        let params: Vec<serde_json::Value> =
            statement.params.iter().map(serde_json::Value::from).collect();
        Ok(json!({
            "dialect": backend.dialect().name(),
            "sql": statement.sql,
            "params": params,
        }))
    }

    /// Run a request against a JSON array of rows
    ///
    /// Rows are keyed by grid column id, so a configured whitelist restricts
    /// which ids may be filtered or sorted but its renames do not apply.
    pub fn query(&self, request_json: &str, rows_json: &str) -> Result<serde_json::Value> {
        let request = self.parse_request(request_json)?;
        let rows = parse_rows(rows_json).context("Invalid rows file")?;

        let backend = match self.config.columns.ids() {
            Some(ids) => MemoryBackend::with_columns(ids),
            None => MemoryBackend::new(),
        };
        let query = GridQuery::build(&request, &backend, &TracingObserver);
        let rows = backend.execute(rows, &query);

        Ok(json!({
            "page": query.page,
            "rowCount": rows.len(),
            "rows": rows,
        }))
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .with_writer(std::io::stderr)
            .compact()
            .with_env_filter(filter)
            .init();
    }
}

fn read_file(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file: {}", what, path.display()))
}
