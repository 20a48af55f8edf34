use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use super::cli::CliConfig;
use super::constants::{CONFIG_FILE_NAME, DEFAULT_TABLE};
use crate::data::Backend;
use crate::data::sql::{ColumnDef, ColumnMap};
use crate::domain::grid::RequestLimits;
use crate::utils::sql::is_plain_identifier;

// =============================================================================
// File Config
// =============================================================================

/// SQL configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SqlFileConfig {
    pub dialect: Option<Backend>,
    pub table: Option<String>,
}

/// One entry of the column whitelist (from JSON config file)
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnFileConfig {
    /// Physical column name; defaults to the grid column id
    pub name: Option<String>,
    pub filterable: Option<bool>,
    pub sortable: Option<bool>,
}

/// Request limits section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LimitsFileConfig {
    pub max_request_bytes: Option<usize>,
    pub max_filter_columns: Option<usize>,
    pub max_filter_depth: Option<usize>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub sql: Option<SqlFileConfig>,
    pub columns: Option<BTreeMap<String, ColumnFileConfig>>,
    pub limits: Option<LimitsFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(sql) = other.sql {
            let current = self.sql.get_or_insert_with(SqlFileConfig::default);
            if sql.dialect.is_some() {
                tracing::trace!(dialect = ?sql.dialect, "Merging sql.dialect");
                current.dialect = sql.dialect;
            }
            if sql.table.is_some() {
                tracing::trace!(table = ?sql.table, "Merging sql.table");
                current.table = sql.table;
            }
        }

        // The whitelist is replaced as a whole so an overlay can narrow it
        if other.columns.is_some() {
            tracing::trace!("Merging columns");
            self.columns = other.columns;
        }

        if let Some(limits) = other.limits {
            let current = self.limits.get_or_insert_with(LimitsFileConfig::default);
            if limits.max_request_bytes.is_some() {
                current.max_request_bytes = limits.max_request_bytes;
            }
            if limits.max_filter_columns.is_some() {
                current.max_filter_columns = limits.max_filter_columns;
            }
            if limits.max_filter_depth.is_some() {
                current.max_filter_depth = limits.max_filter_depth;
            }
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlConfig {
    pub dialect: Backend,
    pub table: String,
}

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub sql: SqlConfig,
    pub columns: ColumnMap,
    pub limits: RequestLimits,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Local directory config (./gridquery.json)
    /// 3. CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            let local_config = FileConfig::load_from_file(&local)?;
            local_config.warn_unknown_fields();
            file_config.merge(local_config);
            found_configs.push(local.display().to_string());
        }

        if let Some(ref path) = cli.config {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            let overlay_config = FileConfig::load_from_file(path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");
        Self::from_layers(file_config, cli)
    }

    /// Layer configs: defaults -> file config -> CLI/env overrides
    fn from_layers(file_config: FileConfig, cli: &CliConfig) -> Result<Self> {
        let file_sql = file_config.sql.unwrap_or_default();
        let file_limits = file_config.limits.unwrap_or_default();

        let dialect = cli.dialect.or(file_sql.dialect).unwrap_or_default();
        let table = cli
            .table
            .clone()
            .or(file_sql.table)
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());
        if !is_plain_identifier(&table) {
            anyhow::bail!("Invalid table name '{}': expected a plain SQL identifier", table);
        }

        let columns = match file_config.columns {
            Some(columns) => ColumnMap::restricted(columns.into_iter().map(|(id, entry)| {
                let def = ColumnDef {
                    name: entry.name.unwrap_or_else(|| id.clone()),
                    filterable: entry.filterable.unwrap_or(true),
                    sortable: entry.sortable.unwrap_or(true),
                };
                (id, def)
            }))
            .context("Invalid column whitelist in config")?,
            None => ColumnMap::permissive(),
        };

        let defaults = RequestLimits::default();
        let limits = RequestLimits {
            max_request_bytes: file_limits
                .max_request_bytes
                .unwrap_or(defaults.max_request_bytes),
            max_filter_columns: file_limits
                .max_filter_columns
                .unwrap_or(defaults.max_filter_columns),
            max_filter_depth: file_limits
                .max_filter_depth
                .unwrap_or(defaults.max_filter_depth),
        };
        if limits.max_request_bytes == 0 || limits.max_filter_depth == 0 {
            anyhow::bail!("limits.max_request_bytes and limits.max_filter_depth must be positive");
        }

        let config = Self {
            sql: SqlConfig { dialect, table },
            columns,
            limits,
        };
        tracing::debug!(
            dialect = %config.sql.dialect,
            table = %config.sql.table,
            restricted = config.columns.is_restricted(),
            "Configuration loaded"
        );
        Ok(config)
    }
}
