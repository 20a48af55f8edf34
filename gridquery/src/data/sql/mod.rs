//! SQL query backend
//!
//! Renders grid predicates, sort specs and pages as parameterised SQL for
//! DuckDB, PostgreSQL and SQLite.

mod backend;
mod columns;
mod dialect;
mod duckdb_dialect;
mod postgres_dialect;
mod sqlite_dialect;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use backend::{CompareOp, SqlBackend, SqlColumn, SqlExpr, SqlParams, SqlStatement};
pub use columns::{ColumnDef, ColumnMap};
pub use dialect::SqlDialect;
pub use duckdb_dialect::DuckdbDialect;
pub use postgres_dialect::PostgresDialect;
pub use sqlite_dialect::SqliteDialect;

/// Database backend identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Duckdb,
    Postgres,
    Sqlite,
}

impl Backend {
    /// Get the SQL dialect for this backend
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Backend::Duckdb => &DuckdbDialect,
            Backend::Postgres => &PostgresDialect,
            Backend::Sqlite => &SqliteDialect,
        }
    }

    /// Get the backend name
    pub fn name(&self) -> &'static str {
        self.dialect().name()
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "duckdb" => Ok(Backend::Duckdb),
            "postgres" | "postgresql" => Ok(Backend::Postgres),
            "sqlite" => Ok(Backend::Sqlite),
            _ => Err(format!(
                "Invalid SQL dialect '{}'. Valid options: duckdb, postgres, sqlite",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names() {
        assert_eq!(Backend::Duckdb.to_string(), "duckdb");
        assert_eq!(Backend::Postgres.to_string(), "postgres");
        assert_eq!(Backend::Sqlite.to_string(), "sqlite");
    }

    #[test]
    fn backend_from_str() {
        assert_eq!("PostgreSQL".parse::<Backend>(), Ok(Backend::Postgres));
        assert_eq!("sqlite".parse::<Backend>(), Ok(Backend::Sqlite));
        assert!("mysql".parse::<Backend>().is_err());
    }
}
