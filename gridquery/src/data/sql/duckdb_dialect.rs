//! DuckDB SQL dialect implementation

use super::SqlDialect;

/// DuckDB SQL dialect
pub struct DuckdbDialect;

impl SqlDialect for DuckdbDialect {
    fn name(&self) -> &'static str {
        "duckdb"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn cast_to_string(&self, col: &str) -> String {
        format!("CAST({} AS VARCHAR)", col)
    }

    fn timestamp_param(&self, placeholder: &str) -> String {
        format!("CAST({} AS TIMESTAMP)", placeholder)
    }
}
