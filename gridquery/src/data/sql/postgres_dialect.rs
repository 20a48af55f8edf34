//! PostgreSQL SQL dialect implementation

use super::SqlDialect;

/// PostgreSQL SQL dialect
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn cast_to_string(&self, col: &str) -> String {
        format!("{}::TEXT", col)
    }

    fn timestamp_param(&self, placeholder: &str) -> String {
        format!("{}::TIMESTAMP", placeholder)
    }
}
