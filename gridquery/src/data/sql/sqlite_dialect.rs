//! SQLite SQL dialect implementation

use super::SqlDialect;

/// SQLite SQL dialect
///
/// SQLite's `LIKE` ignores ASCII case unless the connection runs
/// `PRAGMA case_sensitive_like = ON`, so text filters only match
/// case-sensitively, as on DuckDB and PostgreSQL, with that pragma set.
pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn cast_to_string(&self, col: &str) -> String {
        format!("CAST({} AS TEXT)", col)
    }

    fn timestamp_param(&self, placeholder: &str) -> String {
        // SQLite stores timestamps as ISO text; normalise the bound value the same way
        format!("datetime({})", placeholder)
    }

    fn order_by_with_nulls(&self, col: &str, desc: bool, nulls_last: bool) -> String {
        // SQLite doesn't support NULLS FIRST/LAST, emulate with CASE
        let dir = if desc { "DESC" } else { "ASC" };
        if nulls_last {
            format!(
                "CASE WHEN {} IS NULL THEN 1 ELSE 0 END, {} {}",
                col, col, dir
            )
        } else {
            format!(
                "CASE WHEN {} IS NULL THEN 0 ELSE 1 END, {} {}",
                col, col, dir
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        let dialect = SqliteDialect;
        assert_eq!(dialect.placeholder(1), "?");
        assert_eq!(dialect.placeholder(5), "?");
    }

    #[test]
    fn test_timestamp_param() {
        assert_eq!(SqliteDialect.timestamp_param("?"), "datetime(?)");
    }

    #[test]
    fn test_order_by_with_nulls() {
        let dialect = SqliteDialect;
        assert_eq!(
            dialect.order_by_with_nulls("timestamp", true, true),
            "CASE WHEN timestamp IS NULL THEN 1 ELSE 0 END, timestamp DESC"
        );
        assert_eq!(
            dialect.order_by_with_nulls("name", false, false),
            "CASE WHEN name IS NULL THEN 0 ELSE 1 END, name ASC"
        );
    }
}
