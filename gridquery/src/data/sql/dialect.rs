//! SQL dialect trait for multi-database support
//!
//! This trait defines the interface for generating database-specific SQL syntax.

/// SQL dialect trait for generating database-specific SQL
///
/// Different databases have different syntax for:
/// - Parameter placeholders (? vs $1)
/// - Type casting
/// - NULL ordering
pub trait SqlDialect: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Generate a parameter placeholder for the given index (1-based)
    ///
    /// - SQLite/DuckDB: Always returns "?"
    /// - PostgreSQL: Returns "$1", "$2", etc.
    fn placeholder(&self, index: usize) -> String;

    /// Quote an identifier that has already been validated as plain
    fn quote_identifier(&self, ident: &str) -> String {
        format!("\"{}\"", ident)
    }

    /// Cast a column to string type
    ///
    /// - DuckDB: `CAST(col AS VARCHAR)`
    /// - PostgreSQL: `col::TEXT`
    /// - SQLite: `CAST(col AS TEXT)`
    fn cast_to_string(&self, col: &str) -> String;

    /// Wrap a placeholder bound to a `yyyy-MM-dd HH:mm:ss` string so it
    /// compares as a timestamp
    ///
    /// - DuckDB: `CAST(? AS TIMESTAMP)`
    /// - PostgreSQL: `$1::TIMESTAMP`
    /// - SQLite: `datetime(?)`
    fn timestamp_param(&self, placeholder: &str) -> String;

    /// Generate LIMIT/OFFSET clause
    ///
    /// Most databases use `LIMIT x OFFSET y`, but syntax may vary.
    fn limit_offset(&self, limit: u64, offset: u64) -> String {
        format!("LIMIT {} OFFSET {}", limit, offset)
    }

    /// Generate ORDER BY clause with NULL handling
    ///
    /// - Most: `col DESC NULLS LAST`
    /// - SQLite: Doesn't support NULLS FIRST/LAST
    fn order_by_with_nulls(&self, col: &str, desc: bool, nulls_last: bool) -> String {
        let dir = if desc { "DESC" } else { "ASC" };
        let nulls = if nulls_last {
            "NULLS LAST"
        } else {
            "NULLS FIRST"
        };
        format!("{} {} {}", col, dir, nulls)
    }
}
