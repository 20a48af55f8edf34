//! SQL predicate builder
//!
//! Predicates are kept as a small expression tree and rendered at the end, so
//! placeholders are numbered in the order parameters appear in the final
//! statement.

use crate::data::backend::{ColumnKind, QueryBackend, Value};
use crate::data::error::DataError;
use crate::domain::grid::query::GridQuery;
use crate::domain::grid::sort::SortSpec;

use super::columns::ColumnMap;
use super::dialect::SqlDialect;
use super::Backend;

/// Collects SQL parameters during query building (maintains insertion order)
#[derive(Debug, Default)]
pub struct SqlParams {
    pub values: Vec<Value>,
}

impl SqlParams {
    /// Add a parameter and return its placeholder
    fn bind(&mut self, value: Value, dialect: &dyn SqlDialect) -> String {
        let is_timestamp = matches!(value, Value::DateTime(_));
        self.values.push(value);
        let placeholder = dialect.placeholder(self.values.len());
        if is_timestamp {
            dialect.timestamp_param(&placeholder)
        } else {
            placeholder
        }
    }
}

/// Rendered column expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlColumn(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CompareOp {
    fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
        }
    }
}

/// SQL predicate expression
#[derive(Debug, Clone, PartialEq)]
pub enum SqlExpr {
    True,
    Compare {
        column: SqlColumn,
        op: CompareOp,
        value: Value,
    },
    Like {
        column: SqlColumn,
        pattern: String,
        negated: bool,
    },
    Null {
        column: SqlColumn,
        negated: bool,
    },
    And(Vec<SqlExpr>),
    Or(Vec<SqlExpr>),
}

impl SqlExpr {
    /// Generate SQL WHERE clause fragment
    /// Returns the SQL clause with placeholders and updates params
    pub fn to_sql(&self, dialect: &dyn SqlDialect, params: &mut SqlParams) -> String {
        match self {
            Self::True => "1=1".to_string(),
            Self::Compare { column, op, value } => {
                let placeholder = params.bind(value.clone(), dialect);
                format!("{} {} {}", column.0, op.as_sql(), placeholder)
            }
            Self::Like {
                column,
                pattern,
                negated,
            } => {
                let placeholder = params.bind(Value::Text(pattern.clone()), dialect);
                let op = if *negated { "NOT LIKE" } else { "LIKE" };
                format!("{} {} {} ESCAPE '\\'", column.0, op, placeholder)
            }
            Self::Null { column, negated } => {
                if *negated {
                    format!("{} IS NOT NULL", column.0)
                } else {
                    format!("{} IS NULL", column.0)
                }
            }
            Self::And(exprs) => Self::junction(exprs, " AND ", "1=1", dialect, params),
            Self::Or(exprs) => Self::junction(exprs, " OR ", "1=0", dialect, params),
        }
    }

    fn junction(
        exprs: &[SqlExpr],
        separator: &str,
        empty: &str,
        dialect: &dyn SqlDialect,
        params: &mut SqlParams,
    ) -> String {
        match exprs {
            [] => empty.to_string(),
            [single] => single.to_sql(dialect, params),
            _ => {
                let parts: Vec<String> = exprs.iter().map(|e| e.to_sql(dialect, params)).collect();
                format!("({})", parts.join(separator))
            }
        }
    }
}

/// Complete statement with its parameters in placeholder order
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Query backend producing parameterised SQL
#[derive(Debug, Clone)]
pub struct SqlBackend {
    backend: Backend,
    table: String,
    columns: ColumnMap,
}

impl SqlBackend {
    pub fn new(backend: Backend, table: impl Into<String>) -> Self {
        Self {
            backend,
            table: table.into(),
            columns: ColumnMap::permissive(),
        }
    }

    pub fn with_columns(mut self, columns: ColumnMap) -> Self {
        self.columns = columns;
        self
    }

    pub fn dialect(&self) -> &'static dyn SqlDialect {
        self.backend.dialect()
    }

    /// ORDER BY body for a sort spec, without the keywords.
    ///
    /// Sort keys on columns that cannot be sorted by are skipped. Returns
    /// `None` when nothing is left to sort by.
    pub fn order_by(&self, sort: &SortSpec) -> Option<String> {
        let dialect = self.dialect();
        let parts: Vec<String> = sort
            .iter()
            .filter_map(|order| match self.columns.sort_column(&order.column) {
                Ok(name) => Some(dialect.order_by_with_nulls(
                    &dialect.quote_identifier(name),
                    order.direction.is_desc(),
                    true,
                )),
                Err(e) => {
                    tracing::warn!(column = %order.column, error = %e, "Skipping sort key");
                    None
                }
            })
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }

    /// Render a full `SELECT` for a grid query
    pub fn select(&self, query: &GridQuery<Self>) -> SqlStatement {
        let dialect = self.dialect();
        let mut params = SqlParams::default();
        let mut sql = format!("SELECT * FROM {}", dialect.quote_identifier(&self.table));

        if query.predicate != SqlExpr::True {
            let clause = query.predicate.to_sql(dialect, &mut params);
            sql.push_str(" WHERE ");
            sql.push_str(&clause);
        }

        if let Some(order_by) = self.order_by(&query.sort) {
            sql.push_str(" ORDER BY ");
            sql.push_str(&order_by);
        }

        if let Some(page) = &query.page {
            sql.push(' ');
            sql.push_str(&dialect.limit_offset(page.page_size, page.offset()));
        }

        tracing::debug!(
            dialect = dialect.name(),
            sql = %sql,
            params = params.values.len(),
            "Rendered grid query"
        );
        SqlStatement {
            sql,
            params: params.values,
        }
    }

    fn compare(&self, column: &SqlColumn, op: CompareOp, value: Value) -> SqlExpr {
        SqlExpr::Compare {
            column: column.clone(),
            op,
            value,
        }
    }
}

impl QueryBackend for SqlBackend {
    type Column = SqlColumn;
    type Predicate = SqlExpr;
    type Order = Option<String>;

    fn column(&self, id: &str, kind: ColumnKind) -> Result<SqlColumn, DataError> {
        let dialect = self.dialect();
        let quoted = dialect.quote_identifier(self.columns.filter_column(id)?);
        Ok(match kind {
            ColumnKind::Coerced => SqlColumn(dialect.cast_to_string(&quoted)),
            _ => SqlColumn(quoted),
        })
    }

    fn equal(&self, column: &SqlColumn, value: Value) -> SqlExpr {
        self.compare(column, CompareOp::Eq, value)
    }

    fn not_equal(&self, column: &SqlColumn, value: Value) -> SqlExpr {
        self.compare(column, CompareOp::Ne, value)
    }

    fn less_than(&self, column: &SqlColumn, value: Value) -> SqlExpr {
        self.compare(column, CompareOp::Lt, value)
    }

    fn less_or_equal(&self, column: &SqlColumn, value: Value) -> SqlExpr {
        self.compare(column, CompareOp::Lte, value)
    }

    fn greater_than(&self, column: &SqlColumn, value: Value) -> SqlExpr {
        self.compare(column, CompareOp::Gt, value)
    }

    fn greater_or_equal(&self, column: &SqlColumn, value: Value) -> SqlExpr {
        self.compare(column, CompareOp::Gte, value)
    }

    fn like(&self, column: &SqlColumn, pattern: String) -> SqlExpr {
        SqlExpr::Like {
            column: column.clone(),
            pattern,
            negated: false,
        }
    }

    fn not_like(&self, column: &SqlColumn, pattern: String) -> SqlExpr {
        SqlExpr::Like {
            column: column.clone(),
            pattern,
            negated: true,
        }
    }

    fn is_null(&self, column: &SqlColumn) -> SqlExpr {
        SqlExpr::Null {
            column: column.clone(),
            negated: false,
        }
    }

    fn is_not_null(&self, column: &SqlColumn) -> SqlExpr {
        SqlExpr::Null {
            column: column.clone(),
            negated: true,
        }
    }

    fn and(&self, predicates: Vec<SqlExpr>) -> SqlExpr {
        // `1=1` terms add nothing to a conjunction
        let mut predicates: Vec<SqlExpr> = predicates
            .into_iter()
            .filter(|p| *p != SqlExpr::True)
            .collect();
        match predicates.len() {
            0 => SqlExpr::True,
            1 => predicates.remove(0),
            _ => SqlExpr::And(predicates),
        }
    }

    fn or(&self, predicates: Vec<SqlExpr>) -> SqlExpr {
        if predicates.contains(&SqlExpr::True) {
            return SqlExpr::True;
        }
        SqlExpr::Or(predicates)
    }

    fn always_true(&self) -> SqlExpr {
        SqlExpr::True
    }

    fn sort(&self, spec: &SortSpec) -> Option<String> {
        self.order_by(spec)
    }
}
