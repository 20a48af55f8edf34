//! Query backend capability
//!
//! The seam between the grid compilers and whatever executes the query.
//! A backend decides what a column, a predicate and a value look like; the
//! compilers only ever combine them through this trait.

use std::fmt;

use chrono::NaiveDateTime;

use super::error::DataError;
use crate::domain::grid::sort::SortSpec;
use crate::utils::time::format_grid_datetime;

/// How a column is accessed by a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Number,
    Boolean,
    DateTime,
    /// Any column type, compared through its text form
    Coerced,
}

/// Literal value compared against a column
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{}", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::DateTime(dt) => write!(f, "{}", format_grid_datetime(dt)),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::DateTime(dt) => serde_json::Value::String(format_grid_datetime(dt)),
        }
    }
}

/// Predicate construction capability supplied by the host system.
///
/// Implementations must be cheap to share across threads; one backend
/// instance serves every request.
pub trait QueryBackend: Send + Sync {
    /// Typed accessor for a column of the queried rows
    type Column;
    /// Boolean condition over a row
    type Predicate;
    /// Backend form of a sort spec
    type Order;

    /// Resolve a column identifier for filtering
    fn column(&self, id: &str, kind: ColumnKind) -> Result<Self::Column, DataError>;

    fn equal(&self, column: &Self::Column, value: Value) -> Self::Predicate;
    fn not_equal(&self, column: &Self::Column, value: Value) -> Self::Predicate;
    fn less_than(&self, column: &Self::Column, value: Value) -> Self::Predicate;
    fn less_or_equal(&self, column: &Self::Column, value: Value) -> Self::Predicate;
    fn greater_than(&self, column: &Self::Column, value: Value) -> Self::Predicate;
    fn greater_or_equal(&self, column: &Self::Column, value: Value) -> Self::Predicate;

    /// LIKE match; `pattern` uses `%` and `_` wildcards with `\` as escape
    fn like(&self, column: &Self::Column, pattern: String) -> Self::Predicate;
    fn not_like(&self, column: &Self::Column, pattern: String) -> Self::Predicate;

    fn is_null(&self, column: &Self::Column) -> Self::Predicate;
    fn is_not_null(&self, column: &Self::Column) -> Self::Predicate;

    /// Conjunction; an empty list is always true
    fn and(&self, predicates: Vec<Self::Predicate>) -> Self::Predicate;
    /// Disjunction; an empty list is always false
    fn or(&self, predicates: Vec<Self::Predicate>) -> Self::Predicate;
    fn always_true(&self) -> Self::Predicate;

    /// Render a sort spec; keys the backend cannot sort by are dropped
    fn sort(&self, spec: &SortSpec) -> Self::Order;
}
