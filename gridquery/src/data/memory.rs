//! In-memory query backend
//!
//! Evaluates grid predicates against JSON object rows. Null handling follows
//! SQL: a missing or `null` cell fails every comparison, including `<>` and
//! `NOT LIKE`, and only matches `IS NULL`.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde_json::{Map, Value as JsonValue};

use super::backend::{ColumnKind, QueryBackend, Value};
use super::error::DataError;
use crate::domain::grid::query::GridQuery;
use crate::domain::grid::sort::{SortOrder, SortSpec};
use crate::utils::sql::like_matches;
use crate::utils::time::parse_cell_datetime;

/// One row: column name -> cell
pub type Row = Map<String, JsonValue>;

/// Compiled predicate over a row
pub type RowPredicate = Box<dyn Fn(&Row) -> bool + Send + Sync>;

/// Compiled row comparator
pub type RowOrdering = Box<dyn Fn(&Row, &Row) -> Ordering + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryColumn {
    name: String,
    kind: ColumnKind,
}

impl MemoryColumn {
    /// Raw cell, `None` when missing or null
    fn raw<'a>(&self, row: &'a Row) -> Option<&'a JsonValue> {
        row.get(&self.name).filter(|v| !v.is_null())
    }

    /// Cell converted to this column's kind, `None` when null or not convertible
    fn value(&self, row: &Row) -> Option<Value> {
        let raw = self.raw(row)?;
        match self.kind {
            ColumnKind::Text | ColumnKind::Coerced => Some(Value::Text(cell_text(raw))),
            ColumnKind::Number => match raw {
                JsonValue::Number(n) => n.as_f64().map(Value::Number),
                JsonValue::String(s) => s.trim().parse().ok().map(Value::Number),
                _ => None,
            },
            ColumnKind::Boolean => match raw {
                JsonValue::Bool(b) => Some(Value::Bool(*b)),
                JsonValue::String(s) => s.parse().ok().map(Value::Bool),
                _ => None,
            },
            ColumnKind::DateTime => raw
                .as_str()
                .and_then(parse_cell_datetime)
                .map(Value::DateTime),
        }
    }
}

fn cell_text(raw: &JsonValue) -> String {
    match raw {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Sort order of two non-null JSON cells
fn compare_cells(a: &JsonValue, b: &JsonValue) -> Ordering {
    fn rank(v: &JsonValue) -> u8 {
        match v {
            JsonValue::Null => 0,
            JsonValue::Bool(_) => 1,
            JsonValue::Number(_) => 2,
            JsonValue::String(_) => 3,
            JsonValue::Array(_) => 4,
            JsonValue::Object(_) => 5,
        }
    }

    match (a, b) {
        (JsonValue::Number(x), JsonValue::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(f64::NAN), y.as_f64().unwrap_or(f64::NAN));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (JsonValue::String(x), JsonValue::String(y)) => x.cmp(y),
        (JsonValue::Bool(x), JsonValue::Bool(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)).then_with(|| a.to_string().cmp(&b.to_string())),
    }
}

/// Parse a JSON array of objects into rows
pub fn parse_rows(json_str: &str) -> Result<Vec<Row>, DataError> {
    let values: Vec<JsonValue> = serde_json::from_str(json_str)?;
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            JsonValue::Object(row) => Ok(row),
            _ => Err(DataError::NotAnObject { index }),
        })
        .collect()
}

/// Query backend over rows held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    known_columns: Option<BTreeSet<String>>,
}

impl MemoryBackend {
    /// Backend accepting any column name
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that only resolves the given column names
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known_columns: Some(columns.into_iter().map(Into::into).collect()),
        }
    }

    fn is_known(&self, name: &str) -> bool {
        self.known_columns
            .as_ref()
            .is_none_or(|known| known.contains(name))
    }

    fn compare<F>(&self, column: &MemoryColumn, value: Value, accept: F) -> RowPredicate
    where
        F: Fn(Ordering) -> bool + Send + Sync + 'static,
    {
        let column = column.clone();
        Box::new(move |row| {
            column
                .value(row)
                .and_then(|cell| compare_values(&cell, &value))
                .is_some_and(&accept)
        })
    }

    fn matches_like(&self, column: &MemoryColumn, pattern: String, expected: bool) -> RowPredicate {
        let column = column.clone();
        Box::new(move |row| match column.value(row) {
            Some(Value::Text(text)) => like_matches(&pattern, &text) == expected,
            _ => false,
        })
    }

    /// Sort rows in place; nulls sort last in both directions
    pub fn sort_rows(&self, rows: &mut [Row], sort: &SortSpec) {
        if sort.is_unsorted() {
            return;
        }
        let ordering = self.sort(sort);
        rows.sort_by(|a, b| ordering(a, b));
    }

    /// Filter, sort and page `rows` the way a database would run the query
    pub fn execute(&self, rows: Vec<Row>, query: &GridQuery<Self>) -> Vec<Row> {
        let total = rows.len();
        let mut matched: Vec<Row> = rows.into_iter().filter(|row| (query.predicate)(row)).collect();
        self.sort_rows(&mut matched, &query.sort);

        let matched_count = matched.len();
        let result: Vec<Row> = match &query.page {
            Some(page) => matched
                .into_iter()
                .skip(page.offset() as usize)
                .take(page.page_size as usize)
                .collect(),
            None => matched,
        };

        tracing::debug!(
            total,
            matched = matched_count,
            returned = result.len(),
            "Executed grid query in memory"
        );
        result
    }
}

impl QueryBackend for MemoryBackend {
    type Column = MemoryColumn;
    type Predicate = RowPredicate;
    type Order = RowOrdering;

    fn column(&self, id: &str, kind: ColumnKind) -> Result<MemoryColumn, DataError> {
        if !self.is_known(id) {
            return Err(DataError::unknown_column(id));
        }
        Ok(MemoryColumn {
            name: id.to_string(),
            kind,
        })
    }

    fn equal(&self, column: &MemoryColumn, value: Value) -> RowPredicate {
        self.compare(column, value, |o| o == Ordering::Equal)
    }

    fn not_equal(&self, column: &MemoryColumn, value: Value) -> RowPredicate {
        self.compare(column, value, |o| o != Ordering::Equal)
    }

    fn less_than(&self, column: &MemoryColumn, value: Value) -> RowPredicate {
        self.compare(column, value, |o| o == Ordering::Less)
    }

    fn less_or_equal(&self, column: &MemoryColumn, value: Value) -> RowPredicate {
        self.compare(column, value, |o| o != Ordering::Greater)
    }

    fn greater_than(&self, column: &MemoryColumn, value: Value) -> RowPredicate {
        self.compare(column, value, |o| o == Ordering::Greater)
    }

    fn greater_or_equal(&self, column: &MemoryColumn, value: Value) -> RowPredicate {
        self.compare(column, value, |o| o != Ordering::Less)
    }

    fn like(&self, column: &MemoryColumn, pattern: String) -> RowPredicate {
        self.matches_like(column, pattern, true)
    }

    fn not_like(&self, column: &MemoryColumn, pattern: String) -> RowPredicate {
        self.matches_like(column, pattern, false)
    }

    fn is_null(&self, column: &MemoryColumn) -> RowPredicate {
        let column = column.clone();
        Box::new(move |row| column.raw(row).is_none())
    }

    fn is_not_null(&self, column: &MemoryColumn) -> RowPredicate {
        let column = column.clone();
        Box::new(move |row| column.raw(row).is_some())
    }

    fn and(&self, predicates: Vec<RowPredicate>) -> RowPredicate {
        Box::new(move |row| predicates.iter().all(|p| p(row)))
    }

    fn or(&self, predicates: Vec<RowPredicate>) -> RowPredicate {
        Box::new(move |row| predicates.iter().any(|p| p(row)))
    }

    fn always_true(&self) -> RowPredicate {
        Box::new(|_| true)
    }

    fn sort(&self, spec: &SortSpec) -> RowOrdering {
        let orders: Vec<SortOrder> = spec
            .iter()
            .filter(|order| {
                let known = self.is_known(&order.column);
                if !known {
                    tracing::warn!(column = %order.column, "Skipping sort key");
                }
                known
            })
            .cloned()
            .collect();

        Box::new(move |a, b| {
            for order in &orders {
                let left = a.get(&order.column).filter(|v| !v.is_null());
                let right = b.get(&order.column).filter(|v| !v.is_null());
                let ordering = match (left, right) {
                    (None, None) => Ordering::Equal,
                    (None, Some(_)) => Ordering::Greater,
                    (Some(_), None) => Ordering::Less,
                    (Some(x), Some(y)) if order.direction.is_desc() => {
                        compare_cells(x, y).reverse()
                    }
                    (Some(x), Some(y)) => compare_cells(x, y),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        })
    }
}
