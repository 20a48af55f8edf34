//! Predicate compiler
//!
//! Walks a grid filter model and builds one predicate through a
//! [`QueryBackend`]. Columns are compiled independently: a column whose filter
//! fails to compile is reported to the observer and dropped, the rest still
//! apply. Inside a composite the same holds per condition.

use crate::data::{ColumnKind, QueryBackend, Value};
use crate::domain::grid::error::FilterError;
use crate::domain::grid::observer::CompileObserver;
use crate::utils::sql::escape_like_pattern;
use crate::utils::time::parse_grid_datetime;

use super::types::{
    BooleanFilter, BooleanFilterKind, DateFilter, FilterModel, FilterNode, JoinOperator,
    NumberFilter, ObjectFilter, ScalarFilterKind, TextFilter, TextFilterKind,
};

type Compiled<P> = Result<Option<P>, FilterError>;

pub struct PredicateCompiler<'a, B: QueryBackend> {
    backend: &'a B,
    observer: &'a dyn CompileObserver,
}

impl<'a, B: QueryBackend> PredicateCompiler<'a, B> {
    pub fn new(backend: &'a B, observer: &'a dyn CompileObserver) -> Self {
        Self { backend, observer }
    }

    /// Compile every column filter and AND them together.
    ///
    /// An empty model, or one where no column yields a predicate, compiles to
    /// an always-true predicate.
    pub fn compile(&self, filter_model: &FilterModel) -> B::Predicate {
        let predicates: Vec<B::Predicate> = filter_model
            .iter()
            .filter_map(|(column, node)| match self.compile_node(column, node) {
                Ok(predicate) => predicate,
                Err(e) => {
                    self.observer.column_failed(column, node, &e);
                    None
                }
            })
            .collect();

        if !filter_model.is_empty() {
            tracing::info!(
                columns = filter_model.len(),
                applied = predicates.len(),
                "Created predicate from filter model"
            );
        }
        if predicates.is_empty() {
            return self.backend.always_true();
        }
        self.backend.and(predicates)
    }

    /// Compile one node against `column`; `Ok(None)` means the node adds no constraint
    pub fn compile_node(&self, column: &str, node: &FilterNode) -> Compiled<B::Predicate> {
        let junction = node.junction();
        if let Some(conditions) = &junction.conditions {
            return self.compile_conditions(column, junction.operator, conditions);
        }

        match node {
            FilterNode::Text(f) => self.text(column, f),
            FilterNode::Number(f) => self.number(column, f),
            FilterNode::Boolean(f) => self.boolean(column, f),
            FilterNode::Date(f) => self.date(column, f),
            FilterNode::Object(f) => self.object(column, f),
        }
    }

    fn compile_conditions(
        &self,
        column: &str,
        operator: Option<JoinOperator>,
        conditions: &[FilterNode],
    ) -> Compiled<B::Predicate> {
        let join_or = match operator {
            Some(JoinOperator::And) => false,
            Some(JoinOperator::Or) => true,
            Some(JoinOperator::Unknown) | None => {
                tracing::debug!(column, "Composite filter without a usable operator, skipping");
                return Ok(None);
            }
        };

        let mut predicates = Vec::with_capacity(conditions.len());
        for condition in conditions {
            match self.compile_node(column, condition) {
                Ok(Some(p)) => predicates.push(p),
                Ok(None) => {}
                Err(e) => self.observer.column_failed(column, condition, &e),
            }
        }

        // An empty AND is always true, an empty OR always false
        Ok(Some(if join_or {
            self.backend.or(predicates)
        } else {
            self.backend.and(predicates)
        }))
    }

    fn text(&self, column: &str, filter: &TextFilter) -> Compiled<B::Predicate> {
        let Some(value) = &filter.filter else {
            return Ok(None);
        };
        let path = self.backend.column(column, ColumnKind::Text)?;
        Ok(self.text_like(&path, filter.kind, value))
    }

    fn object(&self, column: &str, filter: &ObjectFilter) -> Compiled<B::Predicate> {
        let Some(value) = &filter.filter else {
            return Ok(None);
        };
        let path = self.backend.column(column, ColumnKind::Coerced)?;
        Ok(self.text_like(&path, filter.kind, value))
    }

    fn text_like(
        &self,
        path: &B::Column,
        kind: Option<TextFilterKind>,
        value: &str,
    ) -> Option<B::Predicate> {
        let b = self.backend;
        let escaped = || escape_like_pattern(value);
        match kind? {
            TextFilterKind::Equals => Some(b.equal(path, Value::Text(value.to_string()))),
            TextFilterKind::NotEqual => Some(b.not_equal(path, Value::Text(value.to_string()))),
            TextFilterKind::Contains => Some(b.like(path, format!("%{}%", escaped()))),
            TextFilterKind::NotContains => Some(b.not_like(path, format!("%{}%", escaped()))),
            TextFilterKind::StartsWith => Some(b.like(path, format!("{}%", escaped()))),
            TextFilterKind::EndsWith => Some(b.like(path, format!("%{}", escaped()))),
            TextFilterKind::Blank => Some(b.is_null(path)),
            TextFilterKind::NotBlank => Some(b.is_not_null(path)),
            TextFilterKind::Unknown => None,
        }
    }

    fn number(&self, column: &str, filter: &NumberFilter) -> Compiled<B::Predicate> {
        let Some(from) = filter.filter else {
            return Ok(None);
        };
        let path = self.backend.column(column, ColumnKind::Number)?;
        self.scalar(&path, filter.kind, Value::Number(from), || {
            Ok(filter.filter_to.map(Value::Number))
        })
    }

    fn date(&self, column: &str, filter: &DateFilter) -> Compiled<B::Predicate> {
        let Some(date_from) = &filter.date_from else {
            return Ok(None);
        };
        let path = self.backend.column(column, ColumnKind::DateTime)?;
        let from = parse_date(date_from)?;
        self.scalar(&path, filter.kind, from, || {
            filter.date_to.as_deref().map(parse_date).transpose()
        })
    }

    /// Shared number/date handling; `upper` is only evaluated for ranges
    fn scalar<F>(
        &self,
        path: &B::Column,
        kind: Option<ScalarFilterKind>,
        from: Value,
        upper: F,
    ) -> Compiled<B::Predicate>
    where
        F: FnOnce() -> Result<Option<Value>, FilterError>,
    {
        let b = self.backend;
        let Some(kind) = kind else {
            return Ok(None);
        };
        Ok(match kind {
            ScalarFilterKind::Equals => Some(b.equal(path, from)),
            ScalarFilterKind::NotEqual => Some(b.not_equal(path, from)),
            ScalarFilterKind::LessThan => Some(b.less_than(path, from)),
            ScalarFilterKind::LessThanOrEqual => Some(b.less_or_equal(path, from)),
            ScalarFilterKind::GreaterThan => Some(b.greater_than(path, from)),
            ScalarFilterKind::GreaterThanOrEqual => Some(b.greater_or_equal(path, from)),
            ScalarFilterKind::Blank => Some(b.is_null(path)),
            ScalarFilterKind::NotBlank => Some(b.is_not_null(path)),
            ScalarFilterKind::InRange => {
                let lower = b.greater_or_equal(path, from);
                let upper = match upper()? {
                    Some(to) => b.less_or_equal(path, to),
                    None => b.always_true(),
                };
                Some(b.and(vec![lower, upper]))
            }
            ScalarFilterKind::Unknown => None,
        })
    }

    fn boolean(&self, column: &str, filter: &BooleanFilter) -> Compiled<B::Predicate> {
        let path = self.backend.column(column, ColumnKind::Boolean)?;
        let expected = filter.kind == Some(BooleanFilterKind::True);
        Ok(Some(self.backend.equal(&path, Value::Bool(expected))))
    }
}

fn parse_date(value: &str) -> Result<Value, FilterError> {
    parse_grid_datetime(value)
        .map(Value::DateTime)
        .map_err(|source| FilterError::InvalidDate {
            value: value.to_string(),
            source,
        })
}
