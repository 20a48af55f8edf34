//! Sort builder
//!
//! Turns the grid's `sortModel` into a backend-neutral [`SortSpec`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// One entry of the grid `sortModel`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortModel {
    pub col_id: String,
    #[serde(default)]
    pub sort: Option<String>,
}

impl SortModel {
    pub fn new(col_id: impl Into<String>, sort: impl Into<String>) -> Self {
        Self {
            col_id: col_id.into(),
            sort: Some(sort.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// `"asc"` is ascending; any other token, or none, is descending
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    pub fn is_desc(&self) -> bool {
        matches!(self, Self::Desc)
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A single sort key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortOrder {
    pub column: String,
    pub direction: SortDirection,
}

/// Ordered sort keys; the first entry is the primary key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SortSpec {
    orders: Vec<SortOrder>,
}

impl SortSpec {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn orders(&self) -> &[SortOrder] {
        &self.orders
    }

    pub fn iter(&self) -> impl Iterator<Item = &SortOrder> {
        self.orders.iter()
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.orders.is_empty() {
            return write!(f, "UNSORTED");
        }
        let parts: Vec<String> = self
            .orders
            .iter()
            .map(|o| format!("{}: {}", o.column, o.direction.as_sql()))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Build a sort spec from the grid sort model, keeping entry order as key priority
pub fn build_sort(sort_model: &[SortModel]) -> SortSpec {
    let orders: Vec<SortOrder> = sort_model
        .iter()
        .map(|m| SortOrder {
            column: m.col_id.clone(),
            direction: SortDirection::from_token(m.sort.as_deref()),
        })
        .collect();
    let spec = SortSpec { orders };
    tracing::debug!(sort = %spec, "Created sort from sort model");
    spec
}
