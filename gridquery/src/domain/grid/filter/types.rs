//! Filter model type definitions
//!
//! The grid sends one filter node per column. A node is either a leaf
//! condition or a composite joining nested nodes with AND/OR.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Column id -> filter node, as sent in the grid `filterModel`
pub type FilterModel = BTreeMap<String, FilterNode>;

/// Filter node, discriminated by `filterType`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "filterType", rename_all = "lowercase")]
pub enum FilterNode {
    Text(TextFilter),
    Number(NumberFilter),
    Boolean(BooleanFilter),
    Date(DateFilter),
    Object(ObjectFilter),
}

/// How the conditions of a composite node are joined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum JoinOperator {
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
    #[serde(other)]
    Unknown,
}

/// Composite part shared by every node type
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Junction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<JoinOperator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<FilterNode>>,
}

impl Junction {
    pub fn new(operator: JoinOperator, conditions: Vec<FilterNode>) -> Self {
        Self {
            operator: Some(operator),
            conditions: Some(conditions),
        }
    }
}

/// Comparison kinds for text and object filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TextFilterKind {
    Equals,
    NotEqual,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    Blank,
    NotBlank,
    #[serde(other)]
    Unknown,
}

/// Comparison kinds for number and date filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalarFilterKind {
    Equals,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Blank,
    NotBlank,
    InRange,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum BooleanFilterKind {
    #[serde(rename = "true")]
    True,
    #[serde(rename = "false")]
    False,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TextFilter {
    #[serde(flatten)]
    pub junction: Junction,
    #[serde(rename = "type", default)]
    pub kind: Option<TextFilterKind>,
    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberFilter {
    #[serde(flatten)]
    pub junction: Junction,
    #[serde(rename = "type", default)]
    pub kind: Option<ScalarFilterKind>,
    #[serde(default)]
    pub filter: Option<f64>,
    #[serde(default)]
    pub filter_to: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BooleanFilter {
    #[serde(flatten)]
    pub junction: Junction,
    #[serde(rename = "type", default)]
    pub kind: Option<BooleanFilterKind>,
}

/// Date filter; `dateFrom`/`dateTo` use `yyyy-MM-dd HH:mm:ss`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateFilter {
    #[serde(flatten)]
    pub junction: Junction,
    #[serde(rename = "type", default)]
    pub kind: Option<ScalarFilterKind>,
    #[serde(default)]
    pub date_from: Option<String>,
    #[serde(default)]
    pub date_to: Option<String>,
}

/// Text-style filter over a column of any type
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ObjectFilter {
    #[serde(flatten)]
    pub junction: Junction,
    #[serde(rename = "type", default)]
    pub kind: Option<TextFilterKind>,
    #[serde(default)]
    pub filter: Option<String>,
}

impl FilterNode {
    pub fn text(kind: TextFilterKind, filter: impl Into<String>) -> Self {
        Self::Text(TextFilter {
            kind: Some(kind),
            filter: Some(filter.into()),
            ..Default::default()
        })
    }

    pub fn number(kind: ScalarFilterKind, filter: f64, filter_to: Option<f64>) -> Self {
        Self::Number(NumberFilter {
            kind: Some(kind),
            filter: Some(filter),
            filter_to,
            ..Default::default()
        })
    }

    pub fn boolean(kind: BooleanFilterKind) -> Self {
        Self::Boolean(BooleanFilter {
            kind: Some(kind),
            ..Default::default()
        })
    }

    pub fn date(kind: ScalarFilterKind, date_from: &str, date_to: Option<&str>) -> Self {
        Self::Date(DateFilter {
            kind: Some(kind),
            date_from: Some(date_from.to_string()),
            date_to: date_to.map(str::to_string),
            ..Default::default()
        })
    }

    pub fn object(kind: TextFilterKind, filter: impl Into<String>) -> Self {
        Self::Object(ObjectFilter {
            kind: Some(kind),
            filter: Some(filter.into()),
            ..Default::default()
        })
    }

    /// Composite text node joining `conditions`
    pub fn join(operator: JoinOperator, conditions: Vec<FilterNode>) -> Self {
        Self::Text(TextFilter {
            junction: Junction::new(operator, conditions),
            ..Default::default()
        })
    }

    pub fn junction(&self) -> &Junction {
        match self {
            Self::Text(f) => &f.junction,
            Self::Number(f) => &f.junction,
            Self::Boolean(f) => &f.junction,
            Self::Date(f) => &f.junction,
            Self::Object(f) => &f.junction,
        }
    }

    /// `filterType` tag of this node
    pub fn filter_type(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Boolean(_) => "boolean",
            Self::Date(_) => "date",
            Self::Object(_) => "object",
        }
    }

    pub fn is_composite(&self) -> bool {
        self.junction().conditions.is_some()
    }

    /// Nesting depth; a leaf has depth 1
    pub fn depth(&self) -> usize {
        match &self.junction().conditions {
            Some(children) => 1 + children.iter().map(Self::depth).max().unwrap_or(0),
            None => 1,
        }
    }
}
