//! Grid request decoding
//!
//! Parses the JSON body of a server-side `getRows` request with size and
//! shape limits.

use serde::{Deserialize, Deserializer, Serialize};

use super::error::RequestError;
use super::filter::FilterModel;
use super::sort::SortModel;

/// Default maximum size of a request body in bytes (256KB)
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 256 * 1024;

/// Default maximum number of filtered columns
pub const DEFAULT_MAX_FILTER_COLUMNS: usize = 100;

/// Default maximum nesting depth of one column's filter
pub const DEFAULT_MAX_FILTER_DEPTH: usize = 16;

/// Limits applied while decoding a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLimits {
    pub max_request_bytes: usize,
    pub max_filter_columns: usize,
    pub max_filter_depth: usize,
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self {
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
            max_filter_columns: DEFAULT_MAX_FILTER_COLUMNS,
            max_filter_depth: DEFAULT_MAX_FILTER_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnVo {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
}

/// Server-side row model `getRows` request
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRowsRequest {
    #[serde(default)]
    pub start_row: Option<i64>,
    #[serde(default)]
    pub end_row: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sort_model: Vec<SortModel>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub filter_model: FilterModel,

    // Grouping and pivoting are not supported; accepted so grids can send them
    #[serde(default, deserialize_with = "null_as_default")]
    pub row_group_cols: Vec<ColumnVo>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value_cols: Vec<ColumnVo>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pivot_cols: Vec<ColumnVo>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pivot_mode: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub group_keys: Vec<String>,
}

impl GetRowsRequest {
    /// Whether the request asks for grouping, aggregation or pivoting
    pub fn uses_unsupported_features(&self) -> bool {
        self.pivot_mode
            || !self.row_group_cols.is_empty()
            || !self.value_cols.is_empty()
            || !self.pivot_cols.is_empty()
            || !self.group_keys.is_empty()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a grid request from JSON
///
/// Validates the body size before parsing and the filter model shape after.
pub fn parse_request(
    json_str: &str,
    limits: &RequestLimits,
) -> Result<GetRowsRequest, RequestError> {
    if json_str.len() > limits.max_request_bytes {
        return Err(RequestError::TooLarge {
            max: limits.max_request_bytes,
        });
    }

    let request: GetRowsRequest = serde_json::from_str(json_str)?;

    let count = request.filter_model.len();
    if count > limits.max_filter_columns {
        return Err(RequestError::TooManyFilters {
            count,
            max: limits.max_filter_columns,
        });
    }

    for (column, node) in &request.filter_model {
        let depth = node.depth();
        if depth > limits.max_filter_depth {
            return Err(RequestError::FilterTooDeep {
                column: column.clone(),
                depth,
                max: limits.max_filter_depth,
            });
        }
    }

    if request.uses_unsupported_features() {
        tracing::debug!("Ignoring grouping/pivot settings in grid request");
    }

    Ok(request)
}
