//! Grid request errors

use thiserror::Error;

use crate::data::DataError;

/// Failure compiling one column's filter.
///
/// Never escapes the compiler: the column is skipped and the error is
/// reported to the [`CompileObserver`](super::observer::CompileObserver).
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid date '{value}', expected yyyy-MM-dd HH:mm:ss: {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error(transparent)]
    Backend(#[from] DataError),
}

/// Reason a row range could not be turned into a page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("Start row or end row cannot be null: startRow={start_row:?}, endRow={end_row:?}")]
    MissingBounds {
        start_row: Option<i64>,
        end_row: Option<i64>,
    },

    #[error("Start row must be less than end row: startRow={start_row}, endRow={end_row}")]
    EmptyRange { start_row: i64, end_row: i64 },

    #[error("Page size must be greater than zero: pageSize={page_size}")]
    NonPositiveSize { page_size: i64 },

    #[error("Start row cannot be negative: startRow={start_row}")]
    NegativeStart { start_row: i64 },
}

/// Failure decoding an inbound grid request
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Request exceeds maximum size of {max} bytes")]
    TooLarge { max: usize },

    #[error("Invalid request JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Maximum {max} filtered columns allowed, got {count}")]
    TooManyFilters { count: usize, max: usize },

    #[error("Filter for column {column} is nested {depth} levels deep (maximum {max})")]
    FilterTooDeep {
        column: String,
        depth: usize,
        max: usize,
    },
}

impl RequestError {
    /// Stable error code, in the style of API error responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::TooLarge { .. } => "REQUEST_TOO_LARGE",
            Self::InvalidJson(_) => "INVALID_REQUEST_JSON",
            Self::TooManyFilters { .. } => "TOO_MANY_FILTERS",
            Self::FilterTooDeep { .. } => "FILTER_TOO_DEEP",
        }
    }
}
