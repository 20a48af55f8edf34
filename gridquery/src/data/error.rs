//! Unified error type for query backends

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    /// Column identifier cannot be resolved to a column of the queried rows
    #[error("Unknown column: {column}")]
    UnknownColumn { column: String },

    /// Column is known but cannot be used for this purpose
    #[error("Column {column} is not {purpose}")]
    ColumnNotAllowed {
        column: String,
        purpose: &'static str,
    },

    /// Row data could not be decoded
    #[error("Invalid row data: {0}")]
    InvalidRows(#[from] serde_json::Error),

    /// A row in a row set is not a JSON object
    #[error("Row {index} is not a JSON object")]
    NotAnObject { index: usize },
}

impl DataError {
    pub fn unknown_column(column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            column: column.into(),
        }
    }
}
