#![allow(dead_code)]

use std::sync::Mutex;

use gridquery::data::Row;
use gridquery::domain::grid::{CompileObserver, FilterError, FilterNode, PageError};

/// Observer keeping every reported failure
#[derive(Default)]
pub struct RecordingObserver {
    columns: Mutex<Vec<String>>,
    pages: Mutex<Vec<PageError>>,
}

impl RecordingObserver {
    pub fn failed_columns(&self) -> Vec<String> {
        self.columns.lock().unwrap().clone()
    }

    pub fn rejected_pages(&self) -> Vec<PageError> {
        self.pages.lock().unwrap().clone()
    }
}

impl CompileObserver for RecordingObserver {
    fn column_failed(&self, column: &str, _node: &FilterNode, _error: &FilterError) {
        self.columns.lock().unwrap().push(column.to_string());
    }

    fn page_rejected(&self, error: &PageError) {
        self.pages.lock().unwrap().push(error.clone());
    }
}

pub fn rows(json: serde_json::Value) -> Vec<Row> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|row| row.as_object().unwrap().clone())
        .collect()
}

/// People fixture with nulls and missing cells
pub fn people() -> Vec<Row> {
    rows(serde_json::json!([
        {"id": 1, "name": "Anna", "age": 34, "active": true, "joined": "2023-05-01 09:00:00"},
        {"id": 2, "name": "Brian", "age": 17, "active": false, "joined": "2024-02-10 12:30:00"},
        {"id": 3, "name": "Diana", "age": null, "active": true, "joined": null},
        {"id": 4, "name": null, "age": 52, "active": false},
        {"id": 5, "name": "50%_off", "age": 18, "active": true, "joined": "2024-07-01 00:00:00"}
    ]))
}

pub fn ids(rows: &[Row]) -> Vec<i64> {
    rows.iter().map(|r| r["id"].as_i64().unwrap()).collect()
}
