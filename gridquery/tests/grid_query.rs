mod common;

use common::{RecordingObserver, ids, people};
use gridquery::data::{MemoryBackend, Row};
use gridquery::domain::grid::{
    FilterModel, GridQuery, PageError, PredicateCompiler, RequestLimits, SortSpec, build_page,
    parse_request,
};
use serde_json::json;

fn model(value: serde_json::Value) -> FilterModel {
    serde_json::from_value(value).unwrap()
}

fn matching(model: &FilterModel) -> Vec<i64> {
    let backend = MemoryBackend::new();
    let observer = RecordingObserver::default();
    let predicate = PredicateCompiler::new(&backend, &observer).compile(model);
    let rows: Vec<Row> = people().into_iter().filter(|r| predicate(r)).collect();
    ids(&rows)
}

#[test]
fn text_contains_is_case_sensitive_substring() {
    let m = model(json!({"name": {"filterType": "text", "type": "contains", "filter": "an"}}));
    assert_eq!(matching(&m), vec![2, 3]);
}

#[test]
fn like_wildcards_in_input_match_literally() {
    let m = model(json!({"name": {"filterType": "text", "type": "contains", "filter": "%_"}}));
    assert_eq!(matching(&m), vec![5]);

    let m = model(json!({"name": {"filterType": "text", "type": "startsWith", "filter": "_"}}));
    assert!(matching(&m).is_empty());
}

#[test]
fn columns_combine_with_and() {
    let name = json!({"filterType": "text", "type": "contains", "filter": "an"});
    let age = json!({"filterType": "number", "type": "lessThan", "filter": 40});
    let combined = model(json!({"name": name, "age": age}));

    let backend = MemoryBackend::new();
    let observer = RecordingObserver::default();
    let compiler = PredicateCompiler::new(&backend, &observer);
    let all = compiler.compile(&combined);
    let by_name = compiler.compile(&model(json!({"name": name})));
    let by_age = compiler.compile(&model(json!({"age": age})));

    for row in people() {
        assert_eq!(all(&row), by_name(&row) && by_age(&row));
    }
    assert_eq!(matching(&combined), vec![2]);
}

#[test]
fn composite_operators() {
    let conditions = json!([
        {"filterType": "text", "type": "equals", "filter": "Anna"},
        {"filterType": "text", "type": "equals", "filter": "Nobody"}
    ]);
    let or = model(json!({"name": {"filterType": "text", "operator": "OR", "conditions": conditions}}));
    let and =
        model(json!({"name": {"filterType": "text", "operator": "AND", "conditions": conditions}}));

    assert_eq!(matching(&or), vec![1]);
    assert!(matching(&and).is_empty());
}

#[test]
fn unusable_operator_adds_no_constraint() {
    let conditions = json!([{"filterType": "text", "type": "equals", "filter": "Anna"}]);
    let unknown =
        model(json!({"name": {"filterType": "text", "operator": "XOR", "conditions": conditions}}));
    let missing = model(json!({"name": {"filterType": "text", "conditions": conditions}}));

    assert_eq!(matching(&unknown), vec![1, 2, 3, 4, 5]);
    assert_eq!(matching(&missing), vec![1, 2, 3, 4, 5]);
}

#[test]
fn empty_composite_follows_its_operator() {
    let or = model(json!({"name": {"filterType": "text", "operator": "OR", "conditions": []}}));
    assert!(matching(&or).is_empty());

    let and = model(json!({"name": {"filterType": "text", "operator": "AND", "conditions": []}}));
    assert_eq!(matching(&and), vec![1, 2, 3, 4, 5]);

    let unknown_kind = model(json!({
        "name": {
            "filterType": "text",
            "operator": "OR",
            "conditions": [{"filterType": "text", "type": "fuzzy", "filter": "Anna"}]
        }
    }));
    assert!(matching(&unknown_kind).is_empty());
}

#[test]
fn failing_condition_keeps_its_siblings() {
    let m = model(json!({
        "joined": {
            "filterType": "date",
            "operator": "OR",
            "conditions": [
                {"filterType": "date", "type": "lessThan", "dateFrom": "2024-01-01 00:00:00"},
                {"filterType": "date", "type": "equals", "dateFrom": "garbage"}
            ]
        }
    }));

    let backend = MemoryBackend::new();
    let observer = RecordingObserver::default();
    let predicate = PredicateCompiler::new(&backend, &observer).compile(&m);
    let rows: Vec<Row> = people().into_iter().filter(|r| predicate(r)).collect();

    assert_eq!(ids(&rows), vec![1]);
    assert_eq!(observer.failed_columns(), vec!["joined".to_string()]);
}

#[test]
fn open_range_equals_greater_or_equal() {
    let range = model(json!({"age": {"filterType": "number", "type": "inRange", "filter": 18}}));
    let gte = model(json!({"age": {"filterType": "number", "type": "greaterThanOrEqual", "filter": 18}}));

    assert_eq!(matching(&range), matching(&gte));
    assert_eq!(matching(&range), vec![1, 4, 5]);

    let closed = model(
        json!({"age": {"filterType": "number", "type": "inRange", "filter": 18, "filterTo": 40}}),
    );
    assert_eq!(matching(&closed), vec![1, 5]);
}

#[test]
fn blank_and_not_blank_partition_rows() {
    let cases = [
        ("name", json!({"filterType": "text", "filter": "x"})),
        ("age", json!({"filterType": "number", "filter": 0})),
        ("joined", json!({"filterType": "date", "dateFrom": "2024-01-01 00:00:00"})),
        ("name", json!({"filterType": "object", "filter": "x"})),
    ];

    for (column, base) in cases {
        let with_kind = |kind: &str| {
            let mut node = base.clone();
            node["type"] = json!(kind);
            model(json!({ column: node }))
        };
        let blank = matching(&with_kind("blank"));
        let not_blank = matching(&with_kind("notBlank"));

        assert!(blank.iter().all(|id| !not_blank.contains(id)), "{column}");
        let mut all: Vec<i64> = blank.iter().chain(&not_blank).copied().collect();
        all.sort();
        assert_eq!(all, vec![1, 2, 3, 4, 5], "{column}");
    }
}

#[test]
fn malformed_date_only_drops_its_column() {
    let m = model(json!({
        "joined": {"filterType": "date", "type": "equals", "dateFrom": "yesterday"},
        "age": {"filterType": "number", "type": "greaterThan", "filter": 30}
    }));

    let backend = MemoryBackend::new();
    let observer = RecordingObserver::default();
    let predicate = PredicateCompiler::new(&backend, &observer).compile(&m);
    let rows: Vec<Row> = people().into_iter().filter(|r| predicate(r)).collect();

    assert_eq!(ids(&rows), vec![1, 4]);
    assert_eq!(observer.failed_columns(), vec!["joined".to_string()]);
}

#[test]
fn date_comparisons() {
    let m = model(json!({
        "joined": {"filterType": "date", "type": "lessThan", "dateFrom": "2024-01-01 00:00:00"}
    }));
    assert_eq!(matching(&m), vec![1]);

    let m = model(json!({
        "joined": {
            "filterType": "date",
            "type": "inRange",
            "dateFrom": "2024-01-01 00:00:00",
            "dateTo": "2024-06-30 23:59:59"
        }
    }));
    assert_eq!(matching(&m), vec![2]);
}

#[test]
fn boolean_filters() {
    let m = model(json!({"active": {"filterType": "boolean", "type": "true"}}));
    assert_eq!(matching(&m), vec![1, 3, 5]);

    // No kind compares with false
    let m = model(json!({"active": {"filterType": "boolean"}}));
    assert_eq!(matching(&m), vec![2, 4]);
}

#[test]
fn object_filter_compares_text_form() {
    let m = model(json!({"id": {"filterType": "object", "type": "equals", "filter": "3"}}));
    assert_eq!(matching(&m), vec![3]);
}

#[test]
fn build_page_windows() {
    let observer = RecordingObserver::default();
    let page = |start, end| build_page(start, end, SortSpec::unsorted(), &observer);

    let first = page(Some(0), Some(10)).unwrap();
    assert_eq!((first.page_index, first.page_size), (0, 10));
    let second = page(Some(10), Some(20)).unwrap();
    assert_eq!((second.page_index, second.page_size), (1, 10));

    assert!(page(Some(5), Some(5)).is_none());
    assert!(page(None, Some(10)).is_none());
    assert_eq!(
        observer.rejected_pages(),
        vec![
            PageError::EmptyRange {
                start_row: 5,
                end_row: 5
            },
            PageError::MissingBounds {
                start_row: None,
                end_row: Some(10)
            },
        ]
    );
}

#[test]
fn request_end_to_end() {
    let request = |start: i64, end: i64| {
        let body = json!({
            "startRow": start,
            "endRow": end,
            "sortModel": [{"colId": "age", "sort": "desc"}],
            "filterModel": {"active": {"filterType": "boolean", "type": "true"}},
            "rowGroupCols": [],
            "pivotMode": false
        });
        parse_request(&body.to_string(), &RequestLimits::default()).unwrap()
    };

    let backend = MemoryBackend::new();
    let observer = RecordingObserver::default();

    let query = GridQuery::build(&request(0, 2), &backend, &observer);
    assert_eq!(ids(&backend.execute(people(), &query)), vec![1, 5]);

    let query = GridQuery::build(&request(2, 4), &backend, &observer);
    assert_eq!(ids(&backend.execute(people(), &query)), vec![3]);
    assert!(observer.rejected_pages().is_empty());
}

#[test]
fn extreme_start_row_is_rejected_not_paged() {
    let body = r#"{"startRow": -9223372036854775808, "endRow": 1}"#;
    let request = parse_request(body, &RequestLimits::default()).unwrap();

    let backend = MemoryBackend::new();
    let observer = RecordingObserver::default();
    let query = GridQuery::build(&request, &backend, &observer);

    assert!(query.page.is_none());
    assert_eq!(
        observer.rejected_pages(),
        vec![PageError::NegativeStart {
            start_row: i64::MIN
        }]
    );
}

#[test]
fn invalid_range_fetches_unpaged() {
    let body = json!({"startRow": 20, "endRow": 10, "sortModel": [{"colId": "id", "sort": "asc"}]});
    let request = parse_request(&body.to_string(), &RequestLimits::default()).unwrap();

    let backend = MemoryBackend::new();
    let observer = RecordingObserver::default();
    let query = GridQuery::build(&request, &backend, &observer);

    assert!(query.page.is_none());
    assert_eq!(ids(&backend.execute(people(), &query)), vec![1, 2, 3, 4, 5]);
    assert_eq!(observer.rejected_pages().len(), 1);
}
