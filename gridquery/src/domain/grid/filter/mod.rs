//! Grid filter system
//!
//! Decodes the grid `filterModel` into typed filter nodes and compiles them
//! into a backend predicate.
//!
//! ## Usage
//!
//! ```
//! use gridquery::data::MemoryBackend;
//! use gridquery::domain::grid::filter::{FilterModel, PredicateCompiler};
//! use gridquery::domain::grid::observer::TracingObserver;
//!
//! let json = r#"{"name": {"filterType": "text", "type": "contains", "filter": "an"}}"#;
//! let model: FilterModel = serde_json::from_str(json).unwrap();
//! let backend = MemoryBackend::new();
//! let predicate = PredicateCompiler::new(&backend, &TracingObserver).compile(&model);
//!
//! let row = serde_json::json!({"name": "Joanna"});
//! assert!(predicate(row.as_object().unwrap()));
//! ```

mod compiler;
mod types;

pub use compiler::PredicateCompiler;
pub use types::{
    BooleanFilter, BooleanFilterKind, DateFilter, FilterModel, FilterNode, JoinOperator,
    Junction, NumberFilter, ObjectFilter, ScalarFilterKind, TextFilter, TextFilterKind,
};
