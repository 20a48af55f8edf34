//! Query backends
//!
//! The grid compilers build predicates through the [`QueryBackend`] trait:
//! - `sql` - Renders predicates to parameterised SQL for DuckDB, PostgreSQL and SQLite
//! - `memory` - Evaluates predicates against in-memory JSON rows
//! - `error` - Unified error type for backends

pub mod backend;
pub mod error;
pub mod memory;
pub mod sql;

pub use backend::{ColumnKind, QueryBackend, Value};
pub use error::DataError;
pub use memory::{MemoryBackend, Row};
pub use sql::{Backend, SqlBackend, SqlStatement};
