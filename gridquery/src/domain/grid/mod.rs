//! Server-side data grid queries
//!
//! Decodes a grid `getRows` request into a predicate, a sort spec and a page
//! request for a [`QueryBackend`](crate::data::QueryBackend).

pub mod error;
pub mod filter;
pub mod observer;
pub mod paging;
pub mod query;
pub mod request;
pub mod sort;

pub use error::{FilterError, PageError, RequestError};
pub use filter::{FilterModel, FilterNode, PredicateCompiler};
pub use observer::{CompileObserver, TracingObserver};
pub use paging::{PageRequest, build_page};
pub use query::GridQuery;
pub use request::{GetRowsRequest, RequestLimits, parse_request};
pub use sort::{SortDirection, SortModel, SortOrder, SortSpec, build_sort};
