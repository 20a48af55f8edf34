//! Grid query assembly
//!
//! Runs the filter compiler, sort builder and page builder over one request.

use crate::data::QueryBackend;

use super::filter::PredicateCompiler;
use super::observer::CompileObserver;
use super::paging::{PageRequest, build_page};
use super::request::GetRowsRequest;
use super::sort::{SortSpec, build_sort};

/// Everything a backend needs to fetch one block of grid rows
pub struct GridQuery<B: QueryBackend> {
    pub predicate: B::Predicate,
    pub sort: SortSpec,
    /// `None` means fetch unpaged
    pub page: Option<PageRequest>,
}

impl<B: QueryBackend> GridQuery<B> {
    pub fn build(request: &GetRowsRequest, backend: &B, observer: &dyn CompileObserver) -> Self {
        let predicate = PredicateCompiler::new(backend, observer).compile(&request.filter_model);
        let sort = build_sort(&request.sort_model);
        let page = build_page(request.start_row, request.end_row, sort.clone(), observer);
        Self {
            predicate,
            sort,
            page,
        }
    }
}
