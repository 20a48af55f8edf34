//! Page request builder
//!
//! Grids ask for a row window (`startRow..endRow`); backends page by index and
//! size. The index is `startRow / pageSize`, which only lines up with the
//! requested window when the grid asks for aligned blocks of a fixed size.

use serde::Serialize;

use super::error::PageError;
use super::observer::CompileObserver;
use super::sort::SortSpec;

/// Zero-based page of rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page_index: u64,
    pub page_size: u64,
    pub sort: SortSpec,
}

impl PageRequest {
    /// Row offset of the first row of the page
    pub fn offset(&self) -> u64 {
        self.page_index * self.page_size
    }
}

fn validate_range(start_row: Option<i64>, end_row: Option<i64>) -> Result<(u64, u64), PageError> {
    let (Some(start_row), Some(end_row)) = (start_row, end_row) else {
        return Err(PageError::MissingBounds { start_row, end_row });
    };
    if start_row >= end_row {
        return Err(PageError::EmptyRange { start_row, end_row });
    }
    if start_row < 0 {
        return Err(PageError::NegativeStart { start_row });
    }
    // 0 <= start_row < end_row, so the difference cannot overflow
    let page_size = end_row - start_row;
    if page_size <= 0 {
        return Err(PageError::NonPositiveSize { page_size });
    }
    let page_size = page_size as u64;
    Ok((start_row as u64 / page_size, page_size))
}

/// Build a page request from a row range.
///
/// Returns `None` (after reporting to `observer`) when the range is missing a
/// bound, empty, or starts before row 0; callers then fetch unpaged.
pub fn build_page(
    start_row: Option<i64>,
    end_row: Option<i64>,
    sort: SortSpec,
    observer: &dyn CompileObserver,
) -> Option<PageRequest> {
    match validate_range(start_row, end_row) {
        Ok((page_index, page_size)) => {
            tracing::info!(
                page_index,
                page_size,
                start_row,
                end_row,
                sort = %sort,
                "Created page request"
            );
            Some(PageRequest {
                page_index,
                page_size,
                sort,
            })
        }
        Err(e) => {
            observer.page_rejected(&e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::observer::testing::RecordingObserver;
    use crate::domain::grid::sort::{SortModel, build_sort};

    fn request_page(
        start: Option<i64>,
        end: Option<i64>,
    ) -> (Option<PageRequest>, RecordingObserver) {
        let observer = RecordingObserver::default();
        let page = build_page(start, end, SortSpec::unsorted(), &observer);
        (page, observer)
    }

    #[test]
    fn first_page() {
        let (page, observer) = request_page(Some(0), Some(10));
        let page = page.unwrap();
        assert_eq!(page.page_index, 0);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.offset(), 0);
        assert!(observer.rejected_pages().is_empty());
    }

    #[test]
    fn second_page() {
        let (page, _) = request_page(Some(10), Some(20));
        let page = page.unwrap();
        assert_eq!((page.page_index, page.page_size), (1, 10));
        assert_eq!(page.offset(), 10);
    }

    #[test]
    fn unaligned_window_rounds_down() {
        let (page, _) = request_page(Some(5), Some(15));
        let page = page.unwrap();
        assert_eq!((page.page_index, page.page_size), (0, 10));
    }

    #[test]
    fn empty_range_is_rejected() {
        let (page, observer) = request_page(Some(5), Some(5));
        assert!(page.is_none());
        assert_eq!(
            observer.rejected_pages(),
            vec![PageError::EmptyRange {
                start_row: 5,
                end_row: 5
            }]
        );
    }

    #[test]
    fn reversed_range_is_rejected() {
        let (page, _) = request_page(Some(20), Some(10));
        assert!(page.is_none());
    }

    #[test]
    fn missing_bounds_are_rejected() {
        let (page, observer) = request_page(None, Some(10));
        assert!(page.is_none());
        assert_eq!(
            observer.rejected_pages(),
            vec![PageError::MissingBounds {
                start_row: None,
                end_row: Some(10)
            }]
        );

        let (page, _) = request_page(Some(0), None);
        assert!(page.is_none());
    }

    #[test]
    fn negative_start_is_rejected() {
        let (page, observer) = request_page(Some(-10), Some(0));
        assert!(page.is_none());
        assert_eq!(
            observer.rejected_pages(),
            vec![PageError::NegativeStart { start_row: -10 }]
        );
    }

    #[test]
    fn extreme_bounds_do_not_overflow() {
        let (page, observer) = request_page(Some(i64::MIN), Some(1));
        assert!(page.is_none());
        assert_eq!(
            observer.rejected_pages(),
            vec![PageError::NegativeStart {
                start_row: i64::MIN
            }]
        );

        let (page, _) = request_page(Some(-1), Some(i64::MAX));
        assert!(page.is_none());

        let (page, _) = request_page(Some(0), Some(i64::MAX));
        let page = page.unwrap();
        assert_eq!((page.page_index, page.page_size), (0, i64::MAX as u64));
    }

    #[test]
    fn page_carries_sort() {
        let sort = build_sort(&[SortModel::new("name", "asc")]);
        let observer = RecordingObserver::default();
        let page = build_page(Some(0), Some(50), sort.clone(), &observer).unwrap();
        assert_eq!(page.sort, sort);
    }
}
