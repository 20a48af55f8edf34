//! Diagnostics for recoverable grid failures
//!
//! Compilers report what they skip to an observer instead of logging
//! inline, so hosts can route the events wherever they like.

use super::error::{FilterError, PageError};
use super::filter::FilterNode;

pub trait CompileObserver: Send + Sync {
    /// A filter node on `column` failed to compile and was dropped
    fn column_failed(&self, column: &str, node: &FilterNode, error: &FilterError);

    /// A row range was rejected and no page was built
    fn page_rejected(&self, error: &PageError);
}

/// Default observer writing to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CompileObserver for TracingObserver {
    fn column_failed(&self, column: &str, node: &FilterNode, error: &FilterError) {
        tracing::error!(
            column,
            filter = ?node,
            error = %error,
            "Error creating predicate for column"
        );
    }

    fn page_rejected(&self, error: &PageError) {
        tracing::error!(error = %error, "Invalid row range, not paginating");
    }
}
