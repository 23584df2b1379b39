use crate::{Record, ViewType};

/// Observations the harvester reports while processing views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// The view showed its empty-results marker.
    NoResults { view: ViewType },
    /// The declared count met the oversized threshold; pagination skipped.
    Oversized { view: ViewType, declared: u64 },
    /// One page of records, in row order.
    PageExtracted { view: ViewType, records: Vec<Record> },
    /// Pagination ended. `expected` is the (possibly capped) declared count.
    Paginated {
        view: ViewType,
        expected: u64,
        aborted: Option<String>,
    },
    /// The view's pipeline failed before or outside pagination.
    ViewFailed { view: ViewType, reason: String },
    /// All views processed; derive the final status.
    Finalize,
}
