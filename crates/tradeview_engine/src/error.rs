use thiserror::Error;
use tradeview_core::ViewType;

/// Failures surfaced by a [`crate::PageDriver`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    #[error("navigation to {url} did not settle within {timeout_ms} ms")]
    NavigationTimeout { url: String, timeout_ms: u64 },
    #[error("selector {selector:?} did not reach the expected state within {timeout_ms} ms")]
    WaitTimeout { selector: String, timeout_ms: u64 },
    #[error("click did not complete within {timeout_ms} ms")]
    ClickTimeout { timeout_ms: u64 },
    #[error("navigation failed: {0}")]
    Navigation(String),
    #[error("invalid selector {0:?}")]
    InvalidSelector(String),
    #[error("element handle is stale")]
    StaleElement,
    #[error("browser protocol error: {0}")]
    Protocol(String),
}

/// Failure of one view's pipeline. Its text becomes the `Failed` reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error(transparent)]
    Driver(#[from] DriverError),
    #[error("{view} view declared a malformed record count {raw:?}")]
    MalformedCount { view: ViewType, raw: String },
    #[error("{view} view has no declared record count")]
    MissingCount { view: ViewType },
}
