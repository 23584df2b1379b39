use std::fmt;

use serde::{Serialize, Serializer};

/// Terminal classification of a run. Starts as `Unconfirmed` and is never
/// reset to it; later writes overwrite earlier ones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunStatus {
    #[default]
    Unconfirmed,
    NoResultsFound,
    PageTooLarge,
    Success,
    PleaseReview,
    Failed(String),
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Unconfirmed => write!(f, "Unconfirmed"),
            RunStatus::NoResultsFound => write!(f, "No Results Found"),
            RunStatus::PageTooLarge => write!(f, "Page Too Large"),
            RunStatus::Success => write!(f, "Success"),
            RunStatus::PleaseReview => write!(f, "Please Review"),
            RunStatus::Failed(reason) => write!(f, "Failed: {reason}"),
        }
    }
}

impl Serialize for RunStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
