use std::num::IntErrorKind;

use thiserror::Error;

/// Declared counts at or above this are never paginated.
pub const OVERSIZED_THRESHOLD: u64 = 10_000;
/// Ceiling applied to the expected count once the page density was raised.
pub const RECONCILIATION_CEILING: u64 = 5_000;
/// Hard cap on pages traversed for a single view.
pub const MAX_PAGES: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CountParseError {
    #[error("declared count {0:?} is not a non-negative integer")]
    Malformed(String),
}

/// Parses a declared record count such as `"12,345"`.
pub fn parse_declared_count(raw: &str) -> Result<u64, CountParseError> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() || !cleaned.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CountParseError::Malformed(raw.to_string()));
    }
    match cleaned.parse::<u64>() {
        Ok(count) => Ok(count),
        // All digits but too long: saturate so the count still reads as oversized.
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => Ok(u64::MAX),
        Err(_) => Err(CountParseError::Malformed(raw.to_string())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountState {
    Tractable(u64),
    Oversized,
}

impl CountState {
    pub fn classify(declared: u64) -> Self {
        if declared >= OVERSIZED_THRESHOLD {
            CountState::Oversized
        } else {
            CountState::Tractable(declared)
        }
    }
}

/// Rows rendered per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Density {
    /// The page never offered a size control.
    Default,
    /// The size control was switched to its largest option.
    Raised,
}

impl Density {
    pub fn rows_per_page(self) -> u32 {
        match self {
            Density::Default => 20,
            Density::Raised => 100,
        }
    }

    /// Count used both for budgeting and later reconciliation.
    ///
    /// Only a raised density applies the reconciliation ceiling; the default
    /// density keeps the raw declared count.
    pub fn effective_count(self, declared: u64) -> u64 {
        match self {
            Density::Raised => declared.min(RECONCILIATION_CEILING),
            Density::Default => declared,
        }
    }
}

/// Number of pages to traverse for one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PageBudget(u32);

impl PageBudget {
    /// `min(ceil(effective / rows_per_page), MAX_PAGES)`, never below one page.
    pub fn for_count(declared: u64, density: Density) -> Self {
        let effective = density.effective_count(declared);
        let rows = u64::from(density.rows_per_page());
        let pages = effective.div_ceil(rows).min(u64::from(MAX_PAGES));
        // pages <= MAX_PAGES, so the narrowing cannot truncate.
        PageBudget((pages as u32).max(1))
    }

    pub fn pages(self) -> u32 {
        self.0
    }

    /// Upper bound on records a view may accumulate under this budget.
    pub fn max_records(self, density: Density) -> usize {
        self.0 as usize * density.rows_per_page() as usize
    }
}
