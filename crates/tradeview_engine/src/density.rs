use engine_logging::engine_info;
use tradeview_core::{parse_declared_count, CountState, Density, PageBudget, ViewType};

use crate::{HarvestSettings, PageDriver, Selectors, ViewError};

/// Outcome of reading the declared count and adjusting page density.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Negotiation {
    /// Too many records to paginate; the page was left untouched.
    Oversized { declared: u64 },
    Tractable {
        declared: u64,
        density: Density,
        budget: PageBudget,
        /// Count the traversal is reconciled against.
        expected: u64,
    },
}

impl Negotiation {
    pub fn count_state(&self) -> CountState {
        match *self {
            Negotiation::Oversized { .. } => CountState::Oversized,
            Negotiation::Tractable { declared, .. } => CountState::Tractable(declared),
        }
    }
}

/// Reads the declared count of `view` and tries to raise the rows per page.
pub async fn negotiate(
    driver: &dyn PageDriver,
    view: ViewType,
    selectors: &Selectors,
    settings: &HarvestSettings,
) -> Result<Negotiation, ViewError> {
    let declared = read_declared_count(driver, view, selectors).await?;
    if let CountState::Oversized = CountState::classify(declared) {
        engine_info!("declared count {} is too large to paginate", declared);
        return Ok(Negotiation::Oversized { declared });
    }

    let density = raise_density(driver, selectors, settings).await?;
    let budget = PageBudget::for_count(declared, density);
    let expected = density.effective_count(declared);
    if expected != declared {
        engine_info!("expected count capped to {}", expected);
    }
    engine_info!(
        "max pages: {} at {} rows per page",
        budget.pages(),
        density.rows_per_page()
    );
    Ok(Negotiation::Tractable {
        declared,
        density,
        budget,
        expected,
    })
}

async fn read_declared_count(
    driver: &dyn PageDriver,
    view: ViewType,
    selectors: &Selectors,
) -> Result<u64, ViewError> {
    let selector = selectors.count_for(view);
    let element = driver
        .locate_one(&selector)
        .await?
        .ok_or(ViewError::MissingCount { view })?;
    let raw = driver
        .attribute(&element, &selectors.count_attribute)
        .await?
        .ok_or(ViewError::MissingCount { view })?;
    engine_info!("declared count: {}", raw);
    parse_declared_count(&raw).map_err(|_| ViewError::MalformedCount { view, raw })
}

async fn raise_density(
    driver: &dyn PageDriver,
    selectors: &Selectors,
    settings: &HarvestSettings,
) -> Result<Density, ViewError> {
    let Some(toggle) = driver.locate_one(&selectors.page_size_toggle).await? else {
        engine_info!("no page size control; keeping default density");
        return Ok(Density::Default);
    };
    driver.click(&toggle, settings.click_timeout()).await?;

    let options = driver.locate_all(&selectors.page_size_options).await?;
    let Some(largest) = options.last() else {
        engine_info!("page size control offered no options; keeping default density");
        return Ok(Density::Default);
    };
    driver.click(largest, settings.click_timeout()).await?;

    // The table re-renders asynchronously without any completion signal.
    driver.wait_delay(settings.density_settle()).await;
    engine_info!(
        "page size raised to {} after settling {} ms",
        Density::Raised.rows_per_page(),
        settings.density_settle_ms
    );
    Ok(Density::Raised)
}
