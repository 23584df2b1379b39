use engine_logging::{engine_info, engine_warn};
use tradeview_core::{Density, PageBudget, Record, ViewType};

use crate::{
    extract_page, with_attempts, DriverError, HarvestSettings, PageDriver, Selectors, WaitState,
};

/// Receives every page as soon as it was extracted.
pub trait PageSink: Send {
    fn page_extracted(&mut self, view: ViewType, page: u32, records: &[Record]);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// No next-page control was left.
    Exhausted,
    /// The page budget was used up.
    BudgetReached,
    /// A step failed; records up to that point are kept.
    Aborted(DriverError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub records: Vec<Record>,
    pub pages_extracted: u32,
    pub stop: StopReason,
}

enum Step {
    Advanced,
    Exhausted,
}

/// Walks the result pages of `view`, at most `budget` of them.
///
/// Each page is extracted, then the trailing next-page control is clicked and
/// the document reloaded, since the site does not reliably reflect the new
/// page otherwise. The first failing step ends the traversal.
pub async fn paginate(
    driver: &dyn PageDriver,
    view: ViewType,
    budget: PageBudget,
    density: Density,
    selectors: &Selectors,
    settings: &HarvestSettings,
    sink: &mut dyn PageSink,
) -> Pagination {
    let max_records = budget.max_records(density);
    let mut records: Vec<Record> = Vec::new();
    let mut page = 0;
    let mut pages_extracted = 0;

    let stop = loop {
        if page >= budget.pages() {
            engine_info!("page budget of {} reached", budget.pages());
            break StopReason::BudgetReached;
        }

        if let Err(err) = await_table(driver, selectors, settings).await {
            engine_warn!("table never attached on page {}: {}", page + 1, err);
            break StopReason::Aborted(err);
        }

        let mut page_records = match extract_page(driver, view, selectors).await {
            Ok(page_records) => page_records,
            Err(err) => {
                engine_warn!("extraction failed on page {}: {}", page + 1, err);
                break StopReason::Aborted(err);
            }
        };
        let room = max_records.saturating_sub(records.len());
        if page_records.len() > room {
            engine_warn!(
                "page {} returned {} rows, keeping {} to stay within {}",
                page + 1,
                page_records.len(),
                room,
                max_records
            );
            page_records.truncate(room);
        }
        pages_extracted += 1;
        sink.page_extracted(view, page + 1, &page_records);
        records.extend(page_records);
        engine_info!("{} records so far", records.len());

        match advance(driver, selectors, settings).await {
            Ok(Step::Advanced) => {}
            Ok(Step::Exhausted) => {
                engine_info!("no further page control; pagination exhausted");
                break StopReason::Exhausted;
            }
            Err(err) => {
                engine_warn!("could not advance past page {}: {}", page + 1, err);
                break StopReason::Aborted(err);
            }
        }

        page += 1;
        engine_info!("processed page {} of {}", page, budget.pages());
    };

    Pagination {
        records,
        pages_extracted,
        stop,
    }
}

async fn await_table(
    driver: &dyn PageDriver,
    selectors: &Selectors,
    settings: &HarvestSettings,
) -> Result<(), DriverError> {
    let selector = selectors.attached_rows.as_str();
    let timeout = settings.table_attach_timeout();
    with_attempts(driver, &settings.table_retry, move |_| {
        driver.wait_for_selector(selector, WaitState::Attached, timeout)
    })
    .await
}

async fn advance(
    driver: &dyn PageDriver,
    selectors: &Selectors,
    settings: &HarvestSettings,
) -> Result<Step, DriverError> {
    let controls = driver.locate_all(&selectors.next_page).await?;
    let Some(next) = controls.last() else {
        return Ok(Step::Exhausted);
    };
    driver.click(next, settings.click_timeout()).await?;
    driver.wait_delay(settings.page_settle()).await;
    driver.reload(settings.reload_timeout()).await?;
    engine_info!("advanced and reloaded");
    Ok(Step::Advanced)
}
