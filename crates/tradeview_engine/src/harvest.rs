use engine_logging::{clear_scope, engine_info, engine_warn, set_scope};
use tradeview_core::{update, Record, RunEvent, RunResult, ViewState, ViewType};

use crate::{
    navigate_view, negotiate, paginate, HarvestSettings, Negotiation, PageDriver, PageSink,
    Selectors, StopReason, ViewError, ViewUrls,
};

impl PageSink for RunResult {
    fn page_extracted(&mut self, view: ViewType, _page: u32, records: &[Record]) {
        update(
            self,
            RunEvent::PageExtracted {
                view,
                records: records.to_vec(),
            },
        );
    }
}

/// Drives the three views of an entity over one page driver.
pub struct Harvester<D> {
    driver: D,
    urls: ViewUrls,
    selectors: Selectors,
    settings: HarvestSettings,
}

impl<D: PageDriver> Harvester<D> {
    pub fn new(driver: D, urls: ViewUrls, selectors: Selectors, settings: HarvestSettings) -> Self {
        Self {
            driver,
            urls,
            selectors,
            settings,
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Harvests every view in fixed order and derives the final status.
    ///
    /// A failing view is recorded and never stops the views after it.
    pub async fn run(&self, entity_id: &str) -> RunResult {
        let mut run = RunResult::new(entity_id);
        for view in ViewType::ORDER {
            set_scope(view.label());
            if let Err(err) = self.harvest_view(view, &mut run).await {
                engine_warn!("view failed: {}", err);
                update(
                    &mut run,
                    RunEvent::ViewFailed {
                        view,
                        reason: err.to_string(),
                    },
                );
            }
            clear_scope();
        }
        update(&mut run, RunEvent::Finalize);
        engine_info!(
            "run for {} finished with status {}",
            run.entity_id(),
            run.status()
        );
        run
    }

    async fn harvest_view(&self, view: ViewType, run: &mut RunResult) -> Result<(), ViewError> {
        let driver: &dyn PageDriver = &self.driver;
        let state = navigate_view(
            driver,
            &self.urls,
            view,
            run.entity_id(),
            &self.selectors,
            &self.settings,
        )
        .await?;
        if state == ViewState::Empty {
            update(run, RunEvent::NoResults { view });
            return Ok(());
        }

        match negotiate(driver, view, &self.selectors, &self.settings).await? {
            Negotiation::Oversized { declared } => {
                update(run, RunEvent::Oversized { view, declared });
            }
            Negotiation::Tractable {
                density,
                budget,
                expected,
                ..
            } => {
                let pagination = paginate(
                    driver,
                    view,
                    budget,
                    density,
                    &self.selectors,
                    &self.settings,
                    run,
                )
                .await;
                engine_info!(
                    "{} records from {} pages, expected {}",
                    pagination.records.len(),
                    pagination.pages_extracted,
                    expected
                );
                let aborted = match pagination.stop {
                    StopReason::Aborted(err) => Some(err.to_string()),
                    StopReason::Exhausted | StopReason::BudgetReached => None,
                };
                update(
                    run,
                    RunEvent::Paginated {
                        view,
                        expected,
                        aborted,
                    },
                );
            }
        }
        Ok(())
    }
}
