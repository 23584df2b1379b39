use engine_logging::engine_info;
use tradeview_core::{ViewState, ViewType};

use crate::{DriverError, HarvestSettings, PageDriver, Selectors, ViewUrls, WaitState};

/// Brings the driver to the canonical URL of `view` and classifies what it shows.
///
/// Navigation is skipped when the driver is already there. An empty-results
/// marker short-circuits to [`ViewState::Empty`] since the results container
/// is never rendered alongside it.
pub async fn navigate_view(
    driver: &dyn PageDriver,
    urls: &ViewUrls,
    view: ViewType,
    entity_id: &str,
    selectors: &Selectors,
    settings: &HarvestSettings,
) -> Result<ViewState, DriverError> {
    let url = urls.url_for(view, entity_id);
    if driver.current_url().await?.as_deref() == Some(url.as_str()) {
        engine_info!("already on {}", url);
    } else {
        driver.navigate(&url, settings.navigation_timeout()).await?;
        engine_info!("navigated to {}", url);
    }

    if driver.count(&selectors.empty_marker).await? > 0 {
        engine_info!("no results found");
        return Ok(ViewState::Empty);
    }

    driver
        .wait_for_selector(
            &selectors.results_container,
            WaitState::Attached,
            settings.results_timeout(),
        )
        .await?;
    engine_info!("results container appeared");
    Ok(ViewState::Populated)
}
