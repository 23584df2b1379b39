use std::time::Duration;

use serde::{Deserialize, Serialize};
use tradeview_core::ViewType;
use url::Url;

use crate::RetryPolicy;

pub const DEFAULT_BASE_URL: &str = "https://panjiva.com/shipment_search/company";
pub const DEFAULT_LOGIN_URL: &str = "https://panjiva.com/account/login";

/// Timeouts and settle delays of a run.
///
/// The upstream pages are slow and their widgets never signal completion, so
/// the settle delays are fixed waits rather than events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestSettings {
    pub navigation_timeout_ms: u64,
    pub results_timeout_ms: u64,
    pub table_attach_timeout_ms: u64,
    pub click_timeout_ms: u64,
    pub reload_timeout_ms: u64,
    pub consent_timeout_ms: u64,
    pub density_settle_ms: u64,
    pub page_settle_ms: u64,
    pub table_retry: RetryPolicy,
}

impl Default for HarvestSettings {
    fn default() -> Self {
        Self {
            navigation_timeout_ms: 120_000,
            results_timeout_ms: 120_000,
            table_attach_timeout_ms: 60_000,
            click_timeout_ms: 15_000,
            reload_timeout_ms: 60_000,
            consent_timeout_ms: 5_000,
            density_settle_ms: 15_000,
            page_settle_ms: 15_000,
            table_retry: RetryPolicy::default(),
        }
    }
}

impl HarvestSettings {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn results_timeout(&self) -> Duration {
        Duration::from_millis(self.results_timeout_ms)
    }

    pub fn table_attach_timeout(&self) -> Duration {
        Duration::from_millis(self.table_attach_timeout_ms)
    }

    pub fn click_timeout(&self) -> Duration {
        Duration::from_millis(self.click_timeout_ms)
    }

    pub fn reload_timeout(&self) -> Duration {
        Duration::from_millis(self.reload_timeout_ms)
    }

    pub fn consent_timeout(&self) -> Duration {
        Duration::from_millis(self.consent_timeout_ms)
    }

    pub fn density_settle(&self) -> Duration {
        Duration::from_millis(self.density_settle_ms)
    }

    pub fn page_settle(&self) -> Duration {
        Duration::from_millis(self.page_settle_ms)
    }
}

/// CSS selectors for every element the harvester touches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub empty_marker: String,
    pub results_container: String,
    /// Any row attached to the results body, placeholder included.
    pub attached_rows: String,
    /// Data rows, placeholder excluded.
    pub data_rows: String,
    /// Data cells within a row, action cell excluded.
    pub data_cells: String,
    /// Count element; `{class}` is replaced by the view's count class.
    pub count_template: String,
    pub count_attribute: String,
    pub page_size_toggle: String,
    pub page_size_options: String,
    pub next_page: String,
    pub consent_button: String,
    pub login_email: String,
    pub login_password: String,
    pub login_submit: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            empty_marker: ".no-results h3".into(),
            results_container: "#export_records_results".into(),
            attached_rows: "#results_set_wrapper tbody tr".into(),
            data_rows: "#results_set_wrapper tbody tr:not(.missing-row)".into(),
            data_cells: "td.wrap:not(.view-record)".into(),
            count_template: ".aggr-stat-container.{class} .notranslate.t2tt".into(),
            count_attribute: "title".into(),
            page_size_toggle: "#per_page_control_chosen .chosen-single".into(),
            page_size_options: ".chosen-drop .active-result".into(),
            next_page: r#"#paging_div .results-by-page a[aria-label="Last Page"]"#.into(),
            consent_button: "#onetrust-accept-btn-handler".into(),
            login_email: r#"input[name="email"]"#.into(),
            login_password: r#"input[name="password"]"#.into(),
            login_submit: "#main_login_signin".into(),
        }
    }
}

impl Selectors {
    pub fn count_for(&self, view: ViewType) -> String {
        self.count_template.replace("{class}", view.count_class())
    }
}

/// Canonical URL of each view for an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewUrls {
    base: Url,
}

impl ViewUrls {
    pub fn new(base: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base: Url::parse(base)?,
        })
    }

    pub fn url_for(&self, view: ViewType, entity_id: &str) -> String {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("m", view.slug())
            .append_pair("permanent_id", entity_id)
            .append_pair("type", "all_profile");
        url.to_string()
    }
}

impl Default for ViewUrls {
    fn default() -> Self {
        Self {
            base: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
        }
    }
}
