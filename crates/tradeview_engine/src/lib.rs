//! Tradeview engine: browser-driven extraction of the three report views.
mod density;
mod driver;
mod error;
mod extract;
mod harvest;
mod navigator;
mod paginate;
mod persist;
mod retry;
mod session;
mod settings;
mod static_site;

#[cfg(feature = "chromium")]
pub mod chromium;

pub use density::{negotiate, Negotiation};
pub use driver::{ElementHandle, PageDriver, WaitState};
pub use error::{DriverError, ViewError};
pub use extract::extract_page;
pub use harvest::Harvester;
pub use navigator::navigate_view;
pub use paginate::{paginate, PageSink, Pagination, StopReason};
pub use persist::{ensure_output_dir, PersistError, ReportWriter};
pub use retry::{with_attempts, RetryPolicy};
pub use session::{dismiss_consent, login, Credentials};
pub use settings::{HarvestSettings, Selectors, ViewUrls, DEFAULT_BASE_URL, DEFAULT_LOGIN_URL};
pub use static_site::{DriverCall, StaticSite, StaticSiteDriver};
