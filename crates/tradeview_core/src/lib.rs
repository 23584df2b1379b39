//! Tradeview core: pure data model, page arithmetic and the run reducer.
mod count;
mod msg;
mod record;
mod report;
mod result;
mod status;
mod update;
mod view;

pub use count::{
    parse_declared_count, CountParseError, CountState, Density, PageBudget, MAX_PAGES,
    OVERSIZED_THRESHOLD, RECONCILIATION_CEILING,
};
pub use msg::RunEvent;
pub use record::{ConsigneeRecord, Record, ShipmentRecord, ShipperRecord, RECORD_CELLS};
pub use report::{ReportTarget, RunReport, ViewReport};
pub use result::{RunResult, ViewError};
pub use status::RunStatus;
pub use update::update;
pub use view::{ViewState, ViewType};
