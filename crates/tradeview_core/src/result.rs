use std::collections::BTreeMap;

use serde::Serialize;

use crate::{Record, RunStatus, ViewType};

/// An error that cut a view's pipeline short.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewError {
    pub view: ViewType,
    pub message: String,
}

/// Everything one run produced. Mutated only through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    entity_id: String,
    records: BTreeMap<ViewType, Vec<Record>>,
    status: RunStatus,
    shipment_expected: Option<u64>,
    errors: Vec<ViewError>,
    finalized: bool,
}

impl RunResult {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            records: BTreeMap::new(),
            status: RunStatus::Unconfirmed,
            shipment_expected: None,
            errors: Vec::new(),
            finalized: false,
        }
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn status(&self) -> &RunStatus {
        &self.status
    }

    /// Records of `view` in row-then-page order.
    pub fn records(&self, view: ViewType) -> &[Record] {
        self.records.get(&view).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn record_count(&self, view: ViewType) -> usize {
        self.records(view).len()
    }

    /// Expected count retained from the Shipment view, when it was paginated.
    pub fn shipment_expected(&self) -> Option<u64> {
        self.shipment_expected
    }

    pub fn errors(&self) -> &[ViewError] {
        &self.errors
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub(crate) fn set_status(&mut self, status: RunStatus) {
        self.status = status;
    }

    pub(crate) fn append(&mut self, view: ViewType, records: Vec<Record>) {
        self.records.entry(view).or_default().extend(records);
    }

    pub(crate) fn retain_shipment_expected(&mut self, expected: u64) {
        self.shipment_expected = Some(expected);
    }

    pub(crate) fn push_error(&mut self, view: ViewType, message: String) {
        self.errors.push(ViewError { view, message });
    }

    pub(crate) fn mark_finalized(&mut self) {
        self.finalized = true;
    }
}
