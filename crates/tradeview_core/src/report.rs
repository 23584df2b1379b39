use serde::{Deserialize, Serialize};

use crate::{Record, RunResult, RunStatus, ViewError, ViewType};

/// Where the external reporter should deliver the run.
///
/// Read from config with snake_case keys; [`RunReport`] carries the fields on.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportTarget {
    pub spreadsheet_id: Option<String>,
    pub sheet_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewReport {
    pub view: ViewType,
    pub count: usize,
    pub records: Vec<Record>,
}

/// Serializable snapshot of a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub entity_id: String,
    pub status: RunStatus,
    pub views: Vec<ViewReport>,
    pub shipment_expected: Option<u64>,
    pub errors: Vec<ViewError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spreadsheet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet_name: Option<String>,
    pub generated_at: String,
}

impl RunReport {
    pub fn new(run: &RunResult, target: &ReportTarget, generated_at: impl Into<String>) -> Self {
        let views = ViewType::ORDER
            .iter()
            .map(|&view| ViewReport {
                view,
                count: run.record_count(view),
                records: run.records(view).to_vec(),
            })
            .collect();
        Self {
            entity_id: run.entity_id().to_string(),
            status: run.status().clone(),
            views,
            shipment_expected: run.shipment_expected(),
            errors: run.errors().to_vec(),
            spreadsheet_id: target.spreadsheet_id.clone(),
            sheet_name: target.sheet_name.clone(),
            generated_at: generated_at.into(),
        }
    }

    pub fn total_records(&self) -> usize {
        self.views.iter().map(|v| v.count).sum()
    }
}
