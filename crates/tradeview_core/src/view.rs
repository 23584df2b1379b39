use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three report perspectives for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    Consignee,
    Shipper,
    Shipment,
}

impl ViewType {
    /// Fixed processing order of a run.
    pub const ORDER: [ViewType; 3] = [ViewType::Consignee, ViewType::Shipper, ViewType::Shipment];

    /// Value of the `m` query parameter selecting this view.
    pub fn slug(self) -> &'static str {
        match self {
            ViewType::Consignee => "merged_consignee",
            ViewType::Shipper => "merged_shipper",
            ViewType::Shipment => "shipments",
        }
    }

    /// Class distinguishing this view's aggregate-count container.
    pub fn count_class(self) -> &'static str {
        match self {
            ViewType::Consignee => "consignees",
            ViewType::Shipper => "shippers",
            ViewType::Shipment => "shipments",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewType::Consignee => "consignee",
            ViewType::Shipper => "shipper",
            ViewType::Shipment => "shipment",
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification of a view right after navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Empty,
    Populated,
}
