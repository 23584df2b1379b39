use serde::{Deserialize, Serialize};

use crate::ViewType;

/// Number of data cells a row must carry to produce a record.
pub const RECORD_CELLS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipperRecord {
    pub shipper: String,
    pub shipper_global_hq: String,
    pub shipper_local_hq: String,
    pub shipper_ultimate_parent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsigneeRecord {
    pub consignee: String,
    pub consignee_global_hq: String,
    pub consignee_local_hq: String,
    pub consignee_ultimate_parent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentRecord {
    pub consignee: String,
    pub shipper: String,
    pub hs_code: String,
    pub goods_shipped: String,
}

/// One extracted table row, shaped by the view it came from.
///
/// Serialized untagged so the JSON output carries only the field names of the
/// variant, e.g. `{"shipper": .., "shipperGlobalHq": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    Shipper(ShipperRecord),
    Consignee(ConsigneeRecord),
    Shipment(ShipmentRecord),
}

impl Record {
    /// Builds the record for `view` from positional cell texts.
    ///
    /// Returns `None` when fewer than [`RECORD_CELLS`] cells are given; extra
    /// cells are ignored. Every field is trimmed.
    pub fn from_cells<S: AsRef<str>>(view: ViewType, cells: &[S]) -> Option<Record> {
        if cells.len() < RECORD_CELLS {
            return None;
        }
        let field = |i: usize| cells[i].as_ref().trim().to_string();
        let record = match view {
            ViewType::Shipper => Record::Shipper(ShipperRecord {
                shipper: field(0),
                shipper_global_hq: field(1),
                shipper_local_hq: field(2),
                shipper_ultimate_parent: field(3),
            }),
            ViewType::Consignee => Record::Consignee(ConsigneeRecord {
                consignee: field(0),
                consignee_global_hq: field(1),
                consignee_local_hq: field(2),
                consignee_ultimate_parent: field(3),
            }),
            ViewType::Shipment => Record::Shipment(ShipmentRecord {
                consignee: field(0),
                shipper: field(1),
                hs_code: field(2),
                goods_shipped: field(3),
            }),
        };
        Some(record)
    }

    pub fn view(&self) -> ViewType {
        match self {
            Record::Shipper(_) => ViewType::Shipper,
            Record::Consignee(_) => ViewType::Consignee,
            Record::Shipment(_) => ViewType::Shipment,
        }
    }

    /// Field values in column order.
    pub fn fields(&self) -> [&str; RECORD_CELLS] {
        match self {
            Record::Shipper(r) => [
                &r.shipper,
                &r.shipper_global_hq,
                &r.shipper_local_hq,
                &r.shipper_ultimate_parent,
            ],
            Record::Consignee(r) => [
                &r.consignee,
                &r.consignee_global_hq,
                &r.consignee_local_hq,
                &r.consignee_ultimate_parent,
            ],
            Record::Shipment(r) => [&r.consignee, &r.shipper, &r.hs_code, &r.goods_shipped],
        }
    }
}
