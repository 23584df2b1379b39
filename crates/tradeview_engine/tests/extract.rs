mod common;

use std::time::Duration;

use common::{view_url, ResultsPage};
use pretty_assertions::assert_eq;
use tradeview_core::{Record, ShipmentRecord, ViewType};
use tradeview_engine::{extract_page, PageDriver, Selectors, StaticSite, StaticSiteDriver};

async fn extract(page: ResultsPage, view: ViewType) -> Vec<Record> {
    let url = view_url(view);
    let driver = StaticSiteDriver::new(StaticSite::new().with_page(&url, page.html()));
    driver.navigate(&url, Duration::from_secs(1)).await.unwrap();
    extract_page(&driver, view, &Selectors::default())
        .await
        .unwrap()
}

#[tokio::test]
async fn rows_become_trimmed_records_in_order() {
    let page = ResultsPage::new(ViewType::Shipment, "2")
        .row(&["  Acme Imports\n", " Widget Co ", "\t8471.30", "Laptops  "])
        .row(&["Beta", "Gamma", "9403", "Furniture"]);
    let records = extract(page, ViewType::Shipment).await;

    assert_eq!(
        records,
        vec![
            Record::Shipment(ShipmentRecord {
                consignee: "Acme Imports".into(),
                shipper: "Widget Co".into(),
                hs_code: "8471.30".into(),
                goods_shipped: "Laptops".into(),
            }),
            Record::Shipment(ShipmentRecord {
                consignee: "Beta".into(),
                shipper: "Gamma".into(),
                hs_code: "9403".into(),
                goods_shipped: "Furniture".into(),
            }),
        ]
    );
}

#[tokio::test]
async fn short_rows_are_skipped_not_fatal() {
    let page = ResultsPage::new(ViewType::Shipper, "3")
        .row(&["first", "a", "b", "c"])
        .row(&["broken", "row"])
        .row(&["third", "a", "b", "c"]);
    let records = extract(page, ViewType::Shipper).await;

    let names: Vec<_> = records.iter().map(|r| r.fields()[0].to_string()).collect();
    assert_eq!(names, vec!["first", "third"]);
}

#[tokio::test]
async fn placeholder_row_and_action_cell_are_excluded() {
    // No rows: only the missing-row placeholder is rendered.
    let records = extract(ResultsPage::new(ViewType::Consignee, "0"), ViewType::Consignee).await;
    assert!(records.is_empty());

    // The view-record action cell precedes the data and must not shift columns.
    let page =
        ResultsPage::new(ViewType::Consignee, "1").row(&["Name", "Global", "Local", "Parent"]);
    let records = extract(page, ViewType::Consignee).await;
    assert_eq!(records[0].fields(), ["Name", "Global", "Local", "Parent"]);
}

#[tokio::test]
async fn extra_cells_are_ignored() {
    let page = ResultsPage::new(ViewType::Shipper, "1").row(&["a", "b", "c", "d", "e"]);
    let records = extract(page, ViewType::Shipper).await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].fields(), ["a", "b", "c", "d"]);
}
