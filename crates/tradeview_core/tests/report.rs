use tradeview_core::{update, Record, ReportTarget, RunEvent, RunReport, RunResult, ViewType};

#[test]
fn report_lists_views_in_fixed_order_with_counts() {
    let mut run = RunResult::new("44402588");
    let record = Record::from_cells(ViewType::Shipper, &["a", "b", "c", "d"]).unwrap();
    update(
        &mut run,
        RunEvent::PageExtracted {
            view: ViewType::Shipper,
            records: vec![record.clone(), record],
        },
    );
    update(&mut run, RunEvent::NoResults { view: ViewType::Shipment });
    update(&mut run, RunEvent::Finalize);

    let target = ReportTarget {
        spreadsheet_id: Some("sheet-1".into()),
        sheet_name: Some("Sheet1".into()),
    };
    let report = RunReport::new(&run, &target, "2026-01-01T00:00:00Z");
    let order: Vec<_> = report.views.iter().map(|v| v.view).collect();
    assert_eq!(order, ViewType::ORDER.to_vec());
    assert_eq!(report.total_records(), 2);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["entityId"], "44402588");
    assert_eq!(json["status"], "No Results Found");
    assert_eq!(json["views"][1]["view"], "shipper");
    assert_eq!(json["views"][1]["count"], 2);
    assert_eq!(json["views"][1]["records"][0]["shipperGlobalHq"], "b");
    assert_eq!(json["spreadsheetId"], "sheet-1");
    assert_eq!(json["generatedAt"], "2026-01-01T00:00:00Z");
}

#[test]
fn report_omits_absent_sheet_target() {
    let run = RunResult::new("1");
    let report = RunReport::new(&run, &ReportTarget::default(), "now");
    let json = serde_json::to_value(&report).unwrap();
    assert!(json.get("spreadsheetId").is_none());
    assert_eq!(json["status"], "Unconfirmed");
    assert!(json["shipmentExpected"].is_null());
}

#[test]
fn report_target_reads_snake_case_keys() {
    let target: ReportTarget =
        serde_json::from_str(r#"{"spreadsheet_id": "sheet-1", "sheet_name": "Trades"}"#).unwrap();
    assert_eq!(target.spreadsheet_id.as_deref(), Some("sheet-1"));
    assert_eq!(target.sheet_name.as_deref(), Some("Trades"));

    assert!(serde_json::from_str::<ReportTarget>(r#"{"sheetName": "Trades"}"#).is_err());
}
