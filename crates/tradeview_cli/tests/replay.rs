use std::path::PathBuf;
use std::process::Command;

fn demo_manifest() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/replay/site.ron")
}

fn tradeview() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tradeview"))
}

#[test]
fn replay_prints_report_to_stdout() {
    let output = tradeview()
        .args(["--entity", "44402588", "--replay"])
        .arg(demo_manifest())
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["entityId"], "44402588");
    assert_eq!(report["status"], "Success");
    assert_eq!(report["shipmentExpected"], 22);
    let counts: Vec<_> = report["views"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["count"].as_u64().unwrap())
        .collect();
    assert_eq!(counts, vec![2, 0, 22]);
    assert_eq!(report["views"][0]["records"][1]["consignee"], "Northwind Trading");
    assert_eq!(report["views"][2]["records"][21]["goodsShipped"], "Wooden desks");
}

#[test]
fn replay_with_output_writes_entity_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("tradeview.ron");
    std::fs::write(
        &config,
        r#"(report: (spreadsheet_id: Some("sheet-1"), sheet_name: Some("Trades")))"#,
    )
    .unwrap();

    let output = tradeview()
        .args(["--entity", "44402588", "--replay"])
        .arg(demo_manifest())
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(dir.path().join("out"))
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());

    let written = std::fs::read_to_string(dir.path().join("out/44402588.json")).unwrap();
    let report: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(report["spreadsheetId"], "sheet-1");
    assert_eq!(report["sheetName"], "Trades");
}

#[test]
fn unknown_entity_still_completes_with_failures() {
    let output = tradeview()
        .args(["--entity", "1", "--replay"])
        .arg(demo_manifest())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(report["status"].as_str().unwrap().starts_with("Failed: "));
    assert_eq!(report["errors"].as_array().unwrap().len(), 3);
}

#[test]
fn missing_manifest_is_a_setup_failure() {
    let output = tradeview()
        .args(["--entity", "1", "--replay", "does-not-exist.ron"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}
