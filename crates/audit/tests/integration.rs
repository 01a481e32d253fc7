use sheetaudit_audit::model::{REASON_NOT_FOUND, REASON_STILL_EXISTS};
use sheetaudit_audit::{run, AuditConfig, AuditStatus, Cell, Sheet, Table, Workbook};

fn row(values: &[&str]) -> Vec<Cell> {
    values
        .iter()
        .map(|v| if v.is_empty() { Cell::Absent } else { Cell::text(*v) })
        .collect()
}

fn sheet(name: &str, cols: &[&str], rows: &[&[&str]]) -> Sheet {
    Sheet::new(
        name,
        Table::new(
            cols.iter().map(|c| c.to_string()).collect(),
            rows.iter().map(|r| row(r)).collect(),
        ),
    )
}

fn target() -> Workbook {
    Workbook::new(vec![sheet(
        "Parts",
        &["PartNo", "Plant", "Qty"],
        &[&["x1", "p01", "4"], &["A7", "P02", "1"]],
    )])
}

// -------------------------------------------------------------------------
// Scenarios
// -------------------------------------------------------------------------

#[test]
fn add_with_formatting_noise_passes() {
    let inst = Workbook::new(vec![sheet(
        "Parts",
        &["PartNo", "Plant", "Action"],
        &[&["X1 ", "P01", "add"]],
    )]);
    let report = run(&AuditConfig::default(), &target(), &inst);
    assert_eq!(report.sheets[0].statuses, vec![AuditStatus::Pass]);
}

#[test]
fn delete_of_present_row_fails() {
    let inst = Workbook::new(vec![sheet(
        "Parts",
        &["PartNo", "Plant", "Action"],
        &[&["X1 ", "P01", "delete"]],
    )]);
    let report = run(&AuditConfig::default(), &target(), &inst);
    assert_eq!(
        report.sheets[0].statuses,
        vec![AuditStatus::Fail(REASON_STILL_EXISTS.into())]
    );
}

#[test]
fn add_needs_every_key_column_to_match() {
    // Qty is shared too, so a row that differs only in Qty is not present.
    let inst = Workbook::new(vec![sheet(
        "Parts",
        &["PartNo", "Plant", "Qty", "Action"],
        &[&["x1", "p01", "5", "add"], &["x1", "p01", "4", "add"]],
    )]);
    let report = run(&AuditConfig::default(), &target(), &inst);
    assert_eq!(
        report.sheets[0].statuses,
        vec![AuditStatus::Fail(REASON_NOT_FOUND.into()), AuditStatus::Pass]
    );
}

#[test]
fn numbers_and_text_compare_equal() {
    let target = Workbook::new(vec![Sheet::new(
        "Parts",
        Table::new(
            vec!["PartNo".into(), "Qty".into()],
            vec![vec![Cell::text("x1"), Cell::Number(4.0)]],
        ),
    )]);
    let inst = Workbook::new(vec![sheet(
        "Parts",
        &["PartNo", "Qty", "Action"],
        &[&["X1", "4", "add"]],
    )]);
    let report = run(&AuditConfig::default(), &target, &inst);
    assert_eq!(report.sheets[0].statuses, vec![AuditStatus::Pass]);
}

#[test]
fn absent_and_nan_text_are_the_same_value() {
    let target = Workbook::new(vec![sheet("Parts", &["PartNo", "Note"], &[&["x1", "nan"]])]);
    let inst = Workbook::new(vec![sheet(
        "Parts",
        &["PartNo", "Note", "Action"],
        &[&["x1", "", "add"]],
    )]);
    let report = run(&AuditConfig::default(), &target, &inst);
    assert_eq!(report.sheets[0].statuses, vec![AuditStatus::Pass]);
}

#[test]
fn sheet_without_action_column_is_skipped() {
    let inst = Workbook::new(vec![sheet("Parts", &["PartNo", "Plant", "Op"], &[&["x1", "p01", "add"]])]);
    let report = run(&AuditConfig::default(), &target(), &inst);
    assert!(report.sheets.is_empty());
    assert_eq!(report.skipped_no_action, vec!["Parts"]);
    assert_eq!(report.summary.total, 0);
    assert_eq!(report.summary.passed + report.summary.failed, 0);
}

#[test]
fn sheet_sharing_no_columns_is_silently_dropped() {
    let inst = Workbook::new(vec![sheet("Parts", &["Other", " ACTION "], &[&["1", "add"]])]);
    let report = run(&AuditConfig::default(), &target(), &inst);
    assert!(report.sheets.is_empty());
    assert!(report.skipped_no_action.is_empty());
    assert!(report.unmatched.is_empty());
    assert!(report.consistency.is_consistent());
}

#[test]
fn custom_action_and_status_columns() {
    let config = AuditConfig::from_toml(
        r#"
action_column = "Operation"
status_column = "Result"
"#,
    )
    .unwrap();
    let inst = Workbook::new(vec![sheet(
        "Parts",
        &["PartNo", "Plant", "operation"],
        &[&["a7", "p02", "ADD"]],
    )]);
    let report = run(&config, &target(), &inst);
    let audited = &report.sheets[0];
    assert_eq!(audited.action_column, "operation");
    assert_eq!(audited.table.columns.last().map(String::as_str), Some("Result"));
    assert_eq!(audited.statuses, vec![AuditStatus::Pass]);
    assert_eq!(report.meta.status_column, "Result");
}

#[test]
fn sheets_match_on_trimmed_names() {
    let inst = Workbook::new(vec![sheet(
        "  Parts ",
        &["PartNo", "Plant", "Action"],
        &[&["a7", "p02", "delete"]],
    )]);
    let report = run(&AuditConfig::default(), &target(), &inst);
    assert_eq!(report.sheets.len(), 1);
    assert_eq!(report.sheets[0].name, "Parts");
    assert!(report.consistency.is_consistent());
    assert_eq!(
        report.sheets[0].statuses,
        vec![AuditStatus::Fail(REASON_STILL_EXISTS.into())]
    );
}

#[test]
fn totals_span_sheets() {
    let target = Workbook::new(vec![
        sheet("Parts", &["PartNo"], &[&["a"], &["b"]]),
        sheet("Tools", &["ToolId"], &[&["t1"]]),
    ]);
    let inst = Workbook::new(vec![
        sheet("Parts", &["PartNo", "Action"], &[&["a", "add"], &["c", "add"], &["b", "x"]]),
        sheet("Tools", &["ToolId", "Action"], &[&["t1", "delete"], &["t2", "delete"]]),
    ]);
    let report = run(&AuditConfig::default(), &target, &inst);

    assert_eq!(report.summary.sheets_audited, 2);
    assert_eq!(report.summary.total, 4);
    assert_eq!(report.summary.passed, 2);
    assert_eq!(report.summary.failed, 2);
    assert_eq!(report.summary.unknown, 1);
    assert!(!report.is_clean());
}

#[test]
fn report_serializes_to_json() {
    let inst = Workbook::new(vec![sheet(
        "Parts",
        &["PartNo", "Plant", "Action"],
        &[&["x1", "p01", "add"], &["", "", "skip"]],
    )]);
    let report = run(&AuditConfig::default(), &target(), &inst);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["summary"]["passed"], 1);
    assert_eq!(json["sheets"][0]["statuses"][0]["status"], "pass");
    assert_eq!(json["sheets"][0]["statuses"][1]["status"], "unknown");
    assert_eq!(json["sheets"][0]["table"]["rows"][1][0], serde_json::Value::Null);
    assert_eq!(json["sheets"][0]["table"]["rows"][0][3], "PASS");
}
