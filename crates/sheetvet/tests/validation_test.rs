//! End-to-end validation tests over real workbook bytes.

use rust_xlsxwriter::Workbook;
use serde_json::Value;

use sheetvet::{ErrorLocation, SheetRef, SheetVet, SheetVetError};

/// Build a single-sheet workbook from a header row plus cell values.
///
/// `None` leaves the cell blank; numbers are written as numbers and
/// everything else as text.
fn build_sheet(name: Option<&str>, headers: &[&str], rows: &[Vec<Option<Cell>>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    write_sheet(&mut workbook, name, headers, rows);
    workbook.save_to_buffer().expect("Failed to build workbook")
}

enum Cell {
    Text(&'static str),
    Num(f64),
}

fn write_sheet(
    workbook: &mut Workbook,
    name: Option<&str>,
    headers: &[&str],
    rows: &[Vec<Option<Cell>>],
) {
    let worksheet = workbook.add_worksheet();
    if let Some(name) = name {
        worksheet.set_name(name).expect("Failed to name sheet");
    }
    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .expect("Failed to write header");
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            match cell {
                Some(Cell::Text(s)) => worksheet.write_string((r + 1) as u32, c as u16, *s),
                Some(Cell::Num(n)) => worksheet.write_number((r + 1) as u32, c as u16, *n),
                None => continue,
            }
            .expect("Failed to write cell");
        }
    }
}

// =============================================================================
// Scenario A: Valuations with a missing required value
// =============================================================================

#[test]
fn test_valuations_missing_value() {
    let bytes = build_sheet(
        None,
        &["date", "asset", "value"],
        &[
            vec![
                Some(Cell::Text("2024-01-15")),
                Some(Cell::Text("bond")),
                None,
            ],
            vec![
                Some(Cell::Text("2024-01-16")),
                Some(Cell::Text("equity")),
                Some(Cell::Num(250.0)),
            ],
        ],
    );

    let vet = SheetVet::new();
    let report = vet.validate_workbook("Valuations", &bytes).unwrap();

    assert!(!report.valid);
    let checks = &report.check_results["valuations"];
    assert!(checks["Columns"].passed);
    assert!(!checks["Missing Values"].passed);

    let locations = &report.error_locations["valuations"];
    let at_value = ErrorLocation::new(0, "value");
    // Recorded by Data Types, again by Missing Values, and by Checksum since
    // the invalid cell degrades the row sum to zero.
    assert_eq!(locations.iter().filter(|l| **l == at_value).count(), 3);

    // The blank cell previews as an explicit null, never NaN.
    assert_eq!(report.previews["valuations"][0]["value"], Value::Null);
    assert_eq!(
        report.previews["valuations"][1]["value"],
        serde_json::json!(250.0)
    );
    // Dates preview as full ISO datetimes.
    assert_eq!(
        report.previews["valuations"][0]["date"],
        serde_json::json!("2024-01-15T00:00:00")
    );
}

#[test]
fn test_blank_interior_row_keeps_indices() {
    let bytes = build_sheet(
        None,
        &["date", "asset", "value"],
        &[
            vec![
                Some(Cell::Text("2024-01-15")),
                Some(Cell::Text("bond")),
                Some(Cell::Num(100.0)),
            ],
            vec![None, None, None],
            vec![
                Some(Cell::Text("2024-01-17")),
                Some(Cell::Text("equity")),
                Some(Cell::Num(-5.0)),
            ],
        ],
    );

    let vet = SheetVet::new();
    let report = vet.validate_workbook("Valuations", &bytes).unwrap();

    assert!(!report.valid);
    let checks = &report.check_results["valuations"];
    assert!(!checks["Missing Values"].passed);
    assert!(!checks["Checksum"].passed);

    // The blank row stays at index 1 and fails at its own coordinates, and
    // the negative row after it keeps index 2.
    let locations = &report.error_locations["valuations"];
    assert!(locations.contains(&ErrorLocation::new(1, "date")));
    assert!(locations.contains(&ErrorLocation::new(1, "value")));
    assert!(locations.contains(&ErrorLocation::new(2, "value")));
    assert!(!locations.contains(&ErrorLocation::new(2, "date")));

    // The blank row also previews in place, as all nulls.
    let previews = &report.previews["valuations"];
    assert_eq!(previews.len(), 3);
    assert_eq!(previews[1]["asset"], Value::Null);
}

// =============================================================================
// Scenario B: P&L with one negative profit_loss row
// =============================================================================

#[test]
fn test_pnl_checksum_flags_single_row() {
    let mut workbook = Workbook::new();
    write_sheet(
        &mut workbook,
        Some("Actuals"),
        &["date", "account", "profit_loss"],
        &[
            vec![
                Some(Cell::Text("2024-02-01")),
                Some(Cell::Text("trading")),
                Some(Cell::Num(120.0)),
            ],
            vec![
                Some(Cell::Text("2024-02-02")),
                Some(Cell::Text("treasury")),
                Some(Cell::Num(-5.0)),
            ],
            vec![
                Some(Cell::Text("2024-02-03")),
                Some(Cell::Text("trading")),
                Some(Cell::Num(40.0)),
            ],
        ],
    );
    write_sheet(
        &mut workbook,
        Some("KPIs"),
        &["date", "kpi_type", "kpi_name", "kpi_value"],
        &[vec![
            Some(Cell::Text("2024-02-01")),
            Some(Cell::Text("ratio")),
            Some(Cell::Text("sharpe")),
            Some(Cell::Num(1.4)),
        ]],
    );
    let bytes = workbook.save_to_buffer().unwrap();

    let vet = SheetVet::new();
    let report = vet.validate_workbook("P&L", &bytes).unwrap();

    assert!(!report.valid);

    let actuals = &report.check_results["pnl_actuals"];
    assert!(actuals["Columns"].passed);
    assert!(actuals["Data Types"].passed);
    assert!(actuals["Missing Values"].passed);
    assert!(!actuals["Checksum"].passed);

    assert_eq!(
        report.error_locations["pnl_actuals"],
        vec![ErrorLocation::new(1, "profit_loss")]
    );

    // The KPIs sheet is clean and still fully reported.
    assert!(report.check_results["pnl_kpis"].values().all(|r| r.passed));
    assert!(report.error_locations["pnl_kpis"].is_empty());
    assert_eq!(report.previews["pnl_kpis"].len(), 1);
}

// =============================================================================
// Scenario C: Risk with a miscased column header
// =============================================================================

#[test]
fn test_risk_miscased_column() {
    let bytes = build_sheet(
        None,
        &["date", "risk_factor", "Exposure"],
        &[vec![
            Some(Cell::Text("2024-03-01")),
            Some(Cell::Text("fx")),
            Some(Cell::Num(15.0)),
        ]],
    );

    let vet = SheetVet::new();
    let report = vet.validate_workbook("Risk", &bytes).unwrap();

    assert!(!report.valid);
    let checks = &report.check_results["risk"];
    assert_eq!(checks["Columns"].msg, "Missing: exposure");

    // No coercion happened for the declared-but-absent column, so nothing
    // points at it.
    assert!(
        report.error_locations["risk"]
            .iter()
            .all(|l| l.column != "exposure")
    );
    // The miscased column passes through untouched for previewing.
    assert_eq!(
        report.previews["risk"][0]["Exposure"],
        serde_json::json!(15.0)
    );
}

// =============================================================================
// Structural failures
// =============================================================================

#[test]
fn test_unknown_dataset_rejected() {
    let vet = SheetVet::new();
    let err = vet.validate_workbook("Budget", b"irrelevant").unwrap_err();
    assert!(matches!(err, SheetVetError::UnknownDataset(name) if name == "Budget"));
}

#[test]
fn test_sheet_not_found_by_name() {
    // P&L expects sheets named Actuals and KPIs.
    let bytes = build_sheet(Some("Forecast"), &["date"], &[]);

    let vet = SheetVet::new();
    let err = vet.validate_workbook("P&L", &bytes).unwrap_err();
    assert!(matches!(err, SheetVetError::SheetNotFound(_)));
}

#[test]
fn test_unreadable_workbook() {
    let vet = SheetVet::new();
    let err = vet.validate_workbook("Valuations", b"not an xlsx").unwrap_err();
    assert!(matches!(err, SheetVetError::UnreadableWorkbook(_)));
}

// =============================================================================
// Report invariants
// =============================================================================

#[test]
fn test_validation_is_idempotent() {
    let bytes = build_sheet(
        None,
        &["date", "asset", "value"],
        &[vec![
            Some(Cell::Text("not a date")),
            None,
            Some(Cell::Text("n/a")),
        ]],
    );

    let vet = SheetVet::new();
    let first = vet.validate_workbook("Valuations", &bytes).unwrap();
    let second = vet.validate_workbook("Valuations", &bytes).unwrap();

    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[test]
fn test_report_serializes_locations_as_pairs() {
    let bytes = build_sheet(
        None,
        &["date", "asset", "value"],
        &[vec![
            Some(Cell::Text("2024-01-15")),
            Some(Cell::Text("bond")),
            Some(Cell::Num(-1.0)),
        ]],
    );

    let vet = SheetVet::new();
    let report = vet.validate_workbook("Valuations", &bytes).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(
        json["error_locations"]["valuations"][0],
        serde_json::json!([0, "value"])
    );
    assert_eq!(json["valid"], serde_json::json!(false));
    assert!(json["errors"].as_array().unwrap().len() > 0);
}

#[test]
fn test_sheet_resolution_by_index() {
    // Valuations addresses its sheet by position, whatever its name.
    let bytes = build_sheet(
        Some("whatever"),
        &["date", "asset", "value"],
        &[vec![
            Some(Cell::Text("2024-01-15")),
            Some(Cell::Text("bond")),
            Some(Cell::Num(10.0)),
        ]],
    );

    let vet = SheetVet::new();
    let report = vet.validate_workbook("Valuations", &bytes).unwrap();
    assert!(report.valid);

    // And the library-level reader resolves the same sheet both ways.
    let by_index = sheetvet::workbook::read_sheet(&bytes, &SheetRef::Index(0)).unwrap();
    let by_name =
        sheetvet::workbook::read_sheet(&bytes, &SheetRef::Name("whatever".into())).unwrap();
    assert_eq!(by_index.headers, by_name.headers);
    assert_eq!(by_index.row_count(), by_name.row_count());
}
