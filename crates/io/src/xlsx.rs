// Excel import (xlsx, xlsm, xls, xlsb, ods)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use sheetaudit_audit::{Cell, Sheet, Workbook};

use crate::grid::table_from_grid;

/// Import every sheet of a spreadsheet file, in workbook order.
pub fn import(path: &Path) -> Result<Workbook, String> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open Excel file {}: {}", path.display(), e))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err(format!("{} contains no sheets", path.display()));
    }

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for sheet_name in &sheet_names {
        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| format!("Failed to read sheet '{}': {}", sheet_name, e))?;

        // The range starts at the first used cell, so leading blank rows and
        // columns are already gone.
        let grid: Vec<Vec<Cell>> = range
            .rows()
            .map(|row| row.iter().map(cell_from_data).collect())
            .collect();

        let table = table_from_grid(grid);
        log::debug!(
            "read sheet '{}': {} column(s), {} row(s)",
            sheet_name,
            table.columns.len(),
            table.rows.len()
        );
        sheets.push(Sheet::new(sheet_name.clone(), table));
    }

    Ok(Workbook::new(sheets))
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Absent,
        Data::String(s) if s.is_empty() => Cell::Absent,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::text(if *b { "TRUE" } else { "FALSE" }),
        // Serial date number; both workbooks go through the same mapping.
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(format!("#{:?}", e)),
    }
}
