// Engineer-facing xlsx report

use std::collections::HashSet;
use std::path::Path;

use rust_xlsxwriter::{
    Color, ConditionalFormatText, ConditionalFormatTextRule, Format, Workbook as XlsxWorkbook,
    Worksheet,
};
use sheetaudit_audit::model::{AuditReport, AuditedSheet};
use sheetaudit_audit::Cell;
use unicode_width::UnicodeWidthStr;

use super::ReportStyle;

pub const DISCREPANCY_SHEET: &str = "SHEET_DISCREPANCIES";
pub const SUMMARY_SHEET: &str = "OVERALL_SUMMARY";

/// Excel's limit on worksheet name length.
const MAX_SHEET_NAME: usize = 31;

#[derive(Debug, Default)]
pub struct ExcelExportResult {
    /// Tab names written, in order.
    pub sheets: Vec<String>,
    /// Audited sheets with no checked rows, left out of the workbook.
    pub empty_sheets: Vec<String>,
}

/// Write the discrepancy tab (if any), the overall summary tab and one tab
/// of checked rows per audited sheet.
pub fn export(report: &AuditReport, path: &Path, style: &ReportStyle) -> Result<ExcelExportResult, String> {
    let mut result = ExcelExportResult::default();
    let mut used_names: HashSet<String> = HashSet::new();
    let mut workbook = XlsxWorkbook::new();
    let header = Format::new().set_bold();

    if !report.consistency.is_consistent() {
        let name = unique_sheet_name(DISCREPANCY_SHEET, &mut used_names);
        let worksheet = add_named_sheet(&mut workbook, &name)?;
        worksheet.set_tab_color(Color::RGB(style.discrepancy_tab));

        write_header(worksheet, &["Sheet Name", "Discrepancy Type"], &header)?;
        let issues = report
            .consistency
            .missing
            .iter()
            .map(|s| (s, "MISSING IN TARGET"))
            .chain(report.consistency.extra.iter().map(|s| (s, "EXTRA IN TARGET")));
        for (i, (sheet, kind)) in issues.enumerate() {
            let row = (i + 1) as u32;
            write_str(worksheet, row, 0, sheet)?;
            write_str(worksheet, row, 1, kind)?;
        }
        fit_columns(worksheet, &[30.0, 20.0], style)?;
        result.sheets.push(name);
    }

    {
        let name = unique_sheet_name(SUMMARY_SHEET, &mut used_names);
        let worksheet = add_named_sheet(&mut workbook, &name)?;
        write_header(
            worksheet,
            &["Sheet Name", "Total Tasks", "Passed", "Failed", "Errors"],
            &header,
        )?;
        for (i, sheet) in report.sheets.iter().enumerate() {
            let row = (i + 1) as u32;
            let s = &sheet.summary;
            write_str(worksheet, row, 0, &sheet.name)?;
            write_num(worksheet, row, 1, s.total)?;
            write_num(worksheet, row, 2, s.passed)?;
            write_num(worksheet, row, 3, s.failed)?;
            write_num(worksheet, row, 4, s.errors)?;
        }
        fit_columns(worksheet, &[30.0, 12.0, 10.0, 10.0, 10.0], style)?;
        result.sheets.push(name);
    }

    for sheet in &report.sheets {
        if sheet.summary.total == 0 {
            result.empty_sheets.push(sheet.name.clone());
            continue;
        }
        let name = unique_sheet_name(&sheet.name, &mut used_names);
        let worksheet = add_named_sheet(&mut workbook, &name)?;
        write_audited_sheet(worksheet, sheet, &report.meta.status_column, &header, style)?;
        result.sheets.push(name);
    }

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file {}: {}", path.display(), e))?;

    Ok(result)
}

fn write_audited_sheet(
    worksheet: &mut Worksheet,
    sheet: &AuditedSheet,
    status_column: &str,
    header: &Format,
    style: &ReportStyle,
) -> Result<(), String> {
    let columns: Vec<&str> = sheet.table.columns.iter().map(String::as_str).collect();
    write_header(worksheet, &columns, header)?;

    let mut widths: Vec<f64> = columns.iter().map(|c| text_width(c)).collect();
    let mut last_row = 0u32;

    for (i, (cells, _)) in sheet.checked_rows().enumerate() {
        let row = (i + 1) as u32;
        last_row = row;
        for (col, cell) in cells.iter().enumerate() {
            let col16 = col as u16;
            match cell {
                Cell::Absent => continue,
                Cell::Number(n) if n.is_finite() => {
                    worksheet
                        .write_number(row, col16, *n)
                        .map_err(|e| format!("Failed to write cell: {}", e))?;
                }
                _ => write_str(worksheet, row, col16, &cell.to_string())?,
            }
            if let Some(w) = widths.get_mut(col) {
                *w = w.max(text_width(&cell.to_string()));
            }
        }
    }

    fit_columns(worksheet, &widths, style)?;

    let Some(status_col) = sheet.table.column_index(status_column) else {
        return Ok(());
    };
    let status_col = status_col as u16;

    let pass_format = Format::new()
        .set_background_color(Color::RGB(style.pass_fill))
        .set_font_color(Color::RGB(style.pass_font));
    let fail_format = Format::new()
        .set_background_color(Color::RGB(style.fail_fill))
        .set_font_color(Color::RGB(style.fail_font));

    for (needle, format) in [("PASS", &pass_format), ("FAIL", &fail_format), ("ERROR", &fail_format)] {
        let conditional = ConditionalFormatText::new()
            .set_rule(ConditionalFormatTextRule::Contains(needle.to_string()))
            .set_format(format);
        worksheet
            .add_conditional_format(1, status_col, last_row, status_col, &conditional)
            .map_err(|e| format!("Failed to add conditional format: {}", e))?;
    }

    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| format!("Failed to freeze header: {}", e))?;

    Ok(())
}

fn add_named_sheet<'a>(workbook: &'a mut XlsxWorkbook, name: &str) -> Result<&'a mut Worksheet, String> {
    workbook
        .add_worksheet()
        .set_name(name)
        .map_err(|e| format!("Failed to create sheet '{}': {}", name, e))
}

fn write_header(worksheet: &mut Worksheet, columns: &[&str], format: &Format) -> Result<(), String> {
    for (col, name) in columns.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *name, format)
            .map_err(|e| format!("Failed to write header: {}", e))?;
    }
    Ok(())
}

fn write_str(worksheet: &mut Worksheet, row: u32, col: u16, value: &str) -> Result<(), String> {
    worksheet
        .write_string(row, col, value)
        .map_err(|e| format!("Failed to write cell: {}", e))?;
    Ok(())
}

fn write_num(worksheet: &mut Worksheet, row: u32, col: u16, value: usize) -> Result<(), String> {
    worksheet
        .write_number(row, col, value as f64)
        .map_err(|e| format!("Failed to write cell: {}", e))?;
    Ok(())
}

/// Column widths: content width plus padding, capped.
fn fit_columns(worksheet: &mut Worksheet, widths: &[f64], style: &ReportStyle) -> Result<(), String> {
    for (col, w) in widths.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, (w + 2.0).min(style.max_column_width))
            .map_err(|e| format!("Failed to set column width: {}", e))?;
    }
    Ok(())
}

fn text_width(s: &str) -> f64 {
    UnicodeWidthStr::width(s) as f64
}

/// A valid, unused worksheet name: forbidden characters replaced, cut to 31
/// characters, and suffixed `~2`, `~3`, ... on collision (case-insensitive,
/// as Excel compares them).
pub fn unique_sheet_name(name: &str, used: &mut HashSet<String>) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\') { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches('\'');
    let base = if cleaned.is_empty() { "Sheet" } else { cleaned };

    let mut candidate: String = base.chars().take(MAX_SHEET_NAME).collect();
    let mut n = 2;
    while used.contains(&candidate.to_lowercase()) {
        let suffix = format!("~{n}");
        let keep = MAX_SHEET_NAME - suffix.chars().count();
        candidate = base.chars().take(keep).collect::<String>() + &suffix;
        n += 1;
    }

    used.insert(candidate.to_lowercase());
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_names_are_cut_to_31() {
        let mut used = HashSet::new();
        let name = unique_sheet_name("Very Long Instruction Sheet Name Over Limit", &mut used);
        assert_eq!(name.chars().count(), 31);
        assert_eq!(name, "Very Long Instruction Sheet Nam");
    }

    #[test]
    fn truncation_collisions_get_suffix() {
        let mut used = HashSet::new();
        let a = unique_sheet_name("Very Long Instruction Sheet Name A", &mut used);
        let b = unique_sheet_name("Very Long Instruction Sheet Name B", &mut used);
        assert_ne!(a, b);
        assert_eq!(b, "Very Long Instruction Sheet N~2");
        assert_eq!(b.chars().count(), 31);
    }

    #[test]
    fn reserved_and_case_insensitive() {
        let mut used = HashSet::new();
        unique_sheet_name(SUMMARY_SHEET, &mut used);
        assert_eq!(unique_sheet_name("overall_summary", &mut used), "overall_summary~2");
    }

    #[test]
    fn forbidden_characters_replaced() {
        let mut used = HashSet::new();
        assert_eq!(unique_sheet_name("Q1/Q2 [draft]", &mut used), "Q1_Q2 _draft_");
        assert_eq!(unique_sheet_name("  ", &mut used), "Sheet");
    }
}
