// Plain-text reports: raw per-sheet dump and the summary log

use std::fmt::Write as _;

use sheetaudit_audit::model::{AuditReport, AuditedSheet};
use sheetaudit_audit::Cell;
use unicode_width::UnicodeWidthStr;

const RULE_WIDE: usize = 60;
const RULE_NARROW: usize = 40;

/// Render rows as a fixed-width table with a header line, columns
/// right-aligned and separated by two spaces.
pub fn render_table<'a, I>(columns: &[String], rows: I) -> String
where
    I: IntoIterator<Item = &'a Vec<Cell>>,
{
    let body: Vec<Vec<String>> = rows
        .into_iter()
        .map(|row| {
            (0..columns.len())
                .map(|i| row.get(i).map(|c| c.to_string()).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            body.iter()
                .map(|r| display_width(&r[i]))
                .chain([display_width(header)])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, columns.iter().map(String::as_str), &widths);
    for row in &body {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(s, &w)| format!("{}{}", " ".repeat(w.saturating_sub(display_width(s))), s))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn banner(out: &mut String, title: &str) {
    let rule = "=".repeat(RULE_NARROW);
    let _ = writeln!(out, "\n{rule}\n{title}\n{rule}");
}

/// Every audited sheet, every row, with its status column.
pub fn raw_report(report: &AuditReport) -> String {
    let mut out = String::new();
    for sheet in &report.sheets {
        banner(&mut out, &format!("SHEET: {}", sheet.name));
        out.push_str(&render_table(&sheet.table.columns, &sheet.table.rows));
        out.push_str("\n\n");
    }
    out
}

fn checked_table(sheet: &AuditedSheet) -> String {
    render_table(&sheet.table.columns, sheet.checked_rows().map(|(row, _)| row))
}

/// Sheet discrepancies, per-sheet stats with the checked rows, and final totals.
/// Row errors count as failures in this report.
pub fn summary_report(report: &AuditReport) -> String {
    let mut out = String::from("=== COMPLETE AUDIT LOG ===\n");

    let consistency = &report.consistency;
    if !consistency.missing.is_empty() {
        out.push_str("\nWARNING: MISSING SHEETS (Expected but not found in Target):\n");
        for s in &consistency.missing {
            let _ = writeln!(out, "  - {s}");
        }
    }
    if !consistency.extra.is_empty() {
        out.push_str("\nWARNING: EXTRA SHEETS (Found in Target but not in Instructions):\n");
        for s in &consistency.extra {
            let _ = writeln!(out, "  - {s}");
        }
    }
    if !report.skipped_no_action.is_empty() {
        let _ = writeln!(
            out,
            "\nWARNING: SKIPPED SHEETS (no '{}' column):",
            report.meta.action_column
        );
        for s in &report.skipped_no_action {
            let _ = writeln!(out, "  - {s}");
        }
    }

    let _ = write!(out, "\n{}\n\n", "=".repeat(RULE_WIDE));

    for sheet in &report.sheets {
        let s = &sheet.summary;
        let _ = writeln!(out, "SHEET: {}", sheet.name);
        let _ = writeln!(
            out,
            "Stats: {} Total | {} Pass | {} Fail",
            s.total,
            s.passed,
            s.not_passed()
        );
        if s.errors > 0 {
            let _ = writeln!(out, "       ({} of the failures are row errors)", s.errors);
        }
        let _ = writeln!(out, "{}", "-".repeat(RULE_NARROW));
        out.push_str(&checked_table(sheet));
        let _ = write!(out, "{}\n\n", "=".repeat(RULE_WIDE));
    }

    let t = &report.summary;
    out.push_str("=== FINAL TOTALS ===\n");
    let _ = writeln!(out, "TOTAL INSTRUCTIONS PROCESSED: {}", t.total);
    let _ = writeln!(out, "TOTAL SUCCESS: {}", t.passed);
    let _ = writeln!(out, "TOTAL FAILED: {}", t.failed + t.errors);
    out
}
