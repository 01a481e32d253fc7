// Report writers: raw text, summary text, engineer xlsx

pub mod excel;
pub mod text;

use std::path::{Path, PathBuf};

use sheetaudit_audit::config::ReportConfig;
use sheetaudit_audit::AuditReport;

/// Colors and sizing for the xlsx report. RGB values as `0xRRGGBB`.
#[derive(Debug, Clone)]
pub struct ReportStyle {
    pub pass_fill: u32,
    pub pass_font: u32,
    pub fail_fill: u32,
    pub fail_font: u32,
    pub discrepancy_tab: u32,
    pub max_column_width: f64,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            pass_fill: 0xC6EFCE,
            pass_font: 0x006100,
            fail_fill: 0xFFC7CE,
            fail_font: 0x9C0006,
            discrepancy_tab: 0xFF9900,
            max_column_width: 50.0,
        }
    }
}

/// Where each report was written.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub raw: PathBuf,
    pub summary: PathBuf,
    pub excel: PathBuf,
}

/// Which report failed to write, and why.
#[derive(Debug)]
pub struct ReportError {
    pub path: PathBuf,
    pub message: String,
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ReportError {}

/// Write all three reports into `out_dir`.
pub fn write_reports(
    report: &AuditReport,
    out_dir: &Path,
    files: &ReportConfig,
    style: &ReportStyle,
) -> Result<ReportPaths, ReportError> {
    let paths = ReportPaths {
        raw: out_dir.join(&files.raw),
        summary: out_dir.join(&files.summary),
        excel: out_dir.join(&files.excel),
    };

    std::fs::create_dir_all(out_dir).map_err(|e| ReportError {
        path: out_dir.to_path_buf(),
        message: format!("cannot create {}: {e}", out_dir.display()),
    })?;

    write_text(&paths.raw, &text::raw_report(report))?;
    write_text(&paths.summary, &text::summary_report(report))?;
    log::info!("summary report created: {}", paths.summary.display());

    let excel = excel::export(report, &paths.excel, style).map_err(|message| ReportError {
        path: paths.excel.clone(),
        message,
    })?;
    for name in &excel.empty_sheets {
        log::debug!("sheet '{name}' has no checked rows; left out of the xlsx report");
    }
    log::info!("excel report created: {}", paths.excel.display());

    Ok(paths)
}

fn write_text(path: &Path, content: &str) -> Result<(), ReportError> {
    std::fs::write(path, content).map_err(|e| ReportError {
        path: path.to_path_buf(),
        message: format!("cannot write {}: {e}", path.display()),
    })
}
