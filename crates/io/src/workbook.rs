// Dataset loading: pick an importer by file extension

use std::path::Path;

use sheetaudit_audit::{Sheet, Workbook};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Excel,
    Csv,
    Tsv,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Some(Self::Excel),
            "csv" => Some(Self::Csv),
            "tsv" | "tab" => Some(Self::Tsv),
            _ => None,
        }
    }
}

/// Load a dataset. Spreadsheet files yield one sheet per worksheet; CSV/TSV
/// files yield a single sheet named after the file stem.
pub fn load_workbook(path: &Path) -> Result<Workbook, String> {
    let format = InputFormat::from_path(path).ok_or_else(|| {
        format!(
            "unsupported file type: {} (expected .xlsx, .xls, .xlsb, .ods, .csv or .tsv)",
            path.display()
        )
    })?;

    let workbook = match format {
        InputFormat::Excel => crate::xlsx::import(path)?,
        InputFormat::Csv => single_sheet(path, crate::csv::import(path)?),
        InputFormat::Tsv => single_sheet(path, crate::csv::import_tsv(path)?),
    };

    log::info!("loaded {} sheet(s) from {}", workbook.sheets.len(), path.display());
    Ok(workbook)
}

fn single_sheet(path: &Path, table: sheetaudit_audit::Table) -> Workbook {
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Sheet1".to_string());
    Workbook::new(vec![Sheet::new(name, table)])
}
