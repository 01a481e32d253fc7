// CSV/TSV import

use std::io::Read;
use std::path::Path;

use sheetaudit_audit::{Cell, Table};

use crate::grid::table_from_grid;

pub fn import(path: &Path) -> Result<Table, String> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    import_from_string(&content, delimiter)
}

pub fn import_tsv(path: &Path) -> Result<Table, String> {
    let content = read_file_as_utf8(path)?;
    import_from_string(&content, b'\t')
}

/// Spreadsheet `.csv` exports use `,`, or `;` in locales with a decimal comma.
/// Tab-separated files go through [`import_tsv`] instead.
const CSV_DELIMITERS: [u8; 2] = [b',', b';'];

/// Pick the delimiter of a `.csv` export from its header row.
///
/// The candidate that splits the header into the most fields wins, provided
/// the first data rows have the same width. Falls back to `,`, which also
/// wins ties.
fn sniff_delimiter(content: &str) -> u8 {
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());
    let Some(header) = lines.next() else {
        return b',';
    };
    let body: Vec<&str> = lines.take(5).collect();

    CSV_DELIMITERS
        .iter()
        .rev()
        .map(|&delim| (delim, field_count(header, delim)))
        .filter(|&(delim, width)| {
            width > 1 && body.iter().all(|line| field_count(line, delim) == width)
        })
        .max_by_key(|&(_, width)| width)
        .map(|(delim, _)| delim)
        .unwrap_or(b',')
}

fn field_count(line: &str, delimiter: u8) -> usize {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(|r| r.ok())
        .map(|r| r.len())
        .unwrap_or(1)
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path)
        .map_err(|e| format!("cannot open {}: {e}", path.display()))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s.strip_prefix('\u{FEFF}').map(str::to_string).unwrap_or(s)),
        Err(e) => {
            let bytes = e.into_bytes();
            // Excel-exported CSVs are often Windows-1252
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

fn import_from_string(content: &str, delimiter: u8) -> Result<Table, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut grid = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| format!("line {}: {e}", row_idx + 1))?;
        grid.push(
            record
                .iter()
                .map(|field| if field.is_empty() { Cell::Absent } else { Cell::text(field) })
                .collect(),
        );
    }

    Ok(table_from_grid(grid))
}
