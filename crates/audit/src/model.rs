use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single scalar cell value as it comes out of a spreadsheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(f64),
    #[default]
    Absent,
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            // Integral values print without a fractional part so that
            // 3.0 read from xlsx compares equal to "3" typed as text.
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Self::Number(n) => write!(f, "{n}"),
            Self::Absent => Ok(()),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// Named columns plus rows of cells. Rows may be shorter than the header.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    /// Index of the first column whose trimmed header equals `name` trimmed.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.columns.iter().position(|c| c.trim() == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    pub name: String,
    pub table: Table,
}

impl Sheet {
    pub fn new(name: impl Into<String>, table: Table) -> Self {
        Self { name: name.into(), table }
    }

    /// Sheet identity: the name with surrounding whitespace removed.
    pub fn key(&self) -> &str {
        self.name.trim()
    }
}

/// One dataset (target or instructions): sheets in workbook order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Sheets keyed by trimmed name. Later sheets win on collision.
    pub fn by_key(&self) -> BTreeMap<&str, &Sheet> {
        let mut map = BTreeMap::new();
        for sheet in &self.sheets {
            if map.insert(sheet.key(), sheet).is_some() {
                log::warn!("duplicate sheet name '{}' (after trim); last one wins", sheet.key());
            }
        }
        map
    }

    /// Like [`Workbook::by_key`], but in workbook order (first appearance of each name).
    pub fn by_key_ordered(&self) -> Vec<(&str, &Sheet)> {
        let latest = self.by_key();
        let mut out: Vec<(&str, &Sheet)> = Vec::with_capacity(latest.len());
        for sheet in &self.sheets {
            let key = sheet.key();
            if out.iter().any(|(k, _)| *k == key) {
                continue;
            }
            out.push((key, latest[key]));
        }
        out
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.key()).collect()
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// What an instruction row asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Add,
    Delete,
}

impl Action {
    /// Parse a raw action cell. Anything other than add/delete is `None`.
    pub fn parse(raw: &Cell) -> Option<Self> {
        match raw.to_string().trim().to_lowercase().as_str() {
            "add" => Some(Self::Add),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum AuditStatus {
    Unknown,
    Pass,
    Fail(String),
    Error(String),
}

pub const REASON_NOT_FOUND: &str = "not found in target";
pub const REASON_STILL_EXISTS: &str = "still exists in target";

impl AuditStatus {
    /// Whether the row counts toward pass/fail statistics.
    pub fn is_checked(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "Unknown"),
            Self::Pass => write!(f, "PASS"),
            Self::Fail(reason) => write!(f, "FAIL ({reason})"),
            Self::Error(detail) => write!(f, "ERROR ({detail})"),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SheetSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub unknown: usize,
}

impl SheetSummary {
    /// Failures plus row errors: everything checked that did not pass.
    pub fn not_passed(&self) -> usize {
        self.failed + self.errors
    }
}

/// One instruction sheet after audit.
#[derive(Debug, Clone, Serialize)]
pub struct AuditedSheet {
    pub name: String,
    pub action_column: String,
    pub key_columns: Vec<String>,
    /// Instruction table with the status column filled in.
    pub table: Table,
    pub statuses: Vec<AuditStatus>,
    /// Target rows left out of the search pool because they were malformed.
    pub pool_rejects: usize,
    pub summary: SheetSummary,
}

impl AuditedSheet {
    /// Rows that were actually checked, i.e. everything but `Unknown`.
    pub fn checked_rows(&self) -> impl Iterator<Item = (&Vec<Cell>, &AuditStatus)> {
        self.table
            .rows
            .iter()
            .zip(self.statuses.iter())
            .filter(|(_, s)| s.is_checked())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsistencyReport {
    /// In instructions, not in target.
    pub missing: Vec<String>,
    /// In target, not in instructions.
    pub extra: Vec<String>,
}

impl ConsistencyReport {
    pub fn is_consistent(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    pub sheets_audited: usize,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub unknown: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditMeta {
    pub engine_version: String,
    pub run_at: String,
    pub action_column: String,
    pub status_column: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub meta: AuditMeta,
    pub summary: AuditSummary,
    pub consistency: ConsistencyReport,
    pub skipped_no_action: Vec<String>,
    pub unmatched: Vec<String>,
    pub sheets: Vec<AuditedSheet>,
}

impl AuditReport {
    pub fn sheet(&self, name: &str) -> Option<&AuditedSheet> {
        let name = name.trim();
        self.sheets.iter().find(|s| s.name == name)
    }

    /// True when every checked row passed and both datasets have the same sheets.
    pub fn is_clean(&self) -> bool {
        self.summary.failed == 0 && self.summary.errors == 0 && self.consistency.is_consistent()
    }
}
