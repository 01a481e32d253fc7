use std::path::Path;

use serde::Deserialize;

use crate::error::AuditError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Audit settings, usually read from an `audit.toml`. Every key has a default,
/// so an empty file is a valid config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    /// Header (trimmed, case-insensitive) that marks the action column.
    pub action_column: String,
    /// Name of the column appended to each audited instruction sheet.
    pub status_column: String,
    /// Normalized cell texts that mean "no value" and compare equal to an empty cell.
    /// Only `NAN` by default; add `NONE` for exports that print null cells as "None".
    pub missing_tokens: Vec<String>,
    /// Hash-index the search pool. Off means a linear scan per row.
    pub pool_index: bool,
    pub fill: FillConfig,
    pub reports: ReportConfig,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            action_column: "action".into(),
            status_column: "Audit_Status".into(),
            missing_tokens: vec!["NAN".into()],
            pool_index: true,
            fill: FillConfig::default(),
            reports: ReportConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Forward fill
// ---------------------------------------------------------------------------

/// Merged-cell cleanup applied by the loader before the audit.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FillConfig {
    pub enabled: bool,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Report file names, relative to the output directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub raw: String,
    pub summary: String,
    pub excel: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            raw: "AUDIT_REPORT_RAW.txt".into(),
            summary: "AUDIT_SUMMARY.txt".into(),
            excel: "AUDIT_FOR_ENGINEER.xlsx".into(),
        }
    }
}

impl AuditConfig {
    pub fn from_toml(input: &str) -> Result<Self, AuditError> {
        let config: AuditConfig =
            toml::from_str(input).map_err(|e| AuditError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, AuditError> {
        let input = std::fs::read_to_string(path)
            .map_err(|e| AuditError::Io(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&input)
    }

    pub fn validate(&self) -> Result<(), AuditError> {
        if self.action_column.trim().is_empty() {
            return Err(AuditError::ConfigValidation(
                "action_column must not be empty".into(),
            ));
        }

        if self.status_column.trim().is_empty() {
            return Err(AuditError::ConfigValidation(
                "status_column must not be empty".into(),
            ));
        }

        if self.status_column.trim().eq_ignore_ascii_case(self.action_column.trim()) {
            return Err(AuditError::ConfigValidation(format!(
                "status_column '{}' would overwrite the action column",
                self.status_column
            )));
        }

        for (name, file) in [
            ("raw", &self.reports.raw),
            ("summary", &self.reports.summary),
            ("excel", &self.reports.excel),
        ] {
            if file.trim().is_empty() {
                return Err(AuditError::ConfigValidation(format!(
                    "reports.{name} must not be empty"
                )));
            }
        }

        Ok(())
    }
}
