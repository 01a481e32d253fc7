use std::fmt;

#[derive(Debug)]
pub enum AuditError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty column name, etc.).
    ConfigValidation(String),
    /// IO error (config file read, etc.).
    Io(String),
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for AuditError {}

/// Why a single row could not be projected onto the comparison columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    /// The row ends before a comparison column.
    MissingCell { column: String, index: usize, len: usize },
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCell { column, index, len } => write!(
                f,
                "row has {len} cell(s), column '{column}' is at position {}",
                index + 1
            ),
        }
    }
}

impl std::error::Error for RowError {}
