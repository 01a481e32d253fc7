//! Cell canonicalization shared by both sides of every comparison.
//!
//! A cell is rendered to text, non-breaking spaces become plain spaces, the
//! text is upper-cased and trimmed, and any configured "missing value" token
//! (e.g. `NAN`) collapses to the empty string. `Cell::Absent` is the empty
//! string from the start.

use crate::config::AuditConfig;
use crate::error::RowError;
use crate::model::{Cell, Table};

const NBSP: char = '\u{00A0}';

#[derive(Debug, Clone)]
pub struct Normalizer {
    missing_tokens: Vec<String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::from_config(&AuditConfig::default())
    }
}

impl Normalizer {
    pub fn new<S: AsRef<str>>(missing_tokens: &[S]) -> Self {
        // Tokens are compared against normalized text, so normalize them too.
        let missing_tokens = missing_tokens
            .iter()
            .map(|t| canonical(t.as_ref()))
            .filter(|t| !t.is_empty())
            .collect();
        Self { missing_tokens }
    }

    pub fn from_config(config: &AuditConfig) -> Self {
        Self::new(config.missing_tokens.as_slice())
    }

    pub fn text(&self, raw: &str) -> String {
        let s = canonical(raw);
        if self.missing_tokens.iter().any(|t| *t == s) {
            String::new()
        } else {
            s
        }
    }

    pub fn cell(&self, cell: &Cell) -> String {
        match cell {
            Cell::Absent => String::new(),
            Cell::Text(s) => self.text(s),
            Cell::Number(_) => self.text(&cell.to_string()),
        }
    }

    /// Normalize the cells of `row` at the given `(index, column name)` positions,
    /// in that order. A position past the end of the row is an error.
    pub fn project<'c, I>(&self, row: &[Cell], columns: I) -> Result<Vec<String>, RowError>
    where
        I: IntoIterator<Item = (usize, &'c str)>,
    {
        columns
            .into_iter()
            .map(|(index, name)| {
                row.get(index).map(|c| self.cell(c)).ok_or_else(|| RowError::MissingCell {
                    column: name.to_string(),
                    index,
                    len: row.len(),
                })
            })
            .collect()
    }

    /// Project every row of `table`, one result per row.
    pub fn project_table(
        &self,
        table: &Table,
        columns: &[(usize, &str)],
    ) -> Vec<Result<Vec<String>, RowError>> {
        table
            .rows
            .iter()
            .map(|row| self.project(row, columns.iter().copied()))
            .collect()
    }
}

fn canonical(raw: &str) -> String {
    raw.replace(NBSP, " ").to_uppercase().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatting_noise_is_equal() {
        let n = Normalizer::default();
        let expected = "FOO";
        for raw in ["Foo ", " foo", "FOO", "\u{00A0}foo\u{00A0}", "fOo\t"] {
            assert_eq!(n.text(raw), expected, "raw = {raw:?}");
        }
    }

    #[test]
    fn inner_nbsp_becomes_space() {
        let n = Normalizer::default();
        assert_eq!(n.text("part\u{00A0}no"), "PART NO");
    }

    #[test]
    fn missing_tokens_become_empty() {
        let n = Normalizer::default();
        assert_eq!(n.text("nan"), "");
        assert_eq!(n.text(" NaN "), "");
        assert_eq!(n.cell(&Cell::Absent), "");
        assert_eq!(n.cell(&Cell::Number(f64::NAN)), "");
        // Only whole-cell matches count.
        assert_eq!(n.text("banana"), "BANANA");
    }

    #[test]
    fn none_is_real_text_by_default() {
        let n = Normalizer::default();
        assert_eq!(n.text("None"), "NONE");
        assert_ne!(n.text("None"), n.cell(&Cell::Absent));

        let n = Normalizer::new(&["NAN", "none"]);
        assert_eq!(n.text(" None "), "");
    }

    #[test]
    fn custom_tokens_are_normalized() {
        let n = Normalizer::new(&[" n/a "]);
        assert_eq!(n.text("N/A"), "");
        assert_eq!(n.text("nan"), "NAN");
    }

    #[test]
    fn numbers_match_text() {
        let n = Normalizer::default();
        assert_eq!(n.cell(&Cell::Number(42.0)), n.cell(&Cell::text(" 42 ")));
        assert_eq!(n.cell(&Cell::Number(1.5)), "1.5");
    }

    #[test]
    fn project_in_column_order() {
        let n = Normalizer::default();
        let row = vec![Cell::text("a"), Cell::Absent, Cell::text(" c ")];
        let projected = n.project(&row, [(2, "C"), (0, "A")]).unwrap();
        assert_eq!(projected, vec!["C".to_string(), "A".to_string()]);
    }

    #[test]
    fn project_short_row_is_error() {
        let n = Normalizer::default();
        let row = vec![Cell::text("a")];
        let err = n.project(&row, [(0, "A"), (3, "D")]).unwrap_err();
        assert_eq!(
            err,
            RowError::MissingCell { column: "D".into(), index: 3, len: 1 }
        );
    }

    #[test]
    fn idempotent_on_normalized_values() {
        let n = Normalizer::default();
        for raw in ["  mixed Case ", "nan", "", "\u{00A0}x", "straße"] {
            let once = n.text(raw);
            assert_eq!(n.text(&once), once);
        }
    }
}
