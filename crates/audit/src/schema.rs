use std::collections::HashSet;

use crate::config::AuditConfig;
use crate::model::{Sheet, Table, Workbook};

/// A column usable for comparison, with its position on each side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyColumn {
    pub name: String,
    pub target_index: usize,
    pub instruction_index: usize,
}

/// A matched sheet pair that is ready to audit.
#[derive(Debug)]
pub struct SheetPlan<'a> {
    pub name: String,
    pub target: &'a Sheet,
    pub instructions: &'a Sheet,
    pub action_index: usize,
    pub action_column: String,
    pub keys: Vec<KeyColumn>,
}

/// Outcome of pairing every instruction sheet with the target workbook.
#[derive(Debug, Default)]
pub struct Reconciliation<'a> {
    /// Audit-ready sheets, in instruction workbook order.
    pub plans: Vec<SheetPlan<'a>>,
    /// Instruction sheets without an action column.
    pub skipped_no_action: Vec<String>,
    /// Instruction sheets with no target sheet of the same (trimmed) name.
    pub unmatched: Vec<String>,
    /// Instruction sheets sharing no comparison column with their target.
    /// Not part of the audit output; kept for diagnostics.
    pub no_key_columns: Vec<String>,
}

/// Index of the action column: first header equal to `action_name`,
/// ignoring case and surrounding whitespace.
pub fn find_action_column(table: &Table, action_name: &str) -> Option<usize> {
    let wanted = action_name.trim().to_lowercase();
    let mut hits = table
        .columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.trim().to_lowercase() == wanted);

    let (index, _) = hits.next()?;
    if let Some((extra, name)) = hits.next() {
        log::warn!(
            "several '{}' columns found; using column {} and ignoring '{}' at column {}",
            action_name,
            index + 1,
            name,
            extra + 1
        );
    }
    Some(index)
}

/// Columns present in both tables (trimmed header match), in instruction order,
/// leaving out the action column and any column named in `exclude`.
pub fn comparison_keys(
    target: &Table,
    instructions: &Table,
    action_index: usize,
    exclude: &[&str],
) -> Vec<KeyColumn> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();

    for (instruction_index, column) in instructions.columns.iter().enumerate() {
        let name = column.trim();
        if instruction_index == action_index || exclude.iter().any(|e| e.trim() == name) {
            continue;
        }
        if !seen.insert(name) {
            continue;
        }
        if let Some(target_index) = target.column_index(name) {
            keys.push(KeyColumn {
                name: name.to_string(),
                target_index,
                instruction_index,
            });
        }
    }

    keys
}

/// Pair instruction sheets with target sheets and work out the comparison
/// columns for each pair.
pub fn reconcile<'a>(
    target: &'a Workbook,
    instructions: &'a Workbook,
    config: &AuditConfig,
) -> Reconciliation<'a> {
    let target_sheets = target.by_key();
    let mut out = Reconciliation::default();

    for (name, inst_sheet) in instructions.by_key_ordered() {
        let Some(target_sheet) = target_sheets.get(name) else {
            log::warn!("skipping sheet '{name}': not found in target");
            out.unmatched.push(name.to_string());
            continue;
        };

        let Some(action_index) = find_action_column(&inst_sheet.table, &config.action_column)
        else {
            log::warn!(
                "skipping sheet '{name}': no '{}' column",
                config.action_column
            );
            out.skipped_no_action.push(name.to_string());
            continue;
        };

        let keys = comparison_keys(
            &target_sheet.table,
            &inst_sheet.table,
            action_index,
            &[config.status_column.as_str()],
        );

        if keys.is_empty() {
            log::debug!("sheet '{name}' shares no columns with target; not audited");
            out.no_key_columns.push(name.to_string());
            continue;
        }

        out.plans.push(SheetPlan {
            name: name.to_string(),
            target: target_sheet,
            instructions: inst_sheet,
            action_index,
            action_column: inst_sheet.table.columns[action_index].clone(),
            keys,
        });
    }

    out
}
