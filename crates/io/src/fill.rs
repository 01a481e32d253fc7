// Forward fill for merged-cell artifacts
//
// A merged cell in Excel only carries its value in the top-left cell; the
// rest of the merge reads back as empty. Filling down restores the value on
// every row the merge covered.

use sheetaudit_audit::schema::find_action_column;
use sheetaudit_audit::{Cell, Table, Workbook};

/// Which dataset a workbook is; decides what forward fill may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Target,
    Instructions,
}

/// Fill absent cells with the nearest value above them in the same column,
/// except in the columns listed in `skip`.
pub fn forward_fill(table: &mut Table, skip: &[usize]) {
    let width = table.columns.len();
    let mut last: Vec<Option<Cell>> = vec![None; width];

    for row in &mut table.rows {
        for (col, slot) in last.iter_mut().enumerate() {
            if skip.contains(&col) {
                continue;
            }
            match row.get_mut(col) {
                Some(cell) if cell.is_absent() => {
                    if let Some(prev) = slot {
                        *cell = prev.clone();
                    }
                }
                Some(cell) => *slot = Some(cell.clone()),
                None => {}
            }
        }
    }
}

/// Forward-fill every sheet. Instruction sheets keep their action column as-is,
/// so a blank action never inherits `add`/`delete` from the row above.
pub fn unmerge_workbook(workbook: &mut Workbook, role: Role, action_column: &str) {
    for sheet in &mut workbook.sheets {
        let skip: Vec<usize> = match role {
            Role::Target => Vec::new(),
            Role::Instructions => find_action_column(&sheet.table, action_column)
                .into_iter()
                .collect(),
        };
        forward_fill(&mut sheet.table, &skip);
    }
}
