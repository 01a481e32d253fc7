use std::collections::BTreeSet;

use crate::model::{ConsistencyReport, Workbook};

/// Compare the sheet names of both workbooks (trimmed). Results are sorted.
pub fn check_sheet_consistency(target: &Workbook, instructions: &Workbook) -> ConsistencyReport {
    compare_sheet_names(target.sheet_names(), instructions.sheet_names())
}

pub fn compare_sheet_names<'a, T, I>(target: T, instructions: I) -> ConsistencyReport
where
    T: IntoIterator<Item = &'a str>,
    I: IntoIterator<Item = &'a str>,
{
    let target: BTreeSet<&str> = target.into_iter().map(str::trim).collect();
    let instructions: BTreeSet<&str> = instructions.into_iter().map(str::trim).collect();

    ConsistencyReport {
        missing: instructions.difference(&target).map(|s| s.to_string()).collect(),
        extra: target.difference(&instructions).map(|s| s.to_string()).collect(),
    }
}
