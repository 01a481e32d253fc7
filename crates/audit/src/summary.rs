use crate::model::{AuditStatus, AuditSummary, AuditedSheet, SheetSummary};

/// Count statuses for one sheet. `Unknown` rows are counted but not part of `total`.
pub fn summarize_sheet(statuses: &[AuditStatus]) -> SheetSummary {
    let mut summary = SheetSummary::default();
    for status in statuses {
        match status {
            AuditStatus::Unknown => summary.unknown += 1,
            AuditStatus::Pass => summary.passed += 1,
            AuditStatus::Fail(_) => summary.failed += 1,
            AuditStatus::Error(_) => summary.errors += 1,
        }
    }
    summary.total = summary.passed + summary.failed + summary.errors;
    summary
}

/// Totals across all audited sheets.
pub fn compute_summary(sheets: &[AuditedSheet]) -> AuditSummary {
    sheets.iter().fold(
        AuditSummary { sheets_audited: sheets.len(), ..AuditSummary::default() },
        |mut acc, sheet| {
            let s = &sheet.summary;
            acc.total += s.total;
            acc.passed += s.passed;
            acc.failed += s.failed;
            acc.errors += s.errors;
            acc.unknown += s.unknown;
            acc
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_is_excluded_from_total() {
        let statuses = vec![
            AuditStatus::Pass,
            AuditStatus::Pass,
            AuditStatus::Fail("not found in target".into()),
            AuditStatus::Error("row has 1 cell(s)".into()),
            AuditStatus::Unknown,
        ];
        let s = summarize_sheet(&statuses);
        assert_eq!(s.total, 4);
        assert_eq!(s.passed, 2);
        assert_eq!(s.failed, 1);
        assert_eq!(s.errors, 1);
        assert_eq!(s.unknown, 1);
        assert_eq!(s.not_passed(), 2);
    }

    #[test]
    fn empty_sheet_list() {
        let s = compute_summary(&[]);
        assert_eq!(s, AuditSummary::default());
    }
}
