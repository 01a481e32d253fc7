use crate::config::AuditConfig;
use crate::consistency::check_sheet_consistency;
use crate::error::RowError;
use crate::model::{
    Action, AuditMeta, AuditReport, AuditStatus, AuditedSheet, Cell, Table, Workbook,
    REASON_NOT_FOUND, REASON_STILL_EXISTS,
};
use crate::normalize::Normalizer;
use crate::pool::SearchPool;
use crate::schema::{reconcile, KeyColumn, SheetPlan};
use crate::summary::{compute_summary, summarize_sheet};

/// Audit every instruction sheet against the target workbook.
///
/// Never fails: sheet-level problems are reported in the skip lists and
/// row-level problems as `AuditStatus::Error` on the row.
pub fn run(config: &AuditConfig, target: &Workbook, instructions: &Workbook) -> AuditReport {
    let consistency = check_sheet_consistency(target, instructions);
    let reconciliation = reconcile(target, instructions, config);
    let normalizer = Normalizer::from_config(config);

    let sheets: Vec<AuditedSheet> = reconciliation
        .plans
        .iter()
        .map(|plan| audit_sheet(plan, &normalizer, config))
        .collect();

    let summary = compute_summary(&sheets);

    AuditReport {
        meta: AuditMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            action_column: config.action_column.clone(),
            status_column: config.status_column.clone(),
        },
        summary,
        consistency,
        skipped_no_action: reconciliation.skipped_no_action,
        unmatched: reconciliation.unmatched,
        sheets,
    }
}

/// Audit one matched sheet pair.
pub fn audit_sheet(plan: &SheetPlan<'_>, normalizer: &Normalizer, config: &AuditConfig) -> AuditedSheet {
    let pool = SearchPool::build(&plan.target.table, &plan.keys, normalizer, config.pool_index);
    log::info!(
        "auditing '{}': {} instruction row(s) against {} target row(s), {} key column(s)",
        plan.name,
        plan.instructions.table.row_count(),
        pool.len(),
        plan.keys.len()
    );

    let statuses: Vec<AuditStatus> = plan
        .instructions
        .table
        .rows
        .iter()
        .map(|row| row_status(row, plan.action_index, &plan.keys, normalizer, &pool))
        .collect();

    let table = annotate(&plan.instructions.table, &config.status_column, &statuses);
    let summary = summarize_sheet(&statuses);

    AuditedSheet {
        name: plan.name.clone(),
        action_column: plan.action_column.clone(),
        key_columns: plan.keys.iter().map(|k| k.name.clone()).collect(),
        table,
        statuses,
        pool_rejects: pool.rejects(),
        summary,
    }
}

/// Status of a single instruction row.
pub fn row_status(
    row: &[Cell],
    action_index: usize,
    keys: &[KeyColumn],
    normalizer: &Normalizer,
    pool: &SearchPool,
) -> AuditStatus {
    // A missing action cell reads as empty, which is not an action.
    let Some(action) = row.get(action_index).and_then(Action::parse) else {
        return AuditStatus::Unknown;
    };

    match evaluate(row, action, keys, normalizer, pool) {
        Ok(status) => status,
        Err(e) => AuditStatus::Error(e.to_string()),
    }
}

fn evaluate(
    row: &[Cell],
    action: Action,
    keys: &[KeyColumn],
    normalizer: &Normalizer,
    pool: &SearchPool,
) -> Result<AuditStatus, RowError> {
    let projected = normalizer.project(
        row,
        keys.iter().map(|k| (k.instruction_index, k.name.as_str())),
    )?;
    let present = pool.contains(&projected);

    Ok(match (action, present) {
        (Action::Add, true) | (Action::Delete, false) => AuditStatus::Pass,
        (Action::Add, false) => AuditStatus::Fail(REASON_NOT_FOUND.into()),
        (Action::Delete, true) => AuditStatus::Fail(REASON_STILL_EXISTS.into()),
    })
}

/// Copy of `table` with `status_column` holding each row's status. An existing
/// column of that name is overwritten in place; otherwise one is appended.
/// Ragged rows are padded so the status lands in its own column.
pub fn annotate(table: &Table, status_column: &str, statuses: &[AuditStatus]) -> Table {
    let mut out = table.clone();
    let col = match out.column_index(status_column) {
        Some(i) => i,
        None => {
            out.columns.push(status_column.to_string());
            out.columns.len() - 1
        }
    };

    for (row, status) in out.rows.iter_mut().zip(statuses) {
        if row.len() <= col {
            row.resize(col + 1, Cell::Absent);
        }
        row[col] = Cell::Text(status.to_string());
    }

    out
}
