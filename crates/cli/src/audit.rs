//! `sheetaudit run|sheets|validate`: load, clean, audit, report.

use std::path::{Path, PathBuf};

use sheetaudit_audit::consistency::check_sheet_consistency;
use sheetaudit_audit::{AuditConfig, AuditReport, Workbook};
use sheetaudit_io::{load_workbook, unmerge_workbook, write_reports, ReportStyle, Role};

use crate::exit_codes::{EXIT_AUDIT_FAILED, EXIT_CONFIG, EXIT_INPUT, EXIT_REPORT};
use crate::CliError;

pub struct RunArgs {
    pub target: PathBuf,
    pub instructions: PathBuf,
    pub config: Option<PathBuf>,
    pub out_dir: PathBuf,
    pub no_reports: bool,
    pub no_fill: bool,
    pub json: bool,
    pub output: Option<PathBuf>,
}

fn audit_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

fn load_config(path: Option<&Path>) -> Result<AuditConfig, CliError> {
    match path {
        Some(path) => AuditConfig::from_file(path).map_err(|e| audit_err(EXIT_CONFIG, e.to_string())),
        None => Ok(AuditConfig::default()),
    }
}

fn load_input(path: &Path, what: &str) -> Result<Workbook, CliError> {
    load_workbook(path).map_err(|e| {
        audit_err(EXIT_INPUT, format!("cannot load {what} file: {e}"))
            .with_hint("supported inputs: .xlsx, .xlsm, .xls, .xlsb, .ods, .csv, .tsv")
    })
}

pub fn cmd_run(args: RunArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;

    log::info!("[1/4] loading files");
    let mut target = load_input(&args.target, "target")?;
    let mut instructions = load_input(&args.instructions, "instructions")?;

    if config.fill.enabled && !args.no_fill {
        log::info!("[2/4] filling merged cells");
        unmerge_workbook(&mut target, Role::Target, &config.action_column);
        unmerge_workbook(&mut instructions, Role::Instructions, &config.action_column);
    }

    log::info!("[3/4] running audit");
    let report = sheetaudit_audit::run(&config, &target, &instructions);

    if args.json || args.output.is_some() {
        let json_str = serde_json::to_string_pretty(&report)
            .map_err(|e| audit_err(EXIT_REPORT, format!("JSON serialization error: {e}")))?;

        if let Some(ref path) = args.output {
            std::fs::write(path, &json_str)
                .map_err(|e| audit_err(EXIT_REPORT, format!("cannot write output: {e}")))?;
            eprintln!("wrote {}", path.display());
        }

        if args.json {
            println!("{json_str}");
        }
    }

    if !args.no_reports {
        log::info!("[4/4] generating reports");
        let paths = write_reports(&report, &args.out_dir, &config.reports, &ReportStyle::default())
            .map_err(|e| {
                let err = audit_err(EXIT_REPORT, e.to_string());
                if e.path.extension().is_some_and(|ext| ext == "xlsx") {
                    err.with_hint(format!(
                        "close '{}' if it is open in another program and try again",
                        e.path.display()
                    ))
                } else {
                    err
                }
            })?;
        eprintln!("wrote {}", paths.summary.display());
        eprintln!("wrote {}", paths.excel.display());
        eprintln!("wrote {}", paths.raw.display());
    }

    print_summary(&report);

    if report.is_clean() {
        Ok(())
    } else {
        Err(audit_err(EXIT_AUDIT_FAILED, "audit found failures or sheet discrepancies"))
    }
}

/// Human summary on stderr.
fn print_summary(report: &AuditReport) {
    let s = &report.summary;
    eprintln!(
        "audited {} sheet(s), {} rows checked: {} passed, {} failed, {} errors ({} rows not evaluated)",
        s.sheets_audited, s.total, s.passed, s.failed, s.errors, s.unknown,
    );

    let c = &report.consistency;
    if !c.is_consistent() {
        eprintln!(
            "discrepancies: {} missing and {} extra sheet(s)",
            c.missing.len(),
            c.extra.len()
        );
        for name in &c.missing {
            eprintln!("  missing in target: {name}");
        }
        for name in &c.extra {
            eprintln!("  extra in target:   {name}");
        }
    }

    if !report.skipped_no_action.is_empty() {
        eprintln!(
            "skipped (no '{}' column): {}",
            report.meta.action_column,
            report.skipped_no_action.join(", ")
        );
    }
}

pub fn cmd_sheets(target: PathBuf, instructions: PathBuf, json: bool) -> Result<(), CliError> {
    let target = load_input(&target, "target")?;
    let instructions = load_input(&instructions, "instructions")?;
    let report = check_sheet_consistency(&target, &instructions);

    if json {
        let json_str = serde_json::to_string_pretty(&report)
            .map_err(|e| audit_err(EXIT_REPORT, format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    } else {
        for name in &report.missing {
            println!("missing\t{name}");
        }
        for name in &report.extra {
            println!("extra\t{name}");
        }
    }

    if report.is_consistent() {
        eprintln!("sheet sets match");
        Ok(())
    } else {
        Err(audit_err(
            EXIT_AUDIT_FAILED,
            format!(
                "{} missing and {} extra sheet(s)",
                report.missing.len(),
                report.extra.len()
            ),
        ))
    }
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config(Some(&config_path))?;
    eprintln!(
        "valid: action column '{}', status column '{}', forward fill {}",
        config.action_column,
        config.status_column,
        if config.fill.enabled { "on" } else { "off" },
    );
    Ok(())
}
