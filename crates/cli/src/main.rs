// SheetAudit CLI - audit add/delete instructions against a target workbook

mod audit;
mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

use exit_codes::{EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "sheetaudit")]
#[command(about = "Audit add/delete instructions against a target workbook")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit every instruction sheet against the target and write reports
    #[command(after_help = "\
Exit code 1 means the audit ran and found failed rows, row errors, or sheets \
present on only one side.

Examples:
  sheetaudit run target.xlsx instructions.xlsx
  sheetaudit run target.xlsx instructions.xlsx --out-dir reports/
  sheetaudit run target.xlsx instructions.xlsx --config audit.toml
  sheetaudit run target.xlsx instructions.xlsx --no-reports --json | jq .summary")]
    Run {
        /// Target workbook (current state of the data)
        target: PathBuf,

        /// Instructions workbook (rows with an add/delete action)
        instructions: PathBuf,

        /// Audit config (.toml); defaults apply when omitted
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Directory for the text and xlsx reports
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Skip writing the text and xlsx reports
        #[arg(long)]
        no_reports: bool,

        /// Do not forward-fill merged cells before the audit
        #[arg(long)]
        no_fill: bool,

        /// Print the full audit result as JSON to stdout
        #[arg(long)]
        json: bool,

        /// Write the full audit result as JSON to a file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Compare sheet names only (missing / extra sheets)
    #[command(after_help = "\
Examples:
  sheetaudit sheets target.xlsx instructions.xlsx
  sheetaudit sheets target.xlsx instructions.xlsx --json")]
    Sheets {
        /// Target workbook
        target: PathBuf,

        /// Instructions workbook
        instructions: PathBuf,

        /// Output JSON instead of tab-separated lines
        #[arg(long)]
        json: bool,
    },

    /// Validate an audit config without running
    #[command(after_help = "\
Examples:
  sheetaudit validate audit.toml")]
    Validate {
        /// Path to the .toml config file
        config: PathBuf,
    },
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        None => Err(CliError {
            code: EXIT_USAGE,
            message: "no command given".to_string(),
            hint: Some("sheetaudit --help for more information".to_string()),
        }),
        Some(Commands::Run {
            target,
            instructions,
            config,
            out_dir,
            no_reports,
            no_fill,
            json,
            output,
        }) => audit::cmd_run(audit::RunArgs {
            target,
            instructions,
            config,
            out_dir,
            no_reports,
            no_fill,
            json,
            output,
        }),
        Some(Commands::Sheets { target, instructions, json }) => {
            audit::cmd_sheets(target, instructions, json)
        }
        Some(Commands::Validate { config }) => audit::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
