//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Scripts and CI jobs branch on these values, so never renumber them.
//!
//! | Code | Meaning                                                   |
//! |------|-----------------------------------------------------------|
//! | 0    | Success; every checked row passed, sheet sets agree       |
//! | 1    | Audit found failed/errored rows or sheet discrepancies    |
//! | 2    | CLI usage error (bad args)                                |
//! | 3    | Input file could not be read or parsed                    |
//! | 4    | Invalid config file                                       |
//! | 5    | Report could not be written                               |

/// Success.
pub const EXIT_SUCCESS: u8 = 0;

/// The audit ran and found problems. Like `diff(1)`, exit 1 means "differs".
pub const EXIT_AUDIT_FAILED: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Target or instructions file missing, unsupported, or unreadable.
pub const EXIT_INPUT: u8 = 3;

/// Config file missing, malformed, or failing validation.
pub const EXIT_CONFIG: u8 = 4;

/// Report or JSON output could not be written.
pub const EXIT_REPORT: u8 = 5;
