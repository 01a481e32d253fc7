//! `sheetaudit-audit` - row-level add/delete audit engine.
//!
//! Pure engine crate: receives pre-loaded workbooks, returns per-row statuses
//! and sheet-level discrepancies. No CLI or IO dependencies.

pub mod config;
pub mod consistency;
pub mod engine;
pub mod error;
pub mod model;
pub mod normalize;
pub mod pool;
pub mod schema;
pub mod summary;

pub use config::AuditConfig;
pub use engine::run;
pub use error::{AuditError, RowError};
pub use model::{AuditReport, AuditStatus, AuditedSheet, Cell, Sheet, Table, Workbook};
pub use normalize::Normalizer;
