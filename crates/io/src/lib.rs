// Dataset loading, merged-cell cleanup and report writing

pub mod csv;
pub mod fill;
pub mod grid;
pub mod report;
pub mod workbook;
pub mod xlsx;

pub use fill::{forward_fill, unmerge_workbook, Role};
pub use report::{write_reports, ReportPaths, ReportStyle};
pub use workbook::load_workbook;
