//! Export selected municipality records.
//!
//! Supports:
//! - Flat CSV (one row per record, the columns a spreadsheet needs)
//! - JSON (the full records, payload included)

mod csv;
mod json;

pub use csv::{CSV_COLUMNS, FlatRow, export_csv};
pub use json::{JsonOptions, export_json};

/// Statistics from an export run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportStats {
    pub records_written: usize,
}
