//! Export records as a JSON array.

use std::io::Write;

use super::ExportStats;
use crate::error::Result;
use crate::municipality::Municipality;

/// Options for JSON export.
#[derive(Debug, Clone, Default)]
pub struct JsonOptions {
    /// Pretty-print the JSON output.
    pub pretty: bool,
}

/// Write `records` (payload included) as a JSON array.
pub fn export_json<W: Write>(
    records: &[&Municipality],
    writer: &mut W,
    options: &JsonOptions,
) -> Result<ExportStats> {
    if options.pretty {
        serde_json::to_writer_pretty(&mut *writer, records)?;
    } else {
        serde_json::to_writer(&mut *writer, records)?;
    }
    writeln!(writer)?;
    writer.flush()?;

    Ok(ExportStats {
        records_written: records.len(),
    })
}
