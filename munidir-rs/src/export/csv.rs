//! Export records as flat CSV.

use std::io::Write;

use serde_json::Value;

use super::ExportStats;
use crate::error::Result;
use crate::municipality::Municipality;

/// Column order of the CSV header.
pub const CSV_COLUMNS: [&str; 8] = [
    "id",
    "name",
    "type",
    "county",
    "population_current",
    "median_income",
    "lat",
    "lng",
];

/// One CSV row. Missing payload values are `None` and export as empty cells.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRow {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub county: String,
    pub population_current: Option<u64>,
    pub median_income: Option<f64>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl FlatRow {
    pub fn from_record(m: &Municipality) -> Self {
        Self {
            id: m.id.clone(),
            name: m.name.clone(),
            kind: m.kind.to_string(),
            county: m.county.clone(),
            population_current: Some(m.population()),
            median_income: m
                .detail(&["economics", "medianHouseholdIncome"])
                .and_then(Value::as_f64),
            lat: m.detail(&["coordinates", "lat"]).and_then(Value::as_f64),
            lng: m.detail(&["coordinates", "lng"]).and_then(Value::as_f64),
        }
    }

    fn cells(&self) -> [String; 8] {
        [
            self.id.clone(),
            self.name.clone(),
            self.kind.clone(),
            self.county.clone(),
            opt_cell(self.population_current),
            opt_cell(self.median_income),
            opt_cell(self.lat),
            opt_cell(self.lng),
        ]
    }
}

fn opt_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Every cell is double-quoted; embedded quotes are doubled.
fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

/// Write `records` as CSV: a header line, then one line per record, separated
/// by `\n` with no trailing newline. An empty record set writes nothing.
pub fn export_csv<'a, W, I>(records: I, writer: &mut W) -> Result<ExportStats>
where
    W: Write,
    I: IntoIterator<Item = &'a Municipality>,
{
    let mut stats = ExportStats::default();

    for record in records {
        if stats.records_written == 0 {
            write!(writer, "{}", CSV_COLUMNS.join(","))?;
        }
        let row = FlatRow::from_record(record);
        let line: Vec<String> = row.cells().iter().map(|c| quote(c)).collect();
        write!(writer, "\n{}", line.join(","))?;
        stats.records_written += 1;
    }

    writer.flush()?;
    Ok(stats)
}
