//! Export command: write the records a search selects.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use crate::cli::args::{ExportArgs, ExportFormat};
use crate::cli::output::Output;
use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::export::{JsonOptions, export_csv, export_json};
use crate::search::evaluate;

pub fn run(dataset: &Dataset, config: &Config, args: &ExportArgs, output: &Output) -> Result<()> {
    let options = args.query.apply(config.search_options());
    let records = evaluate(dataset.records(), &args.query.query, &options);

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    let stats = match args.format {
        ExportFormat::Csv => export_csv(records.iter().copied(), &mut writer)?,
        ExportFormat::Json => {
            let options = JsonOptions {
                pretty: args.pretty,
            };
            export_json(&records, &mut writer, &options)?
        }
    };

    // CSV rows carry no trailing newline.
    if args.format == ExportFormat::Csv && args.output.is_none() && stats.records_written > 0 {
        writeln!(writer)?;
    }
    writer.flush()?;

    output.info(&format!("Exported {} records", stats.records_written));
    Ok(())
}
