//! County listing and suggestions.

use crate::cli::args::CountiesArgs;
use crate::cli::output::Output;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::search::county_suggestions;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CountiesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub total: usize,
    pub counties: Vec<String>,
}

pub fn run(dataset: &Dataset, args: &CountiesArgs, output: &Output) -> Result<()> {
    let counties = match args.query.as_deref() {
        Some(query) => county_suggestions(dataset.records(), query, args.limit),
        None => dataset.counties(),
    };

    let response = CountiesResponse {
        query: args.query.clone(),
        total: counties.len(),
        counties,
    };
    output.print(&response)?;
    Ok(())
}
