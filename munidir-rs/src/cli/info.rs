//! Dataset info command.

use crate::cli::output::Output;
use crate::dataset::Dataset;
use crate::error::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct InfoOutput {
    pub data_path: PathBuf,
    pub record_count: usize,
    pub county_count: usize,
    pub total_population: u64,
    pub by_type: BTreeMap<String, usize>,
    pub largest: Vec<LargestRecord>,
}

#[derive(Debug, Serialize)]
pub struct LargestRecord {
    pub id: String,
    pub name: String,
    pub population: u64,
}

const LARGEST_COUNT: usize = 5;

pub fn info(dataset: &Dataset, output: &Output) -> Result<()> {
    let stats = dataset.stats();

    let mut by_size: Vec<_> = dataset.records().iter().collect();
    by_size.sort_by(|a, b| b.population().cmp(&a.population()));

    let response = InfoOutput {
        data_path: dataset.source.clone(),
        record_count: stats.record_count,
        county_count: stats.by_county.len(),
        total_population: stats.total_population,
        by_type: stats.by_type,
        largest: by_size
            .into_iter()
            .take(LARGEST_COUNT)
            .map(|m| LargestRecord {
                id: m.id.clone(),
                name: m.name.clone(),
                population: m.population(),
            })
            .collect(),
    };
    output.print(&response)?;
    Ok(())
}
