//! Search command implementation.

use crate::cli::args::SearchArgs;
use crate::cli::output::Output;
use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::search::{self, SearchHit};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub mode: String,
    pub total: usize,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Serialize)]
pub struct SearchResult {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub county: String,
    pub population: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl From<&SearchHit<'_>> for SearchResult {
    fn from(hit: &SearchHit<'_>) -> Self {
        Self {
            id: hit.record.id.clone(),
            name: hit.record.name.clone(),
            kind: hit.record.kind.to_string(),
            county: hit.record.county.clone(),
            population: hit.record.population(),
            score: hit.score,
        }
    }
}

pub fn run(dataset: &Dataset, config: &Config, args: &SearchArgs, output: &Output) -> Result<()> {
    let options = args.query.apply(config.search_options());
    let hits = search::search(dataset.records(), &args.query.query, &options);

    let limit = args.limit.unwrap_or(config.search.limit);
    let response = SearchResponse {
        query: args.query.query.clone(),
        mode: options.mode.to_string(),
        total: hits.len(),
        results: hits.iter().take(limit).map(SearchResult::from).collect(),
    };
    output.print(&response)?;

    Ok(())
}
