//! Node.js bindings for munidir.
//!
//! Exposes the municipality query engine to Node.js/TypeScript.

#![deny(clippy::all)]

use napi::bindgen_prelude::*;
use napi_derive::napi;
use serde::{Deserialize, Serialize};

use munidir::search::{self, PanelFilters, QueryMode, SearchOptions, SortDirection};
use munidir::{Dataset, Municipality, MunicipalityType};

// ============================================================================
// Types for JavaScript
// ============================================================================

/// Listing options. Every field is optional and falls back to the default.
#[napi(object)]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsSearchOptions {
    /// "advanced" (default) or "simple".
    pub mode: Option<String>,
    /// "asc" or "desc".
    pub sort: Option<String>,
    pub threshold: Option<f64>,
    pub county: Option<String>,
    pub types: Option<Vec<String>>,
    pub min_population: Option<i64>,
    pub max_population: Option<i64>,
}

#[napi(object)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsSearchResult {
    pub id: String,
    pub name: String,
    #[napi(js_name = "type")]
    pub kind: String,
    pub county: String,
    pub population: i64,
    pub score: Option<f64>,
}

#[napi(object)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsParsedQuery {
    pub county: Option<String>,
    #[napi(js_name = "type")]
    pub kind: Option<String>,
    pub population_min: i64,
    pub population_max: Option<i64>,
    pub free_text: String,
}

fn to_reason<E: std::fmt::Display>(e: E) -> Error {
    Error::from_reason(e.to_string())
}

fn to_population(value: Option<i64>, field: &str) -> Result<Option<u64>> {
    value
        .map(|n| u64::try_from(n).map_err(|_| Error::from_reason(format!("{} must be >= 0", field))))
        .transpose()
}

fn clamp_population(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

impl JsSearchOptions {
    fn into_options(self) -> Result<SearchOptions> {
        let mut options = SearchOptions::default();

        if let Some(mode) = self.mode {
            options.mode = mode.parse::<QueryMode>().map_err(to_reason)?;
        }
        if let Some(sort) = self.sort {
            options.direction = Some(sort.parse::<SortDirection>().map_err(to_reason)?);
        }
        if let Some(threshold) = self.threshold {
            options.threshold = search::check_threshold(threshold).map_err(to_reason)?;
        }

        let types = self
            .types
            .unwrap_or_default()
            .iter()
            .map(|t| t.parse::<MunicipalityType>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(to_reason)?;

        options.filters = PanelFilters {
            county: self.county,
            types,
            population_min: to_population(self.min_population, "minPopulation")?,
            population_max: to_population(self.max_population, "maxPopulation")?,
        };
        Ok(options)
    }

    fn from_options(options: &SearchOptions) -> Self {
        Self {
            mode: Some(options.mode.to_string()),
            sort: options.direction.map(|d| d.to_string()),
            threshold: Some(options.threshold),
            county: options.filters.county.clone(),
            types: Some(options.filters.types.iter().map(|t| t.to_string()).collect()),
            min_population: options.filters.population_min.map(clamp_population),
            max_population: options.filters.population_max.map(clamp_population),
        }
    }
}

fn resolve_options(options: Option<JsSearchOptions>) -> Result<SearchOptions> {
    options.unwrap_or_default().into_options()
}

// ============================================================================
// Index Class
// ============================================================================

#[napi]
pub struct JsMunicipalityIndex {
    dataset: Dataset,
}

#[napi]
impl JsMunicipalityIndex {
    /// Build an index from a JSON array of municipality records.
    #[napi(constructor)]
    pub fn new(records_json: String) -> Result<Self> {
        let records: Vec<Municipality> = serde_json::from_str(&records_json).map_err(to_reason)?;
        let dataset = Dataset::from_records("<memory>", records).map_err(to_reason)?;
        Ok(Self { dataset })
    }

    /// Load an index from a JSON file or a directory of record files.
    #[napi(factory)]
    pub fn load(path: String) -> Result<Self> {
        let dataset = Dataset::load(&path).map_err(to_reason)?;
        Ok(Self { dataset })
    }

    #[napi(getter)]
    pub fn size(&self) -> u32 {
        self.dataset.len() as u32
    }

    /// Filtered and ordered results, with relevance scores for text matches.
    #[napi]
    pub fn search(
        &self,
        query: String,
        options: Option<JsSearchOptions>,
    ) -> Result<Vec<JsSearchResult>> {
        let options = resolve_options(options)?;
        Ok(search::search(self.dataset.records(), &query, &options)
            .into_iter()
            .map(|hit| JsSearchResult {
                id: hit.record.id.clone(),
                name: hit.record.name.clone(),
                kind: hit.record.kind.to_string(),
                county: hit.record.county.clone(),
                population: clamp_population(hit.record.population()),
                score: hit.score,
            })
            .collect())
    }

    /// Ids of the matching records, in result order.
    #[napi]
    pub fn evaluate_ids(&self, query: String, options: Option<JsSearchOptions>) -> Result<Vec<String>> {
        let options = resolve_options(options)?;
        Ok(search::evaluate(self.dataset.records(), &query, &options)
            .into_iter()
            .map(|m| m.id.clone())
            .collect())
    }

    #[napi]
    pub fn county_suggestions(&self, query: String, limit: Option<u32>) -> Vec<String> {
        search::county_suggestions(self.dataset.records(), &query, limit.unwrap_or(10) as usize)
    }

    #[napi]
    pub fn counties(&self) -> Vec<String> {
        self.dataset.counties()
    }

    /// Full record (payload included) by id, FIPS code, or slug.
    #[napi]
    pub fn find(&self, id_or_slug: String) -> Result<Option<serde_json::Value>> {
        self.dataset
            .find(&id_or_slug)
            .map(|m| serde_json::to_value(m).map_err(to_reason))
            .transpose()
    }
}

// ============================================================================
// Standalone Functions
// ============================================================================

/// Split a query into structured constraints and free text.
#[napi]
pub fn parse_query(query: String) -> JsParsedQuery {
    let parsed = search::parse_query(&query);
    JsParsedQuery {
        county: parsed.county,
        kind: parsed.kind,
        population_min: clamp_population(parsed.population_min),
        population_max: parsed.population_max.map(clamp_population),
        free_text: parsed.free_text,
    }
}

/// Encode a listing state as a URL query string (no leading `?`).
#[napi]
pub fn to_query_string(query: String, options: Option<JsSearchOptions>) -> Result<String> {
    let options = resolve_options(options)?;
    Ok(search::to_query_string(&query, &options))
}

#[napi(object)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsListingState {
    pub query: String,
    pub options: JsSearchOptions,
}

/// Decode a URL query string back into a listing state.
#[napi]
pub fn from_query_string(input: String) -> JsListingState {
    let (query, options) = search::from_query_string(&input);
    JsListingState {
        query,
        options: JsSearchOptions::from_options(&options),
    }
}
