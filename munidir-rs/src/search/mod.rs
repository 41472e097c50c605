//! Query engine: tokenize, filter, fuzzy-match, and rank municipality records.
//!
//! ```
//! use munidir::{Municipality, MunicipalityType};
//! use munidir::search::{evaluate, SearchOptions};
//!
//! let records = vec![
//!     Municipality::new("chicago", "Chicago", MunicipalityType::City, "Cook", 2_700_000),
//!     Municipality::new("chicago-heights", "Chicago Heights", MunicipalityType::City, "Cook", 29_000),
//! ];
//! let found = evaluate(&records, "population>100000", &SearchOptions::default());
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].name, "Chicago");
//! ```

pub mod fuzzy;
pub mod matcher;
pub mod parser;
pub mod ranker;
pub mod types;
pub mod url_state;

pub use matcher::{matches_panel, matches_structured, score_text};
pub use parser::parse_query;
pub use ranker::{RankMode, rank};
pub use types::*;
pub use url_state::{from_query_string, to_query_string};

use crate::municipality::Municipality;
use fuzzy::Pattern;
use std::collections::BTreeSet;
use tracing::debug;

/// Filter and order `records` for `query`, returning the records themselves.
pub fn evaluate<'a>(
    records: &'a [Municipality],
    query: &str,
    options: &SearchOptions,
) -> Vec<&'a Municipality> {
    search(records, query, options)
        .into_iter()
        .map(|hit| hit.record)
        .collect()
}

/// Filter and order `records` for `query`, keeping relevance scores.
///
/// - A blank query with no explicit direction keeps input order (only the
///   panel filters apply).
/// - When free text remains after tokenizing, records are fuzzy-matched and
///   ranked best first.
/// - Otherwise records are sorted by name in the requested direction
///   (ascending by default).
pub fn search<'a>(
    records: &'a [Municipality],
    query: &str,
    options: &SearchOptions,
) -> Vec<SearchHit<'a>> {
    let blank = query.trim().is_empty();
    let parsed = match options.mode {
        QueryMode::Advanced => parse_query(query),
        QueryMode::Simple => ParsedQuery::literal(query),
    };
    debug!(
        county = ?parsed.county,
        kind = ?parsed.kind,
        population_min = parsed.population_min,
        population_max = ?parsed.population_max,
        free_text = %parsed.free_text,
        "parsed query"
    );

    let mut hits: Vec<SearchHit<'a>> = records
        .iter()
        .filter(|r| matches_panel(r, &options.filters) && matches_structured(r, &parsed))
        .map(SearchHit::unscored)
        .collect();
    let candidates = hits.len();

    let mode = match Pattern::new(&parsed.free_text) {
        Some(pattern) => {
            hits = hits
                .into_iter()
                .filter_map(|hit| {
                    score_text(hit.record, &pattern, &options.weights, options.threshold)
                        .map(|score| SearchHit {
                            record: hit.record,
                            score: Some(score),
                        })
                })
                .collect();
            RankMode::Relevance
        }
        None if blank => options.direction.map_or(RankMode::Preserve, RankMode::Name),
        None => RankMode::Name(options.direction.unwrap_or_default()),
    };

    rank(&mut hits, mode);
    debug!(
        total = records.len(),
        candidates,
        matched = hits.len(),
        ?mode,
        "search complete"
    );
    hits
}

/// Counties whose name contains `query` (case-insensitive), sorted and
/// deduplicated, at most `limit`. A blank query suggests nothing.
pub fn county_suggestions(records: &[Municipality], query: &str, limit: usize) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    records
        .iter()
        .map(|r| r.county.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .filter(|c| c.to_lowercase().contains(&needle))
        .take(limit)
        .map(str::to_string)
        .collect()
}
