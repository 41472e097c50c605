//! Query, option, and result types for municipality search.

use crate::municipality::Municipality;
use crate::types::MunicipalityType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default fuzzy threshold: the largest accepted ratio of edits to pattern length.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Accept a fuzzy threshold only if it is a finite, non-negative number.
pub fn check_threshold(threshold: f64) -> Result<f64, String> {
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(threshold)
    } else {
        Err(format!(
            "threshold must be a non-negative number, got {}",
            threshold
        ))
    }
}

/// Structured constraints and residual text extracted from a query string.
///
/// Built once per query by [`parse_query`](crate::search::parse_query) and
/// never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedQuery {
    /// Case-insensitive substring the county must contain.
    pub county: Option<String>,
    /// Case-insensitive exact municipality type.
    pub kind: Option<String>,
    /// Inclusive lower population bound.
    pub population_min: u64,
    /// Inclusive upper population bound; `None` means unbounded.
    pub population_max: Option<u64>,
    /// Whatever text is left once tokens are stripped, trimmed.
    pub free_text: String,
}

impl ParsedQuery {
    /// A query whose whole text is matched literally, with no structured tokens.
    pub fn literal(query: &str) -> Self {
        Self {
            free_text: query.trim().to_string(),
            ..Self::default()
        }
    }

    /// Whether any structured constraint was found.
    pub fn has_constraints(&self) -> bool {
        self.county.is_some()
            || self.kind.is_some()
            || self.population_min > 0
            || self.population_max.is_some()
    }

    /// No constraints and no free text.
    pub fn is_empty(&self) -> bool {
        !self.has_constraints() && self.free_text.is_empty()
    }
}

/// Whether structured tokens are recognised in the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    /// Parse `county:`, `type:` and `population` tokens.
    #[default]
    Advanced,
    /// Treat the whole query as free text.
    Simple,
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryMode::Advanced => f.write_str("advanced"),
            QueryMode::Simple => f.write_str("simple"),
        }
    }
}

impl std::str::FromStr for QueryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "advanced" => Ok(QueryMode::Advanced),
            "simple" => Ok(QueryMode::Simple),
            _ => Err(format!("Invalid query mode: {}", s)),
        }
    }
}

/// Direction for name ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!("Invalid sort direction: {}", s)),
        }
    }
}

/// Relative weight of each searchable field in relevance scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldWeights {
    pub name: f64,
    pub county: f64,
    pub search_tokens: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            name: 2.0,
            county: 1.0,
            search_tokens: 0.5,
        }
    }
}

/// Filter panel selections, applied on top of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelFilters {
    /// County the record must be in (case-insensitive equality).
    pub county: Option<String>,
    /// Allowed types; empty allows every type.
    pub types: Vec<MunicipalityType>,
    /// Inclusive lower population bound.
    pub population_min: Option<u64>,
    /// Inclusive upper population bound.
    pub population_max: Option<u64>,
}

impl PanelFilters {
    /// True when no panel selection is active.
    pub fn is_empty(&self) -> bool {
        self.county.is_none()
            && self.types.is_empty()
            && self.population_min.is_none()
            && self.population_max.is_none()
    }
}

/// Everything besides the query text that shapes a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub mode: QueryMode,
    /// Explicit name ordering. `None` keeps input order for blank queries and
    /// sorts ascending otherwise. Ignored when ranking by relevance.
    pub direction: Option<SortDirection>,
    /// Fuzzy threshold, see [`DEFAULT_THRESHOLD`].
    pub threshold: f64,
    pub weights: FieldWeights,
    pub filters: PanelFilters,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            mode: QueryMode::default(),
            direction: None,
            threshold: DEFAULT_THRESHOLD,
            weights: FieldWeights::default(),
            filters: PanelFilters::default(),
        }
    }
}

/// A record in a result list, with its relevance when free text was matched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit<'a> {
    pub record: &'a Municipality,
    /// Higher is better. `None` outside relevance ranking.
    pub score: Option<f64>,
}

impl<'a> SearchHit<'a> {
    pub fn unscored(record: &'a Municipality) -> Self {
        Self {
            record,
            score: None,
        }
    }
}
