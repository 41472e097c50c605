//! Municipality record representation.

use crate::text::slugify;
use crate::types::{MunicipalityType, Population};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One municipality's profile as read from the data file.
///
/// The query engine only looks at `name`, `kind`, `county`,
/// `population.current` and `search_tokens`. Economics, government,
/// coordinates, history and the rest ride along in `details` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Municipality {
    /// Unique identifier (e.g. "chicago").
    pub id: String,

    /// Display name.
    pub name: String,

    /// City, Village, Town or CDP.
    #[serde(rename = "type")]
    pub kind: MunicipalityType,

    /// County name (e.g. "Cook").
    pub county: String,

    pub population: Population,

    /// Federal FIPS place code, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fips_code: Option<String>,

    /// Extra free-form text to match against (aliases, neighborhoods, ZIPs).
    #[serde(default)]
    pub search_tokens: String,

    /// Opaque profile payload.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Municipality {
    /// Create a record with no payload.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: MunicipalityType,
        county: impl Into<String>,
        population: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            county: county.into(),
            population: Population::new(population),
            fips_code: None,
            search_tokens: String::new(),
            details: Map::new(),
        }
    }

    /// Builder-style setter for the search token string.
    pub fn with_search_tokens(mut self, tokens: impl Into<String>) -> Self {
        self.search_tokens = tokens.into();
        self
    }

    /// Current population.
    pub fn population(&self) -> u64 {
        self.population.current
    }

    /// URL slug: the record's own `slug` field if it has one, else derived
    /// from the name.
    pub fn slug(&self) -> String {
        match self.details.get("slug").and_then(Value::as_str) {
            Some(explicit) => explicit.to_lowercase(),
            None => slugify(&self.name),
        }
    }

    /// Look up a nested payload value, e.g. `detail(&["economics", "medianHouseholdIncome"])`.
    pub fn detail(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.details.get(*first)?;
        for key in rest {
            current = current.get(key)?;
        }
        Some(current)
    }

    /// Whether this record answers to `id_or_slug` (id, FIPS code, or name slug).
    pub fn matches_id_or_slug(&self, id_or_slug: &str) -> bool {
        let normalized = id_or_slug.trim().to_lowercase();
        if normalized.is_empty() {
            return false;
        }
        self.id.to_lowercase() == normalized
            || self
                .fips_code
                .as_deref()
                .is_some_and(|f| f.to_lowercase() == normalized)
            || self.slug() == normalized
    }
}
