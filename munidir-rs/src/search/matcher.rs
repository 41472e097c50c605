//! Predicate evaluation against a municipality record.

use crate::municipality::Municipality;
use crate::search::fuzzy::{Pattern, field_norm};
use crate::search::types::{FieldWeights, PanelFilters, ParsedQuery};
use tracing::trace;

/// Whether `record` satisfies every structured constraint in `query`.
///
/// County is a case-insensitive substring test, type a case-insensitive
/// exact test, and population must lie within the inclusive bounds. Inverted
/// bounds match nothing.
pub fn matches_structured(record: &Municipality, query: &ParsedQuery) -> bool {
    if let Some(ref county) = query.county {
        if !record
            .county
            .to_lowercase()
            .contains(&county.to_lowercase())
        {
            return false;
        }
    }

    if let Some(ref kind) = query.kind {
        if record.kind.as_str().to_lowercase() != kind.to_lowercase() {
            return false;
        }
    }

    in_bounds(record.population(), query.population_min, query.population_max)
}

/// Whether `record` passes the filter panel selections.
pub fn matches_panel(record: &Municipality, filters: &PanelFilters) -> bool {
    if let Some(ref county) = filters.county {
        if record.county.to_lowercase() != county.to_lowercase() {
            return false;
        }
    }

    if !filters.types.is_empty() && !filters.types.contains(&record.kind) {
        return false;
    }

    in_bounds(
        record.population(),
        filters.population_min.unwrap_or(0),
        filters.population_max,
    )
}

fn in_bounds(value: u64, min: u64, max: Option<u64>) -> bool {
    value >= min && max.is_none_or(|max| value <= max)
}

/// Relevance of `record` for `pattern`, or `None` when no field is close enough.
///
/// Each field whose mismatch ratio is within `threshold` contributes
/// `weight * (1 - ratio) * norm`, where `norm` favours shorter fields.
pub fn score_text(
    record: &Municipality,
    pattern: &Pattern,
    weights: &FieldWeights,
    threshold: f64,
) -> Option<f64> {
    let fields = [
        (record.name.as_str(), weights.name),
        (record.county.as_str(), weights.county),
        (record.search_tokens.as_str(), weights.search_tokens),
    ];

    let mut total = 0.0;
    let mut matched = false;

    for (text, weight) in fields {
        if let Some(ratio) = pattern.mismatch(text, threshold) {
            matched = true;
            total += weight * (1.0 - ratio) * field_norm(text);
        }
    }

    if matched {
        trace!(id = %record.id, score = total, "fuzzy match");
        Some(total)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::parse_query;
    use crate::search::types::DEFAULT_THRESHOLD;
    use crate::types::MunicipalityType;

    fn chicago() -> Municipality {
        Municipality::new("chicago", "Chicago", MunicipalityType::City, "Cook", 2_700_000)
    }

    fn heights() -> Municipality {
        Municipality::new("chicago-heights", "Chicago Heights", MunicipalityType::City, "Cook", 29_000)
    }

    fn oak_park() -> Municipality {
        Municipality::new("oak-park", "Oak Park", MunicipalityType::Village, "Cook", 54_000)
            .with_search_tokens("hemingway frank lloyd wright")
    }

    // -- Structured constraints --

    #[test]
    fn test_county_substring_case_insensitive() {
        assert!(matches_structured(&chicago(), &parse_query("county:cOo")));
        assert!(!matches_structured(&chicago(), &parse_query("county:Lake")));
    }

    #[test]
    fn test_type_exact_case_insensitive() {
        assert!(matches_structured(&oak_park(), &parse_query("type:village")));
        assert!(!matches_structured(&oak_park(), &parse_query("type:vill")));
        assert!(!matches_structured(&chicago(), &parse_query("type:Village")));
    }

    #[test]
    fn test_population_bounds_inclusive() {
        assert!(matches_structured(&heights(), &parse_query("population>29000")));
        assert!(matches_structured(&heights(), &parse_query("population<29000")));
        assert!(matches_structured(&heights(), &parse_query("population=29000")));
        assert!(!matches_structured(&heights(), &parse_query("population>29001")));
        assert!(!matches_structured(&heights(), &parse_query("population<28999")));
    }

    #[test]
    fn test_inverted_bounds_match_nothing() {
        let q = ParsedQuery {
            population_min: 100_000,
            population_max: Some(10),
            ..ParsedQuery::default()
        };
        assert!(!matches_structured(&chicago(), &q));
        assert!(!matches_structured(&heights(), &q));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let q = parse_query("");
        assert!(matches_structured(&chicago(), &q));
        assert!(matches_structured(&oak_park(), &q));
    }

    // -- Panel filters --

    #[test]
    fn test_panel_county_is_exact() {
        let filters = PanelFilters {
            county: Some("cook".to_string()),
            ..PanelFilters::default()
        };
        assert!(matches_panel(&chicago(), &filters));

        let filters = PanelFilters {
            county: Some("Coo".to_string()),
            ..PanelFilters::default()
        };
        assert!(!matches_panel(&chicago(), &filters));
    }

    #[test]
    fn test_panel_types_and_population() {
        let filters = PanelFilters {
            types: vec![MunicipalityType::Village, MunicipalityType::Town],
            population_min: Some(50_000),
            population_max: Some(60_000),
            ..PanelFilters::default()
        };
        assert!(matches_panel(&oak_park(), &filters));
        assert!(!matches_panel(&chicago(), &filters));
        assert!(matches_panel(&chicago(), &PanelFilters::default()));
    }

    // -- Fuzzy scoring --

    #[test]
    fn test_score_prefers_shorter_name() {
        let p = Pattern::new("chicag").unwrap();
        let w = FieldWeights::default();
        let a = score_text(&chicago(), &p, &w, DEFAULT_THRESHOLD).unwrap();
        let b = score_text(&heights(), &p, &w, DEFAULT_THRESHOLD).unwrap();
        assert!(a > b);
    }

    #[test]
    fn test_score_matches_county_and_tokens() {
        let w = FieldWeights::default();

        let by_county = Pattern::new("cook").unwrap();
        assert!(score_text(&oak_park(), &by_county, &w, DEFAULT_THRESHOLD).is_some());

        let by_token = Pattern::new("hemingway").unwrap();
        let score = score_text(&oak_park(), &by_token, &w, DEFAULT_THRESHOLD).unwrap();
        assert!(score < w.name);
        assert!(score_text(&chicago(), &by_token, &w, DEFAULT_THRESHOLD).is_none());
    }

    #[test]
    fn test_score_rejects_unrelated() {
        let p = Pattern::new("springfield").unwrap();
        let w = FieldWeights::default();
        assert!(score_text(&chicago(), &p, &w, DEFAULT_THRESHOLD).is_none());
        assert!(score_text(&oak_park(), &p, &w, DEFAULT_THRESHOLD).is_none());
    }

    #[test]
    fn test_score_tolerates_typo() {
        let p = Pattern::new("chicgo").unwrap();
        let w = FieldWeights::default();
        let exact = Pattern::new("chicago").unwrap();
        let typo_score = score_text(&chicago(), &p, &w, DEFAULT_THRESHOLD).unwrap();
        let exact_score = score_text(&chicago(), &exact, &w, DEFAULT_THRESHOLD).unwrap();
        assert!(typo_score < exact_score);
    }
}
