//! Shareable listing state as URL query parameters.
//!
//! Only values that differ from the defaults are written, so the default
//! listing encodes to an empty string.

use crate::search::types::{
    DEFAULT_THRESHOLD, PanelFilters, QueryMode, SearchOptions, SortDirection, check_threshold,
};
use crate::types::MunicipalityType;
use tracing::debug;
use url::form_urlencoded;

/// Encode a query and its options as `key=value&...` (no leading `?`).
pub fn to_query_string(query: &str, options: &SearchOptions) -> String {
    let mut params: Vec<(&str, String)> = Vec::new();

    if !query.is_empty() {
        params.push(("q", query.to_string()));
    }
    if options.mode != QueryMode::default() {
        params.push(("mode", options.mode.to_string()));
    }
    if let Some(direction) = options.direction {
        params.push(("sort", direction.to_string()));
    }
    if (options.threshold - DEFAULT_THRESHOLD).abs() > f64::EPSILON {
        params.push(("threshold", options.threshold.to_string()));
    }

    let PanelFilters {
        county,
        types,
        population_min,
        population_max,
    } = &options.filters;

    if let Some(county) = county {
        params.push(("county", county.clone()));
    }
    if !types.is_empty() {
        let joined: Vec<&str> = types.iter().map(|t| t.as_str()).collect();
        params.push(("types", joined.join(",")));
    }
    if let Some(min) = population_min {
        params.push(("minPop", min.to_string()));
    }
    if let Some(max) = population_max {
        params.push(("maxPop", max.to_string()));
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in &params {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Decode a query string produced by [`to_query_string`] (or typed by hand).
///
/// A leading `?` is accepted and `+` decodes to a space. Unknown keys and
/// values that fail to parse are skipped, leaving the default in place.
pub fn from_query_string(input: &str) -> (String, SearchOptions) {
    let mut query = String::new();
    let mut options = SearchOptions::default();

    let input = input.strip_prefix('?').unwrap_or(input);

    for (key, value) in form_urlencoded::parse(input.as_bytes()) {
        let applied = match key.as_ref() {
            "q" => {
                query = value.to_string();
                true
            }
            "mode" => set_parsed(&mut options.mode, &value),
            "sort" => match value.parse::<SortDirection>() {
                Ok(d) => {
                    options.direction = Some(d);
                    true
                }
                Err(_) => false,
            },
            "threshold" => match value.parse::<f64>().map(check_threshold) {
                Ok(Ok(t)) => {
                    options.threshold = t;
                    true
                }
                _ => false,
            },
            "county" => {
                options.filters.county = (!value.is_empty()).then(|| value.to_string());
                true
            }
            "types" => {
                let parsed: Result<Vec<MunicipalityType>, _> = value
                    .split(',')
                    .filter(|s| !s.is_empty())
                    .map(str::parse)
                    .collect();
                match parsed {
                    Ok(types) => {
                        options.filters.types = types;
                        true
                    }
                    Err(_) => false,
                }
            }
            "minPop" => set_parsed_opt(&mut options.filters.population_min, &value),
            "maxPop" => set_parsed_opt(&mut options.filters.population_max, &value),
            _ => false,
        };

        if !applied {
            debug!(key = %key, value = %value, "ignoring listing parameter");
        }
    }

    (query, options)
}

fn set_parsed<T: std::str::FromStr>(slot: &mut T, value: &str) -> bool {
    match value.parse() {
        Ok(v) => {
            *slot = v;
            true
        }
        Err(_) => false,
    }
}

fn set_parsed_opt<T: std::str::FromStr>(slot: &mut Option<T>, value: &str) -> bool {
    match value.parse() {
        Ok(v) => {
            *slot = Some(v);
            true
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_encode_to_empty() {
        assert_eq!(to_query_string("", &SearchOptions::default()), "");
    }

    #[test]
    fn test_encode_non_defaults() {
        let options = SearchOptions {
            mode: QueryMode::Simple,
            direction: Some(SortDirection::Desc),
            filters: PanelFilters {
                county: Some("Du Page".to_string()),
                types: vec![MunicipalityType::City, MunicipalityType::Cdp],
                population_min: Some(1000),
                population_max: None,
            },
            ..SearchOptions::default()
        };
        assert_eq!(
            to_query_string("county:Cook oak", &options),
            "q=county%3ACook+oak&mode=simple&sort=desc&county=Du+Page&types=City%2CCDP&minPop=1000"
        );
    }

    #[test]
    fn test_decode_restores_state() {
        let options = SearchOptions {
            direction: Some(SortDirection::Asc),
            threshold: 0.45,
            filters: PanelFilters {
                county: Some("Will".to_string()),
                types: vec![MunicipalityType::Village],
                population_min: None,
                population_max: Some(25_000),
            },
            ..SearchOptions::default()
        };
        let encoded = to_query_string("type:Village joliet", &options);
        let (query, decoded) = from_query_string(&format!("?{}", encoded));
        assert_eq!(query, "type:Village joliet");
        assert_eq!(decoded, options);
    }

    #[test]
    fn test_decode_plus_as_space_and_bad_values() {
        let (query, options) =
            from_query_string("q=oak+park&sort=sideways&minPop=lots&types=City,Hamlet&extra=1");
        assert_eq!(query, "oak park");
        assert_eq!(options, SearchOptions::default());
    }

    #[test]
    fn test_decode_text_values_alongside_ignored_keys() {
        let (query, options) =
            from_query_string("q=a%2Bb%20c&county=La%20Salle&threshold=-0.5&utm_source=mail");
        assert_eq!(query, "a+b c");
        assert_eq!(options.filters.county, Some("La Salle".to_string()));
        assert_eq!(options.threshold, DEFAULT_THRESHOLD);

        let (query, options) = from_query_string("county=&q=");
        assert_eq!(query, "");
        assert_eq!(options.filters.county, None);
    }

    #[test]
    fn test_reserved_characters_survive() {
        let options = SearchOptions {
            filters: PanelFilters {
                county: Some("St. Clair & Co=op".to_string()),
                ..PanelFilters::default()
            },
            ..SearchOptions::default()
        };
        let encoded = to_query_string("population>=100 a+b", &options);
        assert_eq!(
            encoded,
            "q=population%3E%3D100+a%2Bb&county=St.+Clair+%26+Co%3Dop"
        );
        assert_eq!(
            from_query_string(&encoded),
            ("population>=100 a+b".to_string(), options)
        );
    }
}
