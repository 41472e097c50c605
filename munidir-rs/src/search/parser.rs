//! Sequential-strip tokenizer for advanced search queries.
//!
//! Grammar (each kind is extracted once, in this order, and removed from the
//! text before the next kind is looked for):
//! ```text
//! county_token     = "county:" NON_WS+
//! type_token       = "type:" NON_WS+
//! population_token = "population" ( ">" | "<" | "=" ) DIGIT+
//! free_text        = whatever remains, trimmed
//! ```
//! Keys are case-insensitive. A fragment that does not fit its rule (for
//! example `population>abc`) is left alone and ends up in the free text.

use crate::search::types::ParsedQuery;

const COUNTY_KEY: &str = "county:";
const TYPE_KEY: &str = "type:";
const POPULATION_KEY: &str = "population";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PopulationOp {
    Gt,
    Lt,
    Eq,
}

/// Parse a raw query string into structured constraints plus free text.
///
/// Never fails: anything that is not a well-formed token stays as literal text.
pub fn parse_query(query: &str) -> ParsedQuery {
    let mut text = query.to_string();

    let county = take_keyed_value(&mut text, COUNTY_KEY);
    let kind = take_keyed_value(&mut text, TYPE_KEY);

    let (population_min, population_max) = match take_population(&mut text) {
        Some((PopulationOp::Gt, n)) => (n, None),
        Some((PopulationOp::Lt, n)) => (0, Some(n)),
        Some((PopulationOp::Eq, n)) => (n, Some(n)),
        None => (0, None),
    };

    ParsedQuery {
        county,
        kind,
        population_min,
        population_max,
        free_text: text.trim().to_string(),
    }
}

/// Byte offset of the first case-insensitive occurrence of an ASCII `key`
/// at or after `from`.
///
/// A match can only start on an ASCII byte, so the offset is always a char boundary.
fn find_key(text: &str, key: &str, from: usize) -> Option<usize> {
    let hay = text.as_bytes();
    let needle = key.as_bytes();
    if needle.len() > hay.len() {
        return None;
    }
    (from..=hay.len() - needle.len()).find(|&i| hay[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

/// Remove the first `key<value>` where value is a non-empty run of
/// non-whitespace characters, returning the value.
fn take_keyed_value(text: &mut String, key: &str) -> Option<String> {
    let mut from = 0;
    while let Some(start) = find_key(text, key, from) {
        let value_start = start + key.len();
        let value_len: usize = text[value_start..]
            .chars()
            .take_while(|c| !c.is_whitespace())
            .map(char::len_utf8)
            .sum();

        if value_len > 0 {
            let value = text[value_start..value_start + value_len].to_string();
            text.replace_range(start..value_start + value_len, "");
            return Some(value);
        }
        from = start + 1;
    }
    None
}

/// Remove the first well-formed population token, returning its operator and bound.
fn take_population(text: &mut String) -> Option<(PopulationOp, u64)> {
    let mut from = 0;
    while let Some(start) = find_key(text, POPULATION_KEY, from) {
        from = start + 1;

        let op_pos = start + POPULATION_KEY.len();
        let op = match text.as_bytes().get(op_pos) {
            Some(b'>') => PopulationOp::Gt,
            Some(b'<') => PopulationOp::Lt,
            Some(b'=') => PopulationOp::Eq,
            _ => continue,
        };

        let digits_start = op_pos + 1;
        let digits_len = text.as_bytes()[digits_start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits_len == 0 {
            continue;
        }

        let end = digits_start + digits_len;
        // Out-of-range numbers are malformed and stay as text.
        let Ok(value) = text[digits_start..end].parse::<u64>() else {
            continue;
        };

        text.replace_range(start..end, "");
        return Some((op, value));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query() {
        let q = parse_query("");
        assert!(q.is_empty());
        let q = parse_query("   \t ");
        assert!(q.is_empty());
        assert_eq!(q.free_text, "");
    }

    #[test]
    fn test_plain_text() {
        let q = parse_query("  chicago heights ");
        assert!(!q.has_constraints());
        assert_eq!(q.free_text, "chicago heights");
    }

    #[test]
    fn test_county_token() {
        let q = parse_query("county:Cook");
        assert_eq!(q.county.as_deref(), Some("Cook"));
        assert_eq!(q.free_text, "");
    }

    #[test]
    fn test_type_token() {
        let q = parse_query("type:Village");
        assert_eq!(q.kind.as_deref(), Some("Village"));
    }

    #[test]
    fn test_keys_case_insensitive() {
        let q = parse_query("COUNTY:lake Type:city POPULATION>500");
        assert_eq!(q.county.as_deref(), Some("lake"));
        assert_eq!(q.kind.as_deref(), Some("city"));
        assert_eq!(q.population_min, 500);
        assert_eq!(q.free_text, "");
    }

    #[test]
    fn test_population_operators() {
        let q = parse_query("population>100000");
        assert_eq!((q.population_min, q.population_max), (100000, None));

        let q = parse_query("population<5000");
        assert_eq!((q.population_min, q.population_max), (0, Some(5000)));

        let q = parse_query("population=42");
        assert_eq!((q.population_min, q.population_max), (42, Some(42)));
    }

    #[test]
    fn test_combined_tokens_and_text() {
        let q = parse_query("heights county:Cook type:City population>10000");
        assert_eq!(q.county.as_deref(), Some("Cook"));
        assert_eq!(q.kind.as_deref(), Some("City"));
        assert_eq!(q.population_min, 10000);
        assert_eq!(q.free_text, "heights");
    }

    #[test]
    fn test_text_between_tokens_keeps_inner_spacing() {
        let q = parse_query("oak county:Cook park");
        assert_eq!(q.free_text, "oak  park");
    }

    #[test]
    fn test_malformed_population_stays_in_text() {
        let q = parse_query("population>abc");
        assert_eq!(q.population_min, 0);
        assert_eq!(q.population_max, None);
        assert_eq!(q.free_text, "population>abc");

        let q = parse_query("population>=5");
        assert_eq!(q.population_min, 0);
        assert_eq!(q.free_text, "population>=5");
    }

    #[test]
    fn test_overflowing_population_stays_in_text() {
        let q = parse_query("population>99999999999999999999999");
        assert_eq!(q.population_min, 0);
        assert_eq!(q.free_text, "population>99999999999999999999999");
    }

    #[test]
    fn test_later_well_formed_population_is_used() {
        let q = parse_query("population>x population<300");
        assert_eq!(q.population_max, Some(300));
        assert_eq!(q.free_text, "population>x");
    }

    #[test]
    fn test_empty_value_is_skipped() {
        let q = parse_query("county: county:Will");
        assert_eq!(q.county.as_deref(), Some("Will"));
        assert_eq!(q.free_text, "county:");
    }

    #[test]
    fn test_only_first_occurrence_honoured() {
        let q = parse_query("county:Cook county:Lake");
        assert_eq!(q.county.as_deref(), Some("Cook"));
        assert_eq!(q.free_text, "county:Lake");

        let q = parse_query("population>10 population<20");
        assert_eq!(q.population_min, 10);
        assert_eq!(q.population_max, None);
        assert_eq!(q.free_text, "population<20");
    }

    #[test]
    fn test_county_value_swallows_following_non_whitespace() {
        let q = parse_query("county:type:City");
        assert_eq!(q.county.as_deref(), Some("type:City"));
        assert_eq!(q.kind, None);
    }

    #[test]
    fn test_non_ascii_values() {
        let q = parse_query("county:Dé-Kalb élgin");
        assert_eq!(q.county.as_deref(), Some("Dé-Kalb"));
        assert_eq!(q.free_text, "élgin");
    }
}
