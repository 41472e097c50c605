//! Resolve command implementation.

use crate::cli::args::ResolveArgs;
use crate::cli::output::Output;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::municipality::Municipality;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ResolveResponse<'a> {
    pub query: String,
    pub match_type: &'static str,
    pub record: &'a Municipality,
}

/// Print the record for an id, FIPS code, or slug. A miss is `RecordNotFound`.
pub fn run(dataset: &Dataset, args: &ResolveArgs, output: &Output) -> Result<()> {
    let record = dataset.get(&args.id)?;

    let response = ResolveResponse {
        query: args.id.clone(),
        match_type: determine_match_type(record, &args.id),
        record,
    };
    output.print(&response)?;
    Ok(())
}

fn determine_match_type(record: &Municipality, query: &str) -> &'static str {
    if record.id.eq_ignore_ascii_case(query) {
        "id"
    } else if record
        .fips_code
        .as_deref()
        .is_some_and(|f| f.eq_ignore_ascii_case(query))
    {
        "fips"
    } else {
        "slug"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MunicipalityType;

    #[test]
    fn test_match_type() {
        let mut record =
            Municipality::new("IL-0001", "Oak Park", MunicipalityType::Village, "Cook", 54583);
        record.fips_code = Some("1754885".to_string());

        assert_eq!(determine_match_type(&record, "il-0001"), "id");
        assert_eq!(determine_match_type(&record, "1754885"), "fips");
        assert_eq!(determine_match_type(&record, "oak-park"), "slug");
    }
}
