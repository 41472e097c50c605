//! Shared types for munidir.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The categorical type of a municipality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MunicipalityType {
    City,
    Village,
    Town,
    /// Census-designated place.
    #[serde(rename = "CDP")]
    Cdp,
}

impl MunicipalityType {
    /// All types, in display order.
    pub const ALL: [MunicipalityType; 4] = [
        MunicipalityType::City,
        MunicipalityType::Village,
        MunicipalityType::Town,
        MunicipalityType::Cdp,
    ];

    /// The label used in data files and queries.
    pub fn as_str(self) -> &'static str {
        match self {
            MunicipalityType::City => "City",
            MunicipalityType::Village => "Village",
            MunicipalityType::Town => "Town",
            MunicipalityType::Cdp => "CDP",
        }
    }
}

impl fmt::Display for MunicipalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MunicipalityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "city" => Ok(MunicipalityType::City),
            "village" => Ok(MunicipalityType::Village),
            "town" => Ok(MunicipalityType::Town),
            "cdp" => Ok(MunicipalityType::Cdp),
            _ => Err(format!("Invalid municipality type: {}", s)),
        }
    }
}

/// Population figures for a municipality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Population {
    /// Current population estimate. This is the figure the query engine filters on.
    pub current: u64,

    /// Census history, growth rate, density and anything else the data file carries.
    #[serde(flatten)]
    pub history: Map<String, Value>,
}

impl Population {
    pub fn new(current: u64) -> Self {
        Self {
            current,
            history: Map::new(),
        }
    }
}
