//! Munidir - search and browse a directory of municipality profiles.
//!
//! # Overview
//!
//! Munidir loads a list of municipality records and answers listing queries
//! over them:
//! - Structured tokens inside the query text (`county:Cook type:Village
//!   population>10000`)
//! - Approximate free-text matching on name, county and search tokens
//! - Relevance ranking, or stable name ordering in either direction
//! - Filter panel selections and shareable query strings
//! - CSV and JSON export of the selected records
//!
//! # Example
//!
//! ```no_run
//! use munidir::Dataset;
//! use munidir::search::{evaluate, SearchOptions};
//!
//! let dataset = Dataset::load("municipalities.json").unwrap();
//! for m in evaluate(dataset.records(), "county:Cook oak", &SearchOptions::default()) {
//!     println!("{} ({})", m.name, m.population());
//! }
//! ```

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod municipality;
pub mod search;
pub mod text;
pub mod types;

// Re-export main types at crate root
pub use config::Config;
pub use dataset::Dataset;
pub use error::{MuniError, Result};
pub use municipality::Municipality;
pub use types::*;
