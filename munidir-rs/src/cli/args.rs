//! CLI argument definitions using clap.

use crate::search::{PanelFilters, QueryMode, SearchOptions, SortDirection, check_threshold};
use crate::types::MunicipalityType;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "munidir")]
#[command(author, version, about = "Search and browse a municipality directory", long_about = None)]
pub struct Cli {
    /// Path to the dataset, a JSON file or a directory of records (overrides config default)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output as TOML
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }

    /// Default log directive for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search municipalities
    Search(SearchArgs),

    /// Look up one municipality by id, FIPS code, or name slug
    Resolve(ResolveArgs),

    /// List counties, or suggest counties matching a prefix of text
    Counties(CountiesArgs),

    /// Show dataset statistics
    Info,

    /// Export matching municipalities
    Export(ExportArgs),

    /// Print the shareable query string for a search
    Link(LinkArgs),
}

/// Query text plus everything that shapes a search.
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Search query, e.g. "county:Cook type:Village population>10000 oak"
    #[arg(default_value = "")]
    pub query: String,

    /// Treat the whole query as free text (no county:/type:/population tokens)
    #[arg(long)]
    pub simple: bool,

    /// Only records in this county (exact, case-insensitive)
    #[arg(long)]
    pub county: Option<String>,

    /// Only records of this type (repeatable)
    #[arg(long = "type", value_name = "TYPE")]
    pub types: Vec<MunicipalityType>,

    /// Minimum population (inclusive)
    #[arg(long)]
    pub min_pop: Option<u64>,

    /// Maximum population (inclusive)
    #[arg(long)]
    pub max_pop: Option<u64>,

    /// Sort by name in this direction
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Fuzzy match threshold (0.0 exact only)
    #[arg(long, value_parser = parse_threshold)]
    pub threshold: Option<f64>,
}

fn parse_threshold(raw: &str) -> Result<f64, String> {
    let threshold: f64 = raw.parse().map_err(|e| format!("{}", e))?;
    check_threshold(threshold)
}

impl QueryArgs {
    /// Overlay the flags on config-derived defaults.
    pub fn apply(&self, mut options: SearchOptions) -> SearchOptions {
        if self.simple {
            options.mode = QueryMode::Simple;
        }
        if let Some(sort) = self.sort {
            options.direction = Some(sort.into());
        }
        if let Some(threshold) = self.threshold {
            options.threshold = threshold;
        }
        options.filters = PanelFilters {
            county: self.county.clone(),
            types: self.types.clone(),
            population_min: self.min_pop,
            population_max: self.max_pop,
        };
        options
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Asc,
    Desc,
}

impl From<SortArg> for SortDirection {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Asc => SortDirection::Asc,
            SortArg::Desc => SortDirection::Desc,
        }
    }
}

#[derive(Parser, Debug)]
pub struct SearchArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Number of results (defaults to the config limit)
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Municipality id, FIPS code, or name slug
    pub id: String,
}

#[derive(Parser, Debug)]
pub struct CountiesArgs {
    /// Text the county name must contain; omit to list all counties
    pub query: Option<String>,

    /// Maximum suggestions
    #[arg(long, default_value = "10")]
    pub limit: usize,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Export format
    #[arg(long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Output file (default: stdout)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

#[derive(Parser, Debug)]
pub struct LinkArgs {
    #[command(flatten)]
    pub query: QueryArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_flags() {
        let cli = Cli::try_parse_from([
            "munidir",
            "--data",
            "il.json",
            "-vv",
            "search",
            "oak county:Cook",
            "--type",
            "village",
            "--type",
            "CDP",
            "--min-pop",
            "1000",
            "--sort",
            "desc",
            "--limit",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.data, Some(PathBuf::from("il.json")));
        assert_eq!(cli.log_level(), "debug");
        let Commands::Search(args) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.query.query, "oak county:Cook");
        assert_eq!(
            args.query.types,
            vec![MunicipalityType::Village, MunicipalityType::Cdp]
        );
        assert_eq!(args.limit, Some(5));

        let options = args.query.apply(SearchOptions::default());
        assert_eq!(options.direction, Some(SortDirection::Desc));
        assert_eq!(options.filters.population_min, Some(1000));
        assert_eq!(options.mode, QueryMode::Advanced);
    }

    #[test]
    fn test_output_format_flags() {
        let cli = Cli::try_parse_from(["munidir", "--yaml", "info"]).unwrap();
        assert_eq!(cli.output_format(), OutputFormat::Yaml);
        assert!(Cli::try_parse_from(["munidir", "--yaml", "--toml", "info"]).is_err());
    }

    #[test]
    fn test_query_defaults_to_blank() {
        let cli = Cli::try_parse_from(["munidir", "export", "--format", "json"]).unwrap();
        let Commands::Export(args) = cli.command else {
            panic!("expected export command");
        };
        assert_eq!(args.query.query, "");
        assert_eq!(args.format, ExportFormat::Json);
    }

    #[test]
    fn test_threshold_flag_must_be_non_negative() {
        let cli = Cli::try_parse_from(["munidir", "search", "oak", "--threshold", "0.1"]).unwrap();
        let Commands::Search(args) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.query.apply(SearchOptions::default()).threshold, 0.1);

        for bad in ["--threshold=-0.5", "--threshold=NaN", "--threshold=inf", "--threshold=high"] {
            assert!(
                Cli::try_parse_from(["munidir", "search", "oak", bad]).is_err(),
                "{} should be rejected",
                bad
            );
        }
    }
}
