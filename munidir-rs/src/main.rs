//! Munidir CLI entry point.

use clap::Parser;
use munidir::cli::args::{Cli, Commands};
use munidir::cli::output::Output;
use munidir::cli::{counties, export, info, link, resolve, search};
use munidir::config::Config;
use munidir::dataset::Dataset;
use munidir::error::{ExitCode as MuniExitCode, MuniError};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(code) => ExitCode::from(code.code() as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `-v`.
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("munidir={}", cli.log_level())));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<MuniExitCode, MuniError> {
    let config = Config::load()?;
    let output = Output::new(cli.output_format(), cli.quiet);

    match &cli.command {
        Commands::Search(args) => search::run(&load_dataset(cli, &config)?, &config, args, &output)?,
        Commands::Resolve(args) => resolve::run(&load_dataset(cli, &config)?, args, &output)?,
        Commands::Counties(args) => counties::run(&load_dataset(cli, &config)?, args, &output)?,
        Commands::Info => info::info(&load_dataset(cli, &config)?, &output)?,
        Commands::Export(args) => export::run(&load_dataset(cli, &config)?, &config, args, &output)?,
        // Encoding a link needs no data.
        Commands::Link(args) => link::run(args, &output),
    }

    Ok(MuniExitCode::Success)
}

fn load_dataset(cli: &Cli, config: &Config) -> Result<Dataset, MuniError> {
    let data_path = config.resolve_data_path(cli.data.as_deref())?;
    Dataset::load(&data_path)
}
