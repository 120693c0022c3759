//! # Catalog Titles
//!
//! Walks every page of a paginated comic catalog and prints all cover titles,
//! sorted, one per line.
//!
//! ## Usage
//!
//! ```sh
//! catalog_titles                 # sorted titles on stdout
//! catalog_titles --count-only    # just how many there are
//! ```
//!
//! A failure to read the page count from page 1 is fatal: one line on stderr
//! and exit status 1. Pages that fail later are skipped.

use catalog_titles::cli::Cli;
use catalog_titles::outputs::render;
use catalog_titles::utils::init_tracing;
use catalog_titles::{HttpFetcher, Orchestrator};
use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    let args = Cli::parse();
    init_tracing(args.verbose);
    debug!(?args, "Parsed CLI arguments");

    let config = match args.catalog_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let orchestrator = Orchestrator::new(config, HttpFetcher::default());
    let run = match orchestrator.run().await {
        Ok(run) => run,
        Err(e) => {
            eprintln!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let stdout = std::io::stdout();
    render(&run.results, args.format, args.count_only, &mut stdout.lock())?;

    info!(titles = run.results.len(), "Done");
    Ok(ExitCode::SUCCESS)
}
