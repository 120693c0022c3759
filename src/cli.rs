//! Command-line interface definitions for Catalog Titles.
//!
//! Every option has a default, so running the binary with no arguments walks
//! the Dark Horse digital catalog with ten workers and prints one title per line.

use crate::config::{BASE_URL, CatalogConfig, MAX_REQUESTS};
use crate::error::Result;
use crate::outputs::OutputFormat;
use clap::Parser;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Default catalog, sorted titles on stdout
/// catalog_titles
///
/// # Fewer workers, JSON output
/// catalog_titles -w 4 --format json
///
/// # How many titles are there?
/// catalog_titles --count-only
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Catalog listing to walk; pages are fetched as `<base-url>?page=N`
    #[arg(long, env = "CATALOG_BASE_URL", default_value = BASE_URL)]
    pub base_url: String,

    /// Number of concurrent page workers
    #[arg(short, long, default_value_t = MAX_REQUESTS)]
    pub workers: usize,

    /// Output format for the sorted titles
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print only the number of titles found
    #[arg(long)]
    pub count_only: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Validate the arguments into a run configuration.
    pub fn catalog_config(&self) -> Result<CatalogConfig> {
        CatalogConfig::new(&self.base_url, self.workers)
    }
}
