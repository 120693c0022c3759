//! # Catalog Titles
//!
//! Walks every page of a paginated catalog, pulls the cover titles out of each
//! page and returns them as one sorted list.
//!
//! ## Architecture
//!
//! 1. **Discovery**: fetch page 1 and read the page count from its `page-select` control
//! 2. **Fan-out**: a fixed pool of workers fetches `?page=N` URLs and extracts titles
//! 3. **Fan-in**: a single aggregator collects every title and sorts them
//! 4. **Output**: the orchestrator hands the sorted [`models::ResultSet`] back to the caller

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod outputs;
pub mod pipeline;
pub mod scrapers;
pub mod utils;

pub use config::CatalogConfig;
pub use error::{CatalogError, Result};
pub use fetch::{Fetch, HttpFetcher};
pub use pipeline::orchestrator::Orchestrator;
