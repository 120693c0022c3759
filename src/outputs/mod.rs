//! Rendering of the final [`ResultSet`](crate::models::ResultSet).
//!
//! # Submodules
//!
//! - [`text`]: one title per line, the default
//! - [`json`]: a single JSON array of strings
//!
//! Both write to any [`std::io::Write`]; `main` hands them a locked stdout.

pub mod json;
pub mod text;

use crate::models::ResultSet;
use clap::ValueEnum;
use std::io::{self, Write};

/// How the result set is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print `results` in `format`, or only their number when `count_only` is set.
pub fn render<W: Write>(results: &ResultSet, format: OutputFormat, count_only: bool, out: &mut W) -> io::Result<()> {
    if count_only {
        return text::write_count(results, out);
    }
    match format {
        OutputFormat::Text => text::write_lines(results, out),
        OutputFormat::Json => json::write_results(results, out),
    }
}
