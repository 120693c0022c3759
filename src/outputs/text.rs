//! Plain line output.

use crate::models::ResultSet;
use std::io::{self, Write};

/// One title per line, newline-terminated, in result order.
pub fn write_lines<W: Write>(results: &ResultSet, out: &mut W) -> io::Result<()> {
    for title in results {
        writeln!(out, "{title}")?;
    }
    out.flush()
}

/// Just the number of titles.
pub fn write_count<W: Write>(results: &ResultSet, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", results.len())?;
    out.flush()
}
