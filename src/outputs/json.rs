//! JSON output.
//!
//! The result set is serialized as a flat array of strings, already sorted:
//!
//! ```text
//! ["Aliens","B.P.R.D.","Hellboy"]
//! ```

use crate::models::ResultSet;
use std::io::{self, Write};
use tracing::{error, instrument};

#[instrument(level = "debug", skip_all, fields(count = results.len()))]
pub fn write_results<W: Write>(results: &ResultSet, out: &mut W) -> io::Result<()> {
    if let Err(e) = serde_json::to_writer(&mut *out, results) {
        error!(error = %e, "Failed to serialize results");
        return Err(e.into());
    }
    writeln!(out)?;
    out.flush()
}
