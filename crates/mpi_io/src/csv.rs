//! crates/mpi_io/src/csv.rs
//!
//! CSV export of a country sequence. The column contract is fixed:
//! `Name,Region,MPI,Headcount(%),Intensity(%)` — name and region quoted
//! (embedded quotes doubled), numeric fields unquoted. Stored values are
//! written verbatim: synthesized rows already carry display precision, and
//! seed rows keep their supplied precision so the CSV agrees with the JSON
//! artifact. The header row is always present, even for an empty sequence.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use mpi_core::entities::CountryStat;

use crate::{IoError, IoResult};

const HEADER: &str = "Name,Region,MPI,Headcount(%),Intensity(%)";

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Render the sequence to a CSV string, rows in input order.
pub fn render_csv(records: &[CountryStat]) -> String {
    let mut out = String::with_capacity(64 + records.len() * 64);
    out.push_str(HEADER);
    out.push('\n');
    for c in records {
        let _ = writeln!(
            out,
            "{},{},{},{},{}",
            quote(&c.name),
            quote(&c.region),
            c.mpi,
            c.headcount,
            c.intensity
        );
    }
    out
}

/// Write the rendered CSV to `path`.
pub fn write_csv(path: &Path, records: &[CountryStat]) -> IoResult<()> {
    fs::write(path, render_csv(records))
        .map_err(|e| IoError::Write(format!("{}: {e}", path.display())))
}
