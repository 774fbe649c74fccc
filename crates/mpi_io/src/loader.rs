//! crates/mpi_io/src/loader.rs
//! Loader: read a local catalog JSON file into the typed `Catalog`, plus the
//! artifact writer used by the CLI. No network I/O anywhere in the engine.

use std::fs;
use std::path::Path;

use mpi_core::entities::Catalog;
use serde::Serialize;

use crate::{IoError, IoResult};

/// Parse a catalog from a JSON string.
pub fn parse_catalog(text: &str) -> IoResult<Catalog> {
    let catalog: Catalog = serde_json::from_str(text)?;
    Ok(catalog)
}

/// Load a catalog from a local JSON file. Validation is a separate step
/// (`validate::validate_catalog`); this only checks shape.
pub fn load_catalog(path: &Path) -> IoResult<Catalog> {
    let text = fs::read_to_string(path)
        .map_err(|e| IoError::Read(format!("{}: {e}", path.display())))?;
    parse_catalog(&text)
}

/// Write a serializable artifact as pretty-printed JSON with a trailing
/// newline (stable field order comes from struct layout).
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> IoResult<()> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    fs::write(path, text).map_err(|e| IoError::Write(format!("{}: {e}", path.display())))
}
