// crates/mpi_cli/src/args.rs
//
// Deterministic, offline CLI argument surface.
//
// Rules:
// - No networked paths (reject any scheme:// like http/https/file)
// - --catalog points at a local JSON file; omitted = builtin catalog
// - Seed accepts decimal u64 or 0x-hex up to 16 nybbles
// - --validate-only performs load + catalog checks without synthesizing

use clap::Parser;
use std::path::{Path, PathBuf};

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "mpi",
    disable_help_subcommand = true,
    about = "Offline, deterministic MPI dataset engine"
)]
pub struct Args {
    /// Catalog JSON path (regions, distribution, top performers). Omit to
    /// use the builtin catalog.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Variance seed. Accepts decimal u64 or 0x-hex (≤16 hex digits).
    /// Omit to draw one from OS entropy (it is logged in the run record).
    #[arg(long, value_parser = parse_seed)]
    pub seed: Option<u64>,

    /// Output directory for artifacts (default: current directory).
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Report renderer(s) to emit. Choose up to 2 (json, html). Omit to skip reports.
    #[arg(long, value_parser = ["json", "html"], num_args = 0..=2)]
    pub render: Vec<String>,

    /// Validate the catalog only (shape + consistency), do not synthesize.
    #[arg(long)]
    pub validate_only: bool,

    /// Suppress non-essential stderr notes.
    #[arg(long)]
    pub quiet: bool,
}

/// Errors surfaced by post-parse validation.
/// Keep messages short/stable (handy for scripts/tests).
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NonLocalPath(p) => write!(f, "path must be a local file (no scheme): {p}"),
            CliError::NotFound(p) => write!(f, "file not found: {p}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Seed parser: decimal u64 or 0x-hex (1..=16 nybbles).
pub fn parse_seed(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty seed".into());
    }
    if let Some(rest) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if rest.is_empty() || rest.len() > 16 || !rest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err("hex seed must be 1..16 hex digits".into());
        }
        u64::from_str_radix(rest, 16).map_err(|_| "hex seed out of range".to_string())
    } else {
        s.parse::<u64>().map_err(|_| "decimal seed must be a valid u64".to_string())
    }
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
fn has_scheme(p: &Path) -> bool {
    p.to_str().map(|s| s.contains("://")).unwrap_or(false)
}

/// Parse, then apply filesystem checks clap can't express.
pub fn parse_and_validate() -> Result<Args, CliError> {
    let args = Args::parse();
    if let Some(p) = &args.catalog {
        if has_scheme(p) {
            return Err(CliError::NonLocalPath(p.display().to_string()));
        }
        if !p.is_file() {
            return Err(CliError::NotFound(p.display().to_string()));
        }
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_decimal_and_hex() {
        assert_eq!(parse_seed("42").unwrap(), 42);
        assert_eq!(parse_seed("0x2a").unwrap(), 42);
        assert_eq!(parse_seed("0XFFFFFFFFFFFFFFFF").unwrap(), u64::MAX);
        assert!(parse_seed("").is_err());
        assert!(parse_seed("0x").is_err());
        assert!(parse_seed("0x11223344556677889").is_err()); // 17 nybbles
        assert!(parse_seed("-1").is_err());
    }

    #[test]
    fn scheme_detection() {
        assert!(has_scheme(Path::new("https://example.com/catalog.json")));
        assert!(!has_scheme(Path::new("/tmp/catalog.json")));
        assert!(!has_scheme(Path::new("catalog.json")));
    }
}
