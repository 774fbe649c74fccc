//! crates/mpi_io/src/lib.rs
//! Single-source-of-truth I/O crate for the MPI atlas engine.
//!
//! - Shared error type (`IoError`) with `From` conversions used across modules.
//! - No inline implementations: details live in the file modules re-exported
//!   below to avoid drift.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for mpi_io (used by loader/validate/csv/hasher/record).
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem read failures.
    #[error("read error: {0}")]
    Read(String),

    /// Filesystem write failures (create_dir_all, artifact output, etc.).
    #[error("write error: {0}")]
    Write(String),

    /// Path-shaped problems (not a file, bad extension, ...).
    #[error("path error: {0}")]
    Path(String),

    /// JSON serialization/deserialization errors with a pointer-ish context.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Catalog-level inconsistencies surfaced by startup validation.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Hashing/digest failures.
    #[error("hash error: {0}")]
    Hash(String),
}

pub type IoResult<T> = Result<T, IoError>;

/* ---------------- From conversions (used by file modules) ---------------- */

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Read(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json doesn't keep a pointer; default to root and let callers
        // enrich at higher layers.
        IoError::Json { pointer: "/".to_string(), msg: e.to_string() }
    }
}

/* ---------------- Public modules (single source of truth) ---------------- */

pub mod builtin;
pub mod csv;
pub mod hasher;
pub mod loader;
pub mod record;
pub mod validate;

/* ---------------- Prelude / convenience re-exports ---------------- */

pub use builtin::builtin_catalog;
pub use csv::{render_csv, write_csv};
pub use hasher::digest_json;
pub use loader::{load_catalog, write_json_pretty};
pub use record::{build_run_record, EngineMeta, RunRecord};
pub use validate::{validate_catalog, Severity, ValidationIssue, ValidationReport};
