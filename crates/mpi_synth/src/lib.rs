// crates/mpi_synth/src/lib.rs
#![forbid(unsafe_code)]

//! Algorithm layer of the MPI atlas engine.
//!
//! One pure transformation (`generate::synthesize`) turns a validated catalog
//! plus an injected variance source into an ordered, immutable dataset.
//! `view` provides the derived read-only projections (sort by typed metric,
//! region filtering, regional means) that table/chart consumers work on.
//!
//! No I/O, no shared state; determinism comes entirely from the caller's
//! variance source.

pub mod generate;
pub mod view;

pub use generate::{generate_dataset, synthesize};
pub use view::{filter_regions, regional_means, sorted_by_metric, RegionalMeans};
