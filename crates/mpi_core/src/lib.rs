//! mpi_core — Core types, metric domains, rounding, and deterministic variance RNG.
//!
//! This crate is **I/O-free**. It defines the stable types/APIs used across the
//! engine (`mpi_io`, `mpi_synth`, `mpi_report`, `mpi_cli`):
//!
//! - Catalog entities: `RegionStats`, `DistributionParam`, `CountryStat`
//! - Typed metric selection: `Metric` (no stringly-typed field lookup)
//! - Display-precision rounding helpers
//! - Seedable variance RNG (ChaCha20) behind an injectable `VarianceSource`
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod entities;
pub mod metric;
pub mod rng;

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain parsing & validation.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        UnknownMetric,
        InvalidSeed,
        DomainOutOfRange(&'static str),
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::UnknownMetric => write!(f, "unknown metric token"),
                CoreError::InvalidSeed => write!(f, "invalid seed"),
                CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
            }
        }
    }

    impl std::error::Error for CoreError {}
}

pub mod rounding {
    //! Display-precision rounding, baked into stored values at generation time.
    //!
    //! Half-away-from-zero via `f64::round`, which matches how the stored
    //! artifact values are defined: headcount/intensity at one decimal, the
    //! composite index at three.

    /// Round to one decimal place (headcount/intensity percentages).
    #[inline]
    pub fn round1(v: f64) -> f64 {
        (v * 10.0).round() / 10.0
    }

    /// Round to three decimal places (composite MPI).
    #[inline]
    pub fn round3(v: f64) -> f64 {
        (v * 1000.0).round() / 1000.0
    }

    /// Clamp into `[lo, hi]`. Plain float clamp; callers pass finite bounds.
    #[inline]
    pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
        v.max(lo).min(hi)
    }

}

pub use errors::CoreError;
pub use metric::{Metric, SortOrder};
pub use rng::{FixedVariance, VarianceRng, VarianceSource};
