//! crates/mpi_core/src/entities.rs
//!
//! Catalog and dataset entities. These are plain data carriers: the catalog
//! tables are loaded once (builtin or from JSON) and never mutated; a
//! generated `Dataset` is immutable for the rest of the run. Consumers that
//! need a different ordering or a subset work on derived copies
//! (see `mpi_synth::view`), never in place.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Summary statistics for one macro-region, as published.
///
/// `name` is the join key against `DistributionParam::region` and
/// `CountryStat::region`; uniqueness across the catalog is enforced by
/// `mpi_io::validate`, not here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionStats {
    pub name: String,
    /// Composite index mean, in `[0, 1]`.
    pub mpi_mean: f64,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub mpi_median: Option<f64>,
    /// Headcount ratio mean, percent `[0, 100]`.
    pub headcount_mean: f64,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub headcount_median: Option<f64>,
    /// Intensity of deprivation mean, percent `[0, 100]`.
    pub intensity_mean: f64,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub intensity_median: Option<f64>,
    /// Free-text annotation; opaque to all computation.
    pub interpretation: String,
}

/// Synthesis inputs for one region, parallel to `RegionStats`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DistributionParam {
    /// Must reference a `RegionStats::name` (checked at startup).
    pub region: String,
    /// Number of synthetic records to generate. Kept signed on the wire so a
    /// negative value degrades to zero instead of failing deserialization.
    #[cfg_attr(feature = "serde", serde(default))]
    pub count: i64,
    /// Center of the headcount perturbation, percent. Missing ⇒ 0.0.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hc_base: f64,
    /// Center of the intensity perturbation, percent. Missing ⇒ 0.0.
    #[cfg_attr(feature = "serde", serde(default))]
    pub int_base: f64,
}

impl DistributionParam {
    /// Records this region contributes: `count` floored at zero.
    #[inline]
    pub fn effective_count(&self) -> usize {
        if self.count > 0 { self.count as usize } else { 0 }
    }
}

/// One country-level record, seeded or synthesized.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CountryStat {
    /// Sequential id assigned at generation time, in generation order
    /// (region-major). Assigned *before* the final mpi-descending sort, so
    /// after sorting it does not reflect position; this mirrors the published
    /// dataset and is kept as-is rather than silently reassigned.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub rank: Option<u32>,
    pub name: String,
    pub region: String,
    /// Headcount ratio, percent.
    pub headcount: f64,
    /// Intensity of deprivation, percent.
    pub intensity: f64,
    /// Composite index. For synthesized rows this is always
    /// `(headcount/100) * (intensity/100)`, rounded to three decimals.
    pub mpi: f64,
}

impl CountryStat {
    /// The composite recomputed from the stored components.
    #[inline]
    pub fn derived_mpi(&self) -> f64 {
        (self.headcount / 100.0) * (self.intensity / 100.0)
    }
}

/// One narrative block carried alongside the tables.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnalysisSection {
    pub title: String,
    pub content: String,
}

/// Everything the synthesizer and the report model read: the three tables
/// plus the narrative sections. Immutable after load/validation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Catalog {
    pub regions: Vec<RegionStats>,
    pub distribution: Vec<DistributionParam>,
    pub top_performers: Vec<CountryStat>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub analysis: Vec<AnalysisSection>,
}

impl Catalog {
    /// Lookup a region's summary row by name.
    pub fn region(&self, name: &str) -> Option<&RegionStats> {
        self.regions.iter().find(|r| r.name == name)
    }

    /// Total records a synthesis run will produce from this catalog.
    pub fn expected_len(&self) -> usize {
        self.top_performers.len()
            + self
                .distribution
                .iter()
                .map(DistributionParam::effective_count)
                .sum::<usize>()
    }
}

/// A generated dataset plus the provenance needed to reproduce it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dataset {
    /// Ordered by `mpi` descending (stable: ties keep generation order).
    pub records: Vec<CountryStat>,
    /// Variance seed the run was generated with.
    pub seed: u64,
    /// How many leading-by-provenance rows came from the seed list.
    pub seeded_rows: usize,
    /// How many rows the synthesizer produced.
    pub synthesized_rows: usize,
}
