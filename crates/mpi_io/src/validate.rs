//! crates/mpi_io/src/validate.rs
//! Structural & semantic catalog validation before any synthesis.
//! Deterministic output; no RNG; issue ordering is stable (catalog order).
//!
//! The observed behavior this replaces silently zero-filled records whose
//! distribution row referenced an unknown region. Here the same condition is
//! a hard Error and the CLI refuses to run; tolerated-but-discouraged inputs
//! (zero bases, sub-floor intensity bases) surface as Warnings instead.

use mpi_core::entities::{Catalog, CountryStat, DistributionParam, RegionStats};

use std::collections::BTreeSet;

/// Seed rows whose supplied mpi deviates from the composed value by at least
/// this much get flagged (they are still trusted as-is).
const SEED_MPI_TOLERANCE: f64 = 0.0005;

/// Issue severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Where the issue occurred (kept small & deterministic).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntityRef {
    Catalog,
    Region(String),
    Distribution(String),
    SeedRow(String),
}

/// One validation finding.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    pub where_: EntityRef,
}

/// Deterministic report: pass = (no Error); issue order is stable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationReport {
    pub pass: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }
}

/// Top-level entry point.
pub fn validate_catalog(catalog: &Catalog) -> ValidationReport {
    let mut issues: Vec<ValidationIssue> = Vec::new();

    issues.extend(check_region_rows(&catalog.regions));
    issues.extend(check_distribution_rows(&catalog.distribution, &catalog.regions));
    issues.extend(check_seed_rows(&catalog.top_performers, &catalog.regions));
    issues.extend(check_coverage(&catalog.regions, &catalog.distribution));

    let pass = !issues.iter().any(|i| i.severity == Severity::Error);
    ValidationReport { pass, issues }
}

fn err(code: &'static str, message: String, where_: EntityRef) -> ValidationIssue {
    ValidationIssue { severity: Severity::Error, code, message, where_ }
}

fn warn(code: &'static str, message: String, where_: EntityRef) -> ValidationIssue {
    ValidationIssue { severity: Severity::Warning, code, message, where_ }
}

fn in_domain(v: f64, lo: f64, hi: f64) -> bool {
    v.is_finite() && (lo..=hi).contains(&v)
}

fn check_region_rows(regions: &[RegionStats]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen: BTreeSet<&str> = BTreeSet::new();

    for r in regions {
        let at = || EntityRef::Region(r.name.clone());

        if !seen.insert(r.name.as_str()) {
            issues.push(err(
                "region.duplicate_name",
                format!("duplicate region name {:?}", r.name),
                at(),
            ));
        }
        if r.name.trim().is_empty() {
            issues.push(err("region.empty_name", "empty region name".into(), at()));
        }
        if !in_domain(r.mpi_mean, 0.0, 1.0) {
            issues.push(err(
                "region.mpi_mean_domain",
                format!("mpi_mean {} outside [0, 1]", r.mpi_mean),
                at(),
            ));
        }
        if !in_domain(r.headcount_mean, 0.0, 100.0) {
            issues.push(err(
                "region.headcount_mean_domain",
                format!("headcount_mean {} outside [0, 100]", r.headcount_mean),
                at(),
            ));
        }
        if !in_domain(r.intensity_mean, 0.0, 100.0) {
            issues.push(err(
                "region.intensity_mean_domain",
                format!("intensity_mean {} outside [0, 100]", r.intensity_mean),
                at(),
            ));
        }
        for (field, v, hi) in [
            ("mpi_median", r.mpi_median, 1.0),
            ("headcount_median", r.headcount_median, 100.0),
            ("intensity_median", r.intensity_median, 100.0),
        ] {
            if let Some(v) = v {
                if !in_domain(v, 0.0, hi) {
                    issues.push(err(
                        "region.median_domain",
                        format!("{field} {v} outside [0, {hi}]"),
                        at(),
                    ));
                }
            }
        }
    }
    issues
}

fn check_distribution_rows(
    distribution: &[DistributionParam],
    regions: &[RegionStats],
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let known: BTreeSet<&str> = regions.iter().map(|r| r.name.as_str()).collect();
    let mut seen: BTreeSet<&str> = BTreeSet::new();

    for p in distribution {
        let at = || EntityRef::Distribution(p.region.clone());

        if !seen.insert(p.region.as_str()) {
            issues.push(err(
                "distribution.duplicate_region",
                format!("duplicate distribution row for {:?}", p.region),
                at(),
            ));
        }
        if !known.contains(p.region.as_str()) {
            issues.push(err(
                "distribution.unknown_region",
                format!("distribution row references unknown region {:?}", p.region),
                at(),
            ));
        }
        if p.count <= 0 {
            issues.push(warn(
                "distribution.count_nonpositive",
                format!("count {} degrades to zero records", p.count),
                at(),
            ));
        }
        for (field, v) in [("hc_base", p.hc_base), ("int_base", p.int_base)] {
            if !in_domain(v, 0.0, 100.0) {
                issues.push(err(
                    "distribution.base_domain",
                    format!("{field} {v} outside [0, 100]"),
                    at(),
                ));
            } else if v == 0.0 {
                issues.push(warn(
                    "distribution.base_zero",
                    format!("{field} is 0; synthesized rows will sit on the metric floor"),
                    at(),
                ));
            }
        }
        if in_domain(p.int_base, 0.0, 100.0) && p.int_base > 0.0 && p.int_base < 33.0 {
            issues.push(warn(
                "distribution.int_base_below_floor",
                format!("int_base {} is below the 33.0 intensity floor", p.int_base),
                at(),
            ));
        }
    }
    issues
}

fn check_seed_rows(seeds: &[CountryStat], regions: &[RegionStats]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let known: BTreeSet<&str> = regions.iter().map(|r| r.name.as_str()).collect();

    for c in seeds {
        let at = || EntityRef::SeedRow(c.name.clone());

        if !known.contains(c.region.as_str()) {
            issues.push(err(
                "seed.unknown_region",
                format!("seed row {:?} references unknown region {:?}", c.name, c.region),
                at(),
            ));
        }
        if !in_domain(c.headcount, 0.0, 100.0) || !in_domain(c.intensity, 0.0, 100.0) {
            issues.push(err(
                "seed.percent_domain",
                format!(
                    "headcount {} / intensity {} outside [0, 100]",
                    c.headcount, c.intensity
                ),
                at(),
            ));
        }
        if !in_domain(c.mpi, 0.0, 1.0) {
            issues.push(err(
                "seed.mpi_domain",
                format!("mpi {} outside [0, 1]", c.mpi),
                at(),
            ));
        } else if (c.mpi - c.derived_mpi()).abs() >= SEED_MPI_TOLERANCE {
            // Supplied values win; see the Open Question record in DESIGN.md.
            issues.push(warn(
                "seed.mpi_composition",
                format!(
                    "supplied mpi {} deviates from composed {:.5}",
                    c.mpi,
                    c.derived_mpi()
                ),
                at(),
            ));
        }
    }
    issues
}

fn check_coverage(
    regions: &[RegionStats],
    distribution: &[DistributionParam],
) -> Vec<ValidationIssue> {
    let covered: BTreeSet<&str> = distribution.iter().map(|p| p.region.as_str()).collect();
    regions
        .iter()
        .filter(|r| !covered.contains(r.name.as_str()))
        .map(|r| {
            warn(
                "region.no_distribution",
                format!("region {:?} has no distribution row", r.name),
                EntityRef::Region(r.name.clone()),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::builtin_catalog;

    fn base_catalog() -> Catalog {
        builtin_catalog()
    }

    #[test]
    fn unknown_distribution_region_is_an_error() {
        let mut cat = base_catalog();
        cat.distribution[0].region = "Atlantis".into();
        let report = validate_catalog(&cat);
        assert!(!report.pass);
        assert!(report.errors().any(|i| i.code == "distribution.unknown_region"));
    }

    #[test]
    fn duplicate_region_name_is_an_error() {
        let mut cat = base_catalog();
        let dup = cat.regions[0].clone();
        cat.regions.push(dup);
        let report = validate_catalog(&cat);
        assert!(report.errors().any(|i| i.code == "region.duplicate_name"));
    }

    #[test]
    fn unknown_seed_region_is_an_error() {
        let mut cat = base_catalog();
        cat.top_performers[0].region = "Nowhere".into();
        assert!(!validate_catalog(&cat).pass);
    }

    #[test]
    fn nonpositive_count_is_only_a_warning() {
        let mut cat = base_catalog();
        cat.distribution[0].count = -1;
        let report = validate_catalog(&cat);
        assert!(report.pass);
        assert!(report.warnings().any(|i| i.code == "distribution.count_nonpositive"));
    }

    #[test]
    fn out_of_domain_base_is_an_error() {
        let mut cat = base_catalog();
        cat.distribution[0].hc_base = 120.0;
        assert!(!validate_catalog(&cat).pass);

        let mut cat = base_catalog();
        cat.distribution[0].int_base = f64::NAN;
        assert!(!validate_catalog(&cat).pass);
    }

    #[test]
    fn uncovered_region_is_a_warning() {
        let mut cat = base_catalog();
        cat.distribution.remove(0);
        let report = validate_catalog(&cat);
        assert!(report.pass);
        assert!(report.warnings().any(|i| i.code == "region.no_distribution"));
    }

    #[test]
    fn drifted_seed_mpi_is_a_warning() {
        let mut cat = base_catalog();
        cat.top_performers[0].mpi = 0.01; // far from 0.11 * 36.5 / 10_000
        let report = validate_catalog(&cat);
        assert!(report.pass);
        assert!(report.warnings().any(|i| i.code == "seed.mpi_composition"));
    }
}
