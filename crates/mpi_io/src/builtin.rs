//! crates/mpi_io/src/builtin.rs
//!
//! The compiled-in catalog: six macro-regions (UNDP-derived summary
//! statistics), the distribution parameters driving synthesis, the five
//! top-performer seed rows, and the narrative analysis sections. Used when
//! the CLI is run without `--catalog`.

use mpi_core::entities::{
    AnalysisSection, Catalog, CountryStat, DistributionParam, RegionStats,
};

fn region(
    name: &str,
    mpi_mean: f64,
    mpi_median: Option<f64>,
    headcount_mean: f64,
    headcount_median: Option<f64>,
    intensity_mean: f64,
    intensity_median: Option<f64>,
    interpretation: &str,
) -> RegionStats {
    RegionStats {
        name: name.to_string(),
        mpi_mean,
        mpi_median,
        headcount_mean,
        headcount_median,
        intensity_mean,
        intensity_median,
        interpretation: interpretation.to_string(),
    }
}

fn performer(rank: u32, name: &str, mpi: f64, headcount: f64, intensity: f64) -> CountryStat {
    CountryStat {
        rank: Some(rank),
        name: name.to_string(),
        region: "Europe & Central Asia".to_string(),
        headcount,
        intensity,
        mpi,
    }
}

/// Build the default catalog. Pure construction; validation still runs on it
/// like on any external catalog.
pub fn builtin_catalog() -> Catalog {
    let regions = vec![
        region(
            "Sub-Saharan Africa",
            0.23, Some(0.23), 45.2, Some(47.9), 49.2, Some(49.2),
            "The epicenter of global multidimensional poverty. High prevalence and \
             intensity indicate entrenched structural challenges.",
        ),
        region(
            "South Asia",
            0.10, Some(0.07), 21.0, Some(15.7), 43.5, Some(42.2),
            "Second highest region. Despite economic growth, high deprivation endures \
             among marginalized populations.",
        ),
        region(
            "Arab States",
            0.06, None, 11.6, None, 40.3, None,
            "Conflict and instability may explain why rates remain higher than expected \
             for wealthier states.",
        ),
        region(
            "East Asia & Pacific",
            0.06, None, 14.7, None, 41.1, None,
            "Moderate poverty. Huge reductions in the last 20 years, but work remains to \
             reach <5% poverty.",
        ),
        region(
            "Latin America & Caribbean",
            0.03, None, 6.9, None, 40.1, None,
            "Slightly lower poverty reflecting targeted social programs, but inequality \
             persists.",
        ),
        region(
            "Europe & Central Asia",
            0.004, Some(0.0015), 1.2, Some(0.41), 37.0, Some(36.9),
            "Multidimensional poverty is virtually eliminated due to robust social \
             safety nets.",
        ),
    ];

    // Synthesis inputs; per-region bases match the region means above.
    let distribution = vec![
        DistributionParam { region: "Sub-Saharan Africa".into(), count: 15, hc_base: 45.2, int_base: 49.2 },
        DistributionParam { region: "South Asia".into(), count: 8, hc_base: 21.0, int_base: 43.5 },
        DistributionParam { region: "East Asia & Pacific".into(), count: 8, hc_base: 14.7, int_base: 41.1 },
        DistributionParam { region: "Latin America & Caribbean".into(), count: 8, hc_base: 6.9, int_base: 40.1 },
        DistributionParam { region: "Arab States".into(), count: 6, hc_base: 11.6, int_base: 40.3 },
        DistributionParam { region: "Europe & Central Asia".into(), count: 5, hc_base: 1.2, int_base: 37.0 },
    ];

    let top_performers = vec![
        performer(1, "Serbia", 0.00043, 0.11, 36.5),
        performer(2, "Azerbaijan", 0.001, 0.3, 35.8),
        performer(3, "Armenia", 0.001, 0.2, 36.2),
        performer(4, "Turkmenistan", 0.002, 0.4, 37.1),
        performer(5, "Georgia", 0.002, 0.5, 37.5),
    ];

    let analysis = vec![
        AnalysisSection {
            title: "Key Trends 2014-2023".into(),
            content: "The global MPI landscape remains starkly unequal. Sub-Saharan Africa \
                      leads in poverty incidence and intensity, with nearly one in two \
                      persons multidimensionally poor. Asia's performance is mixed, with \
                      South Asia retaining much higher poverty than East Asia. Europe & \
                      Central Asia demonstrates the potential for rapid poverty elimination."
                .into(),
        },
        AnalysisSection {
            title: "Data Gaps & Anomalies".into(),
            content: "About 7% of the dataset has missing values. Notably, the bottom 5 \
                      highest-poverty country slots are empty in the source data, likely \
                      excluding extreme cases like Niger or Chad. Some headcount values \
                      were anomalous, suggesting percentage coding differences."
                .into(),
        },
        AnalysisSection {
            title: "Conclusion".into(),
            content: "While there has been remarkable progress in some regions, \
                      multidimensional poverty is still highly concentrated geographically. \
                      Sub-Saharan Africa and South Asia drive global rates. Europe & \
                      Central Asia illustrates what is possible with comprehensive policies."
                .into(),
        },
    ];

    Catalog { regions, distribution, top_performers, analysis }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate_catalog;

    #[test]
    fn builtin_catalog_passes_validation() {
        let report = validate_catalog(&builtin_catalog());
        assert!(report.pass, "unexpected errors: {:?}", report.issues);
    }

    #[test]
    fn builtin_counts_add_up() {
        let cat = builtin_catalog();
        assert_eq!(cat.regions.len(), 6);
        assert_eq!(cat.top_performers.len(), 5);
        // 5 seed rows + 15+8+8+8+6+5 synthesized
        assert_eq!(cat.expected_len(), 55);
    }
}
