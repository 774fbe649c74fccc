// crates/mpi_synth/src/generate.rs
//
// Country synthesis: the one algorithmic component of the engine.
//
// Contract:
// - Inputs are expected to be validated upstream (mpi_io::validate); this
//   function still degrades safely: count <= 0 contributes nothing, a zero
//   base clamps to the metric floors.
// - One variance draw per row perturbs BOTH headcount and intensity. The
//   shared draw is intentional: it yields the positive headcount/intensity
//   correlation the published scatter shows.
// - No I/O, no input mutation; determinism comes from the injected source.

use mpi_core::entities::{Catalog, CountryStat, Dataset};
use mpi_core::rounding::{clamp, round1, round3};
use mpi_core::rng::{VarianceRng, VarianceSource};

/// Fraction of the base a full-range draw can move headcount (`v` spans
/// ±0.5, so the perturbation is bounded to ±20% of `hc_base`).
const VARIANCE_SCALE: f64 = 0.4;
/// Intensity gets half the headcount variance (tighter spread).
const INTENSITY_DAMPING: f64 = 0.5;
/// Intensity below ~33% is structurally implausible for this metric.
const INTENSITY_FLOOR: f64 = 33.0;

/// Synthesize the full country list from a catalog and a variance source.
///
/// Output order: seed rows first (verbatim), then synthesized rows
/// region-major in catalog order, finally stably sorted by `mpi` descending
/// (equal-`mpi` rows keep generation order). Length is always
/// `catalog.expected_len()`.
///
/// `rank` is assigned as a strictly increasing counter continuing after the
/// last seed row's rank, in generation order and *before* the sort; it is a
/// generation id, not a sorted position (see `CountryStat::rank`).
pub fn synthesize(catalog: &Catalog, source: &mut dyn VarianceSource) -> Vec<CountryStat> {
    let mut records: Vec<CountryStat> = catalog.top_performers.to_vec();

    let mut next_rank = catalog
        .top_performers
        .last()
        .and_then(|c| c.rank)
        .map(|r| r + 1)
        .unwrap_or(catalog.top_performers.len() as u32 + 1);

    for param in &catalog.distribution {
        for i in 0..param.effective_count() {
            let v = source.next_variance();
            let headcount = round1(clamp(param.hc_base * (1.0 + v * VARIANCE_SCALE), 0.0, 100.0));
            let intensity = round1(clamp(
                param.int_base * (1.0 + v * VARIANCE_SCALE * INTENSITY_DAMPING),
                INTENSITY_FLOOR,
                100.0,
            ));
            // Composed from the stored (display-precision) components so the
            // composition invariant holds exactly on the artifact values.
            let mpi = round3((headcount / 100.0) * (intensity / 100.0));

            records.push(CountryStat {
                rank: Some(next_rank),
                name: format!("{} - Sample {}", param.region, i + 1),
                region: param.region.clone(),
                headcount,
                intensity,
                mpi,
            });
            next_rank += 1;
        }
    }

    // Stable: ties retain generation order.
    records.sort_by(|a, b| b.mpi.total_cmp(&a.mpi));
    records
}

/// Seeded convenience wrapper: builds the ChaCha20 source from `seed` and
/// packages the result with its provenance.
pub fn generate_dataset(catalog: &Catalog, seed: u64) -> Dataset {
    let mut source = VarianceRng::from_seed_u64(seed);
    let records = synthesize(catalog, &mut source);
    let seeded_rows = catalog.top_performers.len();
    Dataset {
        synthesized_rows: records.len() - seeded_rows,
        records,
        seed,
        seeded_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpi_core::entities::{DistributionParam, RegionStats};
    use mpi_core::rng::FixedVariance;
    use proptest::prelude::*;

    fn region(name: &str) -> RegionStats {
        RegionStats {
            name: name.into(),
            mpi_mean: 0.2,
            mpi_median: None,
            headcount_mean: 50.0,
            headcount_median: None,
            intensity_mean: 40.0,
            intensity_median: None,
            interpretation: String::new(),
        }
    }

    fn catalog(params: Vec<DistributionParam>, seeds: Vec<CountryStat>) -> Catalog {
        Catalog {
            regions: params.iter().map(|p| region(&p.region)).collect(),
            distribution: params,
            top_performers: seeds,
            analysis: Vec::new(),
        }
    }

    fn one_region(count: i64, hc_base: f64, int_base: f64) -> Catalog {
        catalog(
            vec![DistributionParam { region: "Test Region".into(), count, hc_base, int_base }],
            Vec::new(),
        )
    }

    #[test]
    fn zero_variance_hits_the_bases() {
        let out = synthesize(&one_region(1, 50.0, 40.0), &mut FixedVariance(0.0));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].headcount, 50.0);
        assert_eq!(out[0].intensity, 40.0);
        assert_eq!(out[0].mpi, 0.200);
        assert_eq!(out[0].name, "Test Region - Sample 1");
        assert_eq!(out[0].rank, Some(1));
    }

    #[test]
    fn max_positive_variance_scales_and_damps() {
        let out = synthesize(&one_region(1, 50.0, 40.0), &mut FixedVariance(0.5));
        assert_eq!(out[0].headcount, 60.0); // 50 * 1.2
        assert_eq!(out[0].intensity, 44.0); // 40 * 1.1
        assert_eq!(out[0].mpi, 0.264);
    }

    #[test]
    fn headcount_clamps_at_one_hundred() {
        let out = synthesize(&one_region(1, 90.0, 40.0), &mut FixedVariance(0.5));
        assert_eq!(out[0].headcount, 100.0); // raw 108
    }

    #[test]
    fn intensity_floor_applies() {
        for v in [-0.5, 0.0, 0.49] {
            let out = synthesize(&one_region(1, 50.0, 10.0), &mut FixedVariance(v));
            assert_eq!(out[0].intensity, INTENSITY_FLOOR);
        }
    }

    #[test]
    fn zero_count_contributes_nothing() {
        let out = synthesize(&one_region(0, 50.0, 40.0), &mut FixedVariance(0.0));
        assert!(out.is_empty());
        let out = synthesize(&one_region(-4, 50.0, 40.0), &mut FixedVariance(0.0));
        assert!(out.is_empty());
    }

    #[test]
    fn equal_mpi_rows_keep_generation_order() {
        // Two regions with identical bases and zero variance produce
        // identical mpi; the stable sort must not reorder them.
        let cat = catalog(
            vec![
                DistributionParam { region: "A".into(), count: 1, hc_base: 50.0, int_base: 40.0 },
                DistributionParam { region: "B".into(), count: 1, hc_base: 50.0, int_base: 40.0 },
            ],
            Vec::new(),
        );
        let out = synthesize(&cat, &mut FixedVariance(0.0));
        assert_eq!(out[0].region, "A");
        assert_eq!(out[1].region, "B");
        assert_eq!(out[0].rank, Some(1));
        assert_eq!(out[1].rank, Some(2));
    }

    #[test]
    fn seed_rows_pass_through_verbatim() {
        let seed_row = CountryStat {
            rank: Some(1),
            name: "Serbia".into(),
            region: "Test Region".into(),
            headcount: 0.11,
            intensity: 36.5,
            mpi: 0.00043,
        };
        let mut cat = one_region(3, 50.0, 40.0);
        cat.top_performers = vec![seed_row.clone()];

        let out = synthesize(&cat, &mut FixedVariance(0.0));
        assert_eq!(out.len(), 4);
        assert!(out.contains(&seed_row));
        // Synthesized ranks continue after the last seed rank.
        assert_eq!(out.iter().filter_map(|c| c.rank).max(), Some(4));
    }

    #[test]
    fn rank_continues_after_unranked_seed_rows() {
        let mut cat = one_region(1, 50.0, 40.0);
        cat.top_performers = vec![CountryStat {
            rank: None,
            name: "Seeded".into(),
            region: "Test Region".into(),
            headcount: 1.0,
            intensity: 33.0,
            mpi: 0.0,
        }];
        let out = synthesize(&cat, &mut FixedVariance(0.0));
        let synthesized = out.iter().find(|c| c.name.contains("Sample")).unwrap();
        assert_eq!(synthesized.rank, Some(2));
    }

    #[test]
    fn seeded_wrapper_is_reproducible() {
        let cat = one_region(10, 45.2, 49.2);
        let a = generate_dataset(&cat, 42);
        let b = generate_dataset(&cat, 42);
        assert_eq!(a, b);
        let c = generate_dataset(&cat, 43);
        assert_ne!(a.records, c.records);
    }

    proptest! {
        #[test]
        fn invariants_hold_for_any_bases_and_seed(
            hc_base in 0.0f64..100.0,
            int_base in 0.0f64..100.0,
            count in 0i64..24,
            seed in any::<u64>(),
        ) {
            let cat = one_region(count, hc_base, int_base);
            let ds = generate_dataset(&cat, seed);

            prop_assert_eq!(ds.records.len(), cat.expected_len());

            for c in &ds.records {
                prop_assert!((0.0..=100.0).contains(&c.headcount));
                prop_assert!((INTENSITY_FLOOR..=100.0).contains(&c.intensity));
                prop_assert!((c.mpi - c.derived_mpi()).abs() < 1e-3);
            }
            for w in ds.records.windows(2) {
                prop_assert!(w[0].mpi >= w[1].mpi);
            }
        }
    }
}
