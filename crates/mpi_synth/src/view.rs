// crates/mpi_synth/src/view.rs
//
// Derived read-only projections over a generated dataset. Every function
// returns a fresh Vec; the dataset itself is never reordered or filtered in
// place, so multiple consumers can share one immutable sequence.

use std::collections::{BTreeMap, BTreeSet};

use mpi_core::entities::CountryStat;
use mpi_core::metric::{Metric, SortOrder};

/// Copy of `records` sorted by `metric` in the given direction.
/// Stable: equal-valued rows keep their input order.
pub fn sorted_by_metric(
    records: &[CountryStat],
    metric: Metric,
    order: SortOrder,
) -> Vec<CountryStat> {
    let mut out = records.to_vec();
    out.sort_by(|a, b| {
        let cmp = metric.of(a).total_cmp(&metric.of(b));
        match order {
            SortOrder::Ascending => cmp,
            SortOrder::Descending => cmp.reverse(),
        }
    });
    out
}

/// Rows whose region is in `active`, in input order. An empty active set
/// yields an empty view; presenting that state is the consumer's concern.
pub fn filter_regions(records: &[CountryStat], active: &BTreeSet<String>) -> Vec<CountryStat> {
    records
        .iter()
        .filter(|c| active.contains(&c.region))
        .cloned()
        .collect()
}

/// Per-region arithmetic means recomputed from a dataset (chart feed).
#[derive(Debug, Clone, PartialEq)]
pub struct RegionalMeans {
    pub region: String,
    pub records: usize,
    pub headcount_mean: f64,
    pub intensity_mean: f64,
    pub mpi_mean: f64,
}

/// Group by region and average each metric. Output is ordered by region
/// name so repeated runs emit identical sequences.
pub fn regional_means(records: &[CountryStat]) -> Vec<RegionalMeans> {
    let mut sums: BTreeMap<&str, (usize, f64, f64, f64)> = BTreeMap::new();
    for c in records {
        let e = sums.entry(c.region.as_str()).or_insert((0, 0.0, 0.0, 0.0));
        e.0 += 1;
        e.1 += c.headcount;
        e.2 += c.intensity;
        e.3 += c.mpi;
    }
    sums.into_iter()
        .map(|(region, (n, hc, int, mpi))| RegionalMeans {
            region: region.to_string(),
            records: n,
            headcount_mean: hc / n as f64,
            intensity_mean: int / n as f64,
            mpi_mean: mpi / n as f64,
        })
        .collect()
}
