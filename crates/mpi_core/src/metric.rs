//! crates/mpi_core/src/metric.rs
//!
//! Typed metric selection. Table sorting and chart axis selection go through
//! this enum and its accessor; there is deliberately no "look up a field by
//! string name" path anywhere in the engine.

use core::fmt;
use core::str::FromStr;

use crate::entities::CountryStat;
use crate::errors::CoreError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The three sortable/selectable country metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Metric {
    Mpi,
    Headcount,
    Intensity,
}

impl Metric {
    /// All metrics, in display order.
    pub const ALL: [Metric; 3] = [Metric::Mpi, Metric::Headcount, Metric::Intensity];

    /// Stable wire token (also the CLI/query spelling).
    pub fn as_token(self) -> &'static str {
        match self {
            Metric::Mpi => "mpi",
            Metric::Headcount => "headcount",
            Metric::Intensity => "intensity",
        }
    }

    /// Human-facing column label.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Mpi => "MPI",
            Metric::Headcount => "Headcount (%)",
            Metric::Intensity => "Intensity (%)",
        }
    }

    /// Typed accessor into a record.
    #[inline]
    pub fn of(self, c: &CountryStat) -> f64 {
        match self {
            Metric::Mpi => c.mpi,
            Metric::Headcount => c.headcount,
            Metric::Intensity => c.intensity,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl FromStr for Metric {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mpi" => Ok(Metric::Mpi),
            "headcount" => Ok(Metric::Headcount),
            "intensity" => Ok(Metric::Intensity),
            _ => Err(CoreError::UnknownMetric),
        }
    }
}

/// Direction for derived sorted views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> CountryStat {
        CountryStat {
            rank: Some(1),
            name: "Serbia".into(),
            region: "Europe & Central Asia".into(),
            headcount: 0.11,
            intensity: 36.5,
            mpi: 0.00043,
        }
    }

    #[test]
    fn accessor_matches_field() {
        let c = row();
        assert_eq!(Metric::Mpi.of(&c), 0.00043);
        assert_eq!(Metric::Headcount.of(&c), 0.11);
        assert_eq!(Metric::Intensity.of(&c), 36.5);
    }

    #[test]
    fn token_round_trip() {
        for m in Metric::ALL {
            assert_eq!(m.as_token().parse::<Metric>().unwrap(), m);
        }
        assert_eq!("Region".parse::<Metric>(), Err(CoreError::UnknownMetric));
    }
}
