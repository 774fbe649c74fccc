//! mpi_report — Pure offline report model + renderers (JSON/HTML).
//!
//! Determinism rules:
//! - No network, no I/O here. Callers supply the catalog, the generated
//!   dataset, and the run provenance already in-memory.
//! - Display precision is fixed at build time: percents one decimal, the
//!   composite index three decimals.
//! - Stable section order and field names.
//!
//! Inputs are accepted through a small `RunMeta` struct to avoid tight
//! coupling with mpi_io's artifact types; the CLI maps its run record into
//! it before rendering.

#![forbid(unsafe_code)]

use mpi_core::entities::{Catalog, Dataset};

// ===== Errors =====
#[derive(Debug)]
pub enum ReportError {
    Template(&'static str),
    Inconsistent(&'static str),
}

impl core::fmt::Display for ReportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReportError::Template(m) => write!(f, "template error: {m}"),
            ReportError::Inconsistent(m) => write!(f, "inconsistent inputs: {m}"),
        }
    }
}

impl std::error::Error for ReportError {}

// ===== Inputs (loosely-coupled) =====

/// Run provenance for the integrity section; mirror of the run record fields
/// the report surfaces.
#[derive(Clone, Debug)]
pub struct RunMeta {
    pub engine_vendor: String,
    pub engine_name: String,
    pub engine_version: String,
    pub seed: u64,
    pub catalog_sha256: String,
    pub dataset_sha256: String,
}

// ===== Model =====
#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug)]
pub struct ReportModel {
    pub cover: SectionCover,
    pub regional: SectionRegional,
    pub top_performers: SectionTopPerformers,
    pub analysis: Vec<SectionAnalysis>,
    pub integrity: SectionIntegrity,
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug)]
pub struct SectionCover {
    pub title: String,
    pub records_total: usize,
    pub seeded_rows: usize,
    pub synthesized_rows: usize,
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug)]
pub struct RegionRow {
    pub name: String,
    pub mpi_mean: String,        // 3 decimals
    pub headcount_mean: String,  // "x.y%"
    pub intensity_mean: String,  // "x.y%"
    pub interpretation: String,
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug)]
pub struct SectionRegional {
    pub rows: Vec<RegionRow>,
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug)]
pub struct PerformerRow {
    pub rank: Option<u32>,
    pub name: String,
    pub region: String,
    pub mpi: String,
    pub headcount: String,
    pub intensity: String,
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug)]
pub struct SectionTopPerformers {
    pub rows: Vec<PerformerRow>,
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug)]
pub struct SectionAnalysis {
    pub title: String,
    pub content: String,
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug)]
pub struct SectionIntegrity {
    pub engine_vendor: String,
    pub engine_name: String,
    pub engine_version: String,
    pub seed: u64,
    pub catalog_sha256: String,
    pub dataset_sha256: String,
}

// ===== Helpers (display precision) =====

fn fmt_mpi(v: f64) -> String {
    format!("{v:.3}")
}

fn fmt_pct(v: f64) -> String {
    format!("{v:.1}%")
}

// ===== API =====

/// Build the report model (pure, offline).
///
/// `run.records_total`-style consistency is checked against the dataset so a
/// stale run record can't be rendered against the wrong artifact.
pub fn build_model(
    catalog: &Catalog,
    dataset: &Dataset,
    run: &RunMeta,
) -> Result<ReportModel, ReportError> {
    if dataset.seeded_rows + dataset.synthesized_rows != dataset.records.len() {
        return Err(ReportError::Inconsistent("dataset row accounting"));
    }
    if dataset.seed != run.seed {
        return Err(ReportError::Inconsistent("seed mismatch between dataset and run"));
    }

    let cover = SectionCover {
        title: "Multidimensional Poverty Index — Dataset Report".to_string(),
        records_total: dataset.records.len(),
        seeded_rows: dataset.seeded_rows,
        synthesized_rows: dataset.synthesized_rows,
    };

    let regional = SectionRegional {
        rows: catalog
            .regions
            .iter()
            .map(|r| RegionRow {
                name: r.name.clone(),
                mpi_mean: fmt_mpi(r.mpi_mean),
                headcount_mean: fmt_pct(r.headcount_mean),
                intensity_mean: fmt_pct(r.intensity_mean),
                interpretation: r.interpretation.clone(),
            })
            .collect(),
    };

    let top_performers = SectionTopPerformers {
        rows: catalog
            .top_performers
            .iter()
            .map(|c| PerformerRow {
                rank: c.rank,
                name: c.name.clone(),
                region: c.region.clone(),
                mpi: fmt_mpi(c.mpi),
                headcount: fmt_pct(c.headcount),
                intensity: fmt_pct(c.intensity),
            })
            .collect(),
    };

    let analysis = catalog
        .analysis
        .iter()
        .map(|s| SectionAnalysis { title: s.title.clone(), content: s.content.clone() })
        .collect();

    let integrity = SectionIntegrity {
        engine_vendor: run.engine_vendor.clone(),
        engine_name: run.engine_name.clone(),
        engine_version: run.engine_version.clone(),
        seed: run.seed,
        catalog_sha256: run.catalog_sha256.clone(),
        dataset_sha256: run.dataset_sha256.clone(),
    };

    Ok(ReportModel { cover, regional, top_performers, analysis, integrity })
}

// ===== Renderers =====

/// Serialize the model as JSON (deterministic field order courtesy of struct layout).
#[cfg(feature = "render_json")]
pub fn render_json(model: &ReportModel) -> Result<String, ReportError> {
    serde_json::to_string_pretty(model).map_err(|_| ReportError::Template("json_serialize"))
}

/// Render a compact HTML summary using an embedded template (no external assets).
#[cfg(feature = "render_html")]
pub fn render_html(model: &ReportModel) -> Result<String, ReportError> {
    use minijinja::{context, Environment};

    static TEMPLATE: &str = r#"<!doctype html>
<html lang="en"><meta charset="utf-8">
<title>{{ cover.title }}</title>
<h1>{{ cover.title }}</h1>
<p>{{ cover.records_total }} records ({{ cover.seeded_rows }} seeded, {{ cover.synthesized_rows }} synthesized)</p>

<h2>Regional summary</h2>
<table>
  <tr><th>Region</th><th>MPI</th><th>Headcount</th><th>Intensity</th><th>Notes</th></tr>
  {% for r in regional %}
  <tr><td>{{ r.name }}</td><td>{{ r.mpi_mean }}</td><td>{{ r.headcount_mean }}</td><td>{{ r.intensity_mean }}</td><td>{{ r.interpretation }}</td></tr>
  {% endfor %}
</table>

<h2>Top performers</h2>
<table>
  <tr><th>#</th><th>Country</th><th>Region</th><th>MPI</th><th>Headcount</th><th>Intensity</th></tr>
  {% for c in performers %}
  <tr><td>{{ c.rank }}</td><td>{{ c.name }}</td><td>{{ c.region }}</td><td>{{ c.mpi }}</td><td>{{ c.headcount }}</td><td>{{ c.intensity }}</td></tr>
  {% endfor %}
</table>

{% for s in analysis %}
<h2>{{ s.title }}</h2>
<p>{{ s.content }}</p>
{% endfor %}

<h2>Integrity</h2>
<p>Engine: {{ integrity.engine_vendor }}/{{ integrity.engine_name }} v{{ integrity.engine_version }}</p>
<p>Seed: {{ integrity.seed }}</p>
<p>Catalog: {{ integrity.catalog_sha256 }}</p>
<p>Dataset: {{ integrity.dataset_sha256 }}</p>
</html>
"#;

    let mut env = Environment::new();
    env.add_template("report.html", TEMPLATE)
        .map_err(|_| ReportError::Template("add_template"))?;
    let tmpl = env
        .get_template("report.html")
        .map_err(|_| ReportError::Template("get_template"))?;

    // Shape a tiny context (explicit to avoid surprising field leaks).
    let ctx = context! {
        cover => context! {
            title => model.cover.title.clone(),
            records_total => model.cover.records_total,
            seeded_rows => model.cover.seeded_rows,
            synthesized_rows => model.cover.synthesized_rows,
        },
        regional => model.regional.rows.iter().map(|r| context! {
            name => r.name.clone(),
            mpi_mean => r.mpi_mean.clone(),
            headcount_mean => r.headcount_mean.clone(),
            intensity_mean => r.intensity_mean.clone(),
            interpretation => r.interpretation.clone(),
        }).collect::<Vec<_>>(),
        performers => model.top_performers.rows.iter().map(|c| context! {
            rank => c.rank.map(|r| r.to_string()).unwrap_or_default(),
            name => c.name.clone(),
            region => c.region.clone(),
            mpi => c.mpi.clone(),
            headcount => c.headcount.clone(),
            intensity => c.intensity.clone(),
        }).collect::<Vec<_>>(),
        analysis => model.analysis.iter().map(|s| context! {
            title => s.title.clone(),
            content => s.content.clone(),
        }).collect::<Vec<_>>(),
        integrity => context! {
            engine_vendor => model.integrity.engine_vendor.clone(),
            engine_name => model.integrity.engine_name.clone(),
            engine_version => model.integrity.engine_version.clone(),
            seed => model.integrity.seed,
            catalog_sha256 => model.integrity.catalog_sha256.clone(),
            dataset_sha256 => model.integrity.dataset_sha256.clone(),
        },
    };

    tmpl.render(ctx).map_err(|_| ReportError::Template("render_html"))
}

// ===== Tests =====
#[cfg(test)]
mod tests {
    use super::*;
    use mpi_core::entities::CountryStat;
    use mpi_io::builtin::builtin_catalog;

    fn meta(seed: u64) -> RunMeta {
        RunMeta {
            engine_vendor: "mpi-atlas".into(),
            engine_name: "mpi".into(),
            engine_version: "0.1.0".into(),
            seed,
            catalog_sha256: "aa".repeat(32),
            dataset_sha256: "bb".repeat(32),
        }
    }

    fn dataset(seed: u64) -> Dataset {
        Dataset {
            records: vec![CountryStat {
                rank: Some(1),
                name: "Serbia".into(),
                region: "Europe & Central Asia".into(),
                headcount: 0.11,
                intensity: 36.5,
                mpi: 0.00043,
            }],
            seed,
            seeded_rows: 1,
            synthesized_rows: 0,
        }
    }

    #[test]
    fn model_carries_all_sections() {
        let cat = builtin_catalog();
        let model = build_model(&cat, &dataset(7), &meta(7)).unwrap();
        assert_eq!(model.regional.rows.len(), 6);
        assert_eq!(model.top_performers.rows.len(), 5);
        assert_eq!(model.analysis.len(), 3);
        assert_eq!(model.cover.records_total, 1);
        assert_eq!(model.regional.rows[0].headcount_mean, "45.2%");
        assert_eq!(model.top_performers.rows[0].mpi, "0.000");
    }

    #[test]
    fn seed_mismatch_is_rejected() {
        let cat = builtin_catalog();
        let e = build_model(&cat, &dataset(7), &meta(8)).unwrap_err();
        assert!(matches!(e, ReportError::Inconsistent(_)));
    }

    #[test]
    fn row_accounting_is_checked() {
        let cat = builtin_catalog();
        let mut ds = dataset(7);
        ds.synthesized_rows = 5;
        assert!(build_model(&cat, &ds, &meta(7)).is_err());
    }

    #[cfg(feature = "render_json")]
    #[test]
    fn json_render_is_deterministic() {
        let cat = builtin_catalog();
        let model = build_model(&cat, &dataset(7), &meta(7)).unwrap();
        assert_eq!(render_json(&model).unwrap(), render_json(&model).unwrap());
        assert!(render_json(&model).unwrap().contains("\"cover\""));
    }

    #[cfg(feature = "render_html")]
    #[test]
    fn html_render_contains_sections() {
        let cat = builtin_catalog();
        let model = build_model(&cat, &dataset(7), &meta(7)).unwrap();
        let html = render_html(&model).unwrap();
        assert!(html.contains("<h2>Regional summary</h2>"));
        assert!(html.contains("Serbia"));
        assert!(html.contains("Key Trends 2014-2023"));
    }
}
