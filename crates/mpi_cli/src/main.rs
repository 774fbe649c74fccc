// crates/mpi_cli/src/main.rs
//
// Orchestration: load (builtin or --catalog) → validate → synthesize →
// write artifacts (dataset.json, dataset.csv, run_record.json) → optional
// report renders. Exit codes are stable for scripting.

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const IO: i32 = 4;
}

use std::fs;
use std::process::ExitCode;

use args::{parse_and_validate as parse_cli, Args};

use mpi_core::rng::VarianceRng;
use mpi_io::validate::Severity;
use mpi_io::{build_run_record, builtin_catalog, load_catalog, validate_catalog, EngineMeta, IoError};
use mpi_report::RunMeta;
use mpi_synth::generate::generate_dataset;

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Catalog shape/consistency failures.
    Validation(String),
    /// Read/write/path errors.
    Io(String),
    /// Report build or render failures.
    Render(String),
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("mpi: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };

    let rc = match run(&args) {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            match &e {
                MainError::Validation(m) => eprintln!("mpi: validation error: {m}"),
                MainError::Io(m) => eprintln!("mpi: io error: {m}"),
                MainError::Render(m) => eprintln!("mpi: render error: {m}"),
            }
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::Io(_) => IO,
        MainError::Render(_) => IO,
    }
}

/// Translate mpi_io::IoError into MainError buckets.
fn map_io_err(e: IoError) -> MainError {
    use IoError::*;
    match e {
        Json { pointer, msg } => MainError::Validation(format!("json {pointer}: {msg}")),
        Catalog(m) => MainError::Validation(format!("catalog: {m}")),
        Read(m) | Write(m) | Path(m) => MainError::Io(m),
        Hash(m) => MainError::Io(format!("hash: {m}")),
    }
}

fn engine_meta() -> EngineMeta {
    EngineMeta {
        vendor: "mpi-atlas".to_string(),
        name: "mpi".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

fn run(args: &Args) -> Result<(), MainError> {
    // 1) Catalog (builtin unless --catalog)
    let catalog = match &args.catalog {
        Some(path) => load_catalog(path).map_err(map_io_err)?,
        None => builtin_catalog(),
    };

    // 2) Fail-fast validation; errors always print, warnings only when not quiet.
    let report = validate_catalog(&catalog);
    for issue in &report.issues {
        match issue.severity {
            Severity::Error => eprintln!("mpi: [{}] {}", issue.code, issue.message),
            Severity::Warning if !args.quiet => {
                eprintln!("mpi: warning [{}] {}", issue.code, issue.message)
            }
            Severity::Warning => {}
        }
    }
    if !report.pass {
        return Err(MainError::Validation("catalog validation failed".to_string()));
    }
    if args.validate_only {
        if !args.quiet {
            eprintln!("validate-only: catalog OK");
        }
        return Ok(());
    }

    // 3) Synthesize (explicit seed, or one drawn from OS entropy and logged).
    let seed = match args.seed {
        Some(s) => s,
        None => VarianceRng::from_os_entropy().1,
    };
    let dataset = generate_dataset(&catalog, seed);

    // 4) Artifacts
    fs::create_dir_all(&args.out)
        .map_err(|e| MainError::Io(format!("{}: {e}", args.out.display())))?;
    mpi_io::write_json_pretty(&args.out.join("dataset.json"), &dataset).map_err(map_io_err)?;
    mpi_io::write_csv(&args.out.join("dataset.csv"), &dataset.records).map_err(map_io_err)?;

    let record = build_run_record(engine_meta(), &catalog, &dataset).map_err(map_io_err)?;
    mpi_io::write_json_pretty(&args.out.join("run_record.json"), &record).map_err(map_io_err)?;

    // 5) Optional report renders
    if !args.render.is_empty() {
        let meta = RunMeta {
            engine_vendor: record.engine.vendor.clone(),
            engine_name: record.engine.name.clone(),
            engine_version: record.engine.version.clone(),
            seed: record.seed,
            catalog_sha256: record.catalog_sha256.clone(),
            dataset_sha256: record.dataset_sha256.clone(),
        };
        let model = mpi_report::build_model(&catalog, &dataset, &meta)
            .map_err(|e| MainError::Render(e.to_string()))?;

        for frontend in &args.render {
            match frontend.as_str() {
                "json" => {
                    #[cfg(feature = "report-json")]
                    {
                        let text = mpi_report::render_json(&model)
                            .map_err(|e| MainError::Render(e.to_string()))?;
                        fs::write(args.out.join("report.json"), text)
                            .map_err(|e| MainError::Io(e.to_string()))?;
                    }
                    #[cfg(not(feature = "report-json"))]
                    return Err(MainError::Render("json renderer not built in".to_string()));
                }
                "html" => {
                    #[cfg(feature = "report-html")]
                    {
                        let text = mpi_report::render_html(&model)
                            .map_err(|e| MainError::Render(e.to_string()))?;
                        fs::write(args.out.join("report.html"), text)
                            .map_err(|e| MainError::Io(e.to_string()))?;
                    }
                    #[cfg(not(feature = "report-html"))]
                    return Err(MainError::Render("html renderer not built in".to_string()));
                }
                other => {
                    // Unreachable behind clap's value_parser; keep the guard anyway.
                    return Err(MainError::Render(format!("unknown renderer: {other}")));
                }
            }
        }
    }

    if !args.quiet {
        eprintln!(
            "generated {} records ({} seeded, {} synthesized), seed {}",
            dataset.records.len(),
            dataset.seeded_rows,
            dataset.synthesized_rows,
            seed
        );
    }
    Ok(())
}
