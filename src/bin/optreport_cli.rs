//! CLI tool for optreport - lays out result records into an XLSX report
//!
//! Usage:
//!   optreport_cli <results.json|dir>                      # Write report.xlsx
//!   optreport_cli <results.json|dir> -o out.xlsx          # Choose the output file
//!   optreport_cli <dir> --variant tolerance               # Tolerance-matrix layout
//!   optreport_cli <input> --config report.json            # Layout options from JSON
//!   optreport_cli <input> --no-sort -v                    # Keep input order, debug logs
//!   optreport_cli --version                               # Print the version

#![allow(clippy::exit)]

use std::env;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use optreport::{
    load_records, sort_by_problem, version, write_report, ReportComposer, ReportConfig,
    ReportVariant,
};

const USAGE: &str = "Usage: optreport_cli <input.json|dir> [-o output.xlsx] [--variant summary|tolerance] [--config config.json] [--no-sort] [-v] [-V]";

struct Args {
    input: PathBuf,
    output: PathBuf,
    variant: Option<ReportVariant>,
    config: Option<PathBuf>,
    sort: bool,
    verbose: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = env::args().skip(1);
    let mut input = None;
    let mut output = PathBuf::from("report.xlsx");
    let mut variant = None;
    let mut config = None;
    let mut sort = true;
    let mut verbose = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-o" | "--output" => {
                output = args.next().ok_or("-o needs a path")?.into();
            }
            "--variant" => {
                let value = args.next().ok_or("--variant needs a value")?;
                variant = Some(value.parse::<ReportVariant>().map_err(|e| e.to_string())?);
            }
            "--config" => {
                config = Some(PathBuf::from(args.next().ok_or("--config needs a path")?));
            }
            "--no-sort" => sort = false,
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => return Err(String::new()),
            "-V" | "--version" => {
                println!("optreport_cli {}", version());
                process::exit(0);
            }
            flag if flag.starts_with('-') => return Err(format!("unknown option {flag}")),
            path if input.is_none() => input = Some(PathBuf::from(path)),
            extra => return Err(format!("unexpected argument {extra}")),
        }
    }

    Ok(Args {
        input: input.ok_or("missing input")?,
        output,
        variant,
        config,
        sort,
        verbose,
    })
}

fn main() {
    let args = match parse_args() {
        Ok(a) => a,
        Err(msg) => {
            if !msg.is_empty() {
                eprintln!("{msg}");
            }
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Configuration
    let mut config = match &args.config {
        Some(path) => match ReportConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error reading config {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => ReportConfig::default(),
    };
    if let Some(variant) = args.variant {
        config.variant = variant;
    }

    let composer = match ReportComposer::new(config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    // Records
    let mut records = match load_records(&args.input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error reading {}: {}", args.input.display(), e);
            process::exit(1);
        }
    };
    if args.sort {
        sort_by_problem(&mut records);
    }

    // Report
    match write_report(&args.output, &composer, &records) {
        Ok(summary) => {
            eprintln!(
                "Written: {} ({} records)",
                args.output.display(),
                summary.records()
            );
        }
        Err(e) => {
            eprintln!("Error writing report: {e}");
            process::exit(1);
        }
    }
}
