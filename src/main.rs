//! dupmap CLI entry point.
//!
//! Handles argument parsing, logging setup, thread pool sizing, and
//! top-level error handling; the analysis itself lives in the library.

use anyhow::{Context, Result};
use clap::Parser;
use dupmap::cli::Cli;
use dupmap::config;
use dupmap::detect::DuplicateDetector;
use dupmap::extract::{CSharpExtractor, MethodExtractor};
use dupmap::io::output::{write_json_report, OutputFormat, ReportOptions, ReportWriter};
use dupmap::io::walker::FileWalker;
use dupmap::observability;
use rayon::prelude::*;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

fn main() -> Result<()> {
    observability::init_tracing();
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    if cli.jobs > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.jobs)
            .build_global()
            .context("failed to configure worker threads")?;
    }

    config::validate_threshold(cli.threshold)?;
    let options = cli.detector_options();
    options.validate()?;

    let include_file = cli
        .include_file_pattern
        .as_deref()
        .map(regex::Regex::new)
        .transpose()
        .context("invalid --include-file-pattern")?;

    let paths = FileWalker::new(cli.paths.clone())
        .with_extensions(cli.extensions.clone())
        .with_include_pattern(include_file)
        .walk()?;
    debug!(files = paths.len(), "discovered source files");

    let files = parse_files(&paths);
    let detector = DuplicateDetector::new(options, cli.threshold)?;
    let groups = detector.detect(&files);

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("cannot create output file {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };
    match OutputFormat::from(cli.format) {
        OutputFormat::Json => write_json_report(out, &groups)?,
        OutputFormat::Text => {
            let report_options = ReportOptions {
                print_code: cli.print,
                print_all: cli.print_all,
                use_color: cli.output.is_none() && std::io::stdout().is_terminal(),
            };
            ReportWriter::new(out, report_options)
                .write_report(&groups)
                .context("failed to write report")?;
        }
    }
    Ok(())
}

/// Parse every file in parallel. Parse failures are logged and the file is
/// dropped from the run.
fn parse_files(paths: &[PathBuf]) -> Vec<dupmap::ParsedFile> {
    paths
        .par_iter()
        .filter_map(|path| {
            let mut extractor = match CSharpExtractor::new() {
                Ok(extractor) => extractor,
                Err(e) => {
                    warn!(error = %e, "cannot construct extractor");
                    return None;
                }
            };
            match extractor.extract_file(path) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "skipping file");
                    None
                }
            }
        })
        .collect()
}
