//! scheme-lint CLI tool.
//!
//! Usage:
//! ```bash
//! scheme-lint FILE...
//! ```
//!
//! Every file is checked independently; violations are printed to
//! stdout as `FILE:LINE:COLUMN: MESSAGE`. The exit status is 0 if no
//! file produced a diagnostic and all files could be read, 1 otherwise.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use scheme_lint_core::{lint_file, RunReport};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod output;

/// Style checker for Scheme study notes
#[derive(Parser)]
#[command(name = "scheme-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Files to check
    files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logging goes to stderr; stdout carries only diagnostics.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.files.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }

    tracing::debug!("checking {} file(s)", cli.files.len());
    let report = lint_files(&cli.files);
    output::print(&report, cli.format)?;

    if !report.passed() {
        std::process::exit(1);
    }
    Ok(())
}

/// Checks each file independently and folds the outcomes into one
/// report. A file that cannot be read fails the run but never stops it.
fn lint_files(files: &[PathBuf]) -> RunReport {
    let mut report = RunReport::new();
    for path in files {
        report.push(lint_file(path));
    }
    report
}
