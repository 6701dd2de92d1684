//! Output formatting for lint runs.

use anyhow::Result;
use scheme_lint_core::{LintError, RunReport};

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One `FILE:LINE:COLUMN: MESSAGE` line per violation.
    #[default]
    Text,
    /// JSON run report.
    Json,
}

/// Prints a run report in the chosen format.
pub fn print(report: &RunReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => print_json(report)?,
    }
    Ok(())
}

fn print_text(report: &RunReport) {
    for file in &report.files {
        for diagnostic in &file.diagnostics {
            println!("{diagnostic}");
        }
        if let Some(error) = &file.error {
            match error {
                // The IO variant already names the file.
                LintError::Io { .. } => eprintln!("{error}"),
                _ => eprintln!("{}:{}", file.file.display(), error),
            }
        }
    }
}

fn print_json(report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}
