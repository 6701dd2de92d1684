//! Diagnostic and report types.

use crate::error::LintError;
use serde::{Serialize, Serializer};
use std::path::PathBuf;

/// A single style violation.
///
/// Purely an output value: created once, never mutated, printed as
/// `FILE:LINE:COLUMN: MESSAGE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// File the violation was found in.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    #[must_use]
    pub fn new(
        file: impl Into<PathBuf>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.file.display(),
            self.line,
            self.column,
            self.message
        )
    }
}

/// The outcome of checking one file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    /// File that was checked.
    pub file: PathBuf,
    /// All violations found, in source order.
    pub diagnostics: Vec<Diagnostic>,
    /// Fatal error that stopped the check, if any. Diagnostics found
    /// before the error are still present.
    #[serde(serialize_with = "error_as_string")]
    pub error: Option<LintError>,
}

impl FileReport {
    /// Returns true if the file produced no diagnostics and no error.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.diagnostics.is_empty() && self.error.is_none()
    }
}

fn error_as_string<S: Serializer>(
    error: &Option<LintError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(e) => serializer.serialize_some(&e.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Accumulated outcome of a whole run.
///
/// An explicit value threaded through the per-file calls, so separate
/// runs never interfere.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    /// Number of files checked (attempted reads included).
    pub files_checked: usize,
    /// Per-file outcomes, in the order the files were given.
    pub files: Vec<FileReport>,
}

impl RunReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one file's outcome.
    pub fn push(&mut self, report: FileReport) {
        self.files_checked += 1;
        self.files.push(report);
    }

    /// Returns true if every file passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.files.iter().all(FileReport::passed)
    }

    /// Total number of diagnostics across all files.
    #[must_use]
    pub fn diagnostic_count(&self) -> usize {
        self.files.iter().map(|f| f.diagnostics.len()).sum()
    }
}
