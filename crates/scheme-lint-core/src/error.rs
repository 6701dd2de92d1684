//! Errors that abort the check of a single file.
//!
//! Lint violations are never errors; they are [`crate::Diagnostic`]
//! values. A [`LintError`] means the traversal itself cannot continue
//! for this file. Other files are unaffected.

use std::path::PathBuf;
use thiserror::Error;

/// A fatal-per-file failure.
#[derive(Debug, Error)]
pub enum LintError {
    /// IO error opening or reading the file.
    #[error("{path}: {source}")]
    Io {
        /// Path of the file that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Paren nesting exceeded the supported depth.
    #[error("{line}:{column}: nesting too deep (max {max})")]
    TooDeep {
        /// One-based line of the offending open paren.
        line: usize,
        /// One-based column of the offending open paren.
        column: usize,
        /// The supported maximum depth.
        max: usize,
    },

    /// A close paren appeared with no matching open paren.
    #[error("{line}:{column}: unbalanced ')'")]
    UnbalancedClose {
        /// One-based line of the stray close paren.
        line: usize,
        /// One-based column of the stray close paren.
        column: usize,
    },
}
