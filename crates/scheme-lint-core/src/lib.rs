//! # scheme-lint-core
//!
//! Line-oriented style checker for the Scheme dialect used in a set of
//! study notes. It enforces the formatting convention line by line:
//! indentation relative to enclosing forms, whitespace and comment
//! conventions, and the ordering of declarations inside import blocks.
//!
//! The checker is a structural state machine, not a parser: it never
//! builds an AST, only reports (it does not rewrite), and checks each
//! file independently. It includes:
//!
//! - [`lint_file`] / [`lint_source`] per-file entry points
//! - [`Linter`] for driving the state machine line by line
//! - [`Diagnostic`], [`FileReport`], [`RunReport`] for the results
//! - [`lookup_indent_rules`] for per-operator indentation policies
//!
//! ## Example
//!
//! ```
//! use scheme_lint_core::lint_source;
//!
//! let report = lint_source("notes.ss", b"(define (square x)\n  (* x x))\n");
//! assert!(report.passed());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod imports;
mod linter;
mod rules;
mod types;

pub use error::LintError;
pub use imports::{classify_import_block, id_order_ok, name_order_ok, ImportBlock, ImportStage};
pub use linter::{lint_file, lint_source, Linter, MAX_COLUMNS, MAX_DEPTH};
pub use rules::{lookup_indent_rules, IndentRules};
pub use types::{Diagnostic, FileReport, RunReport};
