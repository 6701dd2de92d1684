//! End-to-end checks over whole files.

use scheme_lint_core::lint_source;

/// A realistic, fully conforming notes file: copyright banner, wrapper
/// document, section with an ordered import block, quoted data.
const CLEAN_NOTES: &str = concat!(
    ";;; Copyright 2024 Example Author. Subject to the MIT License.\n",
    "\n",
    "(SICP\n",
    "\n",
    "(Chapter :1 \"Building Abstractions with Procedures\")\n",
    "\n",
    "(Section :1.1 \"The Elements of Programming\"\n",
    "  (use (:1.1.4 square) (?1.4 a-plus-abs-b)))\n",
    "\n",
    "(define (average x y)\n",
    "  (/ (+ x y) 2))\n",
    "\n",
    "(define pairs\n",
    "  '((1 2)\n",
    "    (3 4)))\n",
    "\n",
    ") ; SICP\n",
);

#[test]
fn conforming_file_produces_no_diagnostics() {
    let report = lint_source("notes.ss", CLEAN_NOTES.as_bytes());
    assert!(report.error.is_none());
    assert_eq!(report.diagnostics, vec![]);
    assert!(report.passed());
}

#[test]
fn violations_are_reported_with_exact_positions() {
    let source = concat!(
        "(define (f x)\n",
        "   (* x x))\n",
        "\n",
        "(display (list 1 2)) \n",
    );
    let report = lint_source("messy.ss", source.as_bytes());
    assert!(report.error.is_none());
    let found: Vec<(usize, usize, &str)> = report
        .diagnostics
        .iter()
        .map(|d| (d.line, d.column, d.message.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            (2, 4, "incorrect indentation"),
            (4, 21, "trailing whitespace"),
        ]
    );
}

#[test]
fn diagnostics_name_the_file_they_came_from() {
    let report = lint_source("ch2.ss", b"(f x )\n");
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(
        report.diagnostics[0].to_string(),
        "ch2.ss:1:6: unexpected space before ')'"
    );
}

#[test]
fn repeated_runs_are_byte_identical() {
    let source = concat!(
        "(Section :1.2 \"Procedures and the Processes They Generate\"\n",
        "  (use (?1.15 cube) (:1.1.4 square)))\n",
    );
    let first = lint_source("notes.ss", source.as_bytes());
    let second = lint_source("notes.ss", source.as_bytes());
    assert_eq!(first.diagnostics, second.diagnostics);
    // The reversed ids are flagged once, naming both keys.
    assert_eq!(first.diagnostics.len(), 1);
    assert!(first.diagnostics[0]
        .message
        .contains("incorrect import id ordering: ?1.15 > :1.1.4"));
}

#[test]
fn multi_line_strings_suspend_structural_checks() {
    let source = concat!(
        "(define greeting\n",
        "  \"hello\n",
        "there\n",
        "      world\")\n",
    );
    let report = lint_source("strings.ss", source.as_bytes());
    assert!(report.passed(), "{:?}", report.diagnostics);
}
