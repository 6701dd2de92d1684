//! Indentation rule table.
//!
//! The indentation of a line is determined by the operator of the last
//! unclosed paren. Most operators follow the default rule: operands line
//! up with the operator, or with the first operand if one follows the
//! operator on the same line. A small fixed set of operators opt into
//! different policies via [`IndentRules`].

/// Indentation policy flags for an operator.
///
/// The flags are orthogonal capabilities:
///
/// - `special`: the body must be indented by two spaces from the open
///   paren, rather than aligned with the operands.
/// - `wrapper`: the contents must not be indented at all. Wrapper forms
///   are only recognized at the top level (open paren at column 0).
/// - `uniform`: combined with `special`, operands and body are one
///   uniform block; if operands appear on the operator's line the
///   default alignment applies instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndentRules {
    /// Body is indented two spaces from the open paren.
    pub special: bool,
    /// Contents are unindented; top-level only.
    pub wrapper: bool,
    /// Operands and body share one indentation column.
    pub uniform: bool,
}

impl IndentRules {
    /// The default policy: operand alignment.
    pub const DEFAULT: Self = Self {
        special: false,
        wrapper: false,
        uniform: false,
    };

    const SPECIAL: Self = Self {
        special: true,
        wrapper: false,
        uniform: false,
    };

    const WRAPPER: Self = Self {
        special: false,
        wrapper: true,
        uniform: false,
    };

    const SPECIAL_UNIFORM: Self = Self {
        special: true,
        wrapper: false,
        uniform: true,
    };

    const SPECIAL_WRAPPER: Self = Self {
        special: true,
        wrapper: true,
        uniform: false,
    };
}

/// Map from operator name to indentation rules, sorted by name for
/// binary search.
const INDENT_RULES: &[(&str, IndentRules)] = &[
    ("Chapter", IndentRules::SPECIAL),
    ("Exercise", IndentRules::SPECIAL),
    ("SICP", IndentRules::WRAPPER),
    ("Section", IndentRules::SPECIAL),
    ("begin", IndentRules::SPECIAL_UNIFORM),
    ("case", IndentRules::SPECIAL),
    ("cond", IndentRules::SPECIAL_UNIFORM),
    ("define", IndentRules::SPECIAL),
    ("define-record-type", IndentRules::SPECIAL),
    ("define-syntax", IndentRules::SPECIAL),
    ("lambda", IndentRules::SPECIAL),
    ("let", IndentRules::SPECIAL),
    ("let*", IndentRules::SPECIAL),
    ("let-syntax", IndentRules::SPECIAL),
    ("let-values", IndentRules::SPECIAL),
    ("letrec", IndentRules::SPECIAL),
    ("library", IndentRules::SPECIAL_WRAPPER),
    ("parameterize", IndentRules::SPECIAL),
    ("syntax-case", IndentRules::SPECIAL),
    ("syntax-rules", IndentRules::SPECIAL),
    ("unless", IndentRules::SPECIAL),
    ("when", IndentRules::SPECIAL),
    ("with-mutex", IndentRules::SPECIAL),
    ("with-syntax", IndentRules::SPECIAL),
];

/// Looks up the indentation rules for an operator.
///
/// `column` is the zero-based column where the operator starts. Wrapper
/// forms are only recognized at the top level (column 1, meaning the
/// open paren is on column 0); elsewhere the wrapper flag is masked off.
/// Unknown operators get [`IndentRules::DEFAULT`].
#[must_use]
pub fn lookup_indent_rules(operator: &[u8], column: usize) -> IndentRules {
    match INDENT_RULES.binary_search_by(|(name, _)| name.as_bytes().cmp(operator)) {
        Ok(idx) => {
            let mut rules = INDENT_RULES[idx].1;
            if column != 1 {
                rules.wrapper = false;
            }
            rules
        }
        Err(_) => IndentRules::DEFAULT,
    }
}
