//! Import-order validation.
//!
//! Chapter/Section/Exercise blocks carry a `(use ...)` sub-form whose
//! `(id name ...)` declarations must be sorted: declarations by their
//! id (a sigil followed by dot-separated numeric components), names
//! within a declaration by plain byte order. This module holds the
//! block classification and the two ordering predicates; the traversal
//! that drives them lives in [`crate::linter`].

/// The nested blocks used for importing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportBlock {
    /// Not an import block.
    None,
    /// A top-level Chapter/Section/Exercise block.
    Section,
    /// The `(use ...)` block inside a section.
    Use,
}

/// The import stage the traversal is currently inside.
///
/// Stages advance one at a time (section, then use-block, then a
/// declaration) and unwind when the paren frame that opened them is
/// popped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStage {
    /// Outside any import construct.
    None,
    /// Inside a Chapter/Section/Exercise form.
    Section,
    /// Inside the `(use ...)` form.
    Use,
    /// Inside one `(id name ...)` declaration.
    Decl,
}

/// Classifies an operator as an import block opener. Never returns a
/// declaration: those are recognized positionally, not by name.
///
/// `column` is the zero-based column where the operator starts. Section
/// headings are only recognized at the top level (column 1) and `use`
/// only at the column a section body implies (column 3).
#[must_use]
pub fn classify_import_block(operator: &[u8], column: usize) -> ImportBlock {
    if column == 1
        && matches!(operator, b"Chapter" | b"Section" | b"Exercise")
    {
        return ImportBlock::Section;
    }
    if column == 3 && operator == b"use" {
        return ImportBlock::Use;
    }
    ImportBlock::None
}

/// Returns true if the ids `prev` and `cur` are ordered correctly.
///
/// An id is a sigil character followed by dot-separated components. The
/// Chapter/Section sigil `:` sorts before the Exercise sigil `?`.
/// Components are compared by remembering the first byte difference and
/// resolving it at the next shared `.`; a key that runs out of
/// components first (a less specific prefix) must come first. Equal ids
/// are in order.
#[must_use]
pub fn id_order_ok(prev: &[u8], cur: &[u8]) -> bool {
    let mut cmp = 0i32;
    let mut i = 0;
    while i < prev.len() && i < cur.len() {
        let (ci, cj) = (prev[i], cur[i]);
        if i == 0 && ci != cj {
            // Sigil mismatch decides immediately.
            return ci < cj;
        }
        if ci == b'.' && cj == b'.' {
            if cmp != 0 {
                return cmp < 0;
            }
        } else if ci == b'.' {
            return false;
        } else if cj == b'.' {
            return true;
        } else if cmp == 0 {
            cmp = i32::from(ci) - i32::from(cj);
        }
        i += 1;
    }
    // Simulate appending a '.' at the end of each id.
    let prev_end = i == prev.len();
    let ci = if prev_end { b'.' } else { prev[i] };
    let cj = if i == cur.len() { b'.' } else { cur[i] };
    if ci == b'.' && cj == b'.' && cmp != 0 {
        return cmp < 0;
    }
    // The shorter (less specific) id must come first.
    prev_end
}

/// Returns true if the import names `prev` and `cur` are ordered
/// correctly. Plain strict byte order; duplicates are out of order.
#[must_use]
pub fn name_order_ok(prev: &[u8], cur: &[u8]) -> bool {
    prev < cur
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_headings_at_top_level_only() {
        assert_eq!(classify_import_block(b"Chapter", 1), ImportBlock::Section);
        assert_eq!(classify_import_block(b"Section", 1), ImportBlock::Section);
        assert_eq!(classify_import_block(b"Exercise", 1), ImportBlock::Section);
        assert_eq!(classify_import_block(b"Section", 3), ImportBlock::None);
        assert_eq!(classify_import_block(b"define", 1), ImportBlock::None);
    }

    #[test]
    fn use_recognized_at_section_body_column_only() {
        assert_eq!(classify_import_block(b"use", 3), ImportBlock::Use);
        assert_eq!(classify_import_block(b"use", 1), ImportBlock::None);
        assert_eq!(classify_import_block(b"use", 5), ImportBlock::None);
    }

    #[test]
    fn empty_previous_id_accepts_anything() {
        assert!(id_order_ok(b"", b":1.1"));
        assert!(id_order_ok(b"", b"?3.14"));
    }

    #[test]
    fn section_sigil_sorts_before_exercise_sigil() {
        assert!(id_order_ok(b":9.9", b"?1.1"));
        assert!(!id_order_ok(b"?1.1", b":9.9"));
    }

    #[test]
    fn equal_ids_are_in_order() {
        assert!(id_order_ok(b":1.1", b":1.1"));
        assert!(id_order_ok(b"?2.46", b"?2.46"));
    }

    #[test]
    fn simple_component_ordering() {
        assert!(id_order_ok(b":1.1", b":1.2"));
        assert!(!id_order_ok(b":1.2", b":1.1"));
        assert!(id_order_ok(b":1.2.4", b":1.3.1"));
        assert!(!id_order_ok(b":1.3.1", b":1.2.4"));
    }

    #[test]
    fn shorter_numeric_component_sorts_first() {
        // 1.9 precedes 1.10: fewer digits means a smaller number.
        assert!(id_order_ok(b":1.9", b":1.10"));
        assert!(!id_order_ok(b":1.10", b":1.9"));
        assert!(id_order_ok(b"?1.2", b"?1.23"));
        assert!(!id_order_ok(b"?1.23", b"?1.2"));
    }

    #[test]
    fn prefix_id_sorts_before_extension() {
        assert!(id_order_ok(b":1.2", b":1.2.5"));
        assert!(!id_order_ok(b":1.2.5", b":1.2"));
    }

    #[test]
    fn first_component_difference_wins() {
        assert!(id_order_ok(b":1.5.9", b":2.1.1"));
        assert!(!id_order_ok(b":2.1.1", b":1.5.9"));
    }

    #[test]
    fn names_use_plain_byte_order() {
        assert!(name_order_ok(b"", b"cube"));
        assert!(name_order_ok(b"average", b"cube"));
        assert!(!name_order_ok(b"cube", b"average"));
    }

    #[test]
    fn duplicate_names_are_out_of_order() {
        assert!(!name_order_ok(b"cube", b"cube"));
    }

    #[test]
    fn name_prefix_sorts_before_extension() {
        assert!(name_order_ok(b"fib", b"fib-iter"));
        assert!(!name_order_ok(b"fib-iter", b"fib"));
    }
}
