//! The line-oriented lint state machine.
//!
//! A [`Linter`] checks one file, one physical line at a time, without
//! ever building a parse tree. It tracks paren nesting with a stack of
//! expected indentation columns, consults the rule table for the
//! operator of each unclosed form, and runs the import-order validator
//! as an overlay on the same traversal. Violations are collected as
//! [`Diagnostic`] values; only IO failures and broken nesting abort a
//! file.

use crate::error::LintError;
use crate::imports::{classify_import_block, id_order_ok, name_order_ok, ImportBlock, ImportStage};
use crate::rules::lookup_indent_rules;
use crate::types::{Diagnostic, FileReport};

use std::path::{Path, PathBuf};

/// Maximum number of columns allowed by the style guide.
pub const MAX_COLUMNS: usize = 80;

/// Maximum paren nesting depth.
pub const MAX_DEPTH: usize = 64;

/// Alignment checks are skipped on lines ending with this comment.
const NO_ALIGN_COMMENT: &[u8] = b"; NOALIGN\n";

/// Line-local scanner mode, one dispatch per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Leading indentation.
    Indent,
    /// Ordinary code.
    Normal,
    /// Capturing the operator token after an open paren.
    Operator,
    /// Inside a string literal.
    String,
    /// Just saw a comment marker.
    Comment,
    /// Just saw a second consecutive comment marker.
    CommentSpace,
}

/// Lint state for a single file.
///
/// Owned exclusively by the traversal of one file and discarded when
/// the file finishes; there is no cross-file state.
#[derive(Debug)]
pub struct Linter {
    file: PathBuf,
    /// One-based line number of the line most recently checked.
    line_no: usize,
    /// Number of blank lines in a row seen.
    blank_run: u32,
    /// True if the previous line ended inside a string.
    in_string: bool,
    /// Number of currently-open wrapper forms. Wrappers only open at
    /// the top level or inside other wrappers, so they are always the
    /// outermost frames.
    wrappers: usize,
    /// If the last open paren was quoted, its alignment column
    /// (allowed as an alternative to the 1st-operand/2-space
    /// alignment).
    quoted_align: Option<usize>,
    /// Stack of expected indentation columns, one entry per unclosed
    /// paren. The bottom entry is always 0: top-level forms are not
    /// indented.
    stack: Vec<usize>,
    /// Depth at which each active import stage was entered, innermost
    /// last. The current stage is the length of this stack.
    import_depths: Vec<usize>,
    /// The last declaration id seen in the current use block.
    last_import_id: Vec<u8>,
    /// The last import name seen in the current declaration.
    last_import_name: Vec<u8>,
    diagnostics: Vec<Diagnostic>,
}

impl Linter {
    /// Creates a fresh state machine for one file.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            line_no: 0,
            blank_run: 0,
            in_string: false,
            wrappers: 0,
            quoted_align: None,
            stack: vec![0],
            import_depths: Vec::new(),
            last_import_id: Vec::new(),
            last_import_name: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Diagnostics collected so far, in source order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consumes the linter, yielding its diagnostics.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Current paren nesting depth (number of unclosed parens).
    fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    fn import_stage(&self) -> ImportStage {
        match self.import_depths.len() {
            0 => ImportStage::None,
            1 => ImportStage::Section,
            2 => ImportStage::Use,
            _ => ImportStage::Decl,
        }
    }

    /// Records a violation at a zero-based column of the current line.
    fn fail(&mut self, column: usize, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::new(
            self.file.clone(),
            self.line_no,
            column + 1,
            message,
        ));
    }

    /// Checks one line, which must be nonempty and end with a newline.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::TooDeep`] or [`LintError::UnbalancedClose`]
    /// if the nesting state breaks; the file cannot be checked further.
    pub fn check_line(&mut self, line: &[u8]) -> Result<(), LintError> {
        debug_assert!(line.last() == Some(&b'\n'));
        self.line_no += 1;

        // Step 1: line length, whitespace, and comment conventions.
        if line.len() == 1 {
            if !self.in_string && self.blank_run == 1 {
                self.fail(0, "multiple blank lines");
            }
            self.blank_run += 1;
            return Ok(());
        }
        self.blank_run = 0;
        let visible = line.len() - 1;
        if visible > MAX_COLUMNS {
            self.fail(
                MAX_COLUMNS - 1,
                format!("line too long: {visible} > {MAX_COLUMNS}"),
            );
        }
        if line[visible - 1] == b' ' {
            self.fail(visible - 1, "trailing whitespace");
        }
        if line[0] == b';' {
            self.check_comment_line(line);
            return Ok(());
        }

        // Step 2: spacing, alignment, and import ordering.
        let no_align = line.ends_with(NO_ALIGN_COMMENT);
        let mut mode = if self.in_string {
            Mode::String
        } else {
            Mode::Indent
        };
        let mut prev = 0u8;
        let mut escaped = false;
        let mut two_spaces = false;
        let mut word_start = 0;

        for (i, &c) in line.iter().enumerate() {
            if c == b'\t' {
                self.fail(i, "illegal character '\\t'");
            }
            if mode == Mode::Indent {
                if c == b' ' {
                    prev = c;
                    escaped = false;
                    continue;
                }
                self.check_indent(i, no_align);
                mode = Mode::Normal;
            }
            match mode {
                Mode::Normal | Mode::Operator => {
                    if two_spaces && c != b' ' && c != b';' {
                        two_spaces = false;
                        self.fail(i, "unexpected two spaces in a row");
                    }
                    match c {
                        b'"' => {
                            mode = Mode::String;
                            self.in_string = true;
                        }
                        b';' => {
                            mode = Mode::Comment;
                            if prev != b' ' {
                                self.fail(i, "expected space before ';'");
                            }
                        }
                        b'(' | b'[' => {
                            mode = Mode::Operator;
                            self.open_frame(i, prev)?;
                        }
                        b')' | b']' => {
                            mode = Mode::Normal;
                            self.close_frame(line, i, prev, word_start)?;
                        }
                        b' ' | b'\n' => {
                            if c == b' ' && prev == b' ' {
                                two_spaces = true;
                            }
                            if mode == Mode::Operator {
                                mode = Mode::Normal;
                                self.finish_operator(line, i, c);
                            } else if self.import_stage() == ImportStage::Decl {
                                self.check_import_name(line, word_start, i);
                            }
                        }
                        _ => {}
                    }
                }
                Mode::String => {
                    if !escaped && c == b'"' {
                        mode = Mode::Normal;
                        self.in_string = false;
                    }
                }
                Mode::Comment | Mode::CommentSpace => {
                    if mode == Mode::Comment && c == b';' {
                        mode = Mode::CommentSpace;
                    } else {
                        if c != b' ' {
                            self.fail(i, "expected space after ';'");
                        }
                        return Ok(());
                    }
                }
                Mode::Indent => unreachable!("indent handled above"),
            }
            if mode == Mode::Normal && prev == b' ' && c != b' ' {
                word_start = i;
            }
            prev = c;
            escaped = c == b'\\' && !escaped;
        }
        Ok(())
    }

    /// Full-line comments: at most two leading semicolons (three are
    /// reserved for the first-line copyright banner), then a space or
    /// end of line. Structural checks do not apply.
    fn check_comment_line(&mut self, line: &[u8]) {
        let mut i = 1;
        while line[i] == b';' {
            i += 1;
        }
        if i > 3 {
            self.fail(0, "too many semicolons");
        } else if i == 3 && self.line_no != 1 {
            self.fail(0, "';;;' only allowed on first line copyright");
        }
        if line[i] != b'\n' && line[i] != b' ' {
            self.fail(i, "missing space after ';'");
        }
    }

    /// Validates the first non-space column of a line against the
    /// expected alignment for the innermost open form.
    ///
    /// The wrapper exception is tested before the quoted exception;
    /// swapping them would change which diagnostics fire on lines
    /// satisfying both (see the regression test).
    fn check_indent(&mut self, i: usize, no_align: bool) {
        let depth = self.depth();
        if no_align || i == self.stack[depth] {
            return;
        }
        if i == 0 && depth == self.wrappers {
            // Returning to zero indentation after a wrapper opening.
            self.stack[depth] = 0;
        } else if Some(i) == self.quoted_align {
            // Quoted form is data, not code.
            self.stack[depth] = i;
            self.quoted_align = None;
        } else {
            self.fail(i, "incorrect indentation");
        }
    }

    /// Handles an open paren at column `i`: pushes a stack frame,
    /// checks the preceding character, and tracks quoted forms.
    fn open_frame(&mut self, i: usize, prev: u8) -> Result<(), LintError> {
        if self.stack.len() == MAX_DEPTH {
            return Err(LintError::TooDeep {
                line: self.line_no,
                column: i + 1,
                max: MAX_DEPTH,
            });
        }
        self.stack.push(i + 1);
        if i > 0 && !matches!(prev, b' ' | b'#' | b'\'' | b'(' | b',' | b'@' | b'[' | b'`') {
            self.fail(i, "expected space before '('");
        }
        if prev == b'\'' || (self.quoted_align.is_some() && matches!(prev, b'(' | b'[')) {
            self.quoted_align = Some(i + 1);
        } else {
            self.quoted_align = None;
        }
        Ok(())
    }

    /// Handles a close paren at column `i`: position and spacing
    /// checks, wrapper bookkeeping, the frame pop, and the import-stage
    /// unwind when the popped frame is the one its stage began at.
    fn close_frame(
        &mut self,
        line: &[u8],
        i: usize,
        prev: u8,
        word_start: usize,
    ) -> Result<(), LintError> {
        if i != 0 && self.depth() == self.wrappers {
            self.fail(i, "expected ')' at start of line for wrapper");
        }
        if prev == b' ' {
            self.fail(i, "unexpected space before ')'");
        }
        if self.stack.len() == 1 {
            return Err(LintError::UnbalancedClose {
                line: self.line_no,
                column: i + 1,
            });
        }
        let closing = self.depth();
        if self.wrappers > 0 && closing == self.wrappers {
            // The innermost open form is a wrapper.
            self.wrappers -= 1;
        }
        self.stack.pop();
        if self.import_depths.last() == Some(&closing) {
            match self.import_stage() {
                ImportStage::Decl => {
                    self.check_import_name(line, word_start, i);
                    self.last_import_name.clear();
                }
                ImportStage::Use => self.last_import_id.clear(),
                _ => {}
            }
            self.import_depths.pop();
        }
        Ok(())
    }

    /// Applies the operator's indentation policy once its token is
    /// fully read (`c` is the space or newline that ended it), and
    /// advances the import stage where the operator opens one.
    fn finish_operator(&mut self, line: &[u8], i: usize, c: u8) {
        let depth = self.depth();
        let start = self.stack[depth];
        let operator = &line[start..i];
        let rules = lookup_indent_rules(operator, start);
        if rules.wrapper {
            self.wrappers += 1;
        }
        if c == b' ' {
            // More tokens follow on this line.
            if rules.special && !rules.uniform {
                self.stack[depth] += 1;
            } else {
                self.stack[depth] = i + 1;
            }
        } else if rules.special {
            self.stack[depth] += 1;
        }
        match self.import_stage() {
            ImportStage::None => {
                if classify_import_block(operator, start) == ImportBlock::Section {
                    self.import_depths.push(depth);
                }
            }
            ImportStage::Section => {
                if classify_import_block(operator, start) == ImportBlock::Use {
                    self.import_depths.push(depth);
                }
            }
            ImportStage::Use => {
                // Every form directly inside a use block is a
                // declaration; its operator is the ordering id.
                self.import_depths.push(depth);
                if !id_order_ok(&self.last_import_id, operator) {
                    let message = format!(
                        "incorrect import id ordering: {} > {}",
                        String::from_utf8_lossy(&self.last_import_id),
                        String::from_utf8_lossy(operator)
                    );
                    self.fail(start, message);
                }
                self.last_import_id = operator.to_vec();
            }
            ImportStage::Decl => {}
        }
    }

    /// Checks one import name word against the previous one.
    fn check_import_name(&mut self, line: &[u8], start: usize, end: usize) {
        let word = &line[start..end];
        if !name_order_ok(&self.last_import_name, word) {
            let message = format!(
                "incorrect import name ordering: {} > {}",
                String::from_utf8_lossy(&self.last_import_name),
                String::from_utf8_lossy(word)
            );
            self.fail(start, message);
        }
        self.last_import_name = word.to_vec();
    }
}

/// Checks a whole source buffer with a fresh [`Linter`].
///
/// A missing final newline is tolerated; the last line is checked as if
/// one were present.
#[must_use]
pub fn lint_source(file: impl Into<PathBuf>, source: &[u8]) -> FileReport {
    let file = file.into();
    let mut linter = Linter::new(file.clone());
    let mut error = None;
    for raw in source.split_inclusive(|&b| b == b'\n') {
        let result = if raw.last() == Some(&b'\n') {
            linter.check_line(raw)
        } else {
            let mut last = raw.to_vec();
            last.push(b'\n');
            linter.check_line(&last)
        };
        if let Err(e) = result {
            error = Some(e);
            break;
        }
    }
    let diagnostics = linter.into_diagnostics();
    tracing::debug!(
        "{}: {} diagnostic(s)",
        file.display(),
        diagnostics.len()
    );
    FileReport {
        file,
        diagnostics,
        error,
    }
}

/// Reads and checks the given file.
///
/// An unreadable file yields a report carrying [`LintError::Io`]; the
/// caller decides how to surface it.
#[must_use]
pub fn lint_file(path: &Path) -> FileReport {
    tracing::debug!("checking {}", path.display());
    match std::fs::read(path) {
        Ok(source) => lint_source(path, &source),
        Err(source) => FileReport {
            file: path.to_path_buf(),
            diagnostics: Vec::new(),
            error: Some(LintError::Io {
                path: path.to_path_buf(),
                source,
            }),
        },
    }
}
