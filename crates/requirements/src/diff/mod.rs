//! Line-aligned differences between two values
//!
//! Failure messages compare long or multi-line values with a diff instead
//! of printing both values on one line each. The pipeline is:
//!
//! 1. [`myers::edit_script`] computes character-level edits
//! 2. a [`DiffWriter`] lays the edits out in rows
//! 3. the rows are frozen into a [`DiffResult`]
//!
//! ```rust,ignore
//! use nebula_requirements::diff::DiffGenerator;
//! use nebula_requirements::TerminalEncoding;
//!
//! let result = DiffGenerator::new(TerminalEncoding::None).diff("foosball", "ballroom");
//! assert_eq!(result.actual_lines, ["foosball"]);
//! assert_eq!(result.diff_lines, ["----    ++++"]);
//! assert_eq!(result.expected_lines, ["    ballroom"]);
//! ```

pub mod myers;
mod style;
mod writer;

use tracing::trace;

pub use myers::{Edit, EditKind};
pub use style::{ColorStyle, DiffStyle, TextStyle};
pub use writer::{ColorDiffWriter, DiffWriter, NEWLINE_MARKER, TextDiffWriter};

use crate::terminal::TerminalEncoding;
use writer::Side;

// ============================================================================
// DIFF RESULT
// ============================================================================

/// The rendered rows of a diff.
///
/// `actual_lines`, `expected_lines` and `equal_lines` always have the same
/// length. `diff_lines` has that length for text output and is empty for
/// color output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Rows of the actual value.
    pub actual_lines: Vec<String>,
    /// Marker rows (`-`, `+`, space).
    pub diff_lines: Vec<String>,
    /// Rows of the expected value.
    pub expected_lines: Vec<String>,
    /// Whether each row is free of changes.
    pub equal_lines: Vec<bool>,
}

impl DiffResult {
    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.actual_lines.len()
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.actual_lines.is_empty()
    }

    /// Returns `true` if every row is unchanged.
    pub fn is_equal(&self) -> bool {
        self.equal_lines.iter().all(|equal| *equal)
    }
}

// ============================================================================
// DIFF GENERATOR
// ============================================================================

/// Diffs two strings for a given terminal encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffGenerator {
    encoding: TerminalEncoding,
}

impl DiffGenerator {
    /// Creates a generator. [`TerminalEncoding::None`] produces text output.
    pub const fn new(encoding: TerminalEncoding) -> Self {
        Self { encoding }
    }

    /// Diffs `actual` against `expected`.
    pub fn diff(&self, actual: &str, expected: &str) -> DiffResult {
        let edits = myers::edit_script(actual, expected);
        let result = if self.encoding.supports_color() {
            render(ColorDiffWriter::new(ColorStyle::new(self.encoding)), &edits)
        } else {
            render(TextDiffWriter::new(TextStyle), &edits)
        };
        trace!(
            edits = edits.len(),
            rows = result.len(),
            encoding = ?self.encoding,
            "computed diff"
        );
        result
    }
}

fn render<S: DiffStyle>(mut writer: DiffWriter<S>, edits: &[Edit]) -> DiffResult {
    for edit in edits {
        match edit.kind {
            EditKind::Equal => writer.push_equal(&edit.text),
            EditKind::Delete => writer.push_change(Side::Actual, &edit.text),
            EditKind::Insert => writer.push_change(Side::Expected, &edit.text),
        }
    }
    writer.into_result()
}
