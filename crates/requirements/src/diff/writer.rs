//! Row-aligned diff rendering
//!
//! The writer keeps one cursor per side. Equal text is written to both
//! sides on the same row; deleted text goes to the actual side and
//! inserted text to the expected side, with the opposite side padded so
//! that columns stay aligned. A newline inside a run is shown as the
//! two-character marker `\n` before the row advances. Other control
//! characters are escaped in place (`\r`, `\t`, `\0`, `\u{1b}`).

use std::borrow::Cow;
use std::collections::BTreeMap;

use unicode_width::UnicodeWidthStr;

use super::DiffResult;
use super::style::{ColorStyle, DiffStyle, TextStyle};
use crate::error::ValidationError;

/// Visible stand-in for a newline inside a value.
pub const NEWLINE_MARKER: &str = "\\n";

/// A plain-text writer.
pub type TextDiffWriter = DiffWriter<TextStyle>;

/// An ANSI color writer.
pub type ColorDiffWriter = DiffWriter<ColorStyle>;

/// Replaces control characters with visible escapes.
///
/// A raw carriage return would rewind the terminal row and a tab would
/// break the column count.
fn escape_controls(text: &str) -> Cow<'_, str> {
    if !text.chars().any(char::is_control) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 4);
    for c in text.chars() {
        match c {
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\0' => escaped.push_str("\\0"),
            c if c.is_control() => escaped.extend(c.escape_unicode()),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[derive(Debug, Clone, Default)]
struct Line {
    text: String,
    width: usize,
    /// Byte length of `text` up to the end of the last non-padding write.
    content_len: usize,
}

impl Line {
    fn push(&mut self, decorated: &str, width: usize) {
        self.text.push_str(decorated);
        self.width += width;
        self.content_len = self.text.len();
    }

    fn pad(&mut self, decorated: &str, width: usize) {
        self.text.push_str(decorated);
        self.width += width;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Side {
    Actual,
    Expected,
}

/// Renders an edit script into aligned rows.
#[derive(Debug)]
pub struct DiffWriter<S> {
    style: S,
    actual: BTreeMap<usize, Line>,
    expected: BTreeMap<usize, Line>,
    diff: BTreeMap<usize, Line>,
    equal: BTreeMap<usize, bool>,
    actual_row: usize,
    expected_row: usize,
    result: Option<DiffResult>,
}

impl<S: DiffStyle> DiffWriter<S> {
    /// Creates a writer with empty rows.
    pub fn new(style: S) -> Self {
        let mut writer = Self {
            style,
            actual: BTreeMap::new(),
            expected: BTreeMap::new(),
            diff: BTreeMap::new(),
            equal: BTreeMap::new(),
            actual_row: 0,
            expected_row: 0,
            result: None,
        };
        writer.touch(0);
        writer
    }

    /// Returns the character used to pad rows.
    pub fn padding_marker(&self) -> char {
        self.style.padding_marker()
    }

    /// Writes text present in both values.
    pub fn write_equal(&mut self, text: &str) -> Result<(), ValidationError> {
        self.ensure_open()?;
        self.push_equal(text);
        Ok(())
    }

    /// Writes text present only in the actual value.
    pub fn write_deleted(&mut self, text: &str) -> Result<(), ValidationError> {
        self.ensure_open()?;
        self.push_change(Side::Actual, text);
        Ok(())
    }

    /// Writes text present only in the expected value.
    pub fn write_inserted(&mut self, text: &str) -> Result<(), ValidationError> {
        self.ensure_open()?;
        self.push_change(Side::Expected, text);
        Ok(())
    }

    /// Freezes the rows. Later calls do nothing.
    pub fn flush(&mut self) {
        if self.result.is_some() {
            return;
        }
        let last = self
            .actual
            .keys()
            .chain(self.expected.keys())
            .copied()
            .max()
            .unwrap_or(0);
        for row in 0..=last {
            self.touch(row);
            self.align(row);
        }

        let trim = self.style.padding_marker() == ' ';
        let finish = |line: &Line| {
            if trim {
                line.text[..line.content_len].to_owned()
            } else {
                line.text.clone()
            }
        };
        let mut result = DiffResult {
            actual_lines: self.actual.values().map(finish).collect(),
            expected_lines: self.expected.values().map(finish).collect(),
            diff_lines: if self.style.has_diff_line() {
                self.diff
                    .values()
                    .map(|line| line.text.trim_end().to_owned())
                    .collect()
            } else {
                Vec::new()
            },
            equal_lines: self.equal.values().copied().collect(),
        };

        let empty_rows = self
            .actual
            .values()
            .zip(self.expected.values())
            .rev()
            .take_while(|(actual, expected)| actual.width == 0 && expected.width == 0)
            .count();
        let keep = (result.actual_lines.len() - empty_rows).max(1);
        result.actual_lines.truncate(keep);
        result.expected_lines.truncate(keep);
        result.equal_lines.truncate(keep);
        if !result.diff_lines.is_empty() {
            result.diff_lines.truncate(keep);
        }
        self.result = Some(result);
    }

    /// Flushes and returns the rendered rows.
    pub fn into_result(mut self) -> DiffResult {
        self.flush();
        self.result.unwrap_or_default()
    }

    /// Returns the actual rows; empty before [`DiffWriter::flush`].
    pub fn actual_lines(&self) -> &[String] {
        self.result.as_ref().map_or(&[], |result| &result.actual_lines)
    }

    /// Returns the marker rows; always empty for color output.
    pub fn diff_lines(&self) -> &[String] {
        self.result.as_ref().map_or(&[], |result| &result.diff_lines)
    }

    /// Returns the expected rows; empty before [`DiffWriter::flush`].
    pub fn expected_lines(&self) -> &[String] {
        self.result.as_ref().map_or(&[], |result| &result.expected_lines)
    }

    /// Returns which rows are unchanged; empty before [`DiffWriter::flush`].
    pub fn equal_lines(&self) -> &[bool] {
        self.result.as_ref().map_or(&[], |result| &result.equal_lines)
    }

    fn ensure_open(&self) -> Result<(), ValidationError> {
        if self.result.is_some() {
            return Err(ValidationError::illegal_state("DiffWriter was already flushed"));
        }
        Ok(())
    }

    pub(super) fn push_equal(&mut self, text: &str) {
        for (index, segment) in text.split('\n').enumerate() {
            if index > 0 {
                let row = self.sync_rows();
                self.append_equal(row, NEWLINE_MARKER);
                self.actual_row = row + 1;
                self.expected_row = row + 1;
                self.touch(row + 1);
            }
            if !segment.is_empty() {
                let row = self.sync_rows();
                self.append_equal(row, &escape_controls(segment));
            }
        }
    }

    pub(super) fn push_change(&mut self, side: Side, text: &str) {
        for (index, segment) in text.split('\n').enumerate() {
            if index > 0 {
                let row = self.row(side);
                self.append_change(side, row, NEWLINE_MARKER);
                match side {
                    Side::Actual => self.actual_row = row + 1,
                    Side::Expected => self.expected_row = row + 1,
                }
                self.touch(row + 1);
            }
            if !segment.is_empty() {
                let row = self.row(side);
                self.append_change(side, row, &escape_controls(segment));
            }
        }
    }

    const fn row(&self, side: Side) -> usize {
        match side {
            Side::Actual => self.actual_row,
            Side::Expected => self.expected_row,
        }
    }

    /// Moves both cursors to the lower of the two rows.
    fn sync_rows(&mut self) -> usize {
        let row = self.actual_row.max(self.expected_row);
        self.actual_row = row;
        self.expected_row = row;
        self.touch(row);
        row
    }

    fn touch(&mut self, row: usize) {
        self.actual.entry(row).or_default();
        self.expected.entry(row).or_default();
        self.diff.entry(row).or_default();
        self.equal.entry(row).or_insert(true);
    }

    /// Pads every side of `row` to the widest side.
    fn align(&mut self, row: usize) {
        let width = |map: &BTreeMap<usize, Line>| map.get(&row).map_or(0, |line| line.width);
        let target = width(&self.actual)
            .max(width(&self.expected))
            .max(width(&self.diff));

        for map in [&mut self.actual, &mut self.expected] {
            let line = map.entry(row).or_default();
            if line.width < target {
                let missing = target - line.width;
                line.pad(&self.style.padding(missing), missing);
            }
        }
        let diff = self.diff.entry(row).or_default();
        if diff.width < target {
            let missing = target - diff.width;
            diff.pad(&" ".repeat(missing), missing);
        }
    }

    fn append_equal(&mut self, row: usize, text: &str) {
        self.align(row);
        let width = text.width();
        let decorated = self.style.equal(text);
        self.line(Side::Actual, row).push(&decorated, width);
        self.line(Side::Expected, row).push(&decorated, width);
        self.diff.entry(row).or_default().pad(&" ".repeat(width), width);
    }

    fn append_change(&mut self, side: Side, row: usize, text: &str) {
        self.touch(row);
        self.align(row);
        let width = text.width();
        let (decorated, marker) = match side {
            Side::Actual => (self.style.deleted(text), "-"),
            Side::Expected => (self.style.inserted(text), "+"),
        };
        let padding = self.style.padding(width);
        let (changed, other) = match side {
            Side::Actual => (Side::Actual, Side::Expected),
            Side::Expected => (Side::Expected, Side::Actual),
        };
        self.line(changed, row).push(&decorated, width);
        self.line(other, row).pad(&padding, width);
        self.diff.entry(row).or_default().push(&marker.repeat(width), width);
        self.equal.insert(row, false);
    }

    fn line(&mut self, side: Side, row: usize) -> &mut Line {
        match side {
            Side::Actual => self.actual.entry(row).or_default(),
            Side::Expected => self.expected.entry(row).or_default(),
        }
    }
}
