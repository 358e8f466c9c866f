//! Diff sections of failure messages

use tracing::trace;

use crate::config::Configuration;
use crate::diff::{DiffGenerator, DiffResult};

/// One line of a diff section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ContextLine {
    Entry { key: String, value: String },
    Blank,
}

/// The rows of a diff, labelled and ready to render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DiffSection {
    pub(crate) lines: Vec<ContextLine>,
    indexed: bool,
    multiline: bool,
    legend: bool,
}

impl DiffSection {
    /// The legend entries that explain the notation this section uses.
    ///
    /// Empty for color output, where the colors speak for themselves.
    pub(crate) fn legend(&self) -> Vec<(&'static str, &'static str)> {
        if !self.legend {
            return Vec::new();
        }
        let mut entries = vec![
            ("+", "Add this character to the value"),
            ("-", "Remove this character from the value"),
        ];
        if self.indexed {
            entries.push(("[index]", "Refers to the index of a collection element"));
        }
        if self.multiline {
            entries.push(("@line", "Refers to the line number of a multiline string"));
        }
        entries
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match line {
            ContextLine::Entry { key, .. } => Some(key.as_str()),
            ContextLine::Blank => None,
        })
    }

    fn push(&mut self, key: String, value: String) {
        self.lines.push(ContextLine::Entry { key, value });
    }

    /// Appends the rows of `result`, labelled with the side names and an
    /// optional element index.
    ///
    /// A side without a name is left out together with the diff row.
    fn push_rows(
        &mut self,
        result: &DiffResult,
        actual_name: Option<&str>,
        expected_name: Option<&str>,
        index: Option<usize>,
    ) {
        let multiline = result.len() > 1;
        self.multiline |= multiline;
        let index = index.map(|index| format!("[{index}]")).unwrap_or_default();

        for row in 0..result.len() {
            if multiline && row > 0 {
                self.lines.push(ContextLine::Blank);
            }
            let line = if multiline {
                format!("@{row}")
            } else {
                String::new()
            };
            if let Some(actual_name) = actual_name {
                self.push(
                    format!("{actual_name}{index}{line}"),
                    result.actual_lines[row].clone(),
                );
            }
            if actual_name.is_some()
                && expected_name.is_some()
                && !result.equal_lines[row]
                && let Some(diff) = result.diff_lines.get(row)
            {
                self.push(format!("diff{index}{line}"), diff.clone());
            }
            if let Some(expected_name) = expected_name {
                self.push(
                    format!("{expected_name}{index}{line}"),
                    result.expected_lines[row].clone(),
                );
            }
        }
    }
}

/// Decides whether two values are compared with a diff and builds it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ContextGenerator<'a> {
    configuration: &'a Configuration,
}

impl<'a> ContextGenerator<'a> {
    pub(crate) const fn new(configuration: &'a Configuration) -> Self {
        Self { configuration }
    }

    /// Returns `true` if diffs are allowed and either value is long or
    /// spans several lines.
    pub(crate) fn should_diff(&self, actual: &str, expected: &str) -> bool {
        let threshold = self.configuration.diff_threshold();
        let complex = |value: &str| value.contains('\n') || value.chars().count() >= threshold;
        self.configuration.allow_diff() && (complex(actual) || complex(expected))
    }

    fn generator(&self) -> DiffGenerator {
        DiffGenerator::new(self.configuration.terminal_encoding())
    }

    fn section(&self) -> DiffSection {
        DiffSection {
            legend: !self.configuration.terminal_encoding().supports_color(),
            ..DiffSection::default()
        }
    }

    /// Diffs two rendered values.
    pub(crate) fn value_diff(
        &self,
        actual_name: &str,
        actual: &str,
        expected_name: &str,
        expected: &str,
    ) -> DiffSection {
        let mut section = self.section();
        let result = self.generator().diff(actual, expected);
        section.push_rows(&result, Some(actual_name), Some(expected_name), None);
        trace!(rows = result.len(), "attached diff to failure message");
        section
    }

    /// Diffs two lists element by element.
    pub(crate) fn element_diff(
        &self,
        actual_name: &str,
        actual: &[String],
        expected_name: &str,
        expected: &[String],
    ) -> DiffSection {
        let mut section = self.section();
        section.indexed = true;
        let generator = self.generator();
        let count = actual.len().max(expected.len());
        for index in 0..count {
            if index > 0 {
                section.lines.push(ContextLine::Blank);
            }
            // An element present on one side only is listed without a diff.
            match (actual.get(index), expected.get(index)) {
                (Some(actual_element), Some(expected_element)) => {
                    let result = generator.diff(actual_element, expected_element);
                    section.push_rows(&result, Some(actual_name), Some(expected_name), Some(index));
                }
                (Some(actual_element), None) => {
                    let result = generator.diff(actual_element, actual_element);
                    section.push_rows(&result, Some(actual_name), None, Some(index));
                }
                (None, Some(expected_element)) => {
                    let result = generator.diff(expected_element, expected_element);
                    section.push_rows(&result, None, Some(expected_name), Some(index));
                }
                (None, None) => {}
            }
        }
        trace!(elements = count, "attached element diff to failure message");
        section
    }
}
