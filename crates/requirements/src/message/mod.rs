//! Failure message rendering
//!
//! A failure message is a sentence followed by `key: value` context lines
//! and, for long or multi-line values, a diff:
//!
//! ```text
//! "actual" had an unexpected value.
//!
//! actual  : "foosball    "
//! diff    :  ----    ++++
//! expected: "    ballroom"
//!
//! Legend
//! ------
//! +       : Add this character to the value
//! -       : Remove this character from the value
//! ```
//!
//! Keys are padded to a common width across every section so the values
//! line up.

/// Declares message functions for constraints that only need the value.
macro_rules! phrases {
    ($($function:ident => $phrase:literal;)+) => {
        $(
            pub(crate) fn $function<V: $crate::validator::Validator>(validator: &V) -> String {
                $crate::message::constraint(validator, $phrase)
            }
        )+
    };
}

pub(crate) mod collection;
mod context;
pub(crate) mod number;
pub(crate) mod object;
mod pluralizer;
pub(crate) mod size;
pub(crate) mod string;

use std::fmt;

use indexmap::IndexMap;

pub(crate) use context::{ContextGenerator, ContextLine, DiffSection};
pub use pluralizer::Pluralizer;

use crate::config::Configuration;
use crate::validator::Validator;

/// Quotes a validator name for use in a sentence.
///
/// Names of derived values such as `actual.length()` are left bare.
pub fn quote_name(name: &str) -> String {
    if name.contains('.') {
        name.to_owned()
    } else {
        format!("\"{name}\"")
    }
}

// ============================================================================
// MESSAGE BUILDER
// ============================================================================

/// Assembles one failure message.
#[derive(Debug)]
pub struct MessageBuilder<'a> {
    configuration: &'a Configuration,
    validator_context: &'a IndexMap<String, String>,
    message: String,
    context: IndexMap<String, String>,
    diff: Option<DiffSection>,
}

impl<'a> MessageBuilder<'a> {
    pub(crate) fn new(
        configuration: &'a Configuration,
        validator_context: &'a IndexMap<String, String>,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        debug_assert!(message.ends_with('.'), "message must end with a period: {message}");
        Self {
            configuration,
            validator_context,
            message,
            context: IndexMap::new(),
            diff: None,
        }
    }

    /// Adds a context line. A later value for the same name wins.
    pub(crate) fn with_context(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(name.into(), value.into());
        self
    }

    /// Attaches a diff section.
    pub(crate) fn with_diff(mut self, diff: DiffSection) -> Self {
        self.diff = Some(diff);
        self
    }

    pub(crate) const fn context_generator(&self) -> ContextGenerator<'a> {
        ContextGenerator::new(self.configuration)
    }

    fn render(&self) -> String {
        let mut entries: Vec<(&str, &str)> = self
            .context
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        entries.extend(
            self.validator_context
                .iter()
                .filter(|(key, _)| !self.context.contains_key(*key))
                .map(|(key, value)| (key.as_str(), value.as_str())),
        );
        let legend = self.diff.as_ref().map(DiffSection::legend).unwrap_or_default();

        let width = entries
            .iter()
            .map(|(key, _)| *key)
            .chain(self.diff.iter().flat_map(DiffSection::keys))
            .chain(legend.iter().map(|(key, _)| *key))
            .map(|key| key.chars().count())
            .max()
            .unwrap_or(0);
        let line = |key: &str, value: &str| format!("{key:<width$}: {value}");

        let standalone = entries.is_empty()
            && self.diff.is_none()
            && !self.message.contains('\n')
            && !self.message.contains(',');
        let message = if standalone {
            self.message.strip_suffix('.').unwrap_or(&self.message)
        } else {
            &self.message
        };

        let mut lines = vec![message.to_owned()];
        lines.extend(entries.iter().map(|(key, value)| line(key, value)));
        if let Some(diff) = &self.diff {
            lines.push(String::new());
            lines.extend(diff.lines.iter().map(|entry| match entry {
                ContextLine::Entry { key, value } => line(key, value),
                ContextLine::Blank => String::new(),
            }));
            if !legend.is_empty() {
                lines.push(String::new());
                lines.push("Legend".to_owned());
                lines.push("------".to_owned());
                lines.extend(legend.iter().map(|(key, value)| line(key, value)));
            }
        }
        lines.join("\n")
    }
}

impl fmt::Display for MessageBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// ============================================================================
// SHARED PHRASES
// ============================================================================

/// Starts a message that lists the validator's value under its name.
pub(crate) fn with_actual<V: Validator>(validator: &V, message: String) -> MessageBuilder<'_> {
    let builder = validator.core().message(message);
    match validator.actual_repr() {
        Some(actual) => builder.with_context(validator.name(), actual),
        None => builder,
    }
}

/// `N <phrase>.` with the value as context.
pub(crate) fn constraint<V: Validator>(validator: &V, phrase: &str) -> String {
    let message = format!("{} {phrase}.", quote_name(validator.name()));
    with_actual(validator, message).to_string()
}

/// `N <phrase> <value>.` with the validator's value as context.
pub(crate) fn constraint_with<V: Validator>(validator: &V, phrase: &str, value: &str) -> String {
    let message = format!("{} {phrase} {value}.", quote_name(validator.name()));
    with_actual(validator, message).to_string()
}
