//! Error types for requirement failures
//!
//! Every failure a validator records is eventually surfaced as a
//! [`ValidationError`]. The variant tells the caller what went wrong:
//!
//! - [`ValidationError::Range`] is the default for a rejected value
//! - [`ValidationError::Type`] reports a value that was unexpectedly null
//! - [`ValidationError::Assertion`] wraps a failure raised by `assert_that`
//! - [`ValidationError::MultipleFailures`] aggregates a `check_if` batch
//! - [`ValidationError::IllegalState`] reports misuse of a single-use builder

use serde::{Deserialize, Serialize};

use crate::failure::ValidationFailure;

// ============================================================================
// ERROR KIND
// ============================================================================

/// The discriminant of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A value had the wrong shape, e.g. it was null.
    Type,
    /// A value violated a constraint.
    Range,
    /// A failure raised in assertion mode.
    Assertion,
    /// More than one failure was recorded.
    MultipleFailures,
    /// A single-use object was used after it was closed.
    IllegalState,
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// The error returned when a requirement is not met.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_requirements::{ErrorKind, require_that};
///
/// let error = require_that(5_i32, "actual").is_greater_than(10).else_throw().unwrap_err();
/// assert_eq!(error.kind(), ErrorKind::Range);
/// assert!(error.to_string().starts_with("\"actual\" must be greater than 10."));
/// ```
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// A value had the wrong shape.
    #[error("{message}")]
    Type {
        /// The rendered failure message.
        message: String,
    },

    /// A value violated a constraint.
    #[error("{message}")]
    Range {
        /// The rendered failure message.
        message: String,
    },

    /// A failure raised by an assertion.
    #[error("{message}")]
    Assertion {
        /// The message of the wrapped failure.
        message: String,
        /// The failure that triggered the assertion.
        #[source]
        cause: Box<ValidationError>,
    },

    /// Several failures recorded by one validation chain.
    #[error("{}", render_failures(failures))]
    MultipleFailures {
        /// The failures in the order they were recorded.
        failures: Vec<ValidationFailure>,
    },

    /// An object was used after it was closed.
    #[error("{message}")]
    IllegalState {
        /// What was misused.
        message: String,
    },
}

impl ValidationError {
    /// Creates a [`ValidationError::Type`].
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::Type {
            message: message.into(),
        }
    }

    /// Creates a [`ValidationError::Range`].
    pub fn range(message: impl Into<String>) -> Self {
        Self::Range {
            message: message.into(),
        }
    }

    /// Creates a [`ValidationError::IllegalState`].
    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState {
            message: message.into(),
        }
    }

    /// Wraps `self` in a [`ValidationError::Assertion`].
    ///
    /// An error that already is an assertion is returned unchanged.
    #[must_use]
    pub fn into_assertion(self) -> Self {
        match self {
            assertion @ Self::Assertion { .. } => assertion,
            cause => Self::Assertion {
                message: cause.to_string(),
                cause: Box::new(cause),
            },
        }
    }

    /// Returns the discriminant of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Type { .. } => ErrorKind::Type,
            Self::Range { .. } => ErrorKind::Range,
            Self::Assertion { .. } => ErrorKind::Assertion,
            Self::MultipleFailures { .. } => ErrorKind::MultipleFailures,
            Self::IllegalState { .. } => ErrorKind::IllegalState,
        }
    }

    /// Returns the aggregated failures, or an empty slice for any other variant.
    pub fn failures(&self) -> &[ValidationFailure] {
        match self {
            Self::MultipleFailures { failures } => failures,
            _ => &[],
        }
    }
}

fn render_failures(failures: &[ValidationFailure]) -> String {
    let mut out = format!("{} validation failures", failures.len());
    for failure in failures {
        out.push_str("\n\n");
        out.push_str(failure.message());
    }
    out
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;
    use crate::config::Configuration;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(ValidationError::type_error("a").kind(), ErrorKind::Type);
        assert_eq!(ValidationError::range("a").kind(), ErrorKind::Range);
        assert_eq!(ValidationError::illegal_state("a").kind(), ErrorKind::IllegalState);
        assert_eq!(
            ValidationError::range("a").into_assertion().kind(),
            ErrorKind::Assertion
        );
    }

    #[test]
    fn test_assertion_keeps_cause() {
        let error = ValidationError::range("\"x\" must be positive.").into_assertion();
        assert_eq!(error.to_string(), "\"x\" must be positive.");

        let source = error.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("\"x\" must be positive."));
    }

    #[test]
    fn test_into_assertion_is_idempotent() {
        let once = ValidationError::range("boom.").into_assertion();
        let twice = once.clone().into_assertion();
        assert!(matches!(
            twice,
            ValidationError::Assertion { ref cause, .. } if cause.kind() == ErrorKind::Range
        ));
    }

    #[test]
    fn test_multiple_failures_display() {
        let configuration = Configuration::default();
        let failures = vec![
            ValidationFailure::new(&configuration, ErrorKind::Range, "first."),
            ValidationFailure::new(&configuration, ErrorKind::Type, "second."),
        ];
        let error = ValidationError::MultipleFailures { failures };

        assert_eq!(error.to_string(), "2 validation failures\n\nfirst.\n\nsecond.");
        assert_eq!(error.failures().len(), 2);
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<ValidationError>();
    }
}
