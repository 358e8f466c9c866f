//! Recorded failures
//!
//! A [`ValidationFailure`] is one rejected requirement. Validators of one
//! chain append to a shared [`FailureCollector`]; terminal operations turn
//! its contents into [`ValidationFailures`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::OnceLock;

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

use crate::config::{Configuration, ErrorTransformer};
use crate::error::{ErrorKind, ValidationError};

// ============================================================================
// VALIDATION FAILURE
// ============================================================================

/// A single failed requirement.
///
/// The error is built from the message on first access, passed through the
/// configuration's error transformer, and memoized.
#[derive(Clone)]
pub struct ValidationFailure {
    kind: ErrorKind,
    message: String,
    error_transformer: ErrorTransformer,
    error: OnceLock<ValidationError>,
}

impl ValidationFailure {
    /// Records a failure of `kind` with `message`.
    ///
    /// With `record_stacktrace` disabled the error is built immediately;
    /// otherwise construction waits until [`ValidationFailure::error`].
    pub fn new(configuration: &Configuration, kind: ErrorKind, message: impl Into<String>) -> Self {
        let failure = Self {
            kind,
            message: message.into(),
            error_transformer: configuration.error_transformer().clone(),
            error: OnceLock::new(),
        };
        if !configuration.record_stacktrace() {
            failure.error();
        }
        failure
    }

    /// Returns the kind of error the failure produces before transformation.
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the failure message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the transformed error.
    ///
    /// Every call returns the same instance.
    pub fn error(&self) -> &ValidationError {
        self.error.get_or_init(|| {
            let error = match self.kind {
                ErrorKind::Type => ValidationError::type_error(self.message.clone()),
                ErrorKind::IllegalState => ValidationError::illegal_state(self.message.clone()),
                _ => ValidationError::range(self.message.clone()),
            };
            (self.error_transformer)(error)
        })
    }
}

impl fmt::Debug for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationFailure")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Serialize for ValidationFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationFailure", 2)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("message", &self.message)?;
        state.end()
    }
}

// ============================================================================
// VALIDATION FAILURES
// ============================================================================

/// The failures recorded by one validation chain, in order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationFailures {
    failures: Vec<ValidationFailure>,
}

impl ValidationFailures {
    /// Wraps a list of failures.
    pub const fn new(failures: Vec<ValidationFailure>) -> Self {
        Self { failures }
    }

    /// Returns `true` if nothing failed.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the number of failures.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Returns the failures.
    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    /// Returns the failure messages.
    pub fn messages(&self) -> Vec<String> {
        self.failures.iter().map(|failure| failure.message.clone()).collect()
    }

    /// Returns the error that represents the whole batch.
    ///
    /// `None` for no failures, the failure's own error for one, and
    /// [`ValidationError::MultipleFailures`] for more.
    pub fn error(&self) -> Option<ValidationError> {
        match self.failures.as_slice() {
            [] => None,
            [failure] => Some(failure.error().clone()),
            failures => Some(ValidationError::MultipleFailures {
                failures: failures.to_vec(),
            }),
        }
    }

    /// Returns `Err` with [`ValidationFailures::error`] if anything failed.
    pub fn into_result(self) -> Result<(), ValidationError> {
        self.error().map_or(Ok(()), Err)
    }

    /// Iterates over the failures.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationFailure> {
        self.failures.iter()
    }
}

impl IntoIterator for ValidationFailures {
    type Item = ValidationFailure;
    type IntoIter = std::vec::IntoIter<ValidationFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationFailures {
    type Item = &'a ValidationFailure;
    type IntoIter = std::slice::Iter<'a, ValidationFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.iter()
    }
}

// ============================================================================
// FAILURE COLLECTOR
// ============================================================================

/// The failure list shared by every validator of one chain.
///
/// Cloning returns another handle to the same list. A collector is created
/// per top-level `require_that`/`check_if`/`assert_that` call and never
/// shared between calls.
#[derive(Debug, Clone, Default)]
pub struct FailureCollector {
    failures: Rc<RefCell<Vec<ValidationFailure>>>,
}

impl FailureCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a failure.
    pub fn push(&self, failure: ValidationFailure) {
        self.failures.borrow_mut().push(failure);
    }

    /// Returns `true` if no failure was recorded.
    pub fn is_empty(&self) -> bool {
        self.failures.borrow().is_empty()
    }

    /// Returns the number of recorded failures.
    pub fn len(&self) -> usize {
        self.failures.borrow().len()
    }

    /// Copies the recorded failures.
    pub fn snapshot(&self) -> ValidationFailures {
        ValidationFailures::new(self.failures.borrow().clone())
    }
}
