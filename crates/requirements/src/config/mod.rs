//! Configuration of validator behavior
//!
//! [`Configuration`] is an immutable snapshot shared by every validator of
//! a chain. [`MutableConfiguration`] builds a new one; process-wide
//! defaults live in [`GlobalConfiguration`].

mod global;

use std::fmt;
use std::sync::Arc;

pub use global::{GlobalConfiguration, GlobalSettings};

use crate::error::ValidationError;
use crate::mappers::StringMappers;
use crate::terminal::TerminalEncoding;

/// Values whose string form is at least this many characters long are
/// compared with a diff instead of a one-line message.
pub const DEFAULT_DIFF_THRESHOLD: usize = 10;

/// Transforms every error before it reaches the caller.
pub type ErrorTransformer = Arc<dyn Fn(ValidationError) -> ValidationError + Send + Sync>;

fn identity_transformer() -> ErrorTransformer {
    Arc::new(|error| error)
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Immutable validator configuration.
///
/// Cloning is cheap; "updates" produce a new value.
#[derive(Clone)]
pub struct Configuration {
    allow_diff: bool,
    string_mappers: StringMappers,
    record_stacktrace: bool,
    throw_on_failure: bool,
    error_transformer: ErrorTransformer,
    terminal_encoding: TerminalEncoding,
    diff_threshold: usize,
}

impl Configuration {
    /// Returns `true` if failure messages may include a diff.
    pub const fn allow_diff(&self) -> bool {
        self.allow_diff
    }

    /// Returns the value renderers.
    pub const fn string_mappers(&self) -> &StringMappers {
        &self.string_mappers
    }

    /// Returns `true` if error construction is deferred until first access.
    pub const fn record_stacktrace(&self) -> bool {
        self.record_stacktrace
    }

    /// Returns `true` if a chain stops evaluating after its first failure.
    pub const fn throw_on_failure(&self) -> bool {
        self.throw_on_failure
    }

    /// Returns the error transformer.
    pub const fn error_transformer(&self) -> &ErrorTransformer {
        &self.error_transformer
    }

    /// Returns the encoding diffs are rendered for.
    pub const fn terminal_encoding(&self) -> TerminalEncoding {
        self.terminal_encoding
    }

    /// Returns the length at which values are compared with a diff.
    pub const fn diff_threshold(&self) -> usize {
        self.diff_threshold
    }

    /// Applies the error transformer.
    pub fn transform(&self, error: ValidationError) -> ValidationError {
        (self.error_transformer)(error)
    }

    /// Returns a builder initialized from this configuration.
    pub fn to_mutable(&self) -> MutableConfiguration {
        MutableConfiguration::from(self)
    }

    /// Returns a copy with diffs allowed or disallowed.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_allow_diff(&self, allow_diff: bool) -> Self {
        Self {
            allow_diff,
            ..self.clone()
        }
    }

    /// Returns a copy with a different `throw_on_failure` setting.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_throw_on_failure(&self, throw_on_failure: bool) -> Self {
        Self {
            throw_on_failure,
            ..self.clone()
        }
    }

    /// Returns a copy with a different error transformer.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_error_transformer(&self, error_transformer: ErrorTransformer) -> Self {
        Self {
            error_transformer,
            ..self.clone()
        }
    }

    /// Returns a copy that renders diffs for `terminal_encoding`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_terminal_encoding(&self, terminal_encoding: TerminalEncoding) -> Self {
        Self {
            terminal_encoding,
            ..self.clone()
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            allow_diff: true,
            string_mappers: StringMappers::default(),
            record_stacktrace: true,
            throw_on_failure: true,
            error_transformer: identity_transformer(),
            terminal_encoding: TerminalEncoding::None,
            diff_threshold: DEFAULT_DIFF_THRESHOLD,
        }
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("allow_diff", &self.allow_diff)
            .field("string_mappers", &self.string_mappers)
            .field("record_stacktrace", &self.record_stacktrace)
            .field("throw_on_failure", &self.throw_on_failure)
            .field("terminal_encoding", &self.terminal_encoding)
            .field("diff_threshold", &self.diff_threshold)
            .finish()
    }
}

// ============================================================================
// MUTABLE CONFIGURATION
// ============================================================================

/// Builder for [`Configuration`].
#[derive(Clone)]
pub struct MutableConfiguration {
    allow_diff: bool,
    string_mappers: StringMappers,
    record_stacktrace: bool,
    throw_on_failure: bool,
    error_transformer: ErrorTransformer,
    terminal_encoding: TerminalEncoding,
    diff_threshold: usize,
}

impl MutableConfiguration {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::from(&Configuration::default())
    }

    /// Allows or disallows diffs in failure messages.
    pub fn allow_diff(&mut self, allow_diff: bool) -> &mut Self {
        self.allow_diff = allow_diff;
        self
    }

    /// Replaces the value renderers.
    pub fn string_mappers(&mut self, string_mappers: StringMappers) -> &mut Self {
        self.string_mappers = string_mappers;
        self
    }

    /// Defers error construction until first access.
    pub fn record_stacktrace(&mut self, record_stacktrace: bool) -> &mut Self {
        self.record_stacktrace = record_stacktrace;
        self
    }

    /// Stops chains after their first failure.
    pub fn throw_on_failure(&mut self, throw_on_failure: bool) -> &mut Self {
        self.throw_on_failure = throw_on_failure;
        self
    }

    /// Replaces the error transformer.
    pub fn error_transformer(
        &mut self,
        transformer: impl Fn(ValidationError) -> ValidationError + Send + Sync + 'static,
    ) -> &mut Self {
        self.error_transformer = Arc::new(transformer);
        self
    }

    /// Renders diffs for `terminal_encoding`.
    pub fn terminal_encoding(&mut self, terminal_encoding: TerminalEncoding) -> &mut Self {
        self.terminal_encoding = terminal_encoding;
        self
    }

    /// Sets the length at which values are compared with a diff.
    pub fn diff_threshold(&mut self, diff_threshold: usize) -> &mut Self {
        self.diff_threshold = diff_threshold;
        self
    }

    /// Builds the immutable configuration.
    pub fn to_immutable(&self) -> Configuration {
        Configuration {
            allow_diff: self.allow_diff,
            string_mappers: self.string_mappers.clone(),
            record_stacktrace: self.record_stacktrace,
            throw_on_failure: self.throw_on_failure,
            error_transformer: Arc::clone(&self.error_transformer),
            terminal_encoding: self.terminal_encoding,
            diff_threshold: self.diff_threshold,
        }
    }
}

impl Default for MutableConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&Configuration> for MutableConfiguration {
    fn from(configuration: &Configuration) -> Self {
        Self {
            allow_diff: configuration.allow_diff,
            string_mappers: configuration.string_mappers.clone(),
            record_stacktrace: configuration.record_stacktrace,
            throw_on_failure: configuration.throw_on_failure,
            error_transformer: Arc::clone(&configuration.error_transformer),
            terminal_encoding: configuration.terminal_encoding,
            diff_threshold: configuration.diff_threshold,
        }
    }
}

impl fmt::Debug for MutableConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_immutable(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let configuration = Configuration::default();
        assert!(configuration.allow_diff());
        assert!(configuration.record_stacktrace());
        assert!(configuration.throw_on_failure());
        assert_eq!(configuration.terminal_encoding(), TerminalEncoding::None);
        assert_eq!(configuration.diff_threshold(), DEFAULT_DIFF_THRESHOLD);
    }

    #[test]
    fn test_identity_transformer() {
        let configuration = Configuration::default();
        let error = configuration.transform(ValidationError::range("x."));
        assert_eq!(error.kind(), ErrorKind::Range);
    }

    #[test]
    fn test_builder_round_trip() {
        let configuration = Configuration::default()
            .to_mutable()
            .allow_diff(false)
            .throw_on_failure(false)
            .diff_threshold(3)
            .terminal_encoding(TerminalEncoding::Xterm256Colors)
            .error_transformer(ValidationError::into_assertion)
            .to_immutable();

        assert!(!configuration.allow_diff());
        assert!(!configuration.throw_on_failure());
        assert_eq!(configuration.diff_threshold(), 3);
        assert_eq!(configuration.terminal_encoding(), TerminalEncoding::Xterm256Colors);
        assert_eq!(
            configuration.transform(ValidationError::range("x.")).kind(),
            ErrorKind::Assertion
        );
    }

    #[test]
    fn test_updates_leave_original_untouched() {
        let original = Configuration::default();
        let updated = original.with_allow_diff(false).with_throw_on_failure(false);

        assert!(original.allow_diff());
        assert!(original.throw_on_failure());
        assert!(!updated.allow_diff());
        assert!(!updated.throw_on_failure());
    }
}
