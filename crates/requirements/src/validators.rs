//! Entry points
//!
//! A [`Validators`] factory owns a configuration and a context map and
//! starts validator chains in one of three modes:
//!
//! | Mode           | Stops after first failure | Error                         |
//! |----------------|---------------------------|-------------------------------|
//! | `require_that` | yes                       | the failure's own error       |
//! | `assert_that`  | yes                       | wrapped as an assertion error |
//! | `check_if`     | no                        | all failures, on request      |
//!
//! `assert_that` does nothing unless assertions are enabled, so checks that
//! are too expensive for release builds can stay in the code.

use std::fmt;
use std::mem;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::config::{Configuration, GlobalConfiguration, MutableConfiguration};
use crate::error::ValidationError;
use crate::failure::FailureCollector;
use crate::mappers::StringMappers;
use crate::terminal::TerminalEncoding;
use crate::validator::{Validatable, Validator, ValidatorCore, check_name};

// ============================================================================
// VALIDATORS
// ============================================================================

/// Creates validator chains.
///
/// Every chain gets its own failure list and a copy of the factory's
/// context, so chains never affect each other.
#[derive(Debug, Clone)]
pub struct Validators {
    configuration: Configuration,
    assertions_enabled: bool,
    context: IndexMap<String, String>,
}

impl Validators {
    /// Creates a factory from the process-wide settings.
    pub fn new() -> Self {
        let settings = GlobalConfiguration::snapshot();
        let configuration = Configuration::default()
            .with_allow_diff(settings.diff_enabled)
            .with_terminal_encoding(settings.terminal_encoding);
        Self {
            configuration,
            assertions_enabled: settings.assertions_enabled,
            context: IndexMap::new(),
        }
    }

    /// Creates a factory with `configuration`.
    ///
    /// Assertions follow the process-wide setting.
    pub fn with_configuration(configuration: Configuration) -> Self {
        Self {
            configuration,
            assertions_enabled: GlobalConfiguration::assertions_enabled(),
            context: IndexMap::new(),
        }
    }

    /// Enables or disables `assert_that` for this factory only.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_assertions_enabled(mut self, enabled: bool) -> Self {
        self.assertions_enabled = enabled;
        self
    }

    /// Returns the configuration used by `require_that`.
    pub const fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Returns the configuration used by `assert_that`.
    ///
    /// Errors pass through the configured transformer and are then wrapped
    /// as assertion errors.
    pub fn assert_configuration(&self) -> Configuration {
        let transformer = Arc::clone(self.configuration.error_transformer());
        self.configuration.with_error_transformer(Arc::new(move |error: ValidationError| {
            transformer(error).into_assertion()
        }))
    }

    /// Returns the configuration used by `check_if`.
    pub fn check_configuration(&self) -> Configuration {
        self.configuration.with_throw_on_failure(false)
    }

    /// Returns `true` if `assert_that` evaluates its closure.
    pub const fn assertions_enabled(&self) -> bool {
        self.assertions_enabled
    }

    /// Returns the context inherited by new chains.
    pub const fn context(&self) -> &IndexMap<String, String> {
        &self.context
    }

    /// Adds a context line to every chain created afterwards.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or contains whitespace.
    pub fn with_context<C: fmt::Debug + 'static>(&mut self, value: C, name: &str) -> &mut Self {
        check_name(name, "context name");
        let rendered = self.configuration.string_mappers().to_string(&value);
        self.context.insert(name.to_owned(), rendered);
        self
    }

    /// Removes a context line.
    pub fn remove_context(&mut self, name: &str) -> &mut Self {
        self.context.shift_remove(name);
        self
    }

    /// Returns an independent factory with the same configuration and
    /// context.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    fn start<T: Validatable>(
        &self,
        value: T,
        name: &str,
        configuration: Configuration,
    ) -> T::Validator {
        let core = ValidatorCore::new(
            name,
            value.into_target(),
            configuration,
            self.context.clone(),
            FailureCollector::new(),
        );
        T::validator(core)
    }

    /// Starts a chain that stops at its first failure.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or contains whitespace.
    pub fn require_that<T: Validatable>(&self, value: T, name: &str) -> T::Validator {
        self.start(value, name, self.configuration.clone())
    }

    /// Starts a chain that records every failure.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or contains whitespace.
    pub fn check_if<T: Validatable>(&self, value: T, name: &str) -> T::Validator {
        self.start(value, name, self.check_configuration())
    }

    /// Runs the chain `f` builds if assertions are enabled.
    ///
    /// Inside `f`, `require_that` uses the assertion configuration.
    pub fn assert_that<V: Validator>(
        &self,
        f: impl FnOnce(&Self) -> V,
    ) -> Result<(), ValidationError> {
        if !self.assertions_enabled {
            return Ok(());
        }
        f(&self.asserting()).else_throw()
    }

    /// Runs the chain `f` builds if assertions are enabled and returns its
    /// value.
    ///
    /// Returns `Ok(None)` when assertions are disabled.
    pub fn assert_that_and_return<V: Validator>(
        &self,
        f: impl FnOnce(&Self) -> V,
    ) -> Result<Option<V::Value>, ValidationError> {
        if !self.assertions_enabled {
            return Ok(None);
        }
        f(&self.asserting()).get_value().map(Some)
    }

    fn asserting(&self) -> Self {
        Self {
            configuration: self.assert_configuration(),
            assertions_enabled: self.assertions_enabled,
            context: self.context.clone(),
        }
    }

    /// Opens an update session for the configuration.
    ///
    /// The changes apply when the updater is closed or dropped.
    pub fn update_configuration(&mut self) -> ConfigurationUpdater<'_> {
        let mutable = self.configuration.to_mutable();
        ConfigurationUpdater {
            validators: self,
            state: UpdaterState::Open(mutable),
        }
    }

    /// Updates the configuration in one step.
    pub fn update_configuration_with(
        &mut self,
        f: impl FnOnce(&mut MutableConfiguration),
    ) -> &mut Self {
        let mut mutable = self.configuration.to_mutable();
        f(&mut mutable);
        self.configuration = mutable.to_immutable();
        debug!("validator configuration updated");
        self
    }
}

impl Default for Validators {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CONFIGURATION UPDATER
// ============================================================================

#[derive(Debug)]
enum UpdaterState {
    Open(MutableConfiguration),
    Closed,
}

/// A single-use session that updates a factory's configuration.
///
/// Mutators fail with [`ValidationError::IllegalState`] once the session is
/// closed.
#[derive(Debug)]
pub struct ConfigurationUpdater<'a> {
    validators: &'a mut Validators,
    state: UpdaterState,
}

impl ConfigurationUpdater<'_> {
    fn open(&mut self) -> Result<&mut MutableConfiguration, ValidationError> {
        match &mut self.state {
            UpdaterState::Open(mutable) => Ok(mutable),
            UpdaterState::Closed => Err(ValidationError::illegal_state(
                "the configuration updater is closed",
            )),
        }
    }

    /// Allows or disallows diffs in failure messages.
    pub fn allow_diff(&mut self, allow_diff: bool) -> Result<&mut Self, ValidationError> {
        self.open()?.allow_diff(allow_diff);
        Ok(self)
    }

    /// Replaces the value renderers.
    pub fn string_mappers(
        &mut self,
        string_mappers: StringMappers,
    ) -> Result<&mut Self, ValidationError> {
        self.open()?.string_mappers(string_mappers);
        Ok(self)
    }

    /// Defers error construction until first access.
    pub fn record_stacktrace(&mut self, record_stacktrace: bool) -> Result<&mut Self, ValidationError> {
        self.open()?.record_stacktrace(record_stacktrace);
        Ok(self)
    }

    /// Stops chains after their first failure.
    pub fn throw_on_failure(&mut self, throw_on_failure: bool) -> Result<&mut Self, ValidationError> {
        self.open()?.throw_on_failure(throw_on_failure);
        Ok(self)
    }

    /// Replaces the error transformer.
    pub fn error_transformer(
        &mut self,
        transformer: impl Fn(ValidationError) -> ValidationError + Send + Sync + 'static,
    ) -> Result<&mut Self, ValidationError> {
        self.open()?.error_transformer(transformer);
        Ok(self)
    }

    /// Renders diffs for `terminal_encoding`.
    pub fn terminal_encoding(
        &mut self,
        terminal_encoding: TerminalEncoding,
    ) -> Result<&mut Self, ValidationError> {
        self.open()?.terminal_encoding(terminal_encoding);
        Ok(self)
    }

    /// Sets the length at which values are compared with a diff.
    pub fn diff_threshold(&mut self, diff_threshold: usize) -> Result<&mut Self, ValidationError> {
        self.open()?.diff_threshold(diff_threshold);
        Ok(self)
    }

    /// Applies the changes. Closing twice has no effect.
    pub fn close(&mut self) {
        if let UpdaterState::Open(mutable) = mem::replace(&mut self.state, UpdaterState::Closed) {
            self.validators.configuration = mutable.to_immutable();
            debug!(configuration = ?self.validators.configuration, "validator configuration updated");
        }
    }

    /// Returns `true` once the changes have been applied.
    pub const fn is_closed(&self) -> bool {
        matches!(self.state, UpdaterState::Closed)
    }
}

impl Drop for ConfigurationUpdater<'_> {
    fn drop(&mut self) {
        self.close();
    }
}

// ============================================================================
// FREE FUNCTIONS
// ============================================================================

/// Starts a chain that stops at its first failure, using a default
/// [`Validators`] factory.
///
/// # Panics
///
/// Panics if `name` is empty or contains whitespace.
pub fn require_that<T: Validatable>(value: T, name: &str) -> T::Validator {
    Validators::new().require_that(value, name)
}

/// Starts a chain that records every failure, using a default
/// [`Validators`] factory.
///
/// # Panics
///
/// Panics if `name` is empty or contains whitespace.
pub fn check_if<T: Validatable>(value: T, name: &str) -> T::Validator {
    Validators::new().check_if(value, name)
}

/// See [`Validators::assert_that`].
pub fn assert_that<V: Validator>(f: impl FnOnce(&Validators) -> V) -> Result<(), ValidationError> {
    Validators::new().assert_that(f)
}

/// See [`Validators::assert_that_and_return`].
pub fn assert_that_and_return<V: Validator>(
    f: impl FnOnce(&Validators) -> V,
) -> Result<Option<V::Value>, ValidationError> {
    Validators::new().assert_that_and_return(f)
}
