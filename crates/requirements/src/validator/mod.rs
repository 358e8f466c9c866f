//! Fluent validators
//!
//! Every validator wraps a [`ValidatorCore`]: the value under test, its
//! name, the configuration and the failure list shared with the rest of
//! the chain. Predicates consume the validator and return it, so checks
//! read as one expression:
//!
//! ```rust,ignore
//! use nebula_requirements::prelude::*;
//!
//! let port = require_that(8080_u16, "port")
//!     .is_greater_than(1023)
//!     .is_less_than(49152)
//!     .get_value()?;
//! ```
//!
//! Each predicate follows the same template. When the chain runs in
//! require mode and already failed, the predicate is skipped. Otherwise
//! the predicate is evaluated against the [`ValidationTarget`]; a missing
//! value records a single "may not be null" failure, any other rejection
//! records the predicate's own message.

mod array;
mod boolean;
mod collection;
mod map;
mod number;
mod object;
mod set;
mod size;
mod string;

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexMap;
use tracing::trace;

pub use array::ArrayValidator;
pub use boolean::BooleanValidator;
pub use map::{MapCollection, MapValidator};
pub use number::{Number, NumberValidator};
pub use object::ObjectValidator;
pub use set::{SetCollection, SetValidator};
pub use size::SizeValidator;
pub use string::StringValidator;

use crate::config::Configuration;
use crate::error::{ErrorKind, ValidationError};
use crate::failure::{FailureCollector, ValidationFailure, ValidationFailures};
use crate::message::{self, MessageBuilder, quote_name};
use crate::target::ValidationTarget;

/// Panics unless `name` is non-empty and free of whitespace.
///
/// An invalid name is a bug in the calling code, not a validation failure.
pub(crate) fn check_name(name: &str, what: &str) {
    assert!(!name.is_empty(), "{what} may not be empty");
    assert!(
        !name.chars().any(char::is_whitespace),
        "{what} may not contain whitespace: {name:?}"
    );
}

// ============================================================================
// VALIDATOR CORE
// ============================================================================

/// State shared by every validator type.
#[derive(Debug)]
pub struct ValidatorCore<T> {
    name: String,
    value: ValidationTarget<T>,
    configuration: Configuration,
    context: IndexMap<String, String>,
    failures: FailureCollector,
}

impl<T> ValidatorCore<T> {
    pub(crate) fn new(
        name: &str,
        value: ValidationTarget<T>,
        configuration: Configuration,
        context: IndexMap<String, String>,
        failures: FailureCollector,
    ) -> Self {
        check_name(name, "name");
        Self {
            name: name.to_owned(),
            value,
            configuration,
            context,
            failures,
        }
    }

    /// Returns the name of the value.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value under test.
    pub const fn value(&self) -> &ValidationTarget<T> {
        &self.value
    }

    /// Returns the configuration of the chain.
    pub const fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Returns the context lines appended to every failure message.
    pub const fn context(&self) -> &IndexMap<String, String> {
        &self.context
    }

    /// Returns the failure list shared by the chain.
    pub const fn failures(&self) -> &FailureCollector {
        &self.failures
    }

    pub(crate) fn message(&self, message: impl Into<String>) -> MessageBuilder<'_> {
        MessageBuilder::new(&self.configuration, &self.context, message)
    }

    /// Returns `true` if a require-mode chain already failed.
    pub(crate) fn should_skip(&self) -> bool {
        self.configuration.throw_on_failure() && !self.failures.is_empty()
    }

    pub(crate) fn record(&self, kind: ErrorKind, message: String) {
        trace!(validator = %self.name, ?kind, "recorded validation failure");
        self.failures
            .push(ValidationFailure::new(&self.configuration, kind, message));
    }

    /// Records the nullity failure if the value is absent.
    ///
    /// Returns `true` if the value is absent.
    pub(crate) fn fail_on_null(&self) -> bool {
        if !self.value.is_null() {
            return false;
        }
        let message = message::object::may_not_be_null(self);
        self.record(ErrorKind::Type, message);
        true
    }

    pub(crate) fn insert_context(&mut self, name: &str, value: String) {
        check_name(name, "context name");
        self.context.insert(name.to_owned(), value);
    }

    pub(crate) fn remove_context(&mut self, name: &str) {
        self.context.shift_remove(name);
    }

    /// Consumes the core and returns a child for the value `f` derives.
    ///
    /// The child is named `<name>.<method>()`, shares the failure list,
    /// and lists `parent_value` under the parent's name. Deriving from an
    /// absent value reports the parent as null and leaves the child
    /// invalid.
    pub(crate) fn derive<U>(
        self,
        method: &str,
        parent_value: Option<String>,
        f: impl FnOnce(T) -> U,
    ) -> ValidatorCore<U> {
        if !self.should_skip() {
            self.fail_on_null();
        }
        let mut context = self.context;
        if let Some(parent_value) = parent_value {
            context.insert(self.name.clone(), parent_value);
        }
        ValidatorCore {
            name: format!("{}.{method}()", self.name),
            value: self.value.undefined_or_null_to_invalid().map(f),
            configuration: self.configuration,
            context,
            failures: self.failures,
        }
    }

    fn missing_value_error(&self) -> ValidationError {
        match self.value {
            ValidationTarget::Null => ValidationError::type_error(format!(
                "{} may not be null.",
                quote_name(&self.name)
            )),
            _ => ValidationError::illegal_state(format!(
                "{} does not have a value.",
                quote_name(&self.name)
            )),
        }
    }
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// Operations shared by every validator.
pub trait Validator: Sized {
    /// The type of the value under test.
    type Value;

    /// Returns the shared state.
    fn core(&self) -> &ValidatorCore<Self::Value>;

    /// Returns the shared state mutably.
    fn core_mut(&mut self) -> &mut ValidatorCore<Self::Value>;

    /// Consumes the validator and returns its state.
    fn into_core(self) -> ValidatorCore<Self::Value>;

    /// Renders a value of this validator's type for failure messages.
    fn render(&self, value: &Self::Value) -> String;

    /// Renders the elements of a list value, for element-wise diffs.
    #[doc(hidden)]
    fn render_elements(&self, _value: &Self::Value) -> Option<Vec<String>> {
        None
    }

    /// Renders the elements of an expected value if it is a list of the
    /// same element type.
    #[doc(hidden)]
    fn render_expected_elements(&self, _expected: &dyn Any) -> Option<Vec<String>> {
        None
    }

    /// Returns the name of the value.
    fn name(&self) -> &str {
        self.core().name()
    }

    /// Returns the context lines appended to failure messages.
    fn context(&self) -> &IndexMap<String, String> {
        self.core().context()
    }

    /// Renders the value under test, if there is one.
    fn actual_repr(&self) -> Option<String> {
        self.core().value().value().map(|value| self.render(value))
    }

    /// Adds `value` as a context line of every later failure message.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or contains whitespace.
    fn with_context<C: fmt::Debug + 'static>(mut self, value: C, name: &str) -> Self {
        let rendered = self.core().configuration().string_mappers().to_string(&value);
        self.core_mut().insert_context(name, rendered);
        self
    }

    /// Removes a context line.
    fn remove_context(mut self, name: &str) -> Self {
        self.core_mut().remove_context(name);
        self
    }

    /// Requires the value to be absent.
    fn is_null(self) -> Self {
        let core = self.core();
        if core.should_skip() || core.value().is_null() {
            return self;
        }
        let message = message::object::is_null(&self);
        self.core().record(ErrorKind::Range, message);
        self
    }

    /// Requires the value to be present.
    fn is_not_null(self) -> Self {
        if !self.core().should_skip() {
            self.core().fail_on_null();
        }
        self
    }

    /// Records the failure `message` builds unless `predicate` accepts the
    /// value.
    ///
    /// An absent value first records the nullity failure. A require-mode
    /// chain stops there.
    #[doc(hidden)]
    fn check(
        self,
        predicate: impl FnOnce(&Self::Value) -> bool,
        message: impl FnOnce(&Self) -> String,
    ) -> Self {
        if self.core().should_skip() || !self.core().value().validation_failed(predicate) {
            return self;
        }
        if self.core().fail_on_null() && self.core().should_skip() {
            return self;
        }
        let message = message(&self);
        self.core().record(ErrorKind::Range, message);
        self
    }

    /// Returns `true` if any validator of the chain recorded a failure.
    fn validation_failed(&self) -> bool {
        !self.core().failures().is_empty()
    }

    /// Returns the failures of the chain.
    fn else_get_failures(self) -> ValidationFailures {
        self.core().failures().snapshot()
    }

    /// Returns the failure messages of the chain.
    fn else_get_messages(self) -> Vec<String> {
        self.else_get_failures().messages()
    }

    /// Returns `Err` if the chain recorded a failure.
    fn else_throw(self) -> Result<(), ValidationError> {
        self.else_get_failures().into_result()
    }

    /// Returns the value if the chain recorded no failure.
    ///
    /// An absent value is reported as an error even when no predicate
    /// asked for it.
    fn get_value(self) -> Result<Self::Value, ValidationError> {
        if let Some(error) = self.core().failures().snapshot().error() {
            return Err(error);
        }
        let core = self.into_core();
        let error = core.missing_value_error();
        core.value.or_throw(|| error)
    }

    /// Returns the value, or `default` if the chain failed or the value is
    /// absent.
    fn get_value_or(self, default: Self::Value) -> Self::Value {
        if self.validation_failed() {
            return default;
        }
        self.into_core().value.or(default)
    }

    /// Returns the value, `None` for an absent value, or the chain's error.
    fn get_optional_value(self) -> Result<Option<Self::Value>, ValidationError> {
        if let Some(error) = self.core().failures().snapshot().error() {
            return Err(error);
        }
        let core = self.into_core();
        match core.value {
            ValidationTarget::Valid(value) => Ok(Some(value)),
            ValidationTarget::Null => Ok(None),
            ValidationTarget::Invalid => Err(core.missing_value_error()),
        }
    }
}

// ============================================================================
// EQUALITY
// ============================================================================

/// Equality predicates.
///
/// Expected values may be of any type the value can be compared with, so a
/// `String` validator accepts `&str`.
pub trait EqualityValidator: Validator {
    /// Requires the value to equal `expected`.
    fn is_equal_to<E>(self, expected: E) -> Self
    where
        Self::Value: PartialEq<E>,
        E: fmt::Debug + 'static,
    {
        equal_to(self, &expected, None)
    }

    /// Requires the value to equal the value named `name`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or contains whitespace.
    fn is_equal_to_named<E>(self, expected: E, name: &str) -> Self
    where
        Self::Value: PartialEq<E>,
        E: fmt::Debug + 'static,
    {
        check_name(name, "name");
        equal_to(self, &expected, Some(name))
    }

    /// Requires the value to differ from `unwanted`.
    fn is_not_equal_to<E>(self, unwanted: E) -> Self
    where
        Self::Value: PartialEq<E>,
        E: fmt::Debug + 'static,
    {
        not_equal_to(self, &unwanted, None)
    }

    /// Requires the value to differ from the value named `name`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or contains whitespace.
    fn is_not_equal_to_named<E>(self, unwanted: E, name: &str) -> Self
    where
        Self::Value: PartialEq<E>,
        E: fmt::Debug + 'static,
    {
        check_name(name, "name");
        not_equal_to(self, &unwanted, Some(name))
    }

    /// Requires the value to equal one of `candidates`.
    fn is_one_of<E>(self, candidates: &[E]) -> Self
    where
        Self::Value: PartialEq<E>,
        E: fmt::Debug + 'static,
    {
        self.check(
            |value| candidates.iter().any(|candidate| *value == *candidate),
            |validator| message::object::is_one_of(validator, &render_list(validator, candidates)),
        )
    }

    /// Requires the value to differ from every one of `candidates`.
    fn is_not_one_of<E>(self, candidates: &[E]) -> Self
    where
        Self::Value: PartialEq<E>,
        E: fmt::Debug + 'static,
    {
        self.check(
            |value| !candidates.iter().any(|candidate| *value == *candidate),
            |validator| {
                message::object::is_not_one_of(validator, &render_list(validator, candidates))
            },
        )
    }
}

fn render_list<V: Validator, E: fmt::Debug + 'static>(validator: &V, items: &[E]) -> String {
    let mappers = validator.core().configuration().string_mappers();
    crate::mappers::StringMappers::join("[", items.iter().map(|item| mappers.to_string(item)), "]")
}

fn equal_to<V, E>(validator: V, expected: &E, name: Option<&str>) -> V
where
    V: Validator,
    V::Value: PartialEq<E>,
    E: fmt::Debug + 'static,
{
    validator.check(
        |value| *value == *expected,
        |validator| {
            let rendered = validator.core().configuration().string_mappers().to_string(expected);
            let elements = validator
                .core()
                .value()
                .value()
                .and_then(|value| validator.render_elements(value))
                .zip(validator.render_expected_elements(expected));
            message::object::is_equal_to(validator, &rendered, name, elements)
        },
    )
}

fn not_equal_to<V, E>(validator: V, unwanted: &E, name: Option<&str>) -> V
where
    V: Validator,
    V::Value: PartialEq<E>,
    E: fmt::Debug + 'static,
{
    validator.check(
        |value| *value != *unwanted,
        |validator| {
            let rendered = validator.core().configuration().string_mappers().to_string(unwanted);
            message::object::is_not_equal_to(validator, &rendered, name)
        },
    )
}

// ============================================================================
// COMPARISON
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relation {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl Relation {
    fn holds<T: PartialOrd>(self, value: &T, bound: &T) -> bool {
        match self {
            Self::Less => value < bound,
            Self::LessOrEqual => value <= bound,
            Self::Greater => value > bound,
            Self::GreaterOrEqual => value >= bound,
        }
    }

    const fn phrase(self) -> &'static str {
        match self {
            Self::Less => "less than",
            Self::LessOrEqual => "less than or equal to",
            Self::Greater => "greater than",
            Self::GreaterOrEqual => "greater than or equal to",
        }
    }
}

/// Ordering predicates.
pub trait ComparableValidator: Validator<Value: PartialOrd> {
    /// Requires the value to be less than `bound`.
    fn is_less_than(self, bound: Self::Value) -> Self {
        compare(self, Relation::Less, bound, None)
    }

    /// Requires the value to be less than the value named `name`.
    fn is_less_than_named(self, bound: Self::Value, name: &str) -> Self {
        check_name(name, "name");
        compare(self, Relation::Less, bound, Some(name))
    }

    /// Requires the value to be less than or equal to `bound`.
    fn is_less_than_or_equal_to(self, bound: Self::Value) -> Self {
        compare(self, Relation::LessOrEqual, bound, None)
    }

    /// Requires the value to be less than or equal to the value named `name`.
    fn is_less_than_or_equal_to_named(self, bound: Self::Value, name: &str) -> Self {
        check_name(name, "name");
        compare(self, Relation::LessOrEqual, bound, Some(name))
    }

    /// Requires the value to be greater than `bound`.
    fn is_greater_than(self, bound: Self::Value) -> Self {
        compare(self, Relation::Greater, bound, None)
    }

    /// Requires the value to be greater than the value named `name`.
    fn is_greater_than_named(self, bound: Self::Value, name: &str) -> Self {
        check_name(name, "name");
        compare(self, Relation::Greater, bound, Some(name))
    }

    /// Requires the value to be greater than or equal to `bound`.
    fn is_greater_than_or_equal_to(self, bound: Self::Value) -> Self {
        compare(self, Relation::GreaterOrEqual, bound, None)
    }

    /// Requires the value to be greater than or equal to the value named
    /// `name`.
    fn is_greater_than_or_equal_to_named(self, bound: Self::Value, name: &str) -> Self {
        check_name(name, "name");
        compare(self, Relation::GreaterOrEqual, bound, Some(name))
    }

    /// Requires `low <= value < high`.
    ///
    /// # Panics
    ///
    /// Panics if `high < low`.
    fn is_between(self, low: Self::Value, high: Self::Value) -> Self {
        between(self, low, high, false)
    }

    /// Requires `low <= value <= high`.
    ///
    /// # Panics
    ///
    /// Panics if `high < low`.
    fn is_between_closed(self, low: Self::Value, high: Self::Value) -> Self {
        between(self, low, high, true)
    }
}

fn compare<V>(validator: V, relation: Relation, bound: V::Value, name: Option<&str>) -> V
where
    V: Validator<Value: PartialOrd>,
{
    validator.check(
        |value| relation.holds(value, &bound),
        |validator| {
            message::object::comparison(validator, relation.phrase(), &validator.render(&bound), name)
        },
    )
}

fn between<V>(validator: V, low: V::Value, high: V::Value, closed: bool) -> V
where
    V: Validator<Value: PartialOrd>,
{
    assert!(
        high.partial_cmp(&low) != Some(Ordering::Less),
        "high may not be less than low"
    );
    validator.check(
        |value| {
            let upper = if closed {
                Relation::LessOrEqual
            } else {
                Relation::Less
            };
            Relation::GreaterOrEqual.holds(value, &low) && upper.holds(value, &high)
        },
        |validator| {
            message::object::is_between(
                validator,
                &validator.render(&low),
                &validator.render(&high),
                closed,
            )
        },
    )
}

// ============================================================================
// VALIDATABLE
// ============================================================================

/// Maps a Rust type onto the validator that checks it.
///
/// Implemented for strings, booleans, numbers, `Vec`, sets, maps, `char`
/// and `Option<T>`. Other types opt in with
/// [`validatable_object!`](crate::validatable_object).
pub trait Validatable: Sized {
    /// The type of the value under test.
    type Value;

    /// The validator for this type.
    type Validator: Validator<Value = Self::Value>;

    /// Wraps the value for validation.
    fn into_target(self) -> ValidationTarget<Self::Value>;

    /// Creates the validator around `core`.
    fn validator(core: ValidatorCore<Self::Value>) -> Self::Validator;
}

impl<T: Validatable> Validatable for Option<T> {
    type Value = T::Value;
    type Validator = T::Validator;

    fn into_target(self) -> ValidationTarget<Self::Value> {
        match self {
            Some(value) => value.into_target(),
            None => ValidationTarget::Null,
        }
    }

    fn validator(core: ValidatorCore<Self::Value>) -> Self::Validator {
        T::validator(core)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds a validator the way the factory does.
    pub(crate) fn validator<V: Validatable>(
        value: V,
        name: &str,
        configuration: &Configuration,
    ) -> V::Validator {
        let core = ValidatorCore::new(
            name,
            value.into_target(),
            configuration.clone(),
            IndexMap::new(),
            FailureCollector::new(),
        );
        V::validator(core)
    }

    pub(crate) fn check<V: Validatable>(value: V, name: &str) -> V::Validator {
        validator(value, name, &Configuration::default().with_throw_on_failure(false))
    }

    pub(crate) fn require<V: Validatable>(value: V, name: &str) -> V::Validator {
        validator(value, name, &Configuration::default())
    }

    #[test]
    #[should_panic(expected = "name may not be empty")]
    fn test_empty_name_panics() {
        let _ = require(1_i32, "");
    }

    #[test]
    #[should_panic(expected = "name may not contain whitespace")]
    fn test_whitespace_name_panics() {
        let _ = require(1_i32, "my value");
    }

    #[test]
    fn test_null_records_nullity_before_each_failed_predicate() {
        let failures = check(None::<i32>, "actual")
            .is_greater_than(0)
            .is_less_than(10)
            .else_get_failures();
        let kinds: Vec<ErrorKind> = failures.failures().iter().map(ValidationFailure::kind).collect();
        assert_eq!(
            kinds,
            vec![ErrorKind::Type, ErrorKind::Range, ErrorKind::Type, ErrorKind::Range]
        );
        assert_eq!(
            failures.messages(),
            vec![
                "\"actual\" may not be null",
                "\"actual\" must be greater than 0",
                "\"actual\" may not be null",
                "\"actual\" must be less than 10",
            ]
        );
    }

    #[test]
    fn test_null_stops_a_require_chain_at_the_nullity_failure() {
        let failures = require(None::<i32>, "actual")
            .is_greater_than(0)
            .is_less_than(10)
            .else_get_failures();
        assert_eq!(failures.messages(), vec!["\"actual\" may not be null"]);
        assert_eq!(failures.failures()[0].kind(), ErrorKind::Type);
    }

    #[test]
    fn test_null_failures_add_up_across_predicates() {
        fn alone(chain: impl FnOnce(NumberValidator<i32>) -> NumberValidator<i32>) -> usize {
            chain(check(None::<i32>, "x")).else_get_failures().len()
        }
        let first = alone(|v| v.is_greater_than(0));
        let second = alone(|v| v.is_less_than(-5));
        let combined = check(None::<i32>, "x")
            .is_greater_than(0)
            .is_less_than(-5)
            .else_get_failures()
            .len();
        assert_eq!(combined, first + second);
    }

    #[test]
    fn test_require_mode_stops_after_first_failure() {
        let failures = require(5_i32, "actual")
            .is_greater_than(10)
            .is_negative()
            .else_get_failures();
        assert_eq!(failures.len(), 1);
    }

    #[test]
    fn test_check_mode_accumulates() {
        let failures = check(5_i32, "actual")
            .is_greater_than(10)
            .is_negative()
            .else_get_failures();
        assert_eq!(failures.len(), 2);
    }

    #[test]
    fn test_is_null_and_is_not_null() {
        assert!(!check(None::<i32>, "x").is_null().validation_failed());
        assert!(check(Some(1_i32), "x").is_null().validation_failed());
        assert!(check(None::<i32>, "x").is_not_null().validation_failed());
        assert!(!check(Some(1_i32), "x").is_not_null().validation_failed());
    }

    #[test]
    fn test_get_value_variants() {
        assert_eq!(require(3_i32, "x").is_positive().get_value().ok(), Some(3));
        assert_eq!(require(-3_i32, "x").is_positive().get_value_or(7), 7);

        let missing = require(None::<i32>, "x").get_value().unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::Type);
        assert_eq!(require(None::<i32>, "x").get_optional_value().ok(), Some(None));
        assert_eq!(require(Some(2_i32), "x").get_optional_value().ok(), Some(Some(2)));
    }

    #[test]
    fn test_context_is_rendered_after_value() {
        let messages = check(5_i32, "actual")
            .with_context("orders", "table")
            .is_greater_than(10)
            .else_get_messages();
        assert_eq!(
            messages,
            vec!["\"actual\" must be greater than 10.\nactual: 5\ntable : \"orders\""]
        );
    }

    #[test]
    fn test_remove_context() {
        let messages = check(5_i32, "actual")
            .with_context(1, "attempt")
            .remove_context("attempt")
            .is_negative()
            .else_get_messages();
        assert_eq!(messages, vec!["\"actual\" must be negative.\nactual: 5"]);
    }

    #[test]
    #[should_panic(expected = "high may not be less than low")]
    fn test_between_rejects_inverted_bounds() {
        let _ = check(1_i32, "x").is_between(5, 0);
    }
}
