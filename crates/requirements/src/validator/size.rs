use super::{Validator, ValidatorCore};
use crate::message::{self, Pluralizer};

/// Validates the length of a string or the size of a collection.
///
/// Failures are phrased in terms of the collection, so that
/// `require_that("ab", "code").length().is_greater_than_or_equal_to(3)`
/// reports `"code" must contain at least 3 characters.`
#[derive(Debug)]
#[must_use = "validators record failures that must be checked"]
pub struct SizeValidator {
    core: ValidatorCore<usize>,
    parent_name: String,
    pluralizer: Pluralizer,
}

impl SizeValidator {
    pub(crate) const fn new(
        core: ValidatorCore<usize>,
        parent_name: String,
        pluralizer: Pluralizer,
    ) -> Self {
        Self {
            core,
            parent_name,
            pluralizer,
        }
    }

    /// Returns the name of the measured collection.
    pub fn parent_name(&self) -> &str {
        &self.parent_name
    }

    /// Returns the word used for the collection's elements.
    pub const fn pluralizer(&self) -> Pluralizer {
        self.pluralizer
    }

    /// Requires exactly `expected` elements.
    pub fn is_equal_to(self, expected: usize) -> Self {
        self.check(
            |size| *size == expected,
            |validator| message::size::contains_count(validator, "exactly", expected),
        )
    }

    /// Requires any number of elements other than `unwanted`.
    pub fn is_not_equal_to(self, unwanted: usize) -> Self {
        self.check(
            |size| *size != unwanted,
            |validator| message::size::does_not_contain_count(validator, unwanted),
        )
    }

    /// Requires fewer than `bound` elements.
    pub fn is_less_than(self, bound: usize) -> Self {
        self.check(
            |size| *size < bound,
            |validator| message::size::contains_count(validator, "less than", bound),
        )
    }

    /// Requires at most `bound` elements.
    pub fn is_less_than_or_equal_to(self, bound: usize) -> Self {
        self.check(
            |size| *size <= bound,
            |validator| message::size::contains_count(validator, "at most", bound),
        )
    }

    /// Requires more than `bound` elements.
    pub fn is_greater_than(self, bound: usize) -> Self {
        self.check(
            |size| *size > bound,
            |validator| message::size::contains_count(validator, "more than", bound),
        )
    }

    /// Requires at least `bound` elements.
    pub fn is_greater_than_or_equal_to(self, bound: usize) -> Self {
        self.check(
            |size| *size >= bound,
            |validator| message::size::contains_count(validator, "at least", bound),
        )
    }

    /// Requires `low <= size < high`.
    ///
    /// # Panics
    ///
    /// Panics if `high < low`.
    pub fn is_between(self, low: usize, high: usize) -> Self {
        self.between(low, high, false)
    }

    /// Requires `low <= size <= high`.
    ///
    /// # Panics
    ///
    /// Panics if `high < low`.
    pub fn is_between_closed(self, low: usize, high: usize) -> Self {
        self.between(low, high, true)
    }

    /// Requires no elements.
    pub fn is_zero(self) -> Self {
        self.check(
            |size| *size == 0,
            |validator| message::size::size_constraint(validator, "must be empty"),
        )
    }

    /// Requires at least one element.
    pub fn is_positive(self) -> Self {
        self.check(
            |size| *size > 0,
            |validator| message::size::size_constraint(validator, "may not be empty"),
        )
    }

    fn between(self, low: usize, high: usize, closed: bool) -> Self {
        assert!(high >= low, "high may not be less than low");
        self.check(
            |size| *size >= low && (*size < high || (closed && *size == high)),
            |validator| message::size::contains_between(validator, low, high, closed),
        )
    }
}

impl Validator for SizeValidator {
    type Value = usize;

    fn core(&self) -> &ValidatorCore<usize> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ValidatorCore<usize> {
        &mut self.core
    }

    fn into_core(self) -> ValidatorCore<usize> {
        self.core
    }

    fn render(&self, value: &usize) -> String {
        value.to_string()
    }
}
