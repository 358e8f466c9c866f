use std::any::Any;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use super::collection::{CollectionValidator, SetRelation, check_relation, duplicates};
use super::{EqualityValidator, SetValidator, SizeValidator, Validatable, Validator, ValidatorCore};
use crate::mappers::StringMappers;
use crate::message::{self, Pluralizer};
use crate::target::ValidationTarget;

/// Validates a `Vec`.
///
/// Collection operations ignore order and duplicates: `contains_exactly`
/// compares the distinct elements of both sides.
#[derive(Debug)]
#[must_use = "validators record failures that must be checked"]
pub struct ArrayValidator<E> {
    core: ValidatorCore<Vec<E>>,
    pluralizer: Pluralizer,
}

impl<E> ArrayValidator<E> {
    pub(crate) const fn new(core: ValidatorCore<Vec<E>>, pluralizer: Pluralizer) -> Self {
        Self { core, pluralizer }
    }
}

impl<E: fmt::Debug + 'static> ArrayValidator<E> {
    fn render_element(&self, element: &E) -> String {
        self.core.configuration().string_mappers().to_string(element)
    }

    fn render_all<'a>(&self, elements: impl IntoIterator<Item = &'a E>) -> String {
        StringMappers::join(
            "[",
            elements.into_iter().map(|element| self.render_element(element)),
            "]",
        )
    }
}

impl<E: fmt::Debug + PartialEq + 'static> ArrayValidator<E> {
    /// Requires the array to be empty.
    pub fn is_empty(self) -> Self {
        self.check(Vec::is_empty, message::collection::is_empty)
    }

    /// Requires the array to have at least one element.
    pub fn is_not_empty(self) -> Self {
        self.check(|value| !value.is_empty(), message::collection::is_not_empty)
    }

    /// Requires the array to contain `element`.
    pub fn contains(self, element: &E) -> Self {
        self.check(
            |value| value.contains(element),
            |validator| message::collection::contains(validator, &validator.render_element(element)),
        )
    }

    /// Requires the array not to contain `element`.
    pub fn does_not_contain(self, element: &E) -> Self {
        self.check(
            |value| !value.contains(element),
            |validator| {
                message::collection::does_not_contain(validator, &validator.render_element(element))
            },
        )
    }

    /// Requires the array to hold exactly the elements of `expected`.
    pub fn contains_exactly(self, expected: &[E]) -> Self {
        check_relation(self, expected, SetRelation::Exactly)
    }

    /// Requires the array to differ from `unwanted` by at least one element.
    pub fn does_not_contain_exactly(self, unwanted: &[E]) -> Self {
        check_relation(self, unwanted, SetRelation::NotExactly)
    }

    /// Requires the array to contain at least one element of `expected`.
    pub fn contains_any(self, expected: &[E]) -> Self {
        check_relation(self, expected, SetRelation::Any)
    }

    /// Requires the array to contain no element of `unwanted`.
    pub fn does_not_contain_any(self, unwanted: &[E]) -> Self {
        check_relation(self, unwanted, SetRelation::NotAny)
    }

    /// Requires the array to contain every element of `expected`.
    pub fn contains_all(self, expected: &[E]) -> Self {
        check_relation(self, expected, SetRelation::All)
    }

    /// Requires at least one element of `unwanted` to be absent.
    ///
    /// An array holding only some of `unwanted` passes.
    pub fn does_not_contain_all(self, unwanted: &[E]) -> Self {
        check_relation(self, unwanted, SetRelation::NotAll)
    }

    /// Requires every element to occur once.
    pub fn does_not_contain_duplicates(self) -> Self {
        self.check(
            |value| duplicates(value).is_empty(),
            |validator| {
                let rendered: Vec<String> = validator
                    .core
                    .value()
                    .value()
                    .map(|value| {
                        duplicates(value)
                            .into_iter()
                            .map(|element| validator.render_element(element))
                            .collect()
                    })
                    .unwrap_or_default();
                message::collection::does_not_contain_duplicates(validator, &rendered)
            },
        )
    }

    /// Validates the number of elements.
    pub fn length(self) -> SizeValidator {
        let parent_value = self.actual_repr();
        let parent_name = self.core.name().to_owned();
        let pluralizer = self.pluralizer;
        let core = self.core.derive("length", parent_value, |value| value.len());
        SizeValidator::new(core, parent_name, pluralizer)
    }
}

impl<E: fmt::Debug + PartialOrd + 'static> ArrayValidator<E> {
    /// Requires the elements to be in ascending order.
    pub fn is_sorted(self) -> Self {
        self.check(
            |value| value.is_sorted(),
            |validator| {
                let sorted = validator
                    .core
                    .value()
                    .value()
                    .map(|value| {
                        let mut sorted: Vec<&E> = value.iter().collect();
                        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
                        validator.render_all(sorted)
                    })
                    .unwrap_or_default();
                message::collection::is_sorted(validator, &sorted)
            },
        )
    }
}

impl<E: fmt::Debug + Eq + Hash + 'static> ArrayValidator<E> {
    /// Validates the distinct elements as a set.
    pub fn as_set(self) -> SetValidator<HashSet<E>> {
        let parent_value = self.actual_repr();
        let core = self
            .core
            .derive("as_set", parent_value, |value| value.into_iter().collect());
        SetValidator::new(core, self.pluralizer)
    }
}

impl<E: fmt::Debug + 'static> Validator for ArrayValidator<E> {
    type Value = Vec<E>;

    fn core(&self) -> &ValidatorCore<Vec<E>> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ValidatorCore<Vec<E>> {
        &mut self.core
    }

    fn into_core(self) -> ValidatorCore<Vec<E>> {
        self.core
    }

    fn render(&self, value: &Vec<E>) -> String {
        self.render_all(value)
    }

    fn render_elements(&self, value: &Vec<E>) -> Option<Vec<String>> {
        Some(value.iter().map(|element| self.render_element(element)).collect())
    }

    fn render_expected_elements(&self, expected: &dyn Any) -> Option<Vec<String>> {
        let expected = expected.downcast_ref::<Vec<E>>()?;
        self.render_elements(expected)
    }
}

impl<E: fmt::Debug + 'static> EqualityValidator for ArrayValidator<E> {}

impl<E: fmt::Debug + PartialEq + 'static> CollectionValidator for ArrayValidator<E> {
    type Element = E;

    fn elements(value: &Vec<E>) -> Vec<&E> {
        value.iter().collect()
    }

    fn render_elements_of(&self, elements: &[&E]) -> String {
        self.render_all(elements.iter().copied())
    }
}

impl<E: fmt::Debug + 'static> Validatable for Vec<E> {
    type Value = Self;
    type Validator = ArrayValidator<E>;

    fn into_target(self) -> ValidationTarget<Self> {
        ValidationTarget::Valid(self)
    }

    fn validator(core: ValidatorCore<Self>) -> ArrayValidator<E> {
        ArrayValidator::new(core, Pluralizer::Element)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::Configuration;
    use crate::validator::tests::{check, validator};

    #[test]
    fn test_contains_exactly_ignores_order_and_duplicates() {
        assert!(!check(vec![3, 1, 2, 1], "ids")
            .contains_exactly(&[1, 2, 3])
            .validation_failed());
    }

    #[test]
    fn test_contains_exactly_lists_missing_and_unwanted() {
        assert_eq!(
            check(vec![1, 2], "ids").contains_exactly(&[2, 3]).else_get_messages(),
            vec!["\"ids\" must contain exactly [2, 3].\nids     : [1, 2]\nmissing : [3]\nunwanted: [1]"]
        );
    }

    #[test]
    fn test_does_not_contain_all_passes_with_a_partial_match() {
        assert!(!check(vec![1, 2], "ids")
            .does_not_contain_all(&[2, 3])
            .validation_failed());
        assert!(check(vec![1, 2, 3], "ids")
            .does_not_contain_all(&[2, 3])
            .validation_failed());
        assert!(!check(vec![1], "ids").does_not_contain_all(&[]).validation_failed());
    }

    #[test]
    fn test_any_and_not_any_are_exclusive() {
        let expected = [5, 6];
        for actual in [vec![1, 5], vec![1, 2], vec![]] {
            let any = check(actual.clone(), "ids").contains_any(&expected).validation_failed();
            let none = check(actual, "ids")
                .does_not_contain_any(&expected)
                .validation_failed();
            assert_ne!(any, none);
        }
    }

    #[test]
    fn test_duplicates_are_listed() {
        assert_eq!(
            check(vec!["a", "b", "a"], "tags")
                .does_not_contain_duplicates()
                .else_get_messages(),
            vec![
                "\"tags\" may not contain any duplicate elements.\ntags      : [\"a\", \"b\", \"a\"]\nduplicates: [\"a\"]"
            ]
        );
    }

    #[test]
    fn test_is_sorted_shows_expected_order() {
        assert_eq!(
            check(vec![3, 1, 2], "ranks").is_sorted().else_get_messages(),
            vec!["\"ranks\" must be sorted.\nranks   : [3, 1, 2]\nexpected: [1, 2, 3]"]
        );
        assert!(!check(Vec::<i32>::new(), "ranks").is_sorted().validation_failed());
    }

    #[test]
    fn test_length_uses_element_plural() {
        assert_eq!(
            check(vec![1], "ids").length().is_not_equal_to(1).else_get_messages(),
            vec!["\"ids\" may not contain exactly 1 element.\nids.length(): 1\nids         : [1]"]
        );
    }

    #[test]
    fn test_as_set_drops_duplicates() {
        assert!(!check(vec![1, 1, 2], "ids")
            .as_set()
            .size()
            .is_equal_to(2)
            .validation_failed());
    }

    #[test]
    fn test_long_arrays_are_diffed_per_element() {
        let configuration = Configuration::default().with_throw_on_failure(false);
        let messages = validator(vec!["alpha", "beta"], "names", &configuration)
            .is_equal_to(vec!["alpha", "gamma"])
            .else_get_messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("\"names\" had an unexpected value.\n\n"));
        assert!(messages[0].contains("names[1]"));
        assert!(messages[0].contains("Refers to the index of a collection element"));
    }

    #[test]
    fn test_surplus_elements_are_listed_without_a_counterpart() {
        let configuration = Configuration::default().with_throw_on_failure(false);
        let messages = validator(vec!["alpha", "beta", "gamma"], "names", &configuration)
            .is_equal_to(vec!["alpha", "beta"])
            .else_get_messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("names[2]   : \"gamma\""));
        assert!(!messages[0].contains("expected[2]"));
        assert!(!messages[0].contains("diff[2]"));
    }
}
