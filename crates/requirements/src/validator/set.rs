use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::hash::{BuildHasher, Hash};

use super::collection::{CollectionValidator, SetRelation, check_relation};
use super::{EqualityValidator, SizeValidator, Validatable, Validator, ValidatorCore};
use crate::mappers::StringMappers;
use crate::message::{self, Pluralizer};
use crate::target::ValidationTarget;

/// Set types understood by [`SetValidator`].
pub trait SetCollection {
    /// The element type.
    type Element;

    /// Returns the number of elements.
    fn size(&self) -> usize;

    /// Returns the elements in iteration order.
    fn elements(&self) -> Vec<&Self::Element>;

    /// Returns `true` if the set holds `element`.
    fn contains_element(&self, element: &Self::Element) -> bool;
}

impl<E: Eq + Hash, H: BuildHasher> SetCollection for HashSet<E, H> {
    type Element = E;

    fn size(&self) -> usize {
        self.len()
    }

    fn elements(&self) -> Vec<&E> {
        self.iter().collect()
    }

    fn contains_element(&self, element: &E) -> bool {
        self.contains(element)
    }
}

impl<E: Ord> SetCollection for BTreeSet<E> {
    type Element = E;

    fn size(&self) -> usize {
        self.len()
    }

    fn elements(&self) -> Vec<&E> {
        self.iter().collect()
    }

    fn contains_element(&self, element: &E) -> bool {
        self.contains(element)
    }
}

/// Validates a `HashSet` or `BTreeSet`.
#[derive(Debug)]
#[must_use = "validators record failures that must be checked"]
pub struct SetValidator<S> {
    core: ValidatorCore<S>,
    pluralizer: Pluralizer,
}

impl<S> SetValidator<S> {
    pub(crate) const fn new(core: ValidatorCore<S>, pluralizer: Pluralizer) -> Self {
        Self { core, pluralizer }
    }
}

impl<S> SetValidator<S>
where
    S: SetCollection,
    S::Element: fmt::Debug + PartialEq + 'static,
{
    fn render_element(&self, element: &S::Element) -> String {
        self.core.configuration().string_mappers().to_string(element)
    }

    /// Requires the set to be empty.
    pub fn is_empty(self) -> Self {
        self.check(|value| value.size() == 0, message::collection::is_empty)
    }

    /// Requires the set to have at least one element.
    pub fn is_not_empty(self) -> Self {
        self.check(|value| value.size() != 0, message::collection::is_not_empty)
    }

    /// Requires the set to contain `element`.
    pub fn contains(self, element: &S::Element) -> Self {
        self.check(
            |value| value.contains_element(element),
            |validator| message::collection::contains(validator, &validator.render_element(element)),
        )
    }

    /// Requires the set not to contain `element`.
    pub fn does_not_contain(self, element: &S::Element) -> Self {
        self.check(
            |value| !value.contains_element(element),
            |validator| {
                message::collection::does_not_contain(validator, &validator.render_element(element))
            },
        )
    }

    /// Requires the set to hold exactly the elements of `expected`.
    pub fn contains_exactly(self, expected: &[S::Element]) -> Self {
        check_relation(self, expected, SetRelation::Exactly)
    }

    /// Requires the set to contain at least one element of `expected`.
    pub fn contains_any(self, expected: &[S::Element]) -> Self {
        check_relation(self, expected, SetRelation::Any)
    }

    /// Requires the set to contain no element of `unwanted`.
    pub fn does_not_contain_any(self, unwanted: &[S::Element]) -> Self {
        check_relation(self, unwanted, SetRelation::NotAny)
    }

    /// Requires the set to contain every element of `expected`.
    pub fn contains_all(self, expected: &[S::Element]) -> Self {
        check_relation(self, expected, SetRelation::All)
    }

    /// Requires at least one element of `unwanted` to be absent.
    pub fn does_not_contain_all(self, unwanted: &[S::Element]) -> Self {
        check_relation(self, unwanted, SetRelation::NotAll)
    }

    /// Validates the number of elements.
    pub fn size(self) -> SizeValidator {
        let parent_value = self.actual_repr();
        let parent_name = self.core.name().to_owned();
        let pluralizer = self.pluralizer;
        let core = self.core.derive("size", parent_value, |value| value.size());
        SizeValidator::new(core, parent_name, pluralizer)
    }
}

impl<S> Validator for SetValidator<S>
where
    S: SetCollection,
    S::Element: fmt::Debug + 'static,
{
    type Value = S;

    fn core(&self) -> &ValidatorCore<S> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ValidatorCore<S> {
        &mut self.core
    }

    fn into_core(self) -> ValidatorCore<S> {
        self.core
    }

    fn render(&self, value: &S) -> String {
        let mappers = self.core.configuration().string_mappers();
        StringMappers::join(
            "{",
            value
                .elements()
                .into_iter()
                .map(|element| mappers.to_string(element)),
            "}",
        )
    }
}

impl<S> EqualityValidator for SetValidator<S>
where
    S: SetCollection,
    S::Element: fmt::Debug + 'static,
{
}

impl<S> CollectionValidator for SetValidator<S>
where
    S: SetCollection,
    S::Element: fmt::Debug + PartialEq + 'static,
{
    type Element = S::Element;

    fn elements(value: &S) -> Vec<&S::Element> {
        value.elements()
    }

    fn render_elements_of(&self, elements: &[&S::Element]) -> String {
        StringMappers::join(
            "[",
            elements.iter().map(|element| self.render_element(element)),
            "]",
        )
    }
}

impl<E, H> Validatable for HashSet<E, H>
where
    E: Eq + Hash + fmt::Debug + 'static,
    H: BuildHasher,
{
    type Value = Self;
    type Validator = SetValidator<Self>;

    fn into_target(self) -> ValidationTarget<Self> {
        ValidationTarget::Valid(self)
    }

    fn validator(core: ValidatorCore<Self>) -> SetValidator<Self> {
        SetValidator::new(core, Pluralizer::Element)
    }
}

impl<E: Ord + fmt::Debug + 'static> Validatable for BTreeSet<E> {
    type Value = Self;
    type Validator = SetValidator<Self>;

    fn into_target(self) -> ValidationTarget<Self> {
        ValidationTarget::Valid(self)
    }

    fn validator(core: ValidatorCore<Self>) -> SetValidator<Self> {
        SetValidator::new(core, Pluralizer::Element)
    }
}
