//! Set arithmetic over element lists
//!
//! Elements only need `PartialEq`, so the arithmetic is quadratic. Both
//! sides are deduplicated first, which gives lists set semantics.

use std::fmt;

use super::Validator;
use crate::mappers::StringMappers;
use crate::message::{self, collection::Listing};

/// Distinct elements of `elements`, in first-seen order.
pub(crate) fn distinct<'a, E: PartialEq + 'a>(elements: impl IntoIterator<Item = &'a E>) -> Vec<&'a E> {
    let mut seen: Vec<&E> = Vec::new();
    for element in elements {
        if !seen.contains(&element) {
            seen.push(element);
        }
    }
    seen
}

/// Elements that occur more than once, each listed once.
pub(crate) fn duplicates<E: PartialEq>(elements: &[E]) -> Vec<&E> {
    let mut seen: Vec<&E> = Vec::new();
    let mut duplicates: Vec<&E> = Vec::new();
    for element in elements {
        if seen.contains(&element) {
            if !duplicates.contains(&element) {
                duplicates.push(element);
            }
        } else {
            seen.push(element);
        }
    }
    duplicates
}

/// How the distinct elements of two collections overlap.
#[derive(Debug)]
pub(crate) struct Difference<'a, E> {
    pub(crate) common: Vec<&'a E>,
    pub(crate) only_in_actual: Vec<&'a E>,
    pub(crate) only_in_expected: Vec<&'a E>,
}

impl<'a, E: PartialEq> Difference<'a, E> {
    pub(crate) fn of(actual: impl IntoIterator<Item = &'a E>, expected: &'a [E]) -> Self {
        let actual = distinct(actual);
        let expected = distinct(expected);
        let (common, only_in_actual): (Vec<&E>, Vec<&E>) = actual
            .iter()
            .copied()
            .partition(|element| expected.contains(element));
        let only_in_expected = expected
            .into_iter()
            .filter(|element| !actual.contains(element))
            .collect();
        Self {
            common,
            only_in_actual,
            only_in_expected,
        }
    }

    /// Both sides hold the same elements.
    pub(crate) fn is_exact(&self) -> bool {
        self.only_in_actual.is_empty() && self.only_in_expected.is_empty()
    }

    /// The actual side holds at least one expected element.
    pub(crate) fn has_any(&self) -> bool {
        !self.common.is_empty()
    }

    /// The actual side holds every expected element.
    pub(crate) fn has_all(&self) -> bool {
        self.only_in_expected.is_empty()
    }

    /// The actual side holds every element of a non-empty expected side.
    pub(crate) fn has_all_of_nonempty(&self) -> bool {
        self.has_all() && !self.common.is_empty()
    }
}

impl<E: fmt::Debug + 'static> Difference<'_, E> {
    pub(crate) fn rendered(&self, mappers: &StringMappers) -> RenderedDifference {
        let render = |elements: &[&E]| -> Vec<String> {
            elements
                .iter()
                .map(|element| mappers.to_string(*element))
                .collect()
        };
        RenderedDifference {
            common: render(&self.common),
            only_in_actual: render(&self.only_in_actual),
            only_in_expected: render(&self.only_in_expected),
        }
    }
}

/// A [`Difference`] rendered for a failure message.
#[derive(Debug, Default)]
pub(crate) struct RenderedDifference {
    pub(crate) common: Vec<String>,
    pub(crate) only_in_actual: Vec<String>,
    pub(crate) only_in_expected: Vec<String>,
}

// ============================================================================
// SET RELATIONS
// ============================================================================

/// Validators whose value is a collection of elements.
pub(crate) trait CollectionValidator: Validator {
    type Element: fmt::Debug + PartialEq + 'static;

    fn elements(value: &Self::Value) -> Vec<&Self::Element>;

    fn render_elements_of(&self, elements: &[&Self::Element]) -> String;
}

/// A relation between the value's elements and an expected list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SetRelation {
    Exactly,
    NotExactly,
    Any,
    NotAny,
    All,
    NotAll,
}

impl SetRelation {
    fn holds<E: PartialEq>(self, difference: &Difference<'_, E>) -> bool {
        match self {
            Self::Exactly => difference.is_exact(),
            Self::NotExactly => !difference.is_exact(),
            Self::Any => difference.has_any(),
            Self::NotAny => !difference.has_any(),
            Self::All => difference.has_all(),
            Self::NotAll => !difference.has_all_of_nonempty(),
        }
    }

    const fn phrase(self) -> &'static str {
        match self {
            Self::Exactly => "must contain exactly",
            Self::NotExactly => "may not contain exactly",
            Self::Any => "must contain any of",
            Self::NotAny => "may not contain any of",
            Self::All => "must contain all of",
            Self::NotAll => "may not contain all of",
        }
    }

    fn listings(self, rendered: &RenderedDifference) -> Vec<Listing<'_>> {
        match self {
            Self::Exactly => vec![
                Listing::new("missing", &rendered.only_in_expected),
                Listing::new("unwanted", &rendered.only_in_actual),
            ],
            Self::All => vec![Listing::new("missing", &rendered.only_in_expected)],
            Self::NotAny | Self::NotAll => vec![Listing::new("unwanted", &rendered.common)],
            Self::NotExactly | Self::Any => Vec::new(),
        }
    }
}

/// Records a failure unless the value's elements stand in `relation` to
/// `expected`.
pub(crate) fn check_relation<V: CollectionValidator>(
    validator: V,
    expected: &[V::Element],
    relation: SetRelation,
) -> V {
    validator.check(
        |value| relation.holds(&Difference::of(V::elements(value), expected)),
        |validator| {
            let mappers = validator.core().configuration().string_mappers();
            let rendered = validator
                .core()
                .value()
                .value()
                .map(|value| Difference::of(V::elements(value), expected).rendered(mappers))
                .unwrap_or_default();
            let expected: Vec<&V::Element> = expected.iter().collect();
            message::collection::set_relation(
                validator,
                relation.phrase(),
                &validator.render_elements_of(&expected),
                &relation.listings(&rendered),
            )
        },
    )
}
