use std::fmt;

use super::{ComparableValidator, EqualityValidator, Validator, ValidatorCore};

/// Validates any value through its `Debug` rendering or a registered
/// string mapper.
///
/// Types opt in with [`validatable_object!`](crate::validatable_object).
/// Ordering predicates are available when the type is `PartialOrd`.
#[derive(Debug)]
#[must_use = "validators record failures that must be checked"]
pub struct ObjectValidator<T> {
    core: ValidatorCore<T>,
}

impl<T> ObjectValidator<T> {
    #[doc(hidden)]
    pub const fn new(core: ValidatorCore<T>) -> Self {
        Self { core }
    }
}

impl<T: fmt::Debug + 'static> Validator for ObjectValidator<T> {
    type Value = T;

    fn core(&self) -> &ValidatorCore<T> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ValidatorCore<T> {
        &mut self.core
    }

    fn into_core(self) -> ValidatorCore<T> {
        self.core
    }

    fn render(&self, value: &T) -> String {
        self.core.configuration().string_mappers().to_string(value)
    }
}

impl<T: fmt::Debug + 'static> EqualityValidator for ObjectValidator<T> {}

impl<T: fmt::Debug + PartialOrd + 'static> ComparableValidator for ObjectValidator<T> {}

crate::validatable_object!(char);
