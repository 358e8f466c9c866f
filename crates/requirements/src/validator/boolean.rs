use super::{EqualityValidator, Validatable, Validator, ValidatorCore};
use crate::message;
use crate::target::ValidationTarget;

/// Validates a `bool`.
#[derive(Debug)]
#[must_use = "validators record failures that must be checked"]
pub struct BooleanValidator {
    core: ValidatorCore<bool>,
}

impl BooleanValidator {
    /// Requires the value to be `true`.
    pub fn is_true(self) -> Self {
        self.check(|value| *value, message::number::is_true)
    }

    /// Requires the value to be `false`.
    pub fn is_false(self) -> Self {
        self.check(|value| !*value, message::number::is_false)
    }
}

impl Validator for BooleanValidator {
    type Value = bool;

    fn core(&self) -> &ValidatorCore<bool> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ValidatorCore<bool> {
        &mut self.core
    }

    fn into_core(self) -> ValidatorCore<bool> {
        self.core
    }

    fn render(&self, value: &bool) -> String {
        value.to_string()
    }
}

impl EqualityValidator for BooleanValidator {}

impl Validatable for bool {
    type Value = Self;
    type Validator = BooleanValidator;

    fn into_target(self) -> ValidationTarget<Self> {
        ValidationTarget::Valid(self)
    }

    fn validator(core: ValidatorCore<Self>) -> BooleanValidator {
        BooleanValidator { core }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::validator::tests::check;

    #[test]
    fn test_is_true() {
        assert!(!check(true, "flag").is_true().validation_failed());
        assert_eq!(
            check(false, "flag").is_true().else_get_messages(),
            vec!["\"flag\" must be true.\nflag: false"]
        );
    }

    #[test]
    fn test_is_false() {
        assert!(!check(false, "flag").is_false().validation_failed());
        assert!(check(true, "flag").is_false().validation_failed());
    }

    #[test]
    fn test_absent_boolean() {
        assert_eq!(
            check(None::<bool>, "flag").is_true().else_get_messages(),
            vec!["\"flag\" may not be null", "\"flag\" must be true"]
        );
    }
}
