use regex::Regex;

use super::{EqualityValidator, SizeValidator, Validatable, Validator, ValidatorCore};
use crate::message::{self, Pluralizer};
use crate::target::ValidationTarget;

/// Validates a `String` or `&str`.
#[derive(Debug)]
#[must_use = "validators record failures that must be checked"]
pub struct StringValidator<S> {
    core: ValidatorCore<S>,
}

impl<S: AsRef<str>> StringValidator<S> {
    fn quoted(&self, text: &str) -> String {
        self.core.configuration().string_mappers().str_to_string(text)
    }

    /// Requires the string to be empty.
    pub fn is_empty(self) -> Self {
        self.check(|value| value.as_ref().is_empty(), message::collection::is_empty)
    }

    /// Requires the string to have at least one character.
    pub fn is_not_empty(self) -> Self {
        self.check(|value| !value.as_ref().is_empty(), message::collection::is_not_empty)
    }

    /// Requires the string to be empty or whitespace.
    pub fn is_blank(self) -> Self {
        self.check(|value| value.as_ref().trim().is_empty(), message::string::is_blank)
    }

    /// Requires the string to contain a non-whitespace character.
    pub fn is_not_blank(self) -> Self {
        self.check(|value| !value.as_ref().trim().is_empty(), message::string::is_not_blank)
    }

    /// Requires the string to have no leading or trailing whitespace.
    pub fn is_trimmed(self) -> Self {
        self.check(
            |value| value.as_ref().trim().len() == value.as_ref().len(),
            message::string::is_trimmed,
        )
    }

    /// Requires the string to start with `prefix`.
    pub fn starts_with(self, prefix: &str) -> Self {
        self.check(
            |value| value.as_ref().starts_with(prefix),
            |validator| message::string::starts_with(validator, &validator.quoted(prefix)),
        )
    }

    /// Requires the string not to start with `prefix`.
    pub fn does_not_start_with(self, prefix: &str) -> Self {
        self.check(
            |value| !value.as_ref().starts_with(prefix),
            |validator| message::string::does_not_start_with(validator, &validator.quoted(prefix)),
        )
    }

    /// Requires the string to end with `suffix`.
    pub fn ends_with(self, suffix: &str) -> Self {
        self.check(
            |value| value.as_ref().ends_with(suffix),
            |validator| message::string::ends_with(validator, &validator.quoted(suffix)),
        )
    }

    /// Requires the string not to end with `suffix`.
    pub fn does_not_end_with(self, suffix: &str) -> Self {
        self.check(
            |value| !value.as_ref().ends_with(suffix),
            |validator| message::string::does_not_end_with(validator, &validator.quoted(suffix)),
        )
    }

    /// Requires the string to contain `part`.
    pub fn contains(self, part: &str) -> Self {
        self.check(
            |value| value.as_ref().contains(part),
            |validator| message::string::contains(validator, &validator.quoted(part)),
        )
    }

    /// Requires the string not to contain `part`.
    pub fn does_not_contain(self, part: &str) -> Self {
        self.check(
            |value| !value.as_ref().contains(part),
            |validator| message::string::does_not_contain(validator, &validator.quoted(part)),
        )
    }

    /// Requires the string to contain no whitespace at all.
    pub fn does_not_contain_whitespace(self) -> Self {
        self.check(
            |value| !value.as_ref().chars().any(char::is_whitespace),
            message::string::does_not_contain_whitespace,
        )
    }

    /// Requires `pattern` to match somewhere in the string.
    ///
    /// Anchor the pattern with `^` and `$` to match the whole string.
    pub fn matches(self, pattern: &Regex) -> Self {
        self.check(
            |value| pattern.is_match(value.as_ref()),
            |validator| message::string::matches(validator, &validator.quoted(pattern.as_str())),
        )
    }

    /// Validates the number of characters in the string.
    pub fn length(self) -> SizeValidator {
        let parent_value = self.actual_repr();
        let parent_name = self.core.name().to_owned();
        let core = self
            .core
            .derive("length", parent_value, |value| value.as_ref().chars().count());
        SizeValidator::new(core, parent_name, Pluralizer::Character)
    }

    /// Validates the string without leading and trailing whitespace.
    pub fn trim(self) -> StringValidator<String> {
        let parent_value = self.actual_repr();
        StringValidator {
            core: self
                .core
                .derive("trim", parent_value, |value| value.as_ref().trim().to_owned()),
        }
    }
}

impl<S: AsRef<str>> Validator for StringValidator<S> {
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
        self.quoted(value.as_ref())
    }
}

impl<S: AsRef<str>> EqualityValidator for StringValidator<S> {}

impl Validatable for String {
    type Value = Self;
    type Validator = StringValidator<Self>;

    fn into_target(self) -> ValidationTarget<Self> {
        ValidationTarget::Valid(self)
    }

    fn validator(core: ValidatorCore<Self>) -> StringValidator<Self> {
        StringValidator { core }
    }
}

impl<'a> Validatable for &'a str {
    type Value = &'a str;
    type Validator = StringValidator<&'a str>;

    fn into_target(self) -> ValidationTarget<&'a str> {
        ValidationTarget::Valid(self)
    }

    fn validator(core: ValidatorCore<&'a str>) -> StringValidator<&'a str> {
        StringValidator { core }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::error::ErrorKind;
    use crate::validator::tests::{check, require};

    #[rstest]
    #[case("", true)]
    #[case("  \t", true)]
    #[case(" x ", false)]
    fn test_is_blank(#[case] value: &str, #[case] blank: bool) {
        assert_eq!(check(value, "s").is_blank().validation_failed(), !blank);
        assert_eq!(check(value, "s").is_not_blank().validation_failed(), blank);
    }

    #[test]
    fn test_prefix_message_quotes_both_sides() {
        assert_eq!(
            check("hello", "greeting").starts_with("bye").else_get_messages(),
            vec!["\"greeting\" must start with \"bye\".\ngreeting: \"hello\""]
        );
    }

    #[test]
    fn test_is_trimmed() {
        assert!(!check("a b", "s").is_trimmed().validation_failed());
        assert!(check(" a", "s").is_trimmed().validation_failed());
        assert!(check("a\n", "s").is_trimmed().validation_failed());
    }

    #[test]
    fn test_matches() {
        let pattern = Regex::new(r"^[a-z]+-\d+$").unwrap();
        assert!(!check("build-42", "tag").matches(&pattern).validation_failed());
        assert_eq!(
            check("build", "tag").matches(&pattern).else_get_messages(),
            vec!["\"tag\" must match the pattern \"^[a-z]+-\\d+$\".\ntag: \"build\""]
        );
    }

    #[test]
    fn test_length_is_counted_in_characters() {
        assert!(!check("héllo", "word").length().is_equal_to(5).validation_failed());
    }

    #[test]
    fn test_length_message_names_the_string() {
        assert_eq!(
            check("ab", "code")
                .length()
                .is_greater_than_or_equal_to(3)
                .else_get_messages(),
            vec![
                "\"code\" must contain at least 3 characters.\ncode.length(): 2\ncode         : \"ab\""
            ]
        );
    }

    #[test]
    fn test_length_between_uses_plural_of_upper_bound() {
        assert_eq!(
            check("abc", "code")
                .length()
                .is_between(0, 1)
                .else_get_messages(),
            vec![
                "\"code\" must contain between 0 (inclusive) and 1 (exclusive) character.\ncode.length(): 3\ncode         : \"abc\""
            ]
        );
    }

    #[test]
    fn test_trim_derives_a_named_validator() {
        let failures = check("  x  ", "input")
            .trim()
            .is_equal_to("y")
            .else_get_messages();
        assert_eq!(
            failures,
            vec!["input.trim() must be equal to \"y\".\ninput.trim(): \"x\"\ninput       : \"  x  \""]
        );
    }

    #[test]
    fn test_failures_flow_from_derived_validators() {
        let validator = check("", "name").is_not_empty();
        let failures = validator.length().is_positive().else_get_failures();
        assert_eq!(failures.len(), 2);
    }

    #[test]
    fn test_length_of_absent_string() {
        let error = require(None::<String>, "name")
            .length()
            .is_positive()
            .else_throw()
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Type);
        assert_eq!(error.to_string(), "\"name\" may not be null");
    }

    #[test]
    fn test_string_equals_str() {
        assert!(!check(String::from("abc"), "s").is_equal_to("abc").validation_failed());
        assert!(check("abc", "s").is_not_equal_to(String::from("abc")).validation_failed());
    }
}
