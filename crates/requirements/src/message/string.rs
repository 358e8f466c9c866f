//! Messages of string validators

use super::constraint_with;
use crate::validator::Validator;

phrases! {
    is_blank => "must be blank";
    is_not_blank => "may not be blank";
    is_trimmed => "may not contain leading or trailing whitespace";
    does_not_contain_whitespace => "may not contain whitespace";
}

pub(crate) fn starts_with<V: Validator>(validator: &V, prefix: &str) -> String {
    constraint_with(validator, "must start with", prefix)
}

pub(crate) fn does_not_start_with<V: Validator>(validator: &V, prefix: &str) -> String {
    constraint_with(validator, "may not start with", prefix)
}

pub(crate) fn ends_with<V: Validator>(validator: &V, suffix: &str) -> String {
    constraint_with(validator, "must end with", suffix)
}

pub(crate) fn does_not_end_with<V: Validator>(validator: &V, suffix: &str) -> String {
    constraint_with(validator, "may not end with", suffix)
}

pub(crate) fn contains<V: Validator>(validator: &V, part: &str) -> String {
    constraint_with(validator, "must contain", part)
}

pub(crate) fn does_not_contain<V: Validator>(validator: &V, part: &str) -> String {
    constraint_with(validator, "may not contain", part)
}

pub(crate) fn matches<V: Validator>(validator: &V, pattern: &str) -> String {
    constraint_with(validator, "must match the pattern", pattern)
}
