//! Messages of size validators
//!
//! Sizes are described in terms of the collection they measure:
//! `"actual" must contain at least 3 characters.` rather than
//! `actual.length() must be greater than or equal to 3.`

use super::{quote_name, with_actual};
use crate::validator::SizeValidator;

/// `<parent> <phrase>.` with the size as context.
pub(crate) fn size_constraint(validator: &SizeValidator, phrase: &str) -> String {
    let message = format!("{} {phrase}.", quote_name(validator.parent_name()));
    with_actual(validator, message).to_string()
}

/// `<parent> must contain <relation> <count> <unit>.`
pub(crate) fn contains_count(validator: &SizeValidator, relation: &str, count: usize) -> String {
    let described = validator.pluralizer().describe(count);
    size_constraint(validator, &format!("must contain {relation} {described}"))
}

pub(crate) fn does_not_contain_count(validator: &SizeValidator, count: usize) -> String {
    let described = validator.pluralizer().describe(count);
    size_constraint(validator, &format!("may not contain exactly {described}"))
}

pub(crate) fn contains_between(
    validator: &SizeValidator,
    low: usize,
    high: usize,
    closed: bool,
) -> String {
    let upper = if closed { "inclusive" } else { "exclusive" };
    let unit = validator.pluralizer().name_of(high);
    size_constraint(
        validator,
        &format!("must contain between {low} (inclusive) and {high} ({upper}) {unit}"),
    )
}
