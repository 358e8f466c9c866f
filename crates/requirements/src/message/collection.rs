//! Messages of string, array, set and map validators

use super::{constraint_with, quote_name, with_actual};
use crate::validator::Validator;

phrases! {
    is_empty => "must be empty";
    is_not_empty => "may not be empty";
}

pub(crate) fn contains<V: Validator>(validator: &V, element: &str) -> String {
    constraint_with(validator, "must contain", element)
}

pub(crate) fn does_not_contain<V: Validator>(validator: &V, element: &str) -> String {
    constraint_with(validator, "may not contain", element)
}

/// A context line that is only shown when its list is not empty.
pub(crate) struct Listing<'a> {
    key: &'static str,
    elements: &'a [String],
}

impl<'a> Listing<'a> {
    pub(crate) const fn new(key: &'static str, elements: &'a [String]) -> Self {
        Self { key, elements }
    }

    fn render(&self) -> Option<String> {
        if self.elements.is_empty() {
            return None;
        }
        Some(format!("[{}]", self.elements.join(", ")))
    }
}

/// `N <phrase> V.` with the value and any non-empty listings as context.
pub(crate) fn set_relation<V: Validator>(
    validator: &V,
    phrase: &str,
    expected: &str,
    listings: &[Listing<'_>],
) -> String {
    let message = format!("{} {phrase} {expected}.", quote_name(validator.name()));
    with_listings(validator, message, listings)
}

pub(crate) fn does_not_contain_duplicates<V: Validator>(validator: &V, duplicates: &[String]) -> String {
    let message = format!(
        "{} may not contain any duplicate elements.",
        quote_name(validator.name())
    );
    with_listings(validator, message, &[Listing::new("duplicates", duplicates)])
}

pub(crate) fn is_sorted<V: Validator>(validator: &V, sorted: &str) -> String {
    let message = format!("{} must be sorted.", quote_name(validator.name()));
    with_actual(validator, message)
        .with_context("expected", sorted)
        .to_string()
}

fn with_listings<V: Validator>(validator: &V, message: String, listings: &[Listing<'_>]) -> String {
    let mut builder = with_actual(validator, message);
    for listing in listings {
        if let Some(rendered) = listing.render() {
            builder = builder.with_context(listing.key, rendered);
        }
    }
    builder.to_string()
}
