//! Messages shared by every validator

use super::{constraint, quote_name, with_actual};
use crate::validator::{Validator, ValidatorCore};

pub(crate) fn may_not_be_null<T>(core: &ValidatorCore<T>) -> String {
    core.message(format!("{} may not be null.", quote_name(core.name())))
        .to_string()
}

pub(crate) fn is_null<V: Validator>(validator: &V) -> String {
    constraint(validator, "must be null")
}

/// `N must be equal to V.`, switching to a diff for long values.
///
/// `elements` carries the rendered elements of both sides when the values
/// are lists, so that the diff can be computed per element.
pub(crate) fn is_equal_to<V: Validator>(
    validator: &V,
    expected: &str,
    expected_name: Option<&str>,
    elements: Option<(Vec<String>, Vec<String>)>,
) -> String {
    let name = validator.name();
    let actual = validator.actual_repr();
    let builder = validator.core().message(match expected_name {
        Some(expected_name) => format!(
            "{} must be equal to {}.",
            quote_name(name),
            quote_name(expected_name)
        ),
        None => format!("{} must be equal to {expected}.", quote_name(name)),
    });
    let generator = builder.context_generator();

    let diff = match &actual {
        Some(actual) if generator.should_diff(actual, expected) => {
            let expected_label = expected_name.unwrap_or("expected");
            Some(match elements {
                Some((actual_elements, expected_elements)) => generator.element_diff(
                    name,
                    &actual_elements,
                    expected_label,
                    &expected_elements,
                ),
                None => generator.value_diff(name, actual, expected_label, expected),
            })
        }
        _ => None,
    };

    match diff {
        Some(diff) if expected_name.is_none() => validator
            .core()
            .message(format!("{} had an unexpected value.", quote_name(name)))
            .with_diff(diff)
            .to_string(),
        Some(diff) => builder.with_diff(diff).to_string(),
        None => {
            let mut builder = builder;
            if let Some(actual) = actual {
                builder = builder.with_context(name, actual);
            }
            if let Some(expected_name) = expected_name {
                builder = builder.with_context(expected_name, expected);
            }
            builder.to_string()
        }
    }
}

pub(crate) fn is_not_equal_to<V: Validator>(
    validator: &V,
    unwanted: &str,
    unwanted_name: Option<&str>,
) -> String {
    let name = quote_name(validator.name());
    match unwanted_name {
        Some(unwanted_name) => with_actual(
            validator,
            format!("{name} may not be equal to {}.", quote_name(unwanted_name)),
        )
        .with_context(unwanted_name, unwanted)
        .to_string(),
        None => with_actual(validator, format!("{name} may not be equal to {unwanted}.")).to_string(),
    }
}

pub(crate) fn is_one_of<V: Validator>(validator: &V, candidates: &str) -> String {
    super::constraint_with(validator, "must be one of", candidates)
}

pub(crate) fn is_not_one_of<V: Validator>(validator: &V, candidates: &str) -> String {
    super::constraint_with(validator, "may not be one of", candidates)
}

/// `N must be <relation> B.`, naming the bound when it has a name.
pub(crate) fn comparison<V: Validator>(
    validator: &V,
    relation: &str,
    bound: &str,
    bound_name: Option<&str>,
) -> String {
    let name = quote_name(validator.name());
    match bound_name {
        Some(bound_name) => with_actual(
            validator,
            format!("{name} must be {relation} {}.", quote_name(bound_name)),
        )
        .with_context(bound_name, bound)
        .to_string(),
        None => with_actual(validator, format!("{name} must be {relation} {bound}.")).to_string(),
    }
}

pub(crate) fn is_between<V: Validator>(validator: &V, low: &str, high: &str, closed: bool) -> String {
    let upper = if closed { "inclusive" } else { "exclusive" };
    let message = format!(
        "{} must be between {low} (inclusive) and {high} ({upper}).",
        quote_name(validator.name())
    );
    with_actual(validator, message).to_string()
}
