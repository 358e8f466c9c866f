//! Configuration updates and user types.

use nebula_requirements::prelude::*;
use nebula_requirements::{TerminalEncoding, ValidationError};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[derive(Debug, Clone, PartialEq, PartialOrd)]
struct Version(u32, u32);

#[derive(Debug, PartialEq)]
enum Tier {
    Free,
    Paid,
}

nebula_requirements::validatable_object!(Version, Tier);

fn validators() -> Validators {
    Validators::with_configuration(Configuration::default())
}

// ============================================================================
// UPDATER
// ============================================================================

#[test]
fn test_updater_applies_changes_on_close() -> Result<(), ValidationError> {
    let mut factory = validators();
    let mut updater = factory.update_configuration();
    updater.allow_diff(false)?.diff_threshold(3)?;
    assert!(!updater.is_closed());
    updater.close();
    assert!(updater.is_closed());
    drop(updater);

    assert!(!factory.configuration().allow_diff());
    assert_eq!(factory.configuration().diff_threshold(), 3);
    Ok(())
}

#[test]
fn test_closed_updater_rejects_changes() {
    let mut factory = validators();
    let mut updater = factory.update_configuration();
    updater.close();
    updater.close();

    let error = updater.allow_diff(false).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::IllegalState);
    assert_eq!(error.to_string(), "the configuration updater is closed");
}

#[test]
fn test_dropped_updater_applies_changes() {
    let mut factory = validators();
    {
        let mut updater = factory.update_configuration();
        updater
            .terminal_encoding(TerminalEncoding::Xterm256Colors)
            .unwrap();
    }
    assert_eq!(
        factory.configuration().terminal_encoding(),
        TerminalEncoding::Xterm256Colors
    );
}

#[test]
fn test_updates_do_not_leak_into_copies() {
    let mut factory = validators();
    let copy = factory.copy();
    factory.update_configuration_with(|configuration| {
        configuration.allow_diff(false);
    });
    assert!(!factory.configuration().allow_diff());
    assert!(copy.configuration().allow_diff());
}

#[rstest]
#[case(9, true)]
#[case(10, false)]
fn test_diff_threshold_decides_between_diff_and_listing(
    #[case] threshold: usize,
    #[case] diffed: bool,
) {
    let mut factory = validators();
    factory.update_configuration_with(|configuration| {
        configuration.diff_threshold(threshold);
    });
    // Quoted, both values are nine characters long.
    let messages = factory
        .check_if("abcdefg", "actual")
        .is_equal_to("abcdefh")
        .else_get_messages();
    assert_eq!(messages[0].contains("diff"), diffed);
}

// ============================================================================
// ERROR TRANSFORMER
// ============================================================================

#[test]
fn test_error_transformer_rewrites_errors() {
    let mut factory = validators();
    factory.update_configuration_with(|configuration| {
        configuration.error_transformer(|error| {
            ValidationError::illegal_state(format!("rejected: {error}"))
        });
    });
    let error = factory
        .require_that(0_i32, "count")
        .is_positive()
        .else_throw()
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::IllegalState);
    assert_eq!(error.to_string(), "rejected: \"count\" must be positive.\ncount: 0");
}

#[test]
fn test_assertions_compose_with_the_transformer() {
    let mut factory = validators().with_assertions_enabled(true);
    factory.update_configuration_with(|configuration| {
        configuration.error_transformer(|error| {
            ValidationError::range(format!("rejected: {error}"))
        });
    });
    let error = factory
        .assert_that(|v| v.require_that(0_i32, "count").is_positive())
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Assertion);
    assert!(error.to_string().starts_with("rejected: "));
}

#[test]
fn test_disabled_assertions_return_nothing() {
    let factory = validators().with_assertions_enabled(false);
    let value = factory
        .assert_that_and_return(|v| v.require_that(0_i32, "count").is_positive())
        .unwrap();
    assert_eq!(value, None);
}

// ============================================================================
// USER TYPES
// ============================================================================

#[test]
fn test_user_types_are_compared() {
    let failures = validators()
        .check_if(Version(1, 1), "version")
        .is_greater_than_or_equal_to(Version(1, 2))
        .is_not_equal_to(Version(1, 1))
        .else_get_messages();
    assert_eq!(
        failures,
        vec![
            "\"version\" must be greater than or equal to Version(1, 2).\nversion: Version(1, 1)",
            "\"version\" may not be equal to Version(1, 1).\nversion: Version(1, 1)",
        ]
    );
}

#[test]
fn test_user_types_support_membership() {
    let tier = validators()
        .require_that(Tier::Paid, "tier")
        .is_one_of(&[Tier::Free, Tier::Paid])
        .get_value()
        .unwrap();
    assert_eq!(tier, Tier::Paid);
}

#[test]
fn test_user_types_render_through_mappers() {
    let mut factory = validators();
    factory.update_configuration_with(|configuration| {
        configuration.string_mappers(
            nebula_requirements::StringMappers::default()
                .with_mapper(|version: &Version, _| format!("v{}.{}", version.0, version.1)),
        );
    });
    assert_eq!(
        factory
            .check_if(Version(2, 0), "version")
            .is_less_than(Version(1, 9))
            .else_get_messages(),
        vec!["\"version\" must be less than v1.9.\nversion: v2.0"]
    );
}
