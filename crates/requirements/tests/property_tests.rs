//! Property-based tests for nebula-requirements.

use nebula_requirements::diff::{DiffGenerator, EditKind, myers};
use nebula_requirements::prelude::*;
use nebula_requirements::TerminalEncoding;
use nebula_requirements::validator::NumberValidator;
use proptest::prelude::*;

fn validators() -> Validators {
    Validators::with_configuration(Configuration::default())
}

fn passes<V: Validator>(validator: V) -> bool {
    !validator.validation_failed()
}

// ============================================================================
// SET LAWS: exactly == all both ways, any and not-any are exclusive
// ============================================================================

proptest! {
    #[test]
    fn exactly_iff_all_both_ways(
        actual in prop::collection::vec(0u8..5, 0..6),
        expected in prop::collection::vec(0u8..5, 0..6),
    ) {
        let factory = validators();
        let exactly = passes(factory.check_if(actual.clone(), "actual").contains_exactly(&expected));
        let forward = passes(factory.check_if(actual.clone(), "actual").contains_all(&expected));
        let backward = passes(factory.check_if(expected.clone(), "expected").contains_all(&actual));
        prop_assert_eq!(exactly, forward && backward);
    }

    #[test]
    fn any_and_not_any_are_exclusive(
        actual in prop::collection::vec(0u8..5, 0..6),
        expected in prop::collection::vec(0u8..5, 0..6),
    ) {
        let factory = validators();
        let any = passes(factory.check_if(actual.clone(), "actual").contains_any(&expected));
        let none = passes(factory.check_if(actual, "actual").does_not_contain_any(&expected));
        prop_assert_ne!(any, none);
    }

    #[test]
    fn not_exactly_negates_exactly(
        actual in prop::collection::vec(0u8..5, 0..6),
        expected in prop::collection::vec(0u8..5, 0..6),
    ) {
        let factory = validators();
        let exactly = passes(factory.check_if(actual.clone(), "actual").contains_exactly(&expected));
        let not_exactly =
            passes(factory.check_if(actual, "actual").does_not_contain_exactly(&expected));
        prop_assert_ne!(exactly, not_exactly);
    }
}

// ============================================================================
// AGGREGATION: check mode records every failure, require mode only the first
// ============================================================================

proptest! {
    #[test]
    fn sign_checks_fail_twice(n in any::<i32>()) {
        let factory = validators();
        let checked = factory
            .check_if(n, "n")
            .is_positive()
            .is_negative()
            .is_zero()
            .else_get_failures();
        prop_assert_eq!(checked.len(), 2);

        let required = factory
            .require_that(n, "n")
            .is_positive()
            .is_negative()
            .is_zero()
            .else_get_failures();
        prop_assert_eq!(required.len(), 1);
    }

    #[test]
    fn failures_add_up_for_present_and_absent_values(
        n in prop::option::of(any::<i32>()),
        bound in any::<i32>(),
    ) {
        let factory = validators();
        let alone = |chain: &dyn Fn(NumberValidator<i32>) -> NumberValidator<i32>| {
            chain(factory.check_if(n, "n")).else_get_failures().len()
        };
        let greater = alone(&|v| v.is_greater_than(bound));
        let negative = alone(&|v| v.is_negative());
        let combined = factory
            .check_if(n, "n")
            .is_greater_than(bound)
            .is_negative()
            .else_get_failures()
            .len();
        prop_assert_eq!(combined, greater + negative);
    }

    #[test]
    fn null_stops_a_require_chain(bound in any::<i32>()) {
        let failures = validators()
            .require_that(None::<i32>, "n")
            .is_greater_than(bound)
            .is_negative()
            .else_get_failures();
        prop_assert_eq!(failures.len(), 1);
        prop_assert_eq!(failures.failures()[0].kind(), ErrorKind::Type);
    }

    #[test]
    fn length_matches_character_count(s in ".{0,20}", n in 0usize..25) {
        let holds = s.chars().count() == n;
        let checked = passes(validators().check_if(s.as_str(), "s").length().is_equal_to(n));
        prop_assert_eq!(checked, holds);
    }
}

// ============================================================================
// BOUNDS: is_between is half-open, is_between_closed is closed
// ============================================================================

proptest! {
    #[test]
    fn between_bounds(value in -50i64..50, low in -50i64..50, width in 0i64..30) {
        let high = low + width;
        let factory = validators();
        let open = passes(factory.check_if(value, "value").is_between(low, high));
        let closed = passes(factory.check_if(value, "value").is_between_closed(low, high));
        prop_assert_eq!(open, low <= value && value < high);
        prop_assert_eq!(closed, low <= value && value <= high);
    }
}

// ============================================================================
// DIFF: the edit script and the rows reproduce both values
// ============================================================================

proptest! {
    #[test]
    fn edit_script_reproduces_both_values(actual in ".{0,20}", expected in ".{0,20}") {
        let edits = myers::edit_script(&actual, &expected);
        let side = |skip: EditKind| {
            edits
                .iter()
                .filter(|edit| edit.kind != skip)
                .map(|edit| edit.text.as_str())
                .collect::<String>()
        };
        prop_assert_eq!(side(EditKind::Insert), actual);
        prop_assert_eq!(side(EditKind::Delete), expected);
    }

    #[test]
    fn diff_rows_reproduce_both_values(actual in "[a-d]{0,12}", expected in "[a-d]{0,12}") {
        let equal = actual == expected;
        let result = DiffGenerator::new(TerminalEncoding::None).diff(&actual, &expected);
        prop_assert_eq!(result.len(), 1);

        let actual_row: Vec<char> = result.actual_lines[0].chars().collect();
        let expected_row: Vec<char> = result.expected_lines[0].chars().collect();
        let diff_row: Vec<char> = result.diff_lines[0].chars().collect();
        let columns = actual_row.len().max(expected_row.len());

        let mut rebuilt_actual = String::new();
        let mut rebuilt_expected = String::new();
        for column in 0..columns {
            let marker = diff_row.get(column).copied().unwrap_or(' ');
            if marker != '+' {
                rebuilt_actual.extend(actual_row.get(column));
            }
            if marker != '-' {
                rebuilt_expected.extend(expected_row.get(column));
            }
        }
        prop_assert_eq!(rebuilt_actual, actual);
        prop_assert_eq!(rebuilt_expected, expected);
        prop_assert_eq!(result.is_equal(), equal);
    }
}
