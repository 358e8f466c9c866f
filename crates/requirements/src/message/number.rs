//! Messages of number and boolean validators

use super::constraint_with;
use crate::validator::Validator;

phrases! {
    is_negative => "must be negative";
    is_not_negative => "may not be negative";
    is_zero => "must be zero";
    is_not_zero => "may not be zero";
    is_positive => "must be positive";
    is_not_positive => "may not be positive";
    is_whole_number => "must be a whole number";
    is_not_whole_number => "may not be a whole number";
    is_finite => "must be finite";
    is_infinite => "must be infinite";
    is_nan => "must be NaN";
    is_not_nan => "may not be NaN";
    is_true => "must be true";
    is_false => "must be false";
}

pub(crate) fn is_multiple_of<V: Validator>(validator: &V, factor: &str) -> String {
    constraint_with(validator, "must be a multiple of", factor)
}

pub(crate) fn is_not_multiple_of<V: Validator>(validator: &V, factor: &str) -> String {
    constraint_with(validator, "may not be a multiple of", factor)
}
