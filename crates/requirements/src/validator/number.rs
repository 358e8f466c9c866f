use std::cmp::Ordering;
use std::fmt;

use super::{ComparableValidator, EqualityValidator, Validatable, Validator, ValidatorCore};
use crate::message;
use crate::target::ValidationTarget;

/// Numeric types understood by [`NumberValidator`].
pub trait Number: Copy + PartialOrd + fmt::Debug + fmt::Display + 'static {
    /// The additive identity.
    const ZERO: Self;

    /// Returns `true` if the value has no fractional part.
    fn is_whole(self) -> bool;

    /// Returns `true` unless the value is infinite or NaN.
    fn is_finite_number(self) -> bool;

    /// Returns `true` if the value is NaN.
    fn is_not_a_number(self) -> bool;

    /// Returns `true` if `factor` divides the value without remainder.
    fn is_divisible_by(self, factor: Self) -> bool;
}

macro_rules! integers {
    ($($t:ty),+) => {
        $(
            impl Number for $t {
                const ZERO: Self = 0;

                fn is_whole(self) -> bool {
                    true
                }

                fn is_finite_number(self) -> bool {
                    true
                }

                fn is_not_a_number(self) -> bool {
                    false
                }

                fn is_divisible_by(self, factor: Self) -> bool {
                    factor != 0 && self.checked_rem(factor).is_none_or(|remainder| remainder == 0)
                }
            }
        )+
        validatable_numbers!($($t),+);
    };
}

macro_rules! floats {
    ($($t:ty),+) => {
        $(
            impl Number for $t {
                const ZERO: Self = 0.0;

                fn is_whole(self) -> bool {
                    self.is_finite() && self.fract() == 0.0
                }

                fn is_finite_number(self) -> bool {
                    self.is_finite()
                }

                fn is_not_a_number(self) -> bool {
                    self.is_nan()
                }

                fn is_divisible_by(self, factor: Self) -> bool {
                    factor != 0.0 && self.is_finite() && (self % factor) == 0.0
                }
            }
        )+
        validatable_numbers!($($t),+);
    };
}

macro_rules! validatable_numbers {
    ($($t:ty),+) => {
        $(
            impl Validatable for $t {
                type Value = Self;
                type Validator = NumberValidator<Self>;

                fn into_target(self) -> ValidationTarget<Self> {
                    ValidationTarget::Valid(self)
                }

                fn validator(core: ValidatorCore<Self>) -> NumberValidator<Self> {
                    NumberValidator { core }
                }
            }
        )+
    };
}

integers!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
floats!(f32, f64);

// ============================================================================
// NUMBER VALIDATOR
// ============================================================================

/// Validates a primitive number.
#[derive(Debug)]
#[must_use = "validators record failures that must be checked"]
pub struct NumberValidator<N> {
    core: ValidatorCore<N>,
}

impl<N: Number> NumberValidator<N> {
    /// Requires the value to be less than zero.
    pub fn is_negative(self) -> Self {
        self.check(|value| *value < N::ZERO, message::number::is_negative)
    }

    /// Requires the value to be zero or more. NaN is rejected.
    pub fn is_not_negative(self) -> Self {
        self.check(
            |value| value.partial_cmp(&N::ZERO).is_some_and(Ordering::is_ge),
            message::number::is_not_negative,
        )
    }

    /// Requires the value to be zero.
    pub fn is_zero(self) -> Self {
        self.check(|value| *value == N::ZERO, message::number::is_zero)
    }

    /// Requires the value to differ from zero.
    pub fn is_not_zero(self) -> Self {
        self.check(|value| *value != N::ZERO, message::number::is_not_zero)
    }

    /// Requires the value to be greater than zero.
    pub fn is_positive(self) -> Self {
        self.check(|value| *value > N::ZERO, message::number::is_positive)
    }

    /// Requires the value to be zero or less. NaN is rejected.
    pub fn is_not_positive(self) -> Self {
        self.check(
            |value| value.partial_cmp(&N::ZERO).is_some_and(Ordering::is_le),
            message::number::is_not_positive,
        )
    }

    /// Requires the value to be a multiple of `factor`.
    ///
    /// Nothing is a multiple of zero.
    pub fn is_multiple_of(self, factor: N) -> Self {
        self.check(
            |value| value.is_divisible_by(factor),
            |validator| message::number::is_multiple_of(validator, &validator.render(&factor)),
        )
    }

    /// Requires the value not to be a multiple of `factor`.
    pub fn is_not_multiple_of(self, factor: N) -> Self {
        self.check(
            |value| !value.is_divisible_by(factor),
            |validator| message::number::is_not_multiple_of(validator, &validator.render(&factor)),
        )
    }

    /// Requires the value to have no fractional part.
    pub fn is_whole_number(self) -> Self {
        self.check(|value| value.is_whole(), message::number::is_whole_number)
    }

    /// Requires the value to have a fractional part.
    pub fn is_not_whole_number(self) -> Self {
        self.check(|value| !value.is_whole(), message::number::is_not_whole_number)
    }

    /// Requires the value to be neither infinite nor NaN.
    pub fn is_finite(self) -> Self {
        self.check(|value| value.is_finite_number(), message::number::is_finite)
    }

    /// Requires the value to be infinite.
    pub fn is_infinite(self) -> Self {
        self.check(
            |value| !value.is_finite_number() && !value.is_not_a_number(),
            message::number::is_infinite,
        )
    }

    /// Requires the value to be NaN.
    pub fn is_nan(self) -> Self {
        self.check(|value| value.is_not_a_number(), message::number::is_nan)
    }

    /// Requires the value not to be NaN.
    pub fn is_not_nan(self) -> Self {
        self.check(|value| !value.is_not_a_number(), message::number::is_not_nan)
    }
}

impl<N: Number> Validator for NumberValidator<N> {
    type Value = N;

    fn core(&self) -> &ValidatorCore<N> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ValidatorCore<N> {
        &mut self.core
    }

    fn into_core(self) -> ValidatorCore<N> {
        self.core
    }

    fn render(&self, value: &N) -> String {
        let mappers = self.core.configuration().string_mappers();
        if mappers.contains::<N>() {
            mappers.to_string(value)
        } else {
            value.to_string()
        }
    }
}

impl<N: Number> EqualityValidator for NumberValidator<N> {}

impl<N: Number> ComparableValidator for NumberValidator<N> {}
