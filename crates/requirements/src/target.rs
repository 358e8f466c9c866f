//! The value a validator inspects
//!
//! [`ValidationTarget`] distinguishes three states so that a validation
//! chain can keep collecting failures after it meets a missing value,
//! instead of stopping at the first `None`.

// ============================================================================
// VALIDATION TARGET
// ============================================================================

/// A value under validation.
///
/// - `Valid(value)`: a present value
/// - `Null`: a value that is legitimately absent (`None`)
/// - `Invalid`: a value that could not be computed, e.g. the length of a
///   `None` string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationTarget<T> {
    /// A present value.
    Valid(T),
    /// An absent value.
    Null,
    /// A value that could not be computed.
    Invalid,
}

impl<T> ValidationTarget<T> {
    /// Wraps a present value.
    pub const fn valid(value: T) -> Self {
        Self::Valid(value)
    }

    /// Returns the invalid target.
    pub const fn invalid() -> Self {
        Self::Invalid
    }

    /// Converts `None` into [`ValidationTarget::Null`].
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Valid)
    }

    /// Returns `true` for `Valid` and `Null`.
    pub const fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }

    /// Returns `true` if the value is absent.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the present value, if any.
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Null | Self::Invalid => None,
        }
    }

    /// Borrows the value.
    pub const fn as_ref(&self) -> ValidationTarget<&T> {
        match self {
            Self::Valid(value) => ValidationTarget::Valid(value),
            Self::Null => ValidationTarget::Null,
            Self::Invalid => ValidationTarget::Invalid,
        }
    }

    /// Turns a `Null` target into `Invalid`, leaving the other states alone.
    ///
    /// Derived values (lengths, keys, trimmed strings) use this: a derived
    /// value of something absent cannot be computed.
    #[must_use]
    pub fn undefined_or_null_to_invalid(self) -> Self {
        match self {
            Self::Null => Self::Invalid,
            other => other,
        }
    }

    /// Applies `f` to a present value.
    ///
    /// `Null` and `Invalid` pass through unchanged.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ValidationTarget<U> {
        match self {
            Self::Valid(value) => ValidationTarget::Valid(f(value)),
            Self::Null => ValidationTarget::Null,
            Self::Invalid => ValidationTarget::Invalid,
        }
    }

    /// Returns `true` if the target has no value or `predicate` rejects it.
    ///
    /// Every validator predicate goes through this single check.
    pub fn validation_failed(&self, predicate: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Self::Valid(value) => !predicate(value),
            Self::Null | Self::Invalid => true,
        }
    }

    /// Returns the value, or `default` if there is none.
    pub fn or(self, default: T) -> T {
        match self {
            Self::Valid(value) => value,
            Self::Null | Self::Invalid => default,
        }
    }

    /// Returns the value, or computes one if there is none.
    pub fn or_else(self, f: impl FnOnce() -> T) -> T {
        match self {
            Self::Valid(value) => value,
            Self::Null | Self::Invalid => f(),
        }
    }

    /// Runs `f` on a present value.
    pub fn if_valid(&self, f: impl FnOnce(&T)) {
        if let Self::Valid(value) = self {
            f(value);
        }
    }

    /// Returns the value, or the error built by `error`.
    pub fn or_throw<E>(self, error: impl FnOnce() -> E) -> Result<T, E> {
        match self {
            Self::Valid(value) => Ok(value),
            Self::Null | Self::Invalid => Err(error()),
        }
    }
}

impl<T> From<Option<T>> for ValidationTarget<T> {
    fn from(value: Option<T>) -> Self {
        Self::from_option(value)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_map_skips_absent_values() {
        assert_eq!(ValidationTarget::valid(3).map(|v| v * 2), ValidationTarget::Valid(6));
        assert_eq!(ValidationTarget::<i32>::Null.map(|v| v * 2), ValidationTarget::Null);
        assert_eq!(ValidationTarget::<i32>::invalid().map(|v| v * 2), ValidationTarget::Invalid);
    }

    #[test]
    fn test_null_to_invalid() {
        assert_eq!(
            ValidationTarget::<i32>::Null.undefined_or_null_to_invalid(),
            ValidationTarget::Invalid
        );
        assert_eq!(
            ValidationTarget::valid(1).undefined_or_null_to_invalid(),
            ValidationTarget::Valid(1)
        );
    }

    #[rstest]
    #[case(ValidationTarget::Valid(5), false)]
    #[case(ValidationTarget::Valid(-5), true)]
    #[case(ValidationTarget::Null, true)]
    #[case(ValidationTarget::Invalid, true)]
    fn test_validation_failed(#[case] target: ValidationTarget<i32>, #[case] expected: bool) {
        assert_eq!(target.validation_failed(|v| *v > 0), expected);
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(ValidationTarget::valid(1).or(7), 1);
        assert_eq!(ValidationTarget::Null.or(7), 7);
        assert_eq!(ValidationTarget::<i32>::Invalid.or_else(|| 9), 9);
        assert_eq!(ValidationTarget::<i32>::Null.or_throw(|| "missing"), Err("missing"));
        assert_eq!(ValidationTarget::valid(2).or_throw(|| "missing"), Ok(2));
    }

    #[test]
    fn test_if_valid_only_runs_for_values() {
        let mut seen = Vec::new();
        ValidationTarget::valid(4).if_valid(|v| seen.push(*v));
        ValidationTarget::<i32>::Null.if_valid(|v| seen.push(*v));
        assert_eq!(seen, vec![4]);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(ValidationTarget::from(Some(1)), ValidationTarget::Valid(1));
        assert_eq!(ValidationTarget::<i32>::from(None), ValidationTarget::Null);
        assert!(ValidationTarget::<i32>::Null.is_valid());
        assert!(!ValidationTarget::<i32>::Invalid.is_valid());
    }
}
