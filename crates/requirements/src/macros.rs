//! Macros for opting user types into validation.
//!
//! # Examples
//!
//! ```rust,ignore
//! use nebula_requirements::prelude::*;
//!
//! #[derive(Debug, PartialEq, PartialOrd)]
//! struct Version(u32, u32);
//!
//! nebula_requirements::validatable_object!(Version);
//!
//! require_that(Version(1, 4), "version")
//!     .is_greater_than_or_equal_to(Version(1, 2))
//!     .else_throw()?;
//! ```

// ============================================================================
// VALIDATABLE OBJECT MACRO
// ============================================================================

/// Implements [`Validatable`](crate::Validatable) for one or more types,
/// validating them with an [`ObjectValidator`](crate::validator::ObjectValidator).
///
/// The types must be `Debug + 'static`. Values render through the
/// configured string mappers, falling back to `Debug`.
#[macro_export]
macro_rules! validatable_object {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Validatable for $ty {
                type Value = $ty;
                type Validator = $crate::validator::ObjectValidator<$ty>;

                fn into_target(self) -> $crate::ValidationTarget<$ty> {
                    $crate::ValidationTarget::Valid(self)
                }

                fn validator(
                    core: $crate::validator::ValidatorCore<$ty>,
                ) -> $crate::validator::ObjectValidator<$ty> {
                    $crate::validator::ObjectValidator::new(core)
                }
            }
        )+
    };
}
