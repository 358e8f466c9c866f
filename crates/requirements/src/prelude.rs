//! Prelude module for convenient imports.
//!
//! Brings the entry points, the validator traits and the error types into
//! scope with a single `use nebula_requirements::prelude::*;`.

// ============================================================================
// ENTRY POINTS
// ============================================================================

pub use crate::validators::{
    Validators, assert_that, assert_that_and_return, check_if, require_that,
};

// ============================================================================
// TRAITS: Predicates are trait methods and need to be in scope
// ============================================================================

pub use crate::validator::{ComparableValidator, EqualityValidator, Validatable, Validator};

// ============================================================================
// ERRORS AND CONFIGURATION
// ============================================================================

pub use crate::config::{Configuration, MutableConfiguration};
pub use crate::error::{ErrorKind, ValidationError};
pub use crate::failure::ValidationFailures;
