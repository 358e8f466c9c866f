//! # nebula-requirements
//!
//! Fluent precondition, postcondition and invariant checks with failure
//! messages that explain themselves.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nebula_requirements::prelude::*;
//!
//! fn connect(host: &str, port: u16) -> Result<(), ValidationError> {
//!     require_that(host, "host").is_not_blank().else_throw()?;
//!     require_that(port, "port").is_between_closed(1, 65535).else_throw()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modes
//!
//! - [`require_that`]: stops at the first failure, for preconditions.
//! - [`check_if`]: records every failure, for reporting all problems at once.
//! - [`assert_that`]: like `require_that`, but only runs while assertions
//!   are enabled and reports assertion errors.
//!
//! ## Failure Messages
//!
//! Messages name the value, state the broken rule and list the value as
//! context. Long or multi-line values are compared with a diff:
//!
//! ```text
//! "actual" had an unexpected value.
//!
//! actual  : "foosball    "
//! diff    :  ----    ++++
//! expected: "    ballroom"
//!
//! Legend
//! ------
//! +       : Add this character to the value
//! -       : Remove this character from the value
//! ```
//!
//! Diffs are rendered with ANSI colors when the terminal supports them;
//! see [`TerminalEncoding`] and [`GlobalConfiguration`].

pub mod config;
pub mod diff;
pub mod error;
pub mod failure;
mod macros;
pub mod mappers;
pub mod message;
pub mod prelude;
pub mod target;
pub mod terminal;
pub mod validator;
pub mod validators;

// Public API - errors and results
pub use error::{ErrorKind, ValidationError};
pub use failure::{ValidationFailure, ValidationFailures};
pub use target::ValidationTarget;

// Public API - configuration
pub use config::{Configuration, GlobalConfiguration, MutableConfiguration};
pub use mappers::{StringMappers, Type};
pub use terminal::TerminalEncoding;

// Public API - validators
pub use validator::{ComparableValidator, EqualityValidator, Validatable, Validator};
pub use validators::{
    ConfigurationUpdater, Validators, assert_that, assert_that_and_return, check_if,
    require_that,
};
