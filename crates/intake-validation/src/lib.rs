//! Intake Validation Core
//!
//! Field-level rules for the intake form, error aggregation, and the
//! sanitized view of submitted data. Pure and synchronous: every request
//! builds its own [`Validator`] and throws it away afterwards.

pub mod config;
pub mod field;
pub mod messages;
pub mod rules;
pub mod sanitize;
pub mod strength;
pub mod validator;

// Re-export the public surface
pub use config::{Country, CountryTable, ValidationConfig};
pub use field::{Field, FieldValues, UnknownField};
pub use messages::{ErrorKind, SuccessMessage};
pub use sanitize::sanitize;
pub use strength::{is_strong_password, PasswordStrength};
pub use validator::{
    check_field, check_submission, ErrorMap, FieldCheck, FieldError, SanitizedRecord,
    SubmissionCheck, Validator,
};
