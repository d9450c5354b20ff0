//! Per-request validator
//!
//! A [`Validator`] owns one submission's values and the errors found in them.
//! Build a fresh one for every validation pass: errors are never cleared, so
//! a field that failed and later passes on the same instance keeps its old
//! message.

use crate::config::ValidationConfig;
use crate::field::{Field, FieldValues};
use crate::messages::ErrorKind;
use crate::rules::{rules_for, RuleInput};
use crate::sanitize::sanitize;
use crate::strength::PasswordStrength;
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

/// Field → message, in form order
pub type ErrorMap = BTreeMap<Field, String>;

/// Wire key → trimmed, escaped value, secrets removed
pub type SanitizedRecord = BTreeMap<String, String>;

/// Fields run by [`Validator::validate_all`], in order. The confirmation
/// field is covered by the password check.
const VALIDATE_ALL_ORDER: [Field; 7] = [
    Field::Name,
    Field::Email,
    Field::Phone,
    Field::Password,
    Field::Age,
    Field::Country,
    Field::Message,
];

/// A recorded failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Validator<'c> {
    data: FieldValues,
    errors: BTreeMap<Field, FieldError>,
    config: &'c ValidationConfig,
}

impl Validator<'static> {
    /// Validator over `data` using the process-wide configuration
    pub fn new(data: FieldValues) -> Self {
        Self::with_config(data, ValidationConfig::global())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'c> Validator<'c> {
    pub fn with_config(data: FieldValues, config: &'c ValidationConfig) -> Self {
        Self {
            data,
            errors: BTreeMap::new(),
            config,
        }
    }

    /// Raw submitted value, "" when the field was not sent
    pub fn value(&self, field: Field) -> &str {
        self.data
            .get(field.as_str())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn config(&self) -> &ValidationConfig {
        self.config
    }

    /// Run every field check. True iff no error was recorded.
    pub fn validate_all(&mut self) -> bool {
        for field in VALIDATE_ALL_ORDER {
            self.run(field);
        }
        self.errors.is_empty()
    }

    /// Dispatch to a single field's check
    pub fn validate_field(&mut self, field: Field) -> bool {
        self.run(field)
    }

    pub fn validate_name(&mut self) -> bool {
        self.run(Field::Name)
    }

    pub fn validate_email(&mut self) -> bool {
        self.run(Field::Email)
    }

    /// Optional: an empty phone is valid
    pub fn validate_phone(&mut self) -> bool {
        self.run(Field::Phone)
    }

    /// Presence, strength, then confirmation. A mismatch is recorded
    /// against `confirmPassword`, not `password`.
    pub fn validate_password(&mut self) -> bool {
        self.run(Field::Password)
    }

    /// Confirmation on its own: present and equal to `password`
    pub fn validate_confirm_password(&mut self) -> bool {
        self.run(Field::ConfirmPassword)
    }

    pub fn validate_age(&mut self) -> bool {
        self.run(Field::Age)
    }

    pub fn validate_country(&mut self) -> bool {
        self.run(Field::Country)
    }

    /// Optional: an empty message is valid
    pub fn validate_message(&mut self) -> bool {
        self.run(Field::Message)
    }

    fn run(&mut self, field: Field) -> bool {
        let table = rules_for(field);

        let failure = {
            let raw = self.value(field);
            let value = if table.trim { raw.trim() } else { raw };
            if table.optional && value.is_empty() {
                return true;
            }

            let input = RuleInput::new(value, self.config, &self.data);
            table
                .rules
                .iter()
                .find(|rule| !(rule.check)(&input))
                .map(|rule| (rule.target.unwrap_or(field), rule.kind))
        };

        match failure {
            None => true,
            Some((target, kind)) => {
                if kind == ErrorKind::PasswordWeak {
                    let missing = self.password_strength().missing();
                    debug!(field = %field, ?kind, ?missing, "field failed validation");
                } else {
                    debug!(field = %field, target = %target, ?kind, "field failed validation");
                }
                self.add_error(target, kind);
                false
            }
        }
    }

    /// Strength breakdown of the submitted password
    pub fn password_strength(&self) -> PasswordStrength {
        PasswordStrength::assess(self.value(Field::Password), self.config.min_password_length)
    }

    /// Record a failure, replacing any earlier error for the same field
    pub fn add_error(&mut self, field: Field, kind: ErrorKind) {
        let message = kind.message(self.config);
        self.errors.insert(field, FieldError { kind, message });
    }

    /// Full error mapping
    pub fn errors(&self) -> ErrorMap {
        self.errors
            .iter()
            .map(|(field, error)| (*field, error.message.clone()))
            .collect()
    }

    pub fn into_errors(self) -> ErrorMap {
        self.errors
            .into_iter()
            .map(|(field, error)| (field, error.message))
            .collect()
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(|e| e.message.as_str())
    }

    pub fn error_kind(&self, field: Field) -> Option<ErrorKind> {
        self.errors.get(&field).map(|e| e.kind)
    }

    pub fn has_error(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Every submitted value trimmed and escaped, with password fields
    /// dropped. Built fresh on each call.
    pub fn sanitized_data(&self) -> SanitizedRecord {
        self.data
            .iter()
            .filter(|(key, _)| !Field::from_str(key).is_ok_and(|f| f.is_secret()))
            .map(|(key, value)| (key.clone(), sanitize(value)))
            .collect()
    }
}

/// Outcome of checking one field in isolation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldCheck {
    Valid,
    Invalid(String),
    UnknownField,
}

impl FieldCheck {
    pub fn valid(&self) -> bool {
        matches!(self, FieldCheck::Valid)
    }

    pub fn message(&self) -> &str {
        match self {
            FieldCheck::Valid => "Valid",
            FieldCheck::Invalid(message) => message,
            FieldCheck::UnknownField => "Unknown field",
        }
    }
}

/// Check a single field by wire name, with the whole submission available
/// for cross-field rules.
///
/// When the failure lands on another field (a password mismatch is reported
/// on `confirmPassword`) that message is returned.
pub fn check_field(name: &str, data: FieldValues) -> FieldCheck {
    let Ok(field) = name.parse::<Field>() else {
        return FieldCheck::UnknownField;
    };

    let mut validator = Validator::new(data);
    if validator.validate_field(field) {
        return FieldCheck::Valid;
    }

    let message = validator
        .error(field)
        .or_else(|| validator.errors.values().next().map(|e| e.message.as_str()))
        .unwrap_or("Validation failed")
        .to_string();
    FieldCheck::Invalid(message)
}

/// Outcome of validating a complete submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionCheck {
    pub valid: bool,
    pub errors: ErrorMap,
    /// Present only when `valid`
    pub sanitized: Option<SanitizedRecord>,
}

pub fn check_submission(data: FieldValues) -> SubmissionCheck {
    let mut validator = Validator::new(data);
    let valid = validator.validate_all();
    let sanitized = valid.then(|| validator.sanitized_data());

    SubmissionCheck {
        valid,
        errors: validator.into_errors(),
        sanitized,
    }
}
